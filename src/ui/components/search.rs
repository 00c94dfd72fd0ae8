//! Search form component renderer.
//!
//! Renders the search input box with a bordered frame, the active field
//! selector, and the query buffer. The form is always visible; the border
//! brightens while the input field has focus.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 5;

/// Renders the search form at the specified row.
///
/// Displays a 3-line bordered box containing the field selector and query
/// text, e.g. ` Search [Title]: harry potter`. When the input field has
/// focus a block cursor is appended and the border uses the highlight
/// color. Returns the next available row (row + 3).
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);

    let border_color = if search.editing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("\u{250c}{}\u{2510}", "\u{2500}".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.editing { "\u{258f}" } else { "" };
    let search_text = format!(
        " Search [{}]: {}{cursor}",
        search.field_label, search.query
    );
    let padding = inner_width.saturating_sub(search_text.chars().count());

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("\u{2502}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(border_color));
    print!("\u{2502}");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border_color));
    print!("\u{2514}{}\u{2518}", "\u{2500}".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
