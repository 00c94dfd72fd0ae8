//! Detail pane component renderer.
//!
//! Renders two lines for the selected record: the cover image URL (or a
//! placeholder) and the outbound Open Library link.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DetailInfo;

/// Renders the detail pane starting at the specified row.
///
/// Both lines are always consumed, blank when no record is selected.
/// Returns the next available row (row + 2).
pub fn render_detail(row: usize, detail: Option<&DetailInfo>, theme: &Theme, cols: usize) -> usize {
    let (cover, link) = match detail {
        Some(detail) => (detail.cover.as_str(), detail.link.as_str()),
        None => ("", ""),
    };

    render_labeled_line(row, "Cover", cover, theme, cols);
    render_labeled_line(row + 1, "Link", link, theme, cols);
    row + 2
}

fn render_labeled_line(row: usize, label: &str, value: &str, theme: &Theme, cols: usize) {
    position_cursor(row, 1);

    if value.is_empty() {
        print!("{}", " ".repeat(cols));
        return;
    }

    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("  {label:<6}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{value}");

    let used = 2 + 6 + value.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(used)));
    print!("{}", Theme::reset());
}
