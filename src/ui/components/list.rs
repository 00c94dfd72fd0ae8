//! Book list component renderer.
//!
//! Renders the result or favorites list as a table with a favorite marker
//! and TITLE, AUTHORS, and YEAR columns, with selection highlighting.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListRow;

/// Width of the favorite marker column.
const MARKER_WIDTH: usize = 2;

/// Width of the title column, matching the view model truncation.
const TITLE_WIDTH: usize = 40;

/// Width of the authors column, matching the view model truncation.
const AUTHORS_WIDTH: usize = 30;

/// Renders the column headers at the specified row.
///
/// Returns the next available row.
pub fn render_list_headers(row: usize, theme: &Theme) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(
        "{}{:<title_w$}  {:<authors_w$}  {}",
        " ".repeat(MARKER_WIDTH),
        "TITLE",
        "AUTHORS",
        "YEAR",
        title_w = TITLE_WIDTH,
        authors_w = AUTHORS_WIDTH
    );
    print!("{}", Theme::reset());
    row + 1
}

/// Renders all list rows starting at the specified row.
///
/// Returns the next available row.
pub fn render_list_rows(row: usize, items: &[ListRow], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;
    for item in items {
        current_row = render_list_row(current_row, item, theme, cols);
    }
    current_row
}

/// Renders a single list row at the specified row position.
///
/// Layout: favorite marker, title column, authors column, year. The row is
/// padded to fill the entire terminal width so the selection background is
/// consistent.
fn render_list_row(row: usize, item: &ListRow, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    if item.is_favorite {
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.favorite_fg));
        }
        print!("\u{2605} ");
        if !item.is_selected {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
    } else {
        print!("{}", " ".repeat(MARKER_WIDTH));
    }

    print!(
        "{:<title_w$}  {:<authors_w$}  {}",
        item.title,
        item.authors,
        item.year,
        title_w = TITLE_WIDTH,
        authors_w = AUTHORS_WIDTH
    );

    let line_len = MARKER_WIDTH
        + TITLE_WIDTH.max(item.title.chars().count())
        + 2
        + AUTHORS_WIDTH.max(item.authors.chars().count())
        + 2
        + item.year.chars().count();
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
