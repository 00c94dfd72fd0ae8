//! Composable UI component renderers.
//!
//! This module provides specialized rendering components for the different
//! parts of the interface, each responsible for one region of the screen.
//!
//! # Components
//!
//! - [`header`]: Title bar with view name and counts
//! - [`footer`]: Keybinding hints
//! - [`search`]: The search form (bordered input box with field selector)
//! - [`list`]: Book list with TITLE, AUTHORS, and YEAR columns
//! - [`notice`]: Status line (error, loading, empty hint)
//! - [`detail`]: Cover URL and outbound link for the selected record
//!
//! # Layout
//!
//! ```text
//! [blank line]
//! [Header]
//! [Border]
//! [Search form - 3 lines]
//! [Notice line]
//! [Column headers]
//! [List rows ...]
//! [Detail - 2 lines]
//! [Border]
//! [Footer]
//! ```

mod detail;
mod footer;
mod header;
mod list;
mod notice;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

use detail::render_detail;
use footer::render_footer;
use header::render_header;
use list::{render_list_headers, render_list_rows};
use notice::render_notice;
use search::render_search_bar;

/// Renders a horizontal border line at the specified row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "\u{2500}".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders the full screen layout from a view model.
///
/// The search form is always visible; the notice line is reserved even when
/// empty so the list does not jump between frames.
pub fn render_screen(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let mut current_row = 2; // Start at row 2 (skip blank line at row 1)

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    current_row = render_notice(current_row, vm.notice.as_ref(), theme, cols);
    current_row = render_list_headers(current_row, theme);
    let _current_row = render_list_rows(current_row, &vm.rows, theme, cols);

    let footer_start = rows.saturating_sub(1);
    let border_row = footer_start.saturating_sub(1);
    let detail_start = border_row.saturating_sub(2);

    render_detail(detail_start, vm.detail.as_ref(), theme, cols);
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_start, &vm.footer, theme, cols);
}
