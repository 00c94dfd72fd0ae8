//! Status notice component renderer.
//!
//! Renders the single status line between the search form and the list:
//! inline error messages, the loading indicator, or the empty state hint
//! for the current view.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{NoticeInfo, NoticeKind};

/// Renders the notice line at the specified row.
///
/// The row is always consumed, blank when there is no notice, so the list
/// below does not shift between frames. Returns the next available row.
pub fn render_notice(row: usize, notice: Option<&NoticeInfo>, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let Some(notice) = notice else {
        print!("{}", " ".repeat(cols));
        return row + 1;
    };

    let msg_len = notice.message.chars().count().min(cols);
    let padding = cols.saturating_sub(msg_len) / 2;

    match notice.kind {
        NoticeKind::Error => print!("{}", Theme::fg(&theme.colors.error_fg)),
        NoticeKind::Loading => print!("{}", Theme::fg(&theme.colors.empty_state_fg)),
        NoticeKind::Empty => {
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.text_dim));
        }
    }

    print!("{}", " ".repeat(padding));
    print!("{}", notice.message);
    print!("{}", " ".repeat(cols.saturating_sub(padding + msg_len)));
    print!("{}", Theme::reset());
    row + 1
}
