//! Application state management and view model computation.
//!
//! This module defines [`AppState`], the central state container for the
//! plugin, along with the favorites mutation rules and UI view model
//! generation. It is the single owner of all mutable state: the result
//! list, the favorites sequence, the pagination bookkeeping, and the
//! request generation counter.
//!
//! # State Components
//!
//! - **Books**: Result records for the active query, in arrival order
//! - **Favorites**: Persisted favorites sequence, most recently added first
//! - **Status**: The Idle/Loading/Loaded/Error search lifecycle
//! - **Query buffer + field selector**: The search form's own state
//! - **Generation**: Monotonic request counter used to discard stale responses
//! - **Selection / modes**: Cursor position, input mode, and active view
//!
//! # View Model Computation
//!
//! `compute_viewmodel` transforms a state snapshot into a renderable
//! representation, handling list windowing, column truncation, the status
//! notice, and the detail pane for the selected record.

use crate::api::SearchField;
use crate::domain::book::format_year;
use crate::domain::{BookRecord, FavoriteRecord};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    DetailInfo, FooterInfo, HeaderInfo, ListRow, NoticeInfo, NoticeKind, SearchBarInfo,
    UIViewModel,
};
use crate::ui::helpers::truncate_with_ellipsis;

use super::modes::{InputMode, SearchStatus, ViewMode};

/// Width of the title column in list rows.
const TITLE_COLUMN_WIDTH: usize = 40;

/// Width of the authors column in list rows.
const AUTHORS_COLUMN_WIDTH: usize = 30;

/// Rows of UI chrome around the list: blank line, header, border, search
/// box (3), notice line, column headers, detail pane (2), border, footer.
const CHROME_ROWS: usize = 12;

/// The `(term, field)` pair of the currently active query.
///
/// Captured at submit time so load-more keeps fetching the submitted query
/// even while the user edits the form buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveQuery {
    /// Trimmed search term.
    pub term: String,
    /// Field selector the term was submitted under.
    pub field: SearchField,
}

/// Central application state container.
///
/// Mutated exclusively by the event handler in response to user input,
/// search responses, and worker responses. View models are computed
/// on-demand from state snapshots.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Result records for the active query.
    ///
    /// Replaced wholesale when page 1 resolves, appended to by later pages.
    pub books: Vec<BookRecord>,

    /// The favorites sequence, most recently favorited first.
    ///
    /// Owned here and mirrored 1:1 into durable storage after every
    /// mutation via a worker message.
    pub favorites: Vec<FavoriteRecord>,

    /// Lifecycle of the current search operation.
    pub status: SearchStatus,

    /// The search form's input buffer.
    ///
    /// Editable at any time, including while a fetch is in flight; only a
    /// submit reads it.
    pub query: String,

    /// Field selector shown in the search form, cycled with Tab.
    pub field: SearchField,

    /// The `(term, field)` pair of the last submitted search.
    pub active: Option<ActiveQuery>,

    /// Monotonic request generation.
    ///
    /// Incremented on every fetch; a response whose echoed generation does
    /// not match is stale and gets discarded.
    pub generation: u64,

    /// Zero-based cursor position within the current view's list.
    pub selected_index: usize,

    /// Current input handling mode.
    pub input_mode: InputMode,

    /// Which list the main panel displays.
    pub view_mode: ViewMode,

    /// Color scheme for UI rendering.
    pub theme: Theme,
}

impl AppState {
    /// Creates a new application state with initial favorites and theme.
    ///
    /// The favorites list is typically empty until the worker loads the
    /// stored slot shortly after startup.
    #[must_use]
    pub fn new(favorites: Vec<FavoriteRecord>, theme: Theme) -> Self {
        Self {
            books: vec![],
            favorites,
            status: SearchStatus::Idle,
            query: String::new(),
            field: SearchField::default(),
            active: None,
            generation: 0,
            selected_index: 0,
            input_mode: InputMode::Normal,
            view_mode: ViewMode::Results,
            theme,
        }
    }

    /// Length of the list the current view displays.
    #[must_use]
    pub fn visible_len(&self) -> usize {
        match self.view_mode {
            ViewMode::Results => self.books.len(),
            ViewMode::Favorites => self.favorites.len(),
        }
    }

    /// Moves the cursor down by one position, wrapping to the top at the end.
    pub fn move_selection_down(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Moves the cursor up by one position, wrapping to the bottom at the start.
    pub fn move_selection_up(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Clamps the cursor to the current list bounds.
    pub fn clamp_selection(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(len - 1);
        }
    }

    /// The selected result record, if the results view has one.
    #[must_use]
    pub fn selected_book(&self) -> Option<&BookRecord> {
        self.books.get(self.selected_index)
    }

    /// The selected favorite, if the favorites view has one.
    #[must_use]
    pub fn selected_favorite(&self) -> Option<&FavoriteRecord> {
        self.favorites.get(self.selected_index)
    }

    /// Whether a record is currently favorited, by derived key.
    #[must_use]
    pub fn is_favorite(&self, book: &BookRecord) -> bool {
        let key = book.derived_key();
        self.favorites.iter().any(|f| f.key == key)
    }

    /// Toggles a record in the favorites sequence.
    ///
    /// Removes the record when its derived key is already present, otherwise
    /// prepends the trimmed projection. Pure and synchronous; applying it
    /// twice with the same record restores the prior sequence.
    pub fn toggle_favorite(&mut self, book: &BookRecord) {
        let key = book.derived_key();
        if self.favorites.iter().any(|f| f.key == key) {
            tracing::debug!(key = %key, "removing favorite");
            self.favorites.retain(|f| f.key != key);
        } else {
            tracing::debug!(key = %key, title = %book.title, "adding favorite");
            self.favorites.insert(0, FavoriteRecord::from_book(book));
        }
    }

    /// Removes a favorite by its stored key. Returns whether one was removed.
    pub fn remove_favorite(&mut self, key: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.key != key);
        self.favorites.len() != before
    }

    /// Computes a renderable UI view model from current state and terminal
    /// dimensions.
    ///
    /// Handles windowing (showing the slice of the list around the cursor),
    /// column truncation, the status notice, and the detail pane for the
    /// selected record.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = Self::calculate_available_rows(rows);
        let len = self.visible_len();

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(len);

        let actual_count = visible_end.saturating_sub(visible_start);
        if actual_count < available_rows && len >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let rows_vm = match self.view_mode {
            ViewMode::Results => self.compute_result_rows(visible_start, visible_end),
            ViewMode::Favorites => self.compute_favorite_rows(visible_start, visible_end),
        };

        let selected_display_index = self.selected_index.saturating_sub(visible_start);

        UIViewModel {
            rows: rows_vm,
            selected_index: selected_display_index,
            header: self.compute_header(),
            footer: self.compute_footer(),
            search_bar: self.compute_search_bar(),
            notice: self.compute_notice(),
            detail: self.compute_detail(cols),
        }
    }

    fn compute_result_rows(&self, start: usize, end: usize) -> Vec<ListRow> {
        self.books[start..end]
            .iter()
            .enumerate()
            .map(|(relative_idx, book)| ListRow {
                title: truncate_with_ellipsis(&book.title, TITLE_COLUMN_WIDTH),
                authors: truncate_with_ellipsis(&book.display_authors(), AUTHORS_COLUMN_WIDTH),
                year: format_year(book.first_publish_year),
                is_favorite: self.is_favorite(book),
                is_selected: start + relative_idx == self.selected_index,
            })
            .collect()
    }

    fn compute_favorite_rows(&self, start: usize, end: usize) -> Vec<ListRow> {
        self.favorites[start..end]
            .iter()
            .enumerate()
            .map(|(relative_idx, favorite)| ListRow {
                title: truncate_with_ellipsis(&favorite.title, TITLE_COLUMN_WIDTH),
                authors: truncate_with_ellipsis(&favorite.display_authors(), AUTHORS_COLUMN_WIDTH),
                year: format_year(favorite.first_publish_year),
                is_favorite: true,
                is_selected: start + relative_idx == self.selected_index,
            })
            .collect()
    }

    /// Computes header information based on current view mode.
    fn compute_header(&self) -> HeaderInfo {
        let title = match self.view_mode {
            ViewMode::Results => {
                let more = match self.status {
                    SearchStatus::Loaded { has_more: true, .. } => "+",
                    _ => "",
                };
                format!(" Book Finder \u{2014} Results ({}{more}) ", self.books.len())
            }
            ViewMode::Favorites => {
                format!(" Book Finder \u{2014} Favorites ({}) ", self.favorites.len())
            }
        };
        HeaderInfo { title }
    }

    /// Computes footer keybinding hints based on current input and view modes.
    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match (self.input_mode, self.view_mode) {
            (InputMode::Editing, _) => {
                "Enter: search  Tab: field  Esc: done  Type to edit the query".to_string()
            }
            (InputMode::Normal, ViewMode::Results) => {
                let mut hints = String::from(
                    "j/k: navigate  /: search  Space: favorite  Enter: open  f: favorites  q: quit",
                );
                if matches!(self.status, SearchStatus::Loaded { has_more: true, .. }) {
                    hints.push_str("  m: load more");
                }
                hints
            }
            (InputMode::Normal, ViewMode::Favorites) => {
                "j/k: navigate  Space: remove  Enter: open  b: results  /: search  q: quit"
                    .to_string()
            }
        };

        FooterInfo { keybindings }
    }

    /// Computes the search form state. The form is always visible.
    fn compute_search_bar(&self) -> SearchBarInfo {
        SearchBarInfo {
            query: self.query.clone(),
            field_label: self.field.label().to_string(),
            editing: self.input_mode == InputMode::Editing,
        }
    }

    /// Computes the status notice line.
    ///
    /// Priority: error, then loading, then the per-view empty hint.
    fn compute_notice(&self) -> Option<NoticeInfo> {
        match &self.status {
            SearchStatus::Error { message } => {
                return Some(NoticeInfo {
                    kind: NoticeKind::Error,
                    message: message.clone(),
                });
            }
            SearchStatus::Loading { page: 1 } => {
                return Some(NoticeInfo {
                    kind: NoticeKind::Loading,
                    message: "Searching\u{2026}".to_string(),
                });
            }
            SearchStatus::Loading { page } => {
                return Some(NoticeInfo {
                    kind: NoticeKind::Loading,
                    message: format!("Loading page {page}\u{2026}"),
                });
            }
            SearchStatus::Idle | SearchStatus::Loaded { .. } => {}
        }

        match self.view_mode {
            ViewMode::Results if self.books.is_empty() => Some(NoticeInfo {
                kind: NoticeKind::Empty,
                message: "Search Open Library \u{2014} try \"harry potter\".".to_string(),
            }),
            ViewMode::Favorites if self.favorites.is_empty() => Some(NoticeInfo {
                kind: NoticeKind::Empty,
                message: "No favorites yet. Press Space on a result to save it.".to_string(),
            }),
            _ => None,
        }
    }

    /// Computes the detail pane for the selected record.
    ///
    /// Shows the cover image URL (medium size for results, small thumbnail
    /// for favorites) with a placeholder when the record has no cover, and
    /// the outbound Open Library link when one exists.
    fn compute_detail(&self, cols: usize) -> Option<DetailInfo> {
        const NO_COVER: &str = "No cover";
        const NO_LINK: &str = "(no Open Library page)";

        let (cover, link) = match self.view_mode {
            ViewMode::Results => {
                let book = self.selected_book()?;
                (book.cover_url(), book.open_library_url())
            }
            ViewMode::Favorites => {
                let favorite = self.selected_favorite()?;
                (favorite.thumbnail_url(), favorite.open_library_url())
            }
        };

        let max = cols.saturating_sub(10);
        Some(DetailInfo {
            cover: truncate_with_ellipsis(&cover.unwrap_or_else(|| NO_COVER.to_string()), max),
            link: truncate_with_ellipsis(&link.unwrap_or_else(|| NO_LINK.to_string()), max),
        })
    }

    /// Calculates rows available for the list after subtracting UI chrome.
    const fn calculate_available_rows(total_rows: usize) -> usize {
        total_rows.saturating_sub(CHROME_ROWS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with_books(count: usize) -> AppState {
        let mut state = AppState::new(vec![], Theme::default());
        state.books = (0..count)
            .map(|i| BookRecord {
                key: Some(format!("/works/OL{i}W")),
                title: format!("Book {i}"),
                ..BookRecord::default()
            })
            .collect();
        state
    }

    #[test]
    fn selection_wraps_in_both_directions() {
        let mut state = state_with_books(3);
        assert_eq!(state.selected_index, 0);

        state.move_selection_up();
        assert_eq!(state.selected_index, 2);

        state.move_selection_down();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn selection_is_a_no_op_on_an_empty_list() {
        let mut state = state_with_books(0);
        state.move_selection_down();
        state.move_selection_up();
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn viewmodel_marks_the_selected_row() {
        let mut state = state_with_books(3);
        state.selected_index = 1;

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.rows.len(), 3);
        assert!(vm.rows[1].is_selected);
        assert!(!vm.rows[0].is_selected);
    }

    #[test]
    fn viewmodel_windows_long_lists_around_the_cursor() {
        let mut state = state_with_books(100);
        state.selected_index = 50;

        let vm = state.compute_viewmodel(30, 80);
        assert!(vm.rows.len() <= 30 - 12);
        assert!(vm.rows[vm.selected_index].is_selected);
    }

    #[test]
    fn favorites_view_rows_come_from_the_favorites_sequence() {
        let mut state = state_with_books(1);
        let book = state.books[0].clone();
        state.toggle_favorite(&book);
        state.view_mode = ViewMode::Favorites;
        state.selected_index = 0;

        let vm = state.compute_viewmodel(30, 80);
        assert_eq!(vm.rows.len(), 1);
        assert!(vm.rows[0].is_favorite);
    }

    #[test]
    fn detail_pane_shows_placeholders_for_missing_cover_and_key() {
        let mut state = AppState::new(vec![], Theme::default());
        state.books = vec![BookRecord {
            title: "Bare".to_string(),
            ..BookRecord::default()
        }];

        let vm = state.compute_viewmodel(30, 80);
        let detail = vm.detail.expect("selected row has a detail pane");
        assert_eq!(detail.cover, "No cover");
        assert_eq!(detail.link, "(no Open Library page)");
    }

    #[test]
    fn empty_results_show_the_search_hint() {
        let state = AppState::new(vec![], Theme::default());
        let vm = state.compute_viewmodel(30, 80);
        let notice = vm.notice.expect("empty idle view has a hint");
        assert_eq!(notice.kind, NoticeKind::Empty);
    }
}
