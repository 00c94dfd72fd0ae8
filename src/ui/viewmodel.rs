//! View model types representing renderable UI state.
//!
//! This module defines immutable view models computed from application
//! state. View models are created via `AppState::compute_viewmodel()` and
//! consumed by the renderer; they contain no business logic, only
//! display-ready data.

/// Complete UI view model for rendering.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    /// Visible window of list rows (results or favorites).
    pub rows: Vec<ListRow>,

    /// Index of the selected row within the visible window.
    pub selected_index: usize,

    /// Header information (title, counts).
    pub header: HeaderInfo,

    /// Footer information (keybinding hints).
    pub footer: FooterInfo,

    /// Search form state; the form is always visible.
    pub search_bar: SearchBarInfo,

    /// Optional status notice (error, loading, empty hint).
    pub notice: Option<NoticeInfo>,

    /// Detail pane for the selected record, absent when the list is empty.
    pub detail: Option<DetailInfo>,
}

/// Display information for a single book row.
#[derive(Debug, Clone)]
pub struct ListRow {
    /// Title, truncated to the column width.
    pub title: String,

    /// Author display string, truncated to the column width.
    pub authors: String,

    /// First-publish year, or an em-dash when absent.
    pub year: String,

    /// Whether this record is in the favorites sequence.
    pub is_favorite: bool,

    /// Whether this row is currently selected.
    pub is_selected: bool,
}

/// Header display information.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    /// Title text to display in the header.
    pub title: String,
}

/// Footer display information.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text.
    pub keybindings: String,
}

/// Search form display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    /// Current form buffer text.
    pub query: String,

    /// Label of the active field selector.
    pub field_label: String,

    /// Whether the input field has focus.
    pub editing: bool,
}

/// What kind of notice the status line shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// An inline failure message.
    Error,
    /// A fetch is in flight.
    Loading,
    /// The current view has nothing to show yet.
    Empty,
}

/// Status notice display information.
#[derive(Debug, Clone)]
pub struct NoticeInfo {
    /// Which styling the notice uses.
    pub kind: NoticeKind,

    /// Notice text.
    pub message: String,
}

/// Detail pane for the selected record.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    /// Cover image URL, or a placeholder when the record has no cover.
    pub cover: String,

    /// Outbound Open Library URL, or a placeholder when there is no page.
    pub link: String,
}
