//! Input, view, and search status state types for the application.
//!
//! This module defines the state machine enums that control user interaction
//! and the lifecycle of a search. These types determine which keybindings
//! are active, which list is displayed, and what the status line shows.
//!
//! # State Machine
//!
//! The search lifecycle moves through four observable modes:
//!
//! ```text
//! Idle ──submit──> Loading(1) ──ok──> Loaded(p, has_more) ──load more──> Loading(p+1)
//!                      │                     │
//!                      └──fail/empty──> Error(message) ──submit──> Loading(1)
//! ```
//!
//! At most one fetch is outstanding: load-more is accepted only from
//! `Loaded` with `has_more` set, and a submit while loading supersedes the
//! in-flight request (its response is discarded by generation).

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    ///
    /// Available keybindings: j/k (navigate), / (edit query), Tab (field),
    /// Space (toggle favorite), Enter (open), m (load more), b/f (views),
    /// q (quit).
    Normal,

    /// The search form input field has focus.
    ///
    /// Characters append to the query buffer; Enter submits, Esc returns to
    /// normal mode without clearing the buffer.
    Editing,
}

/// Which list the main panel displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    /// Search results for the active query.
    Results,

    /// The persisted favorites sequence.
    Favorites,
}

/// Lifecycle of the current search operation.
///
/// Replaced wholesale on every transition; the result list itself lives
/// separately in [`AppState`](crate::app::AppState) so a failed load-more
/// can report an error without discarding already-fetched pages.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchStatus {
    /// No search has been submitted yet.
    #[default]
    Idle,

    /// A fetch for the given page is in flight.
    Loading {
        /// Page number being fetched (1-based).
        page: u32,
    },

    /// The last fetch resolved successfully.
    Loaded {
        /// Most recently fetched page number.
        page: u32,
        /// Whether further pages exist beyond the fetched ones.
        has_more: bool,
    },

    /// The last operation failed; the message is shown inline.
    Error {
        /// User-visible failure message.
        message: String,
    },
}

impl SearchStatus {
    /// Whether a fetch is currently outstanding.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }
}
