//! Actions representing side effects to be executed by the plugin runtime.
//!
//! This module defines the [`Action`] type, which represents imperative
//! commands produced by the event handler after processing user input or
//! system events. Actions bridge pure state transformations and effectful
//! operations like issuing web requests, opening links, or communicating
//! with the background worker.
//!
//! The event handler returns a `Vec<Action>` after processing each event,
//! and the plugin runtime executes them in sequence.

use crate::api::SearchField;
use crate::worker::WorkerMessage;

/// Commands representing side effects to be executed by the plugin runtime.
///
/// Actions are produced by the event handler and executed by the action
/// processor in main.rs. They represent the boundary between pure state
/// transformations and effectful operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Closes the focused floating pane, hiding the plugin UI.
    CloseFocus,

    /// Posts a message to the background worker thread.
    ///
    /// Used to mirror every favorites mutation into durable storage and to
    /// read the slot at startup, without blocking the main event loop.
    PostToWorker(WorkerMessage),

    /// Issues the single outstanding search request for one page.
    ///
    /// The generation id rides along in the request context and is compared
    /// on arrival; responses from superseded requests are discarded.
    FetchPage {
        /// Trimmed search term.
        term: String,
        /// Field selector for the query parameter.
        field: SearchField,
        /// Page number to fetch (1-based).
        page: u32,
        /// Request generation at submit time.
        generation: u64,
    },

    /// Opens a URL in the host's default browser.
    OpenUrl {
        /// Absolute URL to open.
        url: String,
    },
}
