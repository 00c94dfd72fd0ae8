//! Error types for the Bibliofind plugin.
//!
//! This module defines the centralized error type [`BibliofindError`] and a
//! type alias [`Result`] for convenient error handling throughout the plugin.
//! All errors are implemented using the `thiserror` crate for automatic
//! `Error` trait implementation.
//!
//! The search-facing variants double as the user-visible messages rendered
//! inline by the UI: validation failures, HTTP failures with the numeric
//! status embedded, transport failures, decode failures, and the empty
//! result set on the first page. All of them are terminal for the current
//! operation only; the user can immediately retry with a new search.

use thiserror::Error;

/// The main error type for Bibliofind plugin operations.
///
/// This enum consolidates all error conditions that can occur during plugin
/// execution, from search request failures to storage and configuration
/// issues. The `Display` implementations of the search-facing variants are
/// shown verbatim in the UI status line.
#[derive(Debug, Error)]
pub enum BibliofindError {
    /// The search term was empty or whitespace-only at submit time.
    ///
    /// Raised by the controller before any network call is made.
    #[error("Please enter a search term.")]
    EmptyQuery,

    /// The first result page came back with zero records.
    ///
    /// Not a transport failure, but surfaced inline like one.
    #[error("No results found.")]
    NoResults,

    /// The search API responded with a non-success status code.
    #[error("API returned status {0}")]
    Http(u16),

    /// The transport itself failed (timeout, DNS, connection reset).
    ///
    /// The string carries the host-reported failure detail, or a generic
    /// fallback when the host provided none.
    #[error("{0}")]
    Network(String),

    /// The response body could not be decoded as a search envelope.
    #[error("Failed to decode search results: {0}")]
    Parse(String),

    /// Storage operation failed.
    ///
    /// Occurs when writing the favorites slot fails. Read-side corruption is
    /// not an error; it degrades to an empty favorites set.
    #[error("Storage error: {0}")]
    Storage(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Theme parsing or application failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Communication with the background worker failed.
    #[error("Worker communication error: {0}")]
    Worker(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A specialized `Result` type for Bibliofind operations.
///
/// This is a type alias for `std::result::Result<T, BibliofindError>` that
/// simplifies function signatures throughout the codebase.
pub type Result<T> = std::result::Result<T, BibliofindError>;
