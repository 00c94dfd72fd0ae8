//! Bibliofind: a Zellij plugin for searching Open Library from the terminal.
//!
//! Bibliofind is a terminal multiplexer plugin that provides:
//! - Interactive book search against the Open Library search API by title,
//!   author, or any field
//! - Paginated results with explicit load-more
//! - Favorites bookmarking, persisted to JSON file storage
//! - Asynchronous persistence via a Zellij worker thread
//!
//! # Architecture
//!
//! The crate follows a layered architecture pattern:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │  ← Business rules
//! │  - Action dispatching                               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Search Client │   │ Worker Layer  │
//! │ (ui/)         │   │ (api/)        │   │ (worker/)     │
//! │ - Rendering   │   │ - URL builder │   │ - Favorites   │
//! │ - Theming     │   │ - Envelope    │   │   slot I/O    │
//! │ - Components  │   │   parsing     │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain, Storage & Infrastructure Layers            │
//! │  - Book records and derived keys (domain/)          │
//! │  - Favorites slot backends (storage/)               │
//! │  - Platform paths (infrastructure/)                 │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │  ← Optional
//! │  - OpenTelemetry tracing                            │
//! │  - File-based OTLP export                           │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Control Flow
//!
//! 1. **Plugin Load** (`main.rs`): parse configuration, initialize tracing,
//!    create `AppState`, request permissions, subscribe to events.
//! 2. **Permissions Granted**: post `LoadFavorites` to the worker; the
//!    stored favorites replace the in-memory sequence when the response
//!    arrives.
//! 3. **Search**: the form submit validates the term and issues a single
//!    `web_request` for page 1; the response arrives as a host event
//!    carrying the echoed request generation. Load-more fetches the next
//!    page and appends. Stale responses (superseded generation) are
//!    discarded.
//! 4. **Favorites**: toggling is synchronous on the in-memory sequence and
//!    every mutation is mirrored to the worker, which overwrites the JSON
//!    slot.
//! 5. **UI Rendering**: a view model is computed from state and rendered by
//!    the component layer (header, search form, list, detail pane, footer).
//!
//! # Configuration
//!
//! The plugin is configured via Zellij's plugin configuration:
//!
//! ```kdl
//! // ~/.config/zellij/layouts/default.kdl
//! pane {
//!     plugin location="file:/path/to/bibliofind.wasm" {
//!         api_base "https://openlibrary.org"
//!         search_field "title"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use bibliofind::{initialize, Config};
//!
//! let config = Config::default();
//! let state = initialize(&config);
//! assert!(state.favorites.is_empty());
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod api;
pub mod app;
pub mod domain;
pub mod infrastructure;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use api::SearchField;
pub use app::{handle_event, Action, AppState, Event, InputMode, SearchStatus, ViewMode};
pub use domain::{BibliofindError, BookRecord, FavoriteRecord, Result};
pub use ui::Theme;

use std::collections::BTreeMap;

/// Default base URL for the search API.
const DEFAULT_API_BASE: &str = "https://openlibrary.org";

/// Plugin configuration parsed from Zellij's configuration system.
///
/// Configuration values are provided via Zellij's KDL layout configuration
/// and passed to the plugin during initialization.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the search API.
    ///
    /// Default: `https://openlibrary.org`. Overridable for mirrors and
    /// testing.
    pub api_base: String,

    /// Initial field selector for the search form.
    ///
    /// Accepts `title`, `author`, or `q`/`any`. Default: `title`.
    pub search_field: Option<String>,

    /// Built-in theme name to use.
    ///
    /// Options: `catppuccin-mocha`, `catppuccin-latte`, `catppuccin-frappe`,
    /// `catppuccin-macchiato`. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file.
    ///
    /// Takes precedence over `theme_name`. See [`ui::theme`] for the format.
    pub theme_file: Option<String>,

    /// Tracing level for OpenTelemetry spans.
    ///
    /// Options: `trace`, `debug`, `info`, `warn`, `error`. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            search_field: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Zellij provides configuration as a `BTreeMap<String, String>` during
    /// plugin initialization. This function extracts typed values with
    /// fallback defaults; empty strings are treated as absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use bibliofind::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_base".to_string(), "http://localhost:8080".to_string());
    /// map.insert("search_field".to_string(), "author".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_base, "http://localhost:8080");
    /// assert_eq!(config.search_field.as_deref(), Some("author"));
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let api_base = config
            .get("api_base")
            .map(|s| s.trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string());

        Self {
            api_base,
            search_field: config.get("search_field").cloned(),
            theme_name: config.get("theme").cloned(),
            theme_file: config.get("theme_file").cloned(),
            trace_level: config.get("trace_level").cloned(),
        }
    }
}

/// Initializes the plugin with configuration.
///
/// Creates a new [`AppState`] with the resolved theme and initial field
/// selector, and an empty favorites sequence (populated later by the
/// worker's `LoadFavorites` response).
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!("initializing bibliofind plugin");

    let theme = config.theme_file.as_ref().map_or_else(
        || {
            config.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
                Theme::from_name(theme_name).unwrap_or_else(|| {
                    tracing::debug!(theme_name = %theme_name, "failed to load theme, using default");
                    Theme::default()
                })
            })
        },
        |theme_file| {
            Theme::from_file(theme_file).unwrap_or_else(|e| {
                tracing::debug!(theme_file = %theme_file, error = %e, "failed to load theme from file, using default");
                Theme::default()
            })
        },
    );

    let mut state = AppState::new(vec![], theme);

    if let Some(field) = config
        .search_field
        .as_deref()
        .and_then(SearchField::from_name)
    {
        state.field = field;
    }

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_defaults_are_applied() {
        let config = Config::from_zellij(&BTreeMap::new());
        assert_eq!(config.api_base, "https://openlibrary.org");
        assert!(config.search_field.is_none());
    }

    #[test]
    fn api_base_trailing_slash_is_stripped() {
        let mut map = BTreeMap::new();
        map.insert("api_base".to_string(), "http://localhost:8080/".to_string());
        let config = Config::from_zellij(&map);
        assert_eq!(config.api_base, "http://localhost:8080");
    }

    #[test]
    fn initialize_applies_the_configured_field() {
        let config = Config {
            search_field: Some("author".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.field, SearchField::Author);

        let config = Config {
            search_field: Some("bogus".to_string()),
            ..Config::default()
        };
        let state = initialize(&config);
        assert_eq!(state.field, SearchField::Title);
    }
}
