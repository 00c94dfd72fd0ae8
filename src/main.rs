//! Zellij plugin wrapper and entry point.
//!
//! This module provides the thin integration layer between the Bibliofind
//! library and the Zellij plugin system. It implements the `ZellijPlugin`
//! and `ZellijWorker` traits to handle Zellij events and lifecycle.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Subscribe**: Register for Key, `CustomMessage`, `WebRequestResult`
//!    events
//! 3. **Permissions Granted**: Post `LoadFavorites` to the worker
//! 4. **Update**: Handle events, delegate to the library layer
//! 5. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! Zellij events are translated to library events:
//!
//! - `Key(Enter)` → `Event::SubmitSearch` (while editing the form) or
//!   `Event::OpenSelected` (in normal mode)
//! - `Key(/)` → `Event::EditQuery`
//! - `Key(Tab)` → `Event::CycleField`
//! - `WebRequestResult` → `Event::SearchResponse { generation, page, ... }`
//!   with the generation and page read back from the request context
//! - `CustomMessage` → `Event::WorkerResponse`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`: Move down
//! - `k`/`Up`: Move up
//! - `/`: Edit the search query
//! - `Tab`: Cycle the field selector
//! - `Space`: Toggle favorite for the selected book
//! - `Enter`: Open the selected book on Open Library
//! - `m`: Load the next result page
//! - `b`: Show results, `f`: Show favorites
//! - `q`: Close plugin
//!
//! While editing the form:
//! - Printable keys: Type into the query buffer
//! - `Enter`: Submit the search
//! - `Esc`: Back to the list, keeping the buffer

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use bibliofind::api;
use bibliofind::worker::{BibliofindWorker, WorkerMessage, WorkerResponse};
use bibliofind::{handle_event, Action, Config, Event, InputMode, SearchField};

// Plugin and worker registration only exists on the wasm target; host
// builds (tests, tooling) get a stub main instead.
#[cfg(target_family = "wasm")]
register_plugin!(State);
#[cfg(target_family = "wasm")]
register_worker!(BibliofindWorker, bibliofind_worker, BIBLIOFIND_WORKER);

#[cfg(not(target_family = "wasm"))]
fn main() {}

/// Plugin state wrapper.
///
/// Wraps the library's `AppState` with Zellij-specific concerns like worker
/// communication and the configured API base for outgoing requests.
struct State {
    /// Core application state from the library layer.
    app: bibliofind::app::AppState,

    /// Worker thread identifier for IPC messaging.
    worker_name: String,

    /// Base URL for search requests.
    api_base: String,
}

impl Default for State {
    fn default() -> Self {
        let default_config = Config::default();
        Self {
            app: bibliofind::initialize(&default_config),
            worker_name: "bibliofind".to_string(),
            api_base: default_config.api_base,
        }
    }
}

impl ZellijPlugin for State {
    /// Initializes the plugin on load.
    ///
    /// Parses configuration, initializes application state, requests
    /// permissions, and subscribes to events.
    ///
    /// # Permissions
    ///
    /// - `WebAccess`: Issue search requests to the Open Library API
    /// - `RunCommands`: Open selected records in the host browser
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        bibliofind::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(api_base = %config.api_base, "plugin loading started");
        self.app = bibliofind::initialize(&config);
        self.api_base.clone_from(&config.api_base);

        request_permission(&[PermissionType::WebAccess, PermissionType::RunCommands]);

        subscribe(&[
            EventType::Key,
            EventType::CustomMessage,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Handles incoming Zellij events.
    ///
    /// Translates Zellij events to library events, delegates to
    /// `handle_event`, and executes resulting actions. Returns `true` if
    /// the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match self.map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_request_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                self.handle_permission_result(permissions);
                return false;
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                for a in actions {
                    self.execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::debug!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Renders the plugin UI.
    fn render(&mut self, rows: usize, cols: usize) {
        bibliofind::ui::render(&self.app, rows, cols);
    }
}

impl State {
    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::CursorUp);
        }

        Some(match self.app.input_mode {
            InputMode::Editing => match key.bare_key {
                BareKey::Enter => Event::SubmitSearch,
                BareKey::Esc => Event::ExitEdit,
                BareKey::Tab => Event::CycleField,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::CursorDown,
                BareKey::Up => Event::CursorUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            },
            InputMode::Normal => match key.bare_key {
                BareKey::Down | BareKey::Char('j') => Event::CursorDown,
                BareKey::Up | BareKey::Char('k') => Event::CursorUp,
                BareKey::Enter => Event::OpenSelected,
                BareKey::Char('/') => Event::EditQuery,
                BareKey::Tab => Event::CycleField,
                BareKey::Char(' ') => Event::ToggleFavorite,
                BareKey::Char('m') => Event::LoadMore,
                BareKey::Char('b') => Event::ShowResults,
                BareKey::Char('f') => Event::ShowFavorites,
                BareKey::Char('q') => Event::CloseFocus,
                _ => return None,
            },
        })
    }

    /// Handles permission request results.
    ///
    /// Once permissions are granted the worker is asked for the stored
    /// favorites.
    fn handle_permission_result(&self, permissions: PermissionStatus) {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading stored favorites");
                self.post_worker_message(&WorkerMessage::load_favorites());
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - plugin functionality limited");
            }
        }
    }

    /// Maps custom message events to application events.
    fn map_custom_message_event(&self, message: &str, payload: &str) -> Option<Event> {
        tracing::debug!(message_name = %message, payload_len = payload.len(), "custom message event");

        if message == self.worker_name {
            match serde_json::from_str::<WorkerResponse>(payload) {
                Ok(response) => Some(Event::WorkerResponse(response)),
                Err(e) => {
                    tracing::debug!(error = %e, "failed to deserialize worker response");
                    None
                }
            }
        } else {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            None
        }
    }

    /// Maps web request results to application events.
    ///
    /// The request generation and page ride through the request context;
    /// results without them belong to someone else and are ignored.
    fn map_web_request_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let generation = context.get("generation")?.parse().ok()?;
        let page = context.get("page")?.parse().ok()?;

        tracing::debug!(status = status, page = page, "web request result event");

        Some(Event::SearchResponse {
            generation,
            page,
            status,
            body,
        })
    }

    /// Posts a message to the worker thread.
    ///
    /// Serializes the message as JSON and sends via Zellij's IPC system.
    /// Logs serialization errors but does not propagate them.
    fn post_worker_message(&self, message: &WorkerMessage) {
        match serde_json::to_string(&message) {
            Ok(payload) => {
                post_message_to(PluginMessage {
                    worker_name: Some(self.worker_name.clone()),
                    name: self.worker_name.clone(),
                    payload,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker message");
            }
        }
    }

    /// Executes an action returned from event handling.
    ///
    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::FetchPage {
                ref term,
                field,
                page,
                generation,
            } => {
                self.fetch_page(term, *field, *page, *generation);
            }
            Action::OpenUrl { ref url } => {
                tracing::debug!(url = %url, "opening url in host browser");
                run_command(&["xdg-open", url.as_str()], BTreeMap::new());
            }
            Action::PostToWorker(ref message) => {
                self.post_worker_message(message);
            }
        }
    }

    /// Issues the single outstanding search request for one page.
    ///
    /// The generation and page are attached to the request context and come
    /// back verbatim on the `WebRequestResult` event, where stale responses
    /// are filtered out.
    fn fetch_page(&self, term: &str, field: SearchField, page: u32, generation: u64) {
        let url = api::build_search_url(&self.api_base, term, field, page);

        let mut context = BTreeMap::new();
        context.insert("generation".to_string(), generation.to_string());
        context.insert("page".to_string(), page.to_string());

        tracing::debug!(url = %url, generation = generation, "issuing search request");

        let headers: BTreeMap<String, String> = BTreeMap::new();
        web_request(url.as_str(), HttpVerb::Get, headers, Vec::new(), context);
    }
}
