//! Worker thread implementation for favorites persistence.
//!
//! This module implements the Zellij worker thread interface, handling the
//! favorites slot reads and writes off the main plugin rendering loop. It
//! includes distributed tracing support for cross-thread observability.

use crate::domain::{BibliofindError, FavoriteRecord, Result};
use crate::infrastructure::paths;
use crate::storage::{FavoriteStore, JsonFavorites};
use crate::worker::{WorkerMessage, WorkerResponse};
use serde::{Deserialize, Serialize};
use zellij_tile::prelude::{PluginMessage, ZellijWorker};
use zellij_tile::shim::post_message_to_plugin;

/// Worker thread state for favorites persistence.
///
/// This struct runs on a separate thread spawned by Zellij and processes
/// messages sent from the main plugin thread. The storage backend is
/// initialized lazily on first message receipt.
#[derive(Serialize, Deserialize, Default)]
pub struct BibliofindWorker {
    /// Favorites slot backend, initialized lazily on first use.
    #[serde(skip)]
    store: Option<Box<dyn FavoriteStore>>,
}

impl BibliofindWorker {
    /// Creates a new worker with an initialized storage backend.
    ///
    /// Uses JSON file storage in the plugin data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage backend cannot be initialized.
    pub fn new() -> Result<Self> {
        let path = paths::get_data_dir().join("favorites.json");
        let store: Box<dyn FavoriteStore> = Box::new(JsonFavorites::new(path)?);
        Ok(Self { store: Some(store) })
    }

    /// Returns a mutable reference to the store, failing if not initialized.
    fn get_store(&mut self) -> Result<&mut Box<dyn FavoriteStore>> {
        self.store
            .as_mut()
            .ok_or_else(|| BibliofindError::Worker("Storage not initialized".to_string()))
    }

    /// Handles the `LoadFavorites` message.
    ///
    /// A missing or corrupt slot yields an empty sequence, never an error
    /// response.
    fn handle_load_favorites(&mut self) -> WorkerResponse {
        match self.get_store() {
            Ok(store) => {
                let favorites = store.load_favorites();
                tracing::debug!(count = favorites.len(), "favorites loaded from storage");
                WorkerResponse::FavoritesLoaded { favorites }
            }
            Err(e) => {
                tracing::debug!(error = %e, "load favorites failed");
                WorkerResponse::Error {
                    message: format!("load favorites: {e}"),
                }
            }
        }
    }

    /// Handles the `SaveFavorites` message.
    ///
    /// Overwrites the slot with the full sequence.
    fn handle_save_favorites(&mut self, favorites: &[FavoriteRecord]) -> WorkerResponse {
        let count = favorites.len();

        match self
            .get_store()
            .and_then(|store| store.save_favorites(favorites))
        {
            Ok(()) => {
                tracing::debug!(count = count, "favorites saved to storage");
                WorkerResponse::FavoritesSaved { count }
            }
            Err(e) => {
                tracing::debug!(error = %e, "save favorites failed");
                WorkerResponse::Error {
                    message: format!("save favorites: {e}"),
                }
            }
        }
    }

    /// Attaches the parent trace context from a message to the current thread.
    ///
    /// Reconstructs the OpenTelemetry context from the serialized trace
    /// information in the message, allowing spans created in the worker
    /// thread to be linked to their parent spans in the main thread.
    ///
    /// Returns a context guard that must be held for the duration of the
    /// operation.
    fn attach_parent_trace_context(message: &WorkerMessage) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_context = match message {
            WorkerMessage::LoadFavorites { trace_context }
            | WorkerMessage::SaveFavorites { trace_context, .. } => trace_context,
        }
        .as_ref()?;

        let trace_id = TraceId::from_hex(&trace_context.trace_id).ok()?;
        let span_id = SpanId::from_hex(&trace_context.parent_span_id).ok()?;

        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        let otel_context =
            opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    /// Processes a worker message and returns the appropriate response.
    ///
    /// This is the main message handling entry point, dispatching to specific
    /// handlers based on the message variant. Automatically attaches trace
    /// context and creates a tracing span for the operation.
    pub fn handle_message(&mut self, message: WorkerMessage) -> WorkerResponse {
        let _context_guard = Self::attach_parent_trace_context(&message);

        let span = tracing::debug_span!("worker_handle_message", message_type = ?message);
        let _guard = span.entered();

        match message {
            WorkerMessage::LoadFavorites { .. } => self.handle_load_favorites(),
            WorkerMessage::SaveFavorites { favorites, .. } => {
                self.handle_save_favorites(&favorites)
            }
        }
    }
}

/// Initializes tracing for the worker thread.
///
/// Sets up the same tracing configuration as the main thread, ensuring spans
/// from both threads are written to the same file.
fn init_worker_tracing() {
    use crate::observability;
    use crate::Config;

    let config = Config::default();
    observability::init_tracing(&config);
}

/// Tracks whether worker tracing has been initialized.
///
/// Used to ensure tracing is only set up once per worker thread lifetime.
static WORKER_TRACING_INITIALIZED: std::sync::atomic::AtomicBool =
    std::sync::atomic::AtomicBool::new(false);

impl ZellijWorker<'_> for BibliofindWorker {
    /// Handles incoming messages from the main plugin thread.
    ///
    /// This is the Zellij worker interface entry point. It:
    /// 1. Initializes tracing on first message (once per worker lifetime)
    /// 2. Lazy-initializes the storage backend if needed
    /// 3. Deserializes the message payload
    /// 4. Processes the message via `handle_message`
    /// 5. Serializes and sends the response back to the main thread
    ///
    /// # Arguments
    ///
    /// * `message` - Message name used for routing the response
    /// * `payload` - JSON-serialized `WorkerMessage`
    fn on_message(&mut self, message: String, payload: String) {
        if !WORKER_TRACING_INITIALIZED.load(std::sync::atomic::Ordering::Relaxed) {
            init_worker_tracing();
            WORKER_TRACING_INITIALIZED.store(true, std::sync::atomic::Ordering::Relaxed);
        }

        if self.store.is_none() {
            match Self::new() {
                Ok(worker) => {
                    self.store = worker.store;
                }
                Err(e) => {
                    tracing::debug!(error = %e, "failed to initialize storage");
                    let error_response = WorkerResponse::Error {
                        message: format!("Failed to initialize storage: {e}"),
                    };
                    if let Ok(payload) = serde_json::to_string(&error_response) {
                        post_message_to_plugin(PluginMessage {
                            name: message,
                            payload,
                            worker_name: None,
                        });
                    }
                    return;
                }
            }
        }

        let worker_message: WorkerMessage = match serde_json::from_str(&payload) {
            Ok(msg) => msg,
            Err(e) => {
                tracing::debug!(error = %e, "failed to deserialize worker message");
                return;
            }
        };

        let response = self.handle_message(worker_message);

        match serde_json::to_string(&response) {
            Ok(payload) => {
                post_message_to_plugin(PluginMessage {
                    name: message,
                    payload,
                    worker_name: None,
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to serialize worker response");
            }
        }
    }
}
