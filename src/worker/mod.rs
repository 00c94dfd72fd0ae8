//! Background worker thread for favorites persistence.
//!
//! This module implements the worker thread that owns the favorites slot,
//! keeping file I/O off the main plugin rendering loop. It uses Zellij's
//! worker API for cross-thread communication and includes distributed
//! tracing support for observability.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::BibliofindWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
