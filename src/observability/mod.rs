//! OpenTelemetry-based observability with file-based trace export.
//!
//! This module provides distributed tracing infrastructure for the plugin,
//! using OpenTelemetry OTLP format with file-based exporting. Traces are
//! written to JSON files for offline analysis and debugging, since a
//! sandboxed plugin has no network collector to ship them to.
//!
//! # Architecture
//!
//! ```text
//! tracing-opentelemetry → OpenTelemetry SDK → file span exporter → JSON file
//! ```
//!
//! Traces land in `<data dir>/bibliofind-otlp.json`, rotating at 10MB with
//! 3-backup retention. Trace level is controlled by the `trace_level`
//! plugin configuration option (default `"info"`).
//!
//! # Modules
//!
//! - [`init`]: Tracing initialization and subscriber setup
//! - [`export`]: File-based OTLP span exporter with rotation

mod export;
mod init;

pub use init::init_tracing;
