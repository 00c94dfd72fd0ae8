//! File-based OTLP span exporter with size-based rotation.
//!
//! Implements a custom OpenTelemetry `SpanExporter` that serializes span
//! batches to OTLP JSON documents and appends them to a rotating file, one
//! document per line. The output is compatible with OTLP trace collectors
//! and analysis tools.

use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::Value as JsonValue;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

/// Maximum trace file size before rotation (10 MB).
const MAX_FILE_SIZE_BYTES: u64 = 10 * 1024 * 1024;

/// Number of backup files to retain after rotation.
const MAX_BACKUP_FILES: usize = 3;

/// Creates a tracer provider with file-based export.
///
/// Constructs a complete OpenTelemetry tracer provider configured with the
/// file span exporter, the given resource metadata, and a simple
/// (immediate, non-batched) export strategy.
pub fn create_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter::new(file_path, resource.clone());

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

/// File-based OpenTelemetry span exporter.
///
/// Writes each exported batch as one complete OTLP JSON document line. The
/// file handle opens lazily on first write and rotates when the file grows
/// past the size threshold.
struct FileSpanExporter {
    file_path: PathBuf,
    /// Lazily-initialized handle, `None` until first write or after rotation.
    handle: Mutex<Option<std::fs::File>>,
    resource: Resource,
    /// Shutdown flag; exports after shutdown are rejected.
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    const fn new(file_path: PathBuf, resource: Resource) -> Self {
        Self {
            file_path,
            handle: Mutex::new(None),
            resource,
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Appends one JSON line, rotating beforehand when the file is too big.
    fn write_line(&self, json: &str) -> std::io::Result<()> {
        let mut handle = self.handle.lock().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::Other, format!("Mutex poisoned: {e}"))
        })?;

        if let Ok(metadata) = fs::metadata(&self.file_path) {
            if metadata.len() > MAX_FILE_SIZE_BYTES {
                *handle = None;
                self.rotate_files()?;
            }
        }

        if handle.is_none() {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&self.file_path)?;
            *handle = Some(file);
        }

        let file = handle
            .as_mut()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "No file available"))?;

        writeln!(file, "{json}")?;
        file.flush()
    }

    /// Renames the current file to a timestamped backup and prunes old ones.
    fn rotate_files(&self) -> std::io::Result<()> {
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or(std::time::Duration::from_secs(0))
            .as_secs();

        if self.file_path.exists() {
            let backup_path = self.file_path.with_extension(format!("json.{timestamp}"));
            fs::rename(&self.file_path, &backup_path)?;
        }

        self.cleanup_old_backups()
    }

    /// Removes backup files beyond the retention limit, newest kept first.
    ///
    /// Individual deletion failures are ignored so cleanup continues.
    fn cleanup_old_backups(&self) -> std::io::Result<()> {
        let parent_dir = self
            .file_path
            .parent()
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "No parent directory"))?;

        let file_stem = self
            .file_path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::Other, "Invalid file name"))?;

        let mut backups: Vec<PathBuf> = fs::read_dir(parent_dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(file_stem) && name.contains(".json."))
            })
            .collect();

        backups.sort_by(|a, b| {
            let a_time = fs::metadata(a).and_then(|m| m.modified()).ok();
            let b_time = fs::metadata(b).and_then(|m| m.modified()).ok();
            b_time.cmp(&a_time)
        });

        for old_backup in backups.iter().skip(MAX_BACKUP_FILES) {
            let _ = fs::remove_file(old_backup);
        }

        Ok(())
    }

    /// Formats a batch as one complete OTLP JSON document.
    fn batch_to_json(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(k, v)| {
                serde_json::json!({
                    "key": k.to_string(),
                    "value": attribute_value_to_json(v)
                })
            })
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(span_to_json).collect();

        serde_json::json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": { "name": "Bibliofind" },
                    "spans": spans
                }]
            }]
        })
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from(
                "exporter is shut down",
            ))));
        }

        let json = self.batch_to_json(&batch).to_string();

        match self.write_line(&json) {
            Ok(()) => Box::pin(std::future::ready(Ok(()))),
            Err(e) => Box::pin(std::future::ready(Err(TraceError::from(e.to_string())))),
        }
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }

    fn set_resource(&mut self, res: &Resource) {
        let _ = res;
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file_path", &self.file_path)
            .finish_non_exhaustive()
    }
}

/// Formats a single span as an OTLP JSON object.
///
/// IDs become hex strings (trace ID 32 chars, span ID 16 chars), timestamps
/// nanoseconds since the Unix epoch, and the status code an integer
/// (0=unset, 1=ok, 2=error).
fn span_to_json(span: &SpanData) -> JsonValue {
    let (status_code, status_message) = match &span.status {
        opentelemetry::trace::Status::Unset => (0, String::new()),
        opentelemetry::trace::Status::Ok => (1, String::new()),
        opentelemetry::trace::Status::Error { description } => (2, description.to_string()),
    };

    serde_json::json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": if span.parent_span_id == opentelemetry::trace::SpanId::INVALID {
            String::new()
        } else {
            format!("{:016x}", span.parent_span_id)
        },
        "name": span.name,
        "kind": span_kind_to_int(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes_to_json(&span.attributes),
        "events": span.events.iter().map(|event| serde_json::json!({
            "timeUnixNano": unix_nanos(event.timestamp),
            "name": event.name,
            "attributes": attributes_to_json(&event.attributes),
        })).collect::<Vec<_>>(),
        "links": span.links.iter().map(|link| serde_json::json!({
            "traceId": format!("{:032x}", link.span_context.trace_id()),
            "spanId": format!("{:016x}", link.span_context.span_id()),
            "attributes": attributes_to_json(&link.attributes),
        })).collect::<Vec<_>>(),
        "status": {
            "code": status_code,
            "message": status_message,
        },
    })
}

fn unix_nanos(time: std::time::SystemTime) -> String {
    time.duration_since(std::time::UNIX_EPOCH)
        .unwrap_or(std::time::Duration::from_secs(0))
        .as_nanos()
        .to_string()
}

const fn span_kind_to_int(kind: &opentelemetry::trace::SpanKind) -> u8 {
    match kind {
        opentelemetry::trace::SpanKind::Internal => 1,
        opentelemetry::trace::SpanKind::Server => 2,
        opentelemetry::trace::SpanKind::Client => 3,
        opentelemetry::trace::SpanKind::Producer => 4,
        opentelemetry::trace::SpanKind::Consumer => 5,
    }
}

fn attributes_to_json(attributes: &[opentelemetry::KeyValue]) -> Vec<JsonValue> {
    attributes
        .iter()
        .map(|kv| {
            serde_json::json!({
                "key": kv.key.to_string(),
                "value": attribute_value_to_json(&kv.value)
            })
        })
        .collect()
}

/// Maps OpenTelemetry value types to OTLP value objects; arrays fall back
/// to their debug representation as a string value.
fn attribute_value_to_json(value: &opentelemetry::Value) -> JsonValue {
    use opentelemetry::Value;

    match value {
        Value::Bool(b) => serde_json::json!({ "boolValue": b }),
        Value::I64(i) => serde_json::json!({ "intValue": i.to_string() }),
        Value::F64(f) => serde_json::json!({ "doubleValue": f }),
        Value::String(s) => serde_json::json!({ "stringValue": s.to_string() }),
        Value::Array(_) => serde_json::json!({ "stringValue": format!("{value:?}") }),
    }
}
