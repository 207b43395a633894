//! OpenTelemetry tracing with file-based export.
//!
//! The client draws on the terminal, so traces never go to stdout or stderr.
//! Spans are exported as OTLP JSON lines to a rotating file instead:
//!
//! ```text
//! tracing → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → notehub-otlp.json
//! ```
//!
//! The file lives in the data directory (`$XDG_DATA_HOME/notehub`, or
//! `~/.local/share/notehub`), rotates at 10 MiB and keeps 3 backups.
//!
//! Trace level comes from the `trace_level` config key, overridden by
//! `NOTEHUB_TRACE`, and defaults to `"info"`.

mod exporter;
mod init;
mod rotating_file;

pub use init::{init_tracing, TRACE_FILE_NAME};
