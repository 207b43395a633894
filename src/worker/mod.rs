//! Background fetch worker.
//!
//! The event loop never awaits network I/O itself. It posts
//! [`WorkerMessage`]s; the worker runs them on tokio tasks and sends
//! [`WorkerResponse`]s back, carrying tracing context across the boundary.
//!
//! # Architecture
//!
//! - `messages`: Request/response protocol types with trace context propagation
//! - `handler`: Worker implementation and message processing logic

pub mod handler;
pub mod messages;

pub use handler::NotesWorker;
pub use messages::{TraceContext, WorkerMessage, WorkerResponse};
