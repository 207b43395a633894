//! Fetch worker message types.
//!
//! This module defines the request and response protocol between the event
//! loop and the fetch worker. Requests carry the cache ticket they were issued
//! for, so responses can be matched against the entry that is waiting on them.
//! Every request also carries the tracing context of the event that caused it.

use crate::app::DebounceTicket;
use crate::cache::{DetailKey, FetchTicket, ListKey};
use crate::domain::{CreateNotePayload, Note, NotesPage, TagFilter};

/// Distributed tracing context for cross-task span propagation.
///
/// Captures the current trace and span IDs from OpenTelemetry so that spans
/// opened by worker tasks join the trace of the event that spawned them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Parent span ID for linking spans across tasks.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` if the current span context is invalid, which is the
    /// case whenever no OpenTelemetry layer is installed.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }
}

/// Generates constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Create a ", stringify!($variant), " message with current trace context")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    render_route(RenderRoute { tag: TagFilter }),
    fetch_notes(FetchNotes { ticket: FetchTicket<ListKey> }),
    fetch_note(FetchNote { ticket: FetchTicket<DetailKey> }),
    create_note(CreateNote { payload: CreateNotePayload }),
    start_debounce(StartDebounce { ticket: DebounceTicket }),
}

/// Requests sent from the event loop to the worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Produce the initial data of a tag route (its default key).
    RenderRoute {
        tag: TagFilter,
        trace_context: Option<TraceContext>,
    },

    /// Execute a list request issued by the cache.
    FetchNotes {
        ticket: FetchTicket<ListKey>,
        trace_context: Option<TraceContext>,
    },

    /// Execute a single-note request issued by the cache.
    FetchNote {
        ticket: FetchTicket<DetailKey>,
        trace_context: Option<TraceContext>,
    },

    /// Submit a validated note.
    CreateNote {
        payload: CreateNotePayload,
        trace_context: Option<TraceContext>,
    },

    /// Wait out a debounce period, then report the ticket's generation.
    StartDebounce {
        ticket: DebounceTicket,
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::RenderRoute { trace_context, .. }
            | Self::FetchNotes { trace_context, .. }
            | Self::FetchNote { trace_context, .. }
            | Self::CreateNote { trace_context, .. }
            | Self::StartDebounce { trace_context, .. } => trace_context.as_ref(),
        }
    }

    /// Short name used as the worker span's `message_type` field.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::RenderRoute { .. } => "render_route",
            Self::FetchNotes { .. } => "fetch_notes",
            Self::FetchNote { .. } => "fetch_note",
            Self::CreateNote { .. } => "create_note",
            Self::StartDebounce { .. } => "start_debounce",
        }
    }
}

/// Responses sent from the worker back to the event loop.
///
/// Failures are carried as display strings; the event loop only needs to
/// know that a request failed, not how.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    /// Initial data of a tag route is ready (or failed to load).
    RouteRendered {
        tag: TagFilter,
        result: Result<NotesPage, String>,
    },

    NotesFetched {
        ticket: FetchTicket<ListKey>,
        result: Result<NotesPage, String>,
    },

    NoteFetched {
        ticket: FetchTicket<DetailKey>,
        result: Result<Note, String>,
    },

    NoteCreated {
        result: Result<Note, String>,
    },

    /// The debounce period of `generation` has passed.
    DebounceElapsed {
        generation: u64,
    },
}
