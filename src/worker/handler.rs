//! Fetch worker implementation.
//!
//! Every posted message is executed on its own tokio task so that slow
//! requests never block the event loop or each other. Results are sent back
//! over an unbounded channel and re-enter the application as events.

use crate::api::{FetchNotesParams, NotesApi};
use crate::cache::ListKey;
use crate::domain::Result;
use crate::worker::{WorkerMessage, WorkerResponse};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::Instrument;

/// Executes worker messages against a [`NotesApi`].
#[derive(Clone)]
pub struct NotesWorker {
    api: Arc<dyn NotesApi>,
    responses: UnboundedSender<WorkerResponse>,
}

impl NotesWorker {
    #[must_use]
    pub fn new(api: Arc<dyn NotesApi>, responses: UnboundedSender<WorkerResponse>) -> Self {
        Self { api, responses }
    }

    /// Starts processing `message` in the background.
    ///
    /// Must be called from within a tokio runtime.
    pub fn post(&self, message: WorkerMessage) {
        let span = tracing::debug_span!("worker_handle_message", message_type = message.kind());
        attach_parent_trace_context(&span, &message);

        let worker = self.clone();
        tokio::spawn(
            async move {
                let response = worker.handle_message(message).await;
                worker.respond(response);
            }
            .instrument(span),
        );
    }

    /// Runs one message to completion and returns its response.
    pub async fn handle_message(&self, message: WorkerMessage) -> WorkerResponse {
        match message {
            WorkerMessage::RenderRoute { tag, .. } => {
                let params = FetchNotesParams::from(&ListKey::route_default(tag));
                let result = self.api.fetch_notes(params).await;
                WorkerResponse::RouteRendered {
                    tag,
                    result: Self::handle_api_result("render route", result),
                }
            }

            WorkerMessage::FetchNotes { ticket, .. } => {
                let result = self.api.fetch_notes(FetchNotesParams::from(&ticket.key)).await;
                WorkerResponse::NotesFetched {
                    result: Self::handle_api_result("fetch notes", result),
                    ticket,
                }
            }

            WorkerMessage::FetchNote { ticket, .. } => {
                let result = self.api.fetch_note(ticket.key.0.clone()).await;
                WorkerResponse::NoteFetched {
                    result: Self::handle_api_result("fetch note", result),
                    ticket,
                }
            }

            WorkerMessage::CreateNote { payload, .. } => {
                let result = self.api.create_note(payload).await;
                WorkerResponse::NoteCreated {
                    result: Self::handle_api_result("create note", result),
                }
            }

            WorkerMessage::StartDebounce { ticket, .. } => {
                tokio::time::sleep(ticket.delay).await;
                WorkerResponse::DebounceElapsed {
                    generation: ticket.generation,
                }
            }
        }
    }

    fn respond(&self, response: WorkerResponse) {
        if self.responses.send(response).is_err() {
            tracing::debug!("event loop closed, dropping worker response");
        }
    }

    /// Logs the outcome of an API call and flattens the error to text.
    fn handle_api_result<T>(operation: &str, result: Result<T>) -> std::result::Result<T, String> {
        match result {
            Ok(value) => {
                tracing::debug!(operation = operation, "api call successful");
                Ok(value)
            }
            Err(e) => {
                tracing::warn!(operation = operation, error = %e, "api call failed");
                Err(e.to_string())
            }
        }
    }
}

impl std::fmt::Debug for NotesWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotesWorker").finish_non_exhaustive()
    }
}

/// Parents `span` to the remote span recorded in `message`, if any.
fn attach_parent_trace_context(span: &tracing::Span, message: &WorkerMessage) {
    use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};
    use tracing_opentelemetry::OpenTelemetrySpanExt;

    let Some(trace_context) = message.trace_context() else {
        return;
    };
    let (Ok(trace_id), Ok(span_id)) = (
        TraceId::from_hex(&trace_context.trace_id),
        SpanId::from_hex(&trace_context.parent_span_id),
    ) else {
        tracing::debug!("ignoring malformed trace context");
        return;
    };

    let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
    span.set_parent(opentelemetry::Context::new().with_remote_span_context(span_context));
}
