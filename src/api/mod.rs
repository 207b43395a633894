//! Notes service client.
//!
//! [`NotesApi`] is the seam between the fetch worker and the network. The
//! production implementation is [`HttpNotesApi`]; tests substitute an
//! in-memory implementation.
//!
//! # Endpoints
//!
//! - `GET  {base}/notes?search=&page=&tag=&perPage=` returns a [`NotesPage`]
//! - `GET  {base}/notes/{id}` returns a [`Note`]
//! - `POST {base}/notes` with a [`CreateNotePayload`] returns the created [`Note`]

mod http;

pub use http::HttpNotesApi;

use crate::cache::ListKey;
use crate::domain::{CreateNotePayload, Note, NotesPage, Result, TagFilter};
use futures_util::future::BoxFuture;

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchNotesParams {
    /// Search text; not sent when empty.
    pub search: String,
    /// 1-based page number.
    pub page: u32,
    /// Tag filter; not sent when `None`.
    pub tag: TagFilter,
}

impl From<&ListKey> for FetchNotesParams {
    fn from(key: &ListKey) -> Self {
        Self {
            search: key.search.clone(),
            page: key.page,
            tag: key.tag,
        }
    }
}

/// Asynchronous access to the notes service.
///
/// Implementations must be shareable across tasks; the worker holds one
/// behind an `Arc` and calls it from spawned tasks.
pub trait NotesApi: Send + Sync {
    /// Fetches one page of notes.
    ///
    /// # Errors
    ///
    /// Any transport failure, non-success status or undecodable body.
    fn fetch_notes(&self, params: FetchNotesParams) -> BoxFuture<'static, Result<NotesPage>>;

    /// Fetches a single note by id.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`NotesApi::fetch_notes`].
    fn fetch_note(&self, id: String) -> BoxFuture<'static, Result<Note>>;

    /// Creates a note from validated input.
    ///
    /// # Errors
    ///
    /// Same failure modes as [`NotesApi::fetch_notes`].
    fn create_note(&self, payload: CreateNotePayload) -> BoxFuture<'static, Result<Note>>;
}
