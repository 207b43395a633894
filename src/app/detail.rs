//! Single-note view controller.

use crate::cache::{DetailKey, Ensure, FetchTicket, QueryCache};
use crate::domain::Note;
use std::sync::Arc;

/// Shown when loading a single note fails.
pub const NOTE_ERROR_MESSAGE: &str = "Failed to fetch note";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailView {
    Loading,
    Error,
    Loaded(Arc<Note>),
}

/// Reads one note through the `note` namespace cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailController {
    key: DetailKey,
}

impl DetailController {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            key: DetailKey(id.into()),
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        &self.key.0
    }

    /// Seeds the cache with the note already known from a list page, then
    /// makes sure the key is cached or in flight.
    pub fn mount(&self, cache: &mut QueryCache<DetailKey, Note>, known: Option<Note>) -> Option<FetchTicket<DetailKey>> {
        if let Some(note) = known {
            cache.seed(&self.key, note);
        }
        match cache.ensure(&self.key) {
            Ensure::Fetch(ticket) => Some(ticket),
            Ensure::Settled | Ensure::Joined => None,
        }
    }

    pub fn retry(&self, cache: &mut QueryCache<DetailKey, Note>) -> Option<FetchTicket<DetailKey>> {
        cache.refetch(&self.key)
    }

    #[must_use]
    pub fn view(&self, cache: &QueryCache<DetailKey, Note>) -> DetailView {
        let Some(entry) = cache.get(&self.key) else {
            return DetailView::Loading;
        };
        match (entry.data(), entry.error(), entry.is_fetching()) {
            (_, _, true) => entry.data().map_or(DetailView::Loading, DetailView::Loaded),
            (_, Some(_), false) => DetailView::Error,
            (Some(note), None, false) => DetailView::Loaded(note),
            (None, None, false) => DetailView::Loading,
        }
    }
}
