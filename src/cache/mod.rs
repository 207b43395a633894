//! Query cache coordinator.
//!
//! [`QueryClient`] is the explicit cache service shared by the list, detail
//! and create-note flows. It is owned by the application state and passed by
//! reference into controllers; nothing reaches it through globals.
//!
//! # Modules
//!
//! - [`key`]: key schema and namespaces
//! - [`store`]: generic keyed cache with request tickets

pub mod key;
pub mod store;

pub use key::{CacheKey, DetailKey, ListKey, NOTES_NAMESPACE, NOTE_NAMESPACE};
pub use store::{CacheEntry, Ensure, FetchTicket, QueryCache, RequestId, Resolution};

use crate::domain::{Note, NotesPage};

/// Default number of entries kept per namespace.
pub const DEFAULT_CAPACITY: usize = 64;

/// All query caches of the application, addressable by namespace.
#[derive(Debug, Clone)]
pub struct QueryClient {
    /// Paginated list results, namespace `notes`.
    pub lists: QueryCache<ListKey, NotesPage>,
    /// Single notes, namespace `note`.
    pub notes: QueryCache<DetailKey, Note>,
}

impl QueryClient {
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            lists: QueryCache::new(capacity),
            notes: QueryCache::new(capacity),
        }
    }

    /// Invalidates every cached query whose key begins with `namespace`.
    ///
    /// Returns the number of entries marked invalid.
    pub fn invalidate_namespace(&mut self, namespace: &str) -> usize {
        self.lists.invalidate_namespace(namespace) + self.notes.invalidate_namespace(namespace)
    }
}

impl Default for QueryClient {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
