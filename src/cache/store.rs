//! Keyed query cache with request deduplication and stale-response rejection.
//!
//! The cache never performs I/O. Starting a fetch hands out a [`FetchTicket`];
//! whoever executes the request reports back through [`QueryCache::resolve`].
//! An entry accepts a completion only from the ticket it is currently waiting
//! on, so responses for abandoned requests are dropped instead of applied.

use super::key::CacheKey;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Identifier of one network request started by a cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A request the caller must execute and later resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket<K> {
    pub id: RequestId,
    pub key: K,
}

/// Outcome of [`QueryCache::ensure`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ensure<K> {
    /// A settled result (data or error) is cached and still valid.
    Settled,
    /// A request for this key is already in flight; nothing new to do.
    Joined,
    /// A new request must be executed.
    Fetch(FetchTicket<K>),
}

/// Outcome of [`QueryCache::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The ticket was superseded, abandoned or evicted.
    Stale,
}

/// State of one cached key.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    data: Option<Arc<V>>,
    error: Option<String>,
    in_flight: Option<RequestId>,
    invalidated: bool,
    last_access: u64,
}

impl<V> CacheEntry<V> {
    const fn empty(last_access: u64) -> Self {
        Self {
            data: None,
            error: None,
            in_flight: None,
            invalidated: false,
            last_access,
        }
    }

    /// Last successfully fetched value, kept even after a later failure.
    #[must_use]
    pub fn data(&self) -> Option<Arc<V>> {
        self.data.clone()
    }

    /// Message of the most recent fetch, if it failed.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub const fn is_fetching(&self) -> bool {
        self.in_flight.is_some()
    }

    #[must_use]
    pub const fn is_invalidated(&self) -> bool {
        self.invalidated
    }

    /// Settled, valid, and not waiting on anything.
    const fn is_valid(&self) -> bool {
        !self.invalidated && self.in_flight.is_none() && (self.data.is_some() || self.error.is_some())
    }
}

/// Cache of query results for one key namespace.
///
/// Holds at most `capacity` entries. When a new key would exceed that, the
/// least recently used entry with no request in flight is evicted.
#[derive(Debug, Clone)]
pub struct QueryCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    capacity: usize,
    clock: u64,
    next_request: u64,
}

impl<K: CacheKey, V> QueryCache<K, V> {
    /// Creates an empty cache. A capacity of zero is raised to one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            capacity: capacity.max(1),
            clock: 0,
            next_request: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&CacheEntry<V>> {
        self.entries.get(key)
    }

    /// Whether `key` holds a settled result that needs no refetch.
    #[must_use]
    pub fn is_valid(&self, key: &K) -> bool {
        self.entries.get(key).is_some_and(CacheEntry::is_valid)
    }

    /// Returns cached state for `key`, starting a request only when needed.
    ///
    /// Exactly one request is outstanding per key at any time: callers that
    /// ask while one is in flight join it.
    pub fn ensure(&mut self, key: &K) -> Ensure<K> {
        let now = self.tick();

        if let Some(entry) = self.entries.get_mut(key) {
            entry.last_access = now;
            if entry.in_flight.is_some() {
                tracing::trace!(key = %key, "joining in-flight request");
                return Ensure::Joined;
            }
            if entry.is_valid() {
                tracing::trace!(key = %key, "cache hit");
                return Ensure::Settled;
            }
        }

        Ensure::Fetch(self.start(key, now))
    }

    /// Starts a new request for `key` unless one is already in flight.
    ///
    /// Used for explicit retries, where a settled result must not short-circuit.
    pub fn refetch(&mut self, key: &K) -> Option<FetchTicket<K>> {
        let now = self.tick();
        if self.entries.get(key).is_some_and(CacheEntry::is_fetching) {
            return None;
        }
        Some(self.start(key, now))
    }

    /// Applies the result of a request.
    ///
    /// Success replaces the data and clears any error. Failure records the
    /// error and keeps the previous data. Either way the entry becomes valid
    /// again, so a failed refetch does not loop.
    pub fn resolve(&mut self, ticket: &FetchTicket<K>, result: Result<V, String>) -> Resolution {
        let Some(entry) = self.entries.get_mut(&ticket.key) else {
            tracing::debug!(key = %ticket.key, request = %ticket.id, "dropping response for evicted key");
            return Resolution::Stale;
        };

        if entry.in_flight != Some(ticket.id) {
            tracing::debug!(
                key = %ticket.key,
                request = %ticket.id,
                current = ?entry.in_flight,
                "dropping stale response"
            );
            return Resolution::Stale;
        }

        entry.in_flight = None;
        entry.invalidated = false;
        match result {
            Ok(value) => {
                entry.data = Some(Arc::new(value));
                entry.error = None;
                tracing::debug!(key = %ticket.key, request = %ticket.id, "query resolved");
            }
            Err(message) => {
                tracing::debug!(key = %ticket.key, request = %ticket.id, error = %message, "query failed");
                entry.error = Some(message);
            }
        }
        Resolution::Applied
    }

    /// Stores `value` for `key` as if it had just been fetched.
    ///
    /// Only fills keys that are absent or invalidated with nothing in flight;
    /// valid cached data always wins over a seed. Returns whether the seed was
    /// stored.
    pub fn seed(&mut self, key: &K, value: V) -> bool {
        let now = self.tick();
        let accepts = self
            .entries
            .get(key)
            .map_or(true, |entry| entry.invalidated && entry.in_flight.is_none());
        if !accepts {
            tracing::trace!(key = %key, "seed ignored, key already cached");
            return false;
        }

        self.make_room(key);
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::empty(now));
        entry.data = Some(Arc::new(value));
        entry.error = None;
        entry.invalidated = false;
        entry.last_access = now;
        tracing::debug!(key = %key, "seeded query");
        true
    }

    /// Invalidates every entry if `namespace` is this cache's namespace.
    ///
    /// Invalidated entries keep their data for display. In-flight requests are
    /// abandoned: their responses will be dropped, and the next `ensure`
    /// starts a fresh request. Returns the number of invalidated entries.
    pub fn invalidate_namespace(&mut self, namespace: &str) -> usize {
        if namespace != K::NAMESPACE {
            return 0;
        }
        for entry in self.entries.values_mut() {
            entry.invalidated = true;
            entry.in_flight = None;
        }
        tracing::debug!(namespace = %namespace, count = self.entries.len(), "invalidated queries");
        self.entries.len()
    }

    fn tick(&mut self) -> u64 {
        self.clock += 1;
        self.clock
    }

    fn start(&mut self, key: &K, now: u64) -> FetchTicket<K> {
        self.next_request += 1;
        let id = RequestId(self.next_request);

        self.make_room(key);
        let entry = self
            .entries
            .entry(key.clone())
            .or_insert_with(|| CacheEntry::empty(now));
        entry.in_flight = Some(id);
        entry.last_access = now;

        tracing::debug!(key = %key, request = %id, "starting request");
        FetchTicket {
            id,
            key: key.clone(),
        }
    }

    /// Evicts least recently used idle entries until `incoming` fits.
    fn make_room(&mut self, incoming: &K) {
        if self.entries.contains_key(incoming) {
            return;
        }
        while self.entries.len() >= self.capacity {
            let victim = self
                .entries
                .iter()
                .filter(|(_, entry)| entry.in_flight.is_none())
                .min_by_key(|(_, entry)| entry.last_access)
                .map(|(key, _)| key.clone());

            let Some(victim) = victim else {
                // Everything is in flight; allow the cache to grow temporarily.
                break;
            };
            tracing::debug!(key = %victim, "evicting query");
            self.entries.remove(&victim);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::key::ListKey;
    use crate::domain::NoteTag;

    type Cache = QueryCache<ListKey, u32>;

    fn key(page: u32) -> ListKey {
        ListKey::new("", page, None)
    }

    fn fetch(cache: &mut Cache, key: &ListKey) -> FetchTicket<ListKey> {
        match cache.ensure(key) {
            Ensure::Fetch(ticket) => ticket,
            other => panic!("expected fetch, got {other:?}"),
        }
    }

    #[test]
    fn equal_keys_share_one_request_and_entry() {
        let mut cache = Cache::new(8);
        let ticket = fetch(&mut cache, &key(1));

        assert_eq!(cache.ensure(&key(1)), Ensure::Joined);
        assert_eq!(cache.resolve(&ticket, Ok(10)), Resolution::Applied);
        assert_eq!(cache.ensure(&key(1)), Ensure::Settled);
        assert_eq!(cache.get(&key(1)).and_then(CacheEntry::data).as_deref(), Some(&10));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn changing_any_component_misses() {
        let mut cache = Cache::new(8);
        let ticket = fetch(&mut cache, &key(1));
        cache.resolve(&ticket, Ok(1));

        assert!(matches!(cache.ensure(&key(2)), Ensure::Fetch(_)));
        assert!(matches!(
            cache.ensure(&ListKey::new("a", 1, None)),
            Ensure::Fetch(_)
        ));
        assert!(matches!(
            cache.ensure(&ListKey::new("", 1, Some(NoteTag::Work))),
            Ensure::Fetch(_)
        ));
    }

    #[test]
    fn superseded_ticket_is_discarded() {
        let mut cache = Cache::new(8);
        let first = fetch(&mut cache, &key(1));
        cache.invalidate_namespace("notes");
        let second = fetch(&mut cache, &key(1));
        assert_ne!(first.id, second.id);

        assert_eq!(cache.resolve(&second, Ok(2)), Resolution::Applied);
        assert_eq!(cache.resolve(&first, Ok(1)), Resolution::Stale);
        assert_eq!(cache.get(&key(1)).and_then(CacheEntry::data).as_deref(), Some(&2));
    }

    #[test]
    fn failure_keeps_previous_data_and_other_keys() {
        let mut cache = Cache::new(8);
        let one = fetch(&mut cache, &key(1));
        cache.resolve(&one, Ok(1));
        let two = fetch(&mut cache, &key(2));
        cache.resolve(&two, Err("boom".into()));

        let retry = cache.refetch(&key(1)).unwrap();
        cache.resolve(&retry, Err("down".into()));

        let entry = cache.get(&key(1)).unwrap();
        assert_eq!(entry.error(), Some("down"));
        assert_eq!(entry.data().as_deref(), Some(&1));
        assert_eq!(cache.get(&key(2)).unwrap().error(), Some("boom"));
        assert_eq!(cache.ensure(&key(2)), Ensure::Settled);
    }

    #[test]
    fn refetch_joins_in_flight_request() {
        let mut cache = Cache::new(8);
        let _ticket = fetch(&mut cache, &key(1));
        assert!(cache.refetch(&key(1)).is_none());
    }

    #[test]
    fn invalidation_only_targets_own_namespace() {
        let mut cache = Cache::new(8);
        let ticket = fetch(&mut cache, &key(1));
        cache.resolve(&ticket, Ok(1));

        assert_eq!(cache.invalidate_namespace("note"), 0);
        assert!(cache.is_valid(&key(1)));

        assert_eq!(cache.invalidate_namespace("notes"), 1);
        assert!(!cache.is_valid(&key(1)));
        assert!(cache.get(&key(1)).unwrap().is_invalidated());
        assert!(matches!(cache.ensure(&key(1)), Ensure::Fetch(_)));
    }

    #[test]
    fn seed_never_replaces_valid_data() {
        let mut cache = Cache::new(8);
        assert!(cache.seed(&key(1), 5));
        assert_eq!(cache.ensure(&key(1)), Ensure::Settled);
        assert!(!cache.seed(&key(1), 6));
        assert_eq!(cache.get(&key(1)).and_then(CacheEntry::data).as_deref(), Some(&5));

        cache.invalidate_namespace("notes");
        assert!(cache.seed(&key(1), 7));
        assert!(cache.is_valid(&key(1)));
    }

    #[test]
    fn evicts_least_recently_used_idle_entry() {
        let mut cache = Cache::new(2);
        let one = fetch(&mut cache, &key(1));
        cache.resolve(&one, Ok(1));
        let two = fetch(&mut cache, &key(2));
        cache.resolve(&two, Ok(2));

        // Touch page 1 so page 2 becomes the eviction candidate.
        assert_eq!(cache.ensure(&key(1)), Ensure::Settled);
        let _three = fetch(&mut cache, &key(3));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(1)).is_some());
        assert!(cache.get(&key(2)).is_none());
    }

    #[test]
    fn in_flight_entries_survive_eviction() {
        let mut cache = Cache::new(1);
        let one = fetch(&mut cache, &key(1));
        let two = fetch(&mut cache, &key(2));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.resolve(&one, Ok(1)), Resolution::Applied);
        assert_eq!(cache.resolve(&two, Ok(2)), Resolution::Applied);
    }

    #[test]
    fn response_for_evicted_key_is_stale() {
        let mut cache = Cache::new(1);
        let one = fetch(&mut cache, &key(1));
        cache.resolve(&one, Ok(1));
        let _two = fetch(&mut cache, &key(2));

        assert!(cache.get(&key(1)).is_none());
        assert_eq!(cache.resolve(&one, Ok(1)), Resolution::Stale);
    }
}
