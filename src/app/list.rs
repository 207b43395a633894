//! Note list view controller.
//!
//! Owns the list's UI state (search text, page, route tag), derives the
//! active [`ListKey`] from it, and turns the cache entry of that key into a
//! single tagged [`ListView`].
//!
//! The controller remembers the last page of results it actually displayed.
//! While a new key is loading that page stays on screen, so turning a page,
//! refining a search or switching tag never blanks the list.

use super::debounce::{DebounceTicket, Debouncer};
use crate::cache::{CacheEntry, Ensure, FetchTicket, ListKey, QueryCache};
use crate::domain::{NotesPage, TagFilter};
use std::sync::Arc;
use std::time::Duration;

/// Shown when the latest fetch for the active key failed.
pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch notes";

/// Shown when a fetch succeeded with no notes.
pub const EMPTY_MESSAGE: &str = "No notes found. Create your first note!";

type ListCache = QueryCache<ListKey, NotesPage>;

/// What the list should display for the active key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// No query has been issued for the active key yet.
    Idle,
    /// A request is in flight; `previous` is still displayed meanwhile.
    Loading { previous: Option<Arc<NotesPage>> },
    /// The latest request failed; `previous` is the last good data, if any.
    Error { previous: Option<Arc<NotesPage>> },
    /// The request succeeded with zero notes.
    Empty,
    /// The request succeeded with at least one note.
    Populated(Arc<NotesPage>),
}

/// Flat render contract for surfaces that paint from flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderFlags {
    pub loading: bool,
    pub error: bool,
    pub success: bool,
    pub data: Option<Arc<NotesPage>>,
}

impl ListView {
    /// Data that should be visible in this state.
    #[must_use]
    pub fn visible_data(&self) -> Option<Arc<NotesPage>> {
        match self {
            Self::Idle | Self::Empty => None,
            Self::Loading { previous } | Self::Error { previous } => previous.clone(),
            Self::Populated(page) => Some(Arc::clone(page)),
        }
    }

    #[must_use]
    pub fn flags(&self) -> RenderFlags {
        RenderFlags {
            loading: matches!(self, Self::Loading { .. }),
            error: matches!(self, Self::Error { .. }),
            success: matches!(self, Self::Empty | Self::Populated(_)),
            data: self.visible_data(),
        }
    }
}

/// Controller for one mounted list route.
#[derive(Debug, Clone)]
pub struct ListController {
    route_tag: TagFilter,
    debouncer: Debouncer,
    page: u32,
    displayed: Option<Arc<NotesPage>>,
}

impl ListController {
    #[must_use]
    pub const fn new(route_tag: TagFilter, debounce: Duration) -> Self {
        Self {
            route_tag,
            debouncer: Debouncer::new(debounce),
            page: 1,
            displayed: None,
        }
    }

    /// Controller for another route, taking over from this one.
    ///
    /// Search and page start over. The page on screen stays until the new
    /// route has data of its own.
    #[must_use]
    pub fn remount(&self, route_tag: TagFilter) -> Self {
        Self {
            route_tag,
            debouncer: self.debouncer.restart(),
            page: 1,
            displayed: self.displayed.clone(),
        }
    }

    /// The last page of results that was on screen.
    #[must_use]
    pub fn displayed(&self) -> Option<Arc<NotesPage>> {
        self.displayed.clone()
    }

    #[must_use]
    pub const fn route_tag(&self) -> TagFilter {
        self.route_tag
    }

    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Committed (debounced) search text.
    #[must_use]
    pub fn search(&self) -> &str {
        self.debouncer.committed()
    }

    /// What the search box shows, including not-yet-committed input.
    #[must_use]
    pub fn search_input(&self) -> &str {
        self.debouncer.pending().unwrap_or_else(|| self.debouncer.committed())
    }

    #[must_use]
    pub fn is_search_pending(&self) -> bool {
        self.debouncer.pending().is_some()
    }

    /// The key the list currently reads from.
    #[must_use]
    pub fn key(&self) -> ListKey {
        ListKey::new(self.search(), self.page, self.route_tag)
    }

    /// Total pages of the data on screen, if any is on screen.
    #[must_use]
    pub fn total_pages(&self) -> Option<u32> {
        self.displayed.as_ref().map(|page| page.total_pages)
    }

    /// Attaches the controller to the cache.
    ///
    /// `seed` is the route's initial data. It is only stored while the
    /// controller is in the route's untouched state; otherwise it is ignored
    /// and a live fetch decides.
    pub fn mount(&mut self, cache: &mut ListCache, seed: Option<NotesPage>) -> Option<FetchTicket<ListKey>> {
        let key = self.key();
        if let Some(seed) = seed {
            if key.is_route_default(self.route_tag) {
                cache.seed(&key, seed);
            }
        }
        tracing::debug!(key = %key, "mounting list");
        self.sync(cache)
    }

    /// Ensures the active key is cached or being fetched.
    pub fn sync(&mut self, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        let ticket = match cache.ensure(&self.key()) {
            Ensure::Fetch(ticket) => Some(ticket),
            Ensure::Settled | Ensure::Joined => None,
        };
        self.refresh(cache);
        ticket
    }

    /// Picks up data that arrived for the active key.
    ///
    /// Results for any other key are left in the cache and do not touch what
    /// is on screen.
    pub fn refresh(&mut self, cache: &ListCache) {
        if let Some(data) = cache.get(&self.key()).and_then(CacheEntry::data) {
            self.displayed = Some(data);
        }
    }

    /// Records raw search input. The caller schedules the returned ticket.
    pub fn set_search_input(&mut self, text: impl Into<String>) -> DebounceTicket {
        self.debouncer.input(text)
    }

    /// Commits debounced input. A changed search always returns to page 1.
    pub fn debounce_elapsed(&mut self, generation: u64, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        let committed = self.debouncer.elapsed(generation)?;
        tracing::debug!(search = %committed, "search committed");
        self.page = 1;
        self.sync(cache)
    }

    /// Moves to `page`, clamped to the known page count. Search and tag are kept.
    pub fn set_page(&mut self, page: u32, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        let upper = self.total_pages().unwrap_or(u32::MAX).max(1);
        let page = page.clamp(1, upper);
        if page == self.page {
            return None;
        }
        self.page = page;
        self.sync(cache)
    }

    pub fn next_page(&mut self, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        self.set_page(self.page.saturating_add(1), cache)
    }

    pub fn prev_page(&mut self, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        self.set_page(self.page.saturating_sub(1), cache)
    }

    /// Refetches the active key regardless of what is cached.
    pub fn retry(&mut self, cache: &mut ListCache) -> Option<FetchTicket<ListKey>> {
        cache.refetch(&self.key())
    }

    /// Derives the view state of the active key.
    #[must_use]
    pub fn view(&self, cache: &ListCache) -> ListView {
        let Some(entry) = cache.get(&self.key()) else {
            return ListView::Idle;
        };

        if entry.is_fetching() {
            return ListView::Loading {
                previous: entry.data().or_else(|| self.displayed.clone()),
            };
        }
        if entry.error().is_some() {
            return ListView::Error {
                previous: entry.data().or_else(|| self.displayed.clone()),
            };
        }
        match entry.data() {
            Some(page) if page.is_empty() => ListView::Empty,
            Some(page) => ListView::Populated(page),
            None => ListView::Idle,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Resolution;
    use crate::domain::{Note, NoteTag};
    use chrono::Utc;

    fn note(id: &str) -> Note {
        Note {
            id: id.to_string(),
            title: format!("note {id}"),
            content: String::new(),
            tag: NoteTag::Work,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn page_of(ids: &[&str], total_pages: u32) -> NotesPage {
        NotesPage {
            notes: ids.iter().map(|id| note(id)).collect(),
            total_pages,
        }
    }

    fn controller() -> ListController {
        ListController::new(None, Duration::from_millis(700))
    }

    #[test]
    fn seeded_mount_does_not_fetch() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        assert!(list.mount(&mut cache, Some(page_of(&["a"], 1))).is_none());
        assert!(matches!(list.view(&cache), ListView::Populated(_)));
    }

    #[test]
    fn unseeded_mount_fetches_and_loads() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        assert_eq!(list.view(&cache), ListView::Idle);
        let ticket = list.mount(&mut cache, None).unwrap();
        assert_eq!(ticket.key, ListKey::route_default(None));
        assert_eq!(list.view(&cache), ListView::Loading { previous: None });
    }

    #[test]
    fn remount_with_cached_key_does_not_fetch() {
        let mut cache = ListCache::new(8);
        let mut first = controller();
        let ticket = first.mount(&mut cache, None).unwrap();
        cache.resolve(&ticket, Ok(page_of(&["a"], 1)));

        let mut second = controller();
        assert!(second.mount(&mut cache, None).is_none());
        assert!(matches!(second.view(&cache), ListView::Populated(_)));
    }

    #[test]
    fn page_change_keeps_previous_data_visible() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&["a"], 3)));

        let ticket = list.next_page(&mut cache).unwrap();
        assert_eq!(ticket.key.page, 2);
        match list.view(&cache) {
            ListView::Loading { previous: Some(previous) } => assert_eq!(previous.notes[0].id, "a"),
            other => panic!("unexpected view {other:?}"),
        }

        cache.resolve(&ticket, Ok(page_of(&["b"], 3)));
        list.refresh(&cache);
        match list.view(&cache) {
            ListView::Populated(page) => assert_eq!(page.notes[0].id, "b"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn late_response_for_abandoned_page_does_not_clobber() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&["p1"], 5)));

        let slow = list.next_page(&mut cache).unwrap();
        let fast = list.next_page(&mut cache).unwrap();
        assert_eq!(list.page(), 3);

        assert_eq!(cache.resolve(&fast, Ok(page_of(&["p3"], 5))), Resolution::Applied);
        list.refresh(&cache);
        cache.resolve(&slow, Ok(page_of(&["p2"], 5)));
        list.refresh(&cache);

        match list.view(&cache) {
            ListView::Populated(page) => assert_eq!(page.notes[0].id, "p3"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn committed_search_resets_page() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&["a"], 4)));
        list.set_page(3, &mut cache);
        assert_eq!(list.page(), 3);

        let ticket = list.set_search_input("milk");
        assert_eq!(list.page(), 3, "page holds until the search commits");
        assert_eq!(list.search_input(), "milk");
        assert_eq!(list.search(), "");

        let fetch = list.debounce_elapsed(ticket.generation, &mut cache).unwrap();
        assert_eq!(fetch.key, ListKey::new("milk", 1, None));
        assert_eq!(list.page(), 1);
    }

    #[test]
    fn page_change_keeps_search_and_tag() {
        let mut cache = ListCache::new(8);
        let mut list = ListController::new(Some(NoteTag::Work), Duration::ZERO);
        list.mount(&mut cache, Some(page_of(&["a"], 4)));
        let t = list.set_search_input("q");
        list.debounce_elapsed(t.generation, &mut cache);

        let fetch = list.set_page(2, &mut cache).unwrap();
        assert_eq!(fetch.key, ListKey::new("q", 2, Some(NoteTag::Work)));
    }

    #[test]
    fn seed_ignored_outside_route_default() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        let t = list.set_search_input("x");
        list.debouncer.elapsed(t.generation);

        let ticket = list.mount(&mut cache, Some(page_of(&["a"], 1)));
        assert!(ticket.is_some());
        assert!(cache.get(&ListKey::route_default(None)).is_none());
    }

    #[test]
    fn pages_are_clamped_to_known_total() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&["a"], 2)));

        assert!(list.prev_page(&mut cache).is_none());
        assert_eq!(list.page(), 1);
        list.set_page(99, &mut cache);
        assert_eq!(list.page(), 2);
    }

    #[test]
    fn empty_result_is_not_an_error() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&[], 1)));

        let view = list.view(&cache);
        assert_eq!(view, ListView::Empty);
        let flags = view.flags();
        assert!(flags.success && !flags.error && !flags.loading);
    }

    #[test]
    fn failure_surfaces_error_state() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        let ticket = list.mount(&mut cache, None).unwrap();
        cache.resolve(&ticket, Err("503".into()));

        assert_eq!(list.view(&cache), ListView::Error { previous: None });
        assert!(list.view(&cache).flags().error);
        assert!(list.retry(&mut cache).is_some());
    }

    #[test]
    fn failed_page_turn_keeps_last_page_visible() {
        let mut cache = ListCache::new(8);
        let mut list = controller();
        list.mount(&mut cache, Some(page_of(&["a"], 3)));

        let ticket = list.next_page(&mut cache).unwrap();
        cache.resolve(&ticket, Err("503".into()));
        list.refresh(&cache);

        match list.view(&cache) {
            ListView::Error { previous: Some(previous) } => assert_eq!(previous.notes[0].id, "a"),
            other => panic!("unexpected view {other:?}"),
        }
    }

    #[test]
    fn remount_keeps_display_and_starts_fresh() {
        let mut cache = ListCache::new(8);
        let mut list = ListController::new(Some(NoteTag::Work), Duration::ZERO);
        list.mount(&mut cache, Some(page_of(&["w"], 4)));
        list.set_page(2, &mut cache);
        let stale = list.set_search_input("old");

        let mut next = list.remount(Some(NoteTag::Todo));
        assert_eq!(next.page(), 1);
        assert_eq!(next.search_input(), "");
        assert!(next.debounce_elapsed(stale.generation, &mut cache).is_none());

        let ticket = next.mount(&mut cache, None).unwrap();
        assert_eq!(ticket.key, ListKey::route_default(Some(NoteTag::Todo)));
        match next.view(&cache) {
            ListView::Loading { previous: Some(previous) } => assert_eq!(previous.notes[0].id, "w"),
            other => panic!("unexpected view {other:?}"),
        }
    }
}
