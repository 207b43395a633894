//! Query key schema.
//!
//! Every cacheable unit of fetched data is identified by a key that lives in
//! exactly one namespace. Invalidation works on whole namespaces.

use crate::domain::TagFilter;
use std::fmt;
use std::hash::Hash;

/// Namespace of paginated note list results.
pub const NOTES_NAMESPACE: &str = "notes";

/// Namespace of single-note results.
pub const NOTE_NAMESPACE: &str = "note";

/// A key usable by [`QueryCache`](super::QueryCache).
pub trait CacheKey: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    /// First segment of every key of this type.
    const NAMESPACE: &'static str;
}

/// Identifies one page of list results: `("notes", search, page, tag)`.
///
/// Two keys are equal exactly when all three components are equal, so any
/// change to search text, page or tag addresses a different cache entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ListKey {
    pub search: String,
    pub page: u32,
    pub tag: TagFilter,
}

impl ListKey {
    #[must_use]
    pub fn new(search: impl Into<String>, page: u32, tag: TagFilter) -> Self {
        Self {
            search: search.into(),
            page,
            tag,
        }
    }

    /// The key a route renders before the user touches any control.
    #[must_use]
    pub fn route_default(tag: TagFilter) -> Self {
        Self::new(String::new(), 1, tag)
    }

    /// Whether this is the untouched state of the route for `tag`.
    #[must_use]
    pub fn is_route_default(&self, tag: TagFilter) -> bool {
        self.search.is_empty() && self.page == 1 && self.tag == tag
    }
}

impl CacheKey for ListKey {
    const NAMESPACE: &'static str = NOTES_NAMESPACE;
}

impl fmt::Display for ListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}, {}, ", Self::NAMESPACE, self.search, self.page)?;
        match self.tag {
            Some(tag) => write!(f, "{:?}]", tag.as_str()),
            None => f.write_str("undefined]"),
        }
    }
}

/// Identifies a single note: `("note", id)`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DetailKey(pub String);

impl CacheKey for DetailKey {
    const NAMESPACE: &'static str = NOTE_NAMESPACE;
}

impl fmt::Display for DetailKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", Self::NAMESPACE, self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NoteTag;
    use std::collections::HashSet;

    #[test]
    fn any_component_change_is_a_different_key() {
        let base = ListKey::new("milk", 1, Some(NoteTag::Shopping));
        let keys: HashSet<ListKey> = [
            base.clone(),
            base.clone(),
            ListKey::new("milk ", 1, Some(NoteTag::Shopping)),
            ListKey::new("milk", 2, Some(NoteTag::Shopping)),
            ListKey::new("milk", 1, None),
        ]
        .into_iter()
        .collect();
        assert_eq!(keys.len(), 4);
    }

    #[test]
    fn route_default_detection() {
        let tag = Some(NoteTag::Work);
        assert!(ListKey::route_default(tag).is_route_default(tag));
        assert!(!ListKey::new("x", 1, tag).is_route_default(tag));
        assert!(!ListKey::new("", 2, tag).is_route_default(tag));
        assert!(!ListKey::route_default(None).is_route_default(tag));
    }

    #[test]
    fn display_mirrors_key_tuple() {
        assert_eq!(
            ListKey::new("a", 2, Some(NoteTag::Todo)).to_string(),
            r#"["notes", "a", 2, "Todo"]"#
        );
        assert_eq!(
            ListKey::route_default(None).to_string(),
            r#"["notes", "", 1, undefined]"#
        );
    }
}
