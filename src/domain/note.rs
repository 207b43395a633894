//! Note domain model.
//!
//! Notes are owned by the remote notes service; the client only ever holds
//! read-only copies decoded from API responses. This module also carries the
//! tag vocabulary and the route tag normalization rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of seconds in one minute.
const SECONDS_PER_MINUTE: i64 = 60;

/// Number of seconds in one hour.
const SECONDS_PER_HOUR: i64 = 3600;

/// Number of seconds in one day.
const SECONDS_PER_DAY: i64 = 86400;

/// Route segment meaning "no tag filter".
pub const ALL_TAGS: &str = "All";

/// The fixed set of tags a stored note can carry.
///
/// "All" is deliberately not a variant: it only exists as a filter selector
/// and is represented as `None` wherever a [`TagFilter`] is expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum NoteTag {
    Todo,
    Work,
    Personal,
    Meeting,
    Shopping,
}

/// A tag filter: `None` means every tag.
pub type TagFilter = Option<NoteTag>;

impl NoteTag {
    /// Every concrete tag, in display order.
    pub const ALL: [Self; 5] = [
        Self::Todo,
        Self::Work,
        Self::Personal,
        Self::Meeting,
        Self::Shopping,
    ];

    /// Canonical wire name of the tag.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "Todo",
            Self::Work => "Work",
            Self::Personal => "Personal",
            Self::Meeting => "Meeting",
            Self::Shopping => "Shopping",
        }
    }

    /// Resolves an optional route segment into a tag filter.
    ///
    /// The raw value is title-cased first. Absent or empty segments and the
    /// literal `All` select every tag, as does any value that does not name
    /// one of the concrete tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::NoteTag;
    ///
    /// assert_eq!(NoteTag::from_route(Some("shopping")), Some(NoteTag::Shopping));
    /// assert_eq!(NoteTag::from_route(Some("All")), None);
    /// assert_eq!(NoteTag::from_route(None), None);
    /// ```
    #[must_use]
    pub fn from_route(raw: Option<&str>) -> TagFilter {
        let raw = raw.map(str::trim).filter(|r| !r.is_empty() && *r != ALL_TAGS)?;
        let normalized = title_case(raw);
        if normalized == ALL_TAGS {
            return None;
        }
        match normalized.parse::<Self>() {
            Ok(tag) => Some(tag),
            Err(e) => {
                tracing::debug!(route_tag = %raw, error = %e, "ignoring unknown route tag");
                None
            }
        }
    }
}

impl fmt::Display for NoteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string does not name one of the concrete tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTag(pub String);

impl fmt::Display for UnknownTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown tag {:?}", self.0)
    }
}

impl std::error::Error for UnknownTag {}

impl FromStr for NoteTag {
    type Err = UnknownTag;

    /// Parses the exact canonical name; no case folding.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == s)
            .ok_or_else(|| UnknownTag(s.to_string()))
    }
}

/// Upper-cases the first character and lower-cases the rest.
#[must_use]
pub fn title_case(raw: &str) -> String {
    let mut chars = raw.chars();
    chars.next().map_or_else(String::new, |first| {
        first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect()
    })
}

/// A note as returned by the notes service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub tag: NoteTag,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Note {
    /// Returns a short human-readable age of the note.
    ///
    /// - Less than 1 minute: "just now"
    /// - Less than 1 hour: "Xm ago"
    /// - Less than 1 day: "Xh ago"
    /// - Otherwise: "Xd ago"
    #[must_use]
    pub fn created_ago(&self, now: DateTime<Utc>) -> String {
        let diff = (now - self.created_at).num_seconds();

        if diff < SECONDS_PER_MINUTE {
            "just now".to_string()
        } else if diff < SECONDS_PER_HOUR {
            format!("{}m ago", diff / SECONDS_PER_MINUTE)
        } else if diff < SECONDS_PER_DAY {
            format!("{}h ago", diff / SECONDS_PER_HOUR)
        } else {
            format!("{}d ago", diff / SECONDS_PER_DAY)
        }
    }
}

/// One page of list results.
///
/// Created by a successful fetch and replaced wholesale by the next fetch
/// for the same key; never mutated in place.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotesPage {
    pub notes: Vec<Note>,
    pub total_pages: u32,
}

impl NotesPage {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// Body of a create-note request. Only constructed from validated input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateNotePayload {
    pub title: String,
    pub content: String,
    pub tag: NoteTag,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn note_created(at: DateTime<Utc>) -> Note {
        Note {
            id: "n1".into(),
            title: "Groceries".into(),
            content: String::new(),
            tag: NoteTag::Shopping,
            created_at: at,
            updated_at: None,
        }
    }

    #[test]
    fn route_tags_are_title_cased() {
        assert_eq!(NoteTag::from_route(Some("shopping")), Some(NoteTag::Shopping));
        assert_eq!(NoteTag::from_route(Some("wORK")), Some(NoteTag::Work));
        assert_eq!(NoteTag::from_route(Some("Meeting")), Some(NoteTag::Meeting));
    }

    #[test]
    fn all_and_absent_routes_mean_no_filter() {
        assert_eq!(NoteTag::from_route(None), None);
        assert_eq!(NoteTag::from_route(Some("")), None);
        assert_eq!(NoteTag::from_route(Some("All")), None);
        assert_eq!(NoteTag::from_route(Some("all")), None);
        assert_eq!(NoteTag::from_route(Some("groceries")), None);
    }

    #[test]
    fn parsing_requires_canonical_names() {
        assert_eq!("Todo".parse::<NoteTag>(), Ok(NoteTag::Todo));
        assert!("todo".parse::<NoteTag>().is_err());
        assert!("All".parse::<NoteTag>().is_err());
    }

    #[test]
    fn decodes_api_payload() {
        let json = r#"{
            "notes": [{
                "id": "65f1",
                "title": "Standup",
                "content": "",
                "tag": "Meeting",
                "createdAt": "2024-03-01T09:00:00Z",
                "updatedAt": "2024-03-01T09:30:00Z"
            }],
            "totalPages": 3
        }"#;
        let page: NotesPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.notes[0].tag, NoteTag::Meeting);
        assert!(page.notes[0].updated_at.is_some());
    }

    #[test]
    fn created_ago_buckets() {
        let now = Utc::now();
        assert_eq!(note_created(now).created_ago(now), "just now");
        assert_eq!(note_created(now - Duration::minutes(5)).created_ago(now), "5m ago");
        assert_eq!(note_created(now - Duration::hours(3)).created_ago(now), "3h ago");
        assert_eq!(note_created(now - Duration::days(7)).created_ago(now), "7d ago");
    }
}
