//! Create-note form values and their validation rules.
//!
//! Lengths are counted in Unicode scalar values, not bytes.

use crate::domain::note::{CreateNotePayload, NoteTag};
use std::collections::BTreeMap;
use std::fmt;

pub const TITLE_MIN_CHARS: usize = 3;
pub const TITLE_MAX_CHARS: usize = 50;
pub const CONTENT_MAX_CHARS: usize = 500;

/// Form field identifiers, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    Title,
    Content,
    Tag,
}

impl Field {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Content => "content",
            Self::Tag => "tag",
        }
    }
}

/// Inline, per-field validation messages. At most one message per field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    errors: BTreeMap<Field, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }

    /// Drops the message of `field`, typically after the user edits it.
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Records `message` unless the field already has one; the first failing
    /// rule wins.
    fn reject(&mut self, field: Field, message: impl Into<String>) {
        self.errors.entry(field).or_insert_with(|| message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in self.iter() {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {message}", field.label())?;
            first = false;
        }
        Ok(())
    }
}

/// Raw, unvalidated values of the create-note form.
///
/// The tag is kept as text because it arrives from user input; it only
/// becomes a [`NoteTag`] once validation succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub title: String,
    pub content: String,
    pub tag: String,
}

impl Default for NoteDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            content: String::new(),
            tag: NoteTag::Todo.as_str().to_string(),
        }
    }
}

impl NoteDraft {
    /// Validates every field and builds the request payload.
    ///
    /// # Errors
    ///
    /// Returns the collected [`FieldErrors`] when any rule fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use notehub::domain::{Field, NoteDraft};
    ///
    /// let draft = NoteDraft { title: "Hi".into(), ..NoteDraft::default() };
    /// let errors = draft.validate().unwrap_err();
    /// assert_eq!(errors.get(Field::Title), Some("Title must be at least 3 characters"));
    /// ```
    pub fn validate(&self) -> Result<CreateNotePayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        let title_len = self.title.chars().count();
        if self.title.is_empty() {
            errors.reject(Field::Title, "Title is required");
        } else if title_len < TITLE_MIN_CHARS {
            errors.reject(
                Field::Title,
                format!("Title must be at least {TITLE_MIN_CHARS} characters"),
            );
        } else if title_len > TITLE_MAX_CHARS {
            errors.reject(
                Field::Title,
                format!("Title must be at most {TITLE_MAX_CHARS} characters"),
            );
        }

        if self.content.chars().count() > CONTENT_MAX_CHARS {
            errors.reject(
                Field::Content,
                format!("Content must be at most {CONTENT_MAX_CHARS} characters"),
            );
        }

        let tag = if self.tag.is_empty() {
            errors.reject(Field::Tag, "Tag is required");
            None
        } else if let Ok(tag) = self.tag.parse::<NoteTag>() {
            Some(tag)
        } else {
            let allowed: Vec<&str> = NoteTag::ALL.iter().map(|t| t.as_str()).collect();
            errors.reject(
                Field::Tag,
                format!("Tag must be one of: {}", allowed.join(", ")),
            );
            None
        };

        match tag {
            Some(tag) if errors.is_empty() => Ok(CreateNotePayload {
                title: self.title.clone(),
                content: self.content.clone(),
                tag,
            }),
            _ => Err(errors),
        }
    }
}
