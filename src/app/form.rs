//! Create-note form state.
//!
//! Holds the draft, inline validation messages and the submission status.
//! Submitting validates first; invalid drafts never produce a request.

use crate::domain::{CreateNotePayload, Field, FieldErrors, NoteDraft};

/// Shown when the create request fails.
pub const CREATE_ERROR_MESSAGE: &str = "Failed to create note";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteForm {
    pub draft: NoteDraft,
    pub errors: FieldErrors,
    submitting: bool,
    submit_error: Option<String>,
}

impl NoteForm {
    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.submitting
    }

    #[must_use]
    pub fn submit_error(&self) -> Option<&str> {
        self.submit_error.as_deref()
    }

    /// Replaces one field's value and clears its stale validation message.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        let value = value.into();
        match field {
            Field::Title => self.draft.title = value,
            Field::Content => self.draft.content = value,
            Field::Tag => self.draft.tag = value,
        }
        self.errors.clear(field);
    }

    /// Validates the draft and, if valid, marks the form as submitting.
    ///
    /// Returns `None` while a submission is already running or when
    /// validation fails; the messages are then in [`NoteForm::errors`].
    pub fn submit(&mut self) -> Option<CreateNotePayload> {
        if self.submitting {
            tracing::debug!("submit ignored, create already in flight");
            return None;
        }
        match self.draft.validate() {
            Ok(payload) => {
                self.errors = FieldErrors::default();
                self.submit_error = None;
                self.submitting = true;
                Some(payload)
            }
            Err(errors) => {
                tracing::debug!(errors = %errors, "draft rejected");
                self.errors = errors;
                None
            }
        }
    }

    /// Clears the form after the service accepted the note.
    pub fn submit_succeeded(&mut self) {
        *self = Self::default();
    }

    /// Keeps the entered values so the user can resubmit.
    pub fn submit_failed(&mut self) {
        self.submitting = false;
        self.submit_error = Some(CREATE_ERROR_MESSAGE.to_string());
    }
}
