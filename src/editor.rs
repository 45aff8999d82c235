use crate::data::{CalendarEvent, EventDraft, EventPatch, EventStore, StoreError};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum EditorError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Which field of the popover form currently takes keystrokes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DraftField {
    #[default]
    Title,
    Description,
}

/// The popover controller. At most one editor is open at a time: `open_new`
/// and `open_edit` discard any draft already in flight, so the invariant is
/// enforced here rather than left to the UI.
#[derive(Debug, Default)]
pub struct Editor {
    draft: Option<EventDraft>,
    field: DraftField,
    /// Inline validation message shown in the popover; cleared on open/edit.
    error: Option<String>,
}

impl Editor {
    /// Opens the popover for a new event on the clicked slot. Title and
    /// description start empty.
    pub fn open_new(&mut self, date: DateTime<Utc>) {
        self.draft = Some(EventDraft {
            id: None,
            date: Some(date),
            title: String::new(),
            description: String::new(),
        });
        self.field = DraftField::Title;
        self.error = None;
    }

    /// Opens the popover pre-filled from an existing record.
    pub fn open_edit(&mut self, event: &CalendarEvent) {
        self.draft = Some(EventDraft {
            id: Some(event.id),
            date: Some(event.date),
            title: event.title.clone(),
            description: event.description.clone(),
        });
        self.field = DraftField::Title;
        self.error = None;
    }

    pub fn is_open(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&EventDraft> {
        self.draft.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn field(&self) -> DraftField {
        self.field
    }

    pub fn next_field(&mut self) {
        self.field = match self.field {
            DraftField::Title => DraftField::Description,
            DraftField::Description => DraftField::Title,
        };
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(draft) = self.draft.as_mut() {
            match self.field {
                DraftField::Title => draft.title.push(c),
                DraftField::Description => draft.description.push(c),
            }
            self.error = None;
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(draft) = self.draft.as_mut() {
            match self.field {
                DraftField::Title => draft.title.pop(),
                DraftField::Description => draft.description.pop(),
            };
        }
    }

    /// Discards the draft unconditionally and closes.
    pub fn cancel(&mut self) {
        self.draft = None;
        self.error = None;
    }

    /// Validates and writes the draft into the store. On a validation
    /// failure the editor stays open with the error surfaced; on success it
    /// closes and returns the stored record.
    pub fn commit(&mut self, store: &mut EventStore) -> Result<CalendarEvent, EditorError> {
        let draft = match self.draft.as_ref() {
            Some(d) => d.clone(),
            None => return Err(EditorError::Store(StoreError::NotFound(0))),
        };
        if draft.title.trim().is_empty() {
            self.error = Some("Title must not be empty".to_string());
            return Err(EditorError::EmptyTitle);
        }
        let result = match draft.id {
            Some(id) => store.update(
                id,
                EventPatch {
                    date: draft.date,
                    title: Some(draft.title),
                    description: Some(draft.description),
                },
            ),
            None => store.add(draft),
        };
        match result {
            Ok(event) => {
                self.draft = None;
                self.error = None;
                Ok(event)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(EditorError::Store(e))
            }
        }
    }
}
