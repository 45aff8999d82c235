use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single calendar entry. `date` is the canonical UTC timestamp; display
/// code formats it, nothing else converts it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct CalendarEvent {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// An uncommitted event. `id` is `None` for new events; the store assigns one
/// on insert.
#[derive(Clone, Debug, Default)]
pub struct EventDraft {
    pub id: Option<i64>,
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    pub description: String,
}

/// Field-level update for an existing event. `None` keeps the stored value.
#[derive(Clone, Debug, Default)]
pub struct EventPatch {
    pub date: Option<DateTime<Utc>>,
    pub title: Option<String>,
    pub description: Option<String>,
}

#[derive(Error, Debug, PartialEq)]
pub enum StoreError {
    #[error("no event with id {0}")]
    NotFound(i64),
    #[error("event title must not be empty")]
    EmptyTitle,
    #[error("event draft has no date")]
    MissingDate,
}

/// The single writable source of truth for event data. Renderers read it but
/// never keep a parallel copy.
#[derive(Default, Debug)]
pub struct EventStore {
    events: Vec<CalendarEvent>,
    next_id: i64,
}

impl EventStore {
    /// Replaces the store contents with the startup load. Seeds the id
    /// counter above the highest loaded id so new events never collide.
    pub fn load_initial(&mut self, events: Vec<CalendarEvent>) {
        self.next_id = events.iter().map(|e| e.id).max().unwrap_or(0) + 1;
        self.events = events;
    }

    /// Inserts a draft, assigning an id when it carries none. The title must
    /// be non-empty and the date present; a rejected draft leaves the store
    /// untouched.
    pub fn add(&mut self, draft: EventDraft) -> Result<CalendarEvent, StoreError> {
        if draft.title.trim().is_empty() {
            return Err(StoreError::EmptyTitle);
        }
        let date = draft.date.ok_or(StoreError::MissingDate)?;
        let id = match draft.id {
            Some(id) => {
                self.next_id = self.next_id.max(id + 1);
                id
            }
            None => {
                let id = self.next_id;
                self.next_id += 1;
                id
            }
        };
        if self.events.iter().any(|e| e.id == id) {
            // Stale draft id pointing at a live record; treat as new.
            return self.add(EventDraft { id: None, ..draft });
        }
        let event = CalendarEvent {
            id,
            date,
            title: draft.title,
            description: draft.description,
        };
        self.events.push(event.clone());
        Ok(event)
    }

    /// Applies a patch to the event with `id`, keeping unpatched fields.
    pub fn update(&mut self, id: i64, patch: EventPatch) -> Result<CalendarEvent, StoreError> {
        if let Some(title) = &patch.title {
            if title.trim().is_empty() {
                return Err(StoreError::EmptyTitle);
            }
        }
        let event = self
            .events
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        if let Some(date) = patch.date {
            event.date = date;
        }
        if let Some(title) = patch.title {
            event.title = title;
        }
        if let Some(description) = patch.description {
            event.description = description;
        }
        Ok(event.clone())
    }

    /// Deletes and returns the event with `id`.
    pub fn remove(&mut self, id: i64) -> Result<CalendarEvent, StoreError> {
        let pos = self
            .events
            .iter()
            .position(|e| e.id == id)
            .ok_or(StoreError::NotFound(id))?;
        Ok(self.events.remove(pos))
    }

    pub fn get(&self, id: i64) -> Option<&CalendarEvent> {
        self.events.iter().find(|e| e.id == id)
    }

    /// Read-only snapshot in insertion order; render code re-sorts by date.
    pub fn events(&self) -> &[CalendarEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
