use crate::data::event::CalendarEvent;
use crate::data::persistence::{Format, Persist};
use anyhow::Result;
use std::path::Path;

/// The events record file: the "list all events" collaborator the store is
/// seeded from at startup.
#[derive(serde::Serialize, serde::Deserialize, Default, Debug)]
pub struct EventsFile {
    pub events: Vec<CalendarEvent>,
}

impl Persist for EventsFile {
    fn filename() -> &'static str {
        "events.json"
    }
    fn format() -> Format {
        Format::Json
    }
}

/// Startup load. A missing file is a normal first run (empty list); an
/// unreadable or corrupt file is logged for the operator and degrades to
/// empty; the UI must come up either way.
pub fn fetch_events() -> Vec<CalendarEvent> {
    match EventsFile::load() {
        Ok(file) => file.events,
        Err(e) => {
            eprintln!("failed to load events, starting empty: {e:#}");
            Vec::new()
        }
    }
}

/// Write-back on quit.
pub fn save_events(events: &[CalendarEvent], dir: &Path) -> Result<()> {
    let file = EventsFile {
        events: events.to_vec(),
    };
    file.save_to(dir)
}
