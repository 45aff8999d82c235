use crate::data::persistence::get_data_dir;
use crate::data::source::EventsFile;
use crate::data::{AppSettings, Persist};
use anyhow::Result;
use std::path::Path;

pub fn run() -> Result<()> {
    let dir = get_data_dir()?;
    init_dir(&dir)?;
    println!("Initialized data directory {}", dir.display());
    Ok(())
}

/// Seeds `dir` with an empty events file and default config. Existing files
/// are left alone so re-running init never destroys data.
pub fn init_dir(dir: &Path) -> Result<()> {
    std::fs::create_dir_all(dir)?;
    if !dir.join(EventsFile::filename()).exists() {
        EventsFile::default().save_to(dir)?;
    }
    if !dir.join("config.yaml").exists() {
        AppSettings::default().save_to(dir)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_events_and_config() {
        let tmp = TempDir::new().unwrap();
        init_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("events.json").exists());
        assert!(tmp.path().join("config.yaml").exists());
    }

    #[test]
    fn test_init_does_not_clobber_existing_events() {
        let tmp = TempDir::new().unwrap();
        let events_path = tmp.path().join("events.json");
        std::fs::write(&events_path, r#"{"events":[{"id":1,"date":"2024-03-10T09:00:00Z","title":"Standup","description":""}]}"#).unwrap();
        init_dir(tmp.path()).unwrap();
        let file = EventsFile::load_from(tmp.path()).unwrap();
        assert_eq!(file.events.len(), 1);
    }

    #[test]
    fn test_init_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        init_dir(tmp.path()).unwrap();
        init_dir(tmp.path()).unwrap();
        assert!(tmp.path().join("events.json").exists());
    }
}
