use crate::data::persistence::{Format, Persist, get_data_dir};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn flipped(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// On-disk shape of the preference file: `{"state": {"theme": "dark"}}`.
/// Every field defaults independently, so a corrupt or foreign file resolves
/// to Light without an error reaching the user.
#[derive(Serialize, Deserialize, Default, Debug)]
struct ThemePreference {
    #[serde(default)]
    state: ThemeState,
}

#[derive(Serialize, Deserialize, Default, Debug)]
struct ThemeState {
    #[serde(default)]
    theme: Theme,
}

impl Persist for ThemePreference {
    fn filename() -> &'static str {
        "theme_preference.json"
    }
    fn format() -> Format {
        Format::Json
    }
}

/// Holds the active theme and writes every change through to the preference
/// file. Persistence failures are swallowed: the in-memory toggle always
/// takes effect and a broken disk never blocks the UI.
#[derive(Debug, Default)]
pub struct ThemeStore {
    theme: Theme,
    /// Write-through target. `None` disables persistence (ephemeral store).
    dir: Option<PathBuf>,
}

impl ThemeStore {
    /// Restores the persisted theme from the data directory, falling back to
    /// Light on a missing or unparseable file. Never errors.
    pub fn load() -> Self {
        let dir = get_data_dir().ok();
        Self::load_from_dir(dir)
    }

    fn load_from_dir(dir: Option<PathBuf>) -> Self {
        let theme = dir
            .as_deref()
            .map(|d| ThemePreference::load_from(d).unwrap_or_default())
            .unwrap_or_default()
            .state
            .theme;
        ThemeStore { theme, dir }
    }

    /// A store persisting to an explicit directory.
    pub fn with_dir(dir: PathBuf) -> Self {
        Self::load_from_dir(Some(dir))
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn set(&mut self, theme: Theme) {
        self.theme = theme;
        self.persist();
    }

    pub fn toggle(&mut self) {
        self.set(self.theme.flipped());
    }

    fn persist(&self) {
        if let Some(dir) = &self.dir {
            let pref = ThemePreference {
                state: ThemeState { theme: self.theme },
            };
            // Fire-and-forget: a failed write must not surface.
            let _ = pref.save_to(dir);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_theme_is_light() {
        assert_eq!(ThemeStore::default().theme(), Theme::Light);
    }

    #[test]
    fn test_toggle_flips_light_to_dark() {
        let mut store = ThemeStore::default();
        store.toggle();
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_double_toggle_restores_original_theme() {
        let mut store = ThemeStore::default();
        let original = store.theme();
        store.toggle();
        store.toggle();
        assert_eq!(store.theme(), original);
    }

    #[test]
    fn test_set_overrides_theme() {
        let mut store = ThemeStore::default();
        store.set(Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
        store.set(Theme::Dark);
        assert_eq!(store.theme(), Theme::Dark);
    }

    #[test]
    fn test_toggle_persists_and_reload_restores() {
        let tmp = TempDir::new().unwrap();
        let mut store = ThemeStore::with_dir(tmp.path().to_path_buf());
        store.toggle();
        let reloaded = ThemeStore::with_dir(tmp.path().to_path_buf());
        assert_eq!(reloaded.theme(), Theme::Dark);
    }

    #[test]
    fn test_preference_json_shape() {
        let pref = ThemePreference {
            state: ThemeState { theme: Theme::Dark },
        };
        let json = serde_json::to_string(&pref).unwrap();
        assert_eq!(json, r#"{"state":{"theme":"dark"}}"#);
    }

    #[test]
    fn test_invalid_json_falls_back_to_light() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join(ThemePreference::filename()), "not json {{{").unwrap();
        let store = ThemeStore::with_dir(tmp.path().to_path_buf());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_missing_state_key_falls_back_to_light() {
        let parsed: ThemePreference = serde_json::from_str(r#"{"other": 1}"#).unwrap();
        assert_eq!(parsed.state.theme, Theme::Light);
    }

    #[test]
    fn test_unknown_theme_value_falls_back_to_light() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join(ThemePreference::filename()),
            r#"{"state":{"theme":"sepia"}}"#,
        )
        .unwrap();
        let store = ThemeStore::with_dir(tmp.path().to_path_buf());
        assert_eq!(store.theme(), Theme::Light);
    }

    #[test]
    fn test_persist_failure_is_swallowed() {
        // A directory that cannot be created (file in the way)
        let tmp = TempDir::new().unwrap();
        let blocked = tmp.path().join("blocked");
        std::fs::write(&blocked, "a file, not a dir").unwrap();
        let mut store = ThemeStore::with_dir(blocked.join("sub"));
        store.toggle(); // must not panic or error
        assert_eq!(store.theme(), Theme::Dark);
    }
}
