use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Set once at startup by main() from the --data-dir argument.
static DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Call this from main() before any load/save operations.
pub fn set_data_dir(path: PathBuf) {
    let _ = DATA_DIR.set(path);
}

pub fn get_data_dir() -> Result<PathBuf> {
    if let Some(dir) = DATA_DIR.get() {
        return Ok(dir.clone());
    }
    // Fallback when running tests or if set_data_dir was not called
    let cwd = std::env::current_dir().context("failed to get current directory")?;
    Ok(cwd.join("config"))
}

pub fn get_file_path(name: &str) -> Result<PathBuf> {
    let dir = get_data_dir()?;
    Ok(dir.join(name))
}

/// On-disk encoding of a record file.
#[derive(Clone, Copy, PartialEq)]
pub enum Format {
    Json,
    Yaml,
}

fn decode<T: for<'de> Deserialize<'de>>(format: Format, contents: &str, path: &Path) -> Result<T> {
    match format {
        Format::Json => serde_json::from_str(contents)
            .with_context(|| format!("failed to parse JSON from {}", path.display())),
        Format::Yaml => serde_norway::from_str(contents)
            .with_context(|| format!("failed to parse YAML from {}", path.display())),
    }
}

fn encode<T: Serialize>(format: Format, value: &T) -> Result<String> {
    match format {
        Format::Json => serde_json::to_string_pretty(value).context("failed to serialize JSON"),
        Format::Yaml => serde_norway::to_string(value).context("failed to serialize YAML"),
    }
}

/// Record files stored under the data directory. A missing file is never an
/// error: `load` returns `Default` so first runs work with no setup.
pub trait Persist: Sized + Default + Serialize + for<'de> Deserialize<'de> {
    fn filename() -> &'static str;
    fn format() -> Format;

    fn load() -> Result<Self> {
        let path = get_file_path(Self::filename())?;
        Self::load_path(&path)
    }

    fn save(&self) -> Result<()> {
        let path = get_file_path(Self::filename())?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
        let contents = encode(Self::format(), self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Load from an explicit directory, bypassing the global `DATA_DIR`.
    fn load_from(dir: &Path) -> Result<Self> {
        Self::load_path(&dir.join(Self::filename()))
    }

    /// Save to an explicit directory, bypassing the global `DATA_DIR`.
    fn save_to(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)?;
        let path = dir.join(Self::filename());
        let contents = encode(Self::format(), self)?;
        fs::write(&path, contents)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    fn load_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        decode(Self::format(), &contents, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct JsonRecord {
        value: String,
    }

    impl Persist for JsonRecord {
        fn filename() -> &'static str {
            "record.json"
        }
        fn format() -> Format {
            Format::Json
        }
    }

    #[derive(Serialize, Deserialize, Default, Debug, PartialEq)]
    struct YamlRecord {
        count: u32,
    }

    impl Persist for YamlRecord {
        fn filename() -> &'static str {
            "record.yaml"
        }
        fn format() -> Format {
            Format::Yaml
        }
    }

    #[test]
    fn test_get_data_dir_returns_a_path() {
        // When DATA_DIR is unset the fallback is cwd/config.
        // When it IS set (by a prior test run), it returns that value.
        assert!(get_data_dir().is_ok());
    }

    #[test]
    fn test_get_file_path_appends_filename() {
        let path = get_file_path("events.json").unwrap();
        assert!(path.ends_with("events.json"));
    }

    #[test]
    fn test_load_from_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let loaded = JsonRecord::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, JsonRecord::default());
    }

    #[test]
    fn test_json_save_to_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let record = JsonRecord {
            value: "round-trip".to_string(),
        };
        record.save_to(tmp.path()).unwrap();
        let loaded = JsonRecord::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_yaml_save_to_load_from_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let record = YamlRecord { count: 42 };
        record.save_to(tmp.path()).unwrap();
        let loaded = YamlRecord::load_from(tmp.path()).unwrap();
        assert_eq!(loaded, record);
    }

    #[test]
    fn test_load_path_corrupt_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("record.json");
        std::fs::write(&path, "{not json at all").unwrap();
        assert!(JsonRecord::load_path(&path).is_err());
    }

    #[test]
    fn test_save_to_creates_directory_if_missing() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a").join("b");
        let record = JsonRecord {
            value: "nested".to_string(),
        };
        record.save_to(&nested).unwrap();
        let loaded = JsonRecord::load_from(&nested).unwrap();
        assert_eq!(loaded, record);
    }
}
