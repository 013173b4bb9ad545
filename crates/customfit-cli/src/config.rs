//! Settings file lookup

use anyhow::Context;
use customfit_booking::BookingConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// `~/.customfit/config.json`
pub fn default_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".customfit").join("config.json"))
}

/// Explicit path must exist; the default path is optional
pub fn load(explicit: Option<&Path>) -> anyhow::Result<BookingConfig> {
    if let Some(path) = explicit {
        return BookingConfig::load(&path.to_string_lossy())
            .with_context(|| format!("loading settings from {}", path.display()));
    }
    match default_path() {
        Some(path) if path.exists() => BookingConfig::load(&path.to_string_lossy())
            .with_context(|| format!("loading settings from {}", path.display())),
        _ => Ok(BookingConfig::default()),
    }
}

/// Write `config` to the default location, creating the directory
pub fn init(config: &BookingConfig) -> anyhow::Result<PathBuf> {
    let path = default_path().context("cannot find home directory")?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    config.save(&path.to_string_lossy())?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_missing_file_is_error() {
        let path = Path::new("/nonexistent/customfit/config.json");
        assert!(load(Some(path)).is_err());
    }

    #[test]
    fn test_explicit_file_loaded() {
        let path = std::env::temp_dir().join(format!("customfit-cli-{}.json", std::process::id()));
        fs::write(&path, r#"{"closing_hour": 17}"#).unwrap();
        let config = load(Some(&path)).unwrap();
        fs::remove_file(&path).unwrap();
        assert_eq!(config.closing_hour, 17);
    }
}
