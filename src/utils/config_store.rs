//! ConfigStore - Settings Persistence
//!
//! Settings live as TOML in the platform config directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{error, info};

use crate::constants::SETTINGS_FILE;
use crate::domain::config::Settings;
use crate::error::Result;
use crate::helpers::{atomic_write, get_or_create_config_dir};

/// Path of the settings file in the config directory
pub fn settings_path() -> Result<PathBuf> {
    Ok(get_or_create_config_dir()?.join(SETTINGS_FILE))
}

/// Load settings from `path`
///
/// A missing or blank file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }

    info!(path = ?path, "Loading settings file");
    let value = fs::read_to_string(path)?;
    if value.trim().is_empty() {
        return Ok(Settings::default());
    }

    let settings: Settings = toml::from_str(&value).map_err(|e| {
        error!(error = %e, path = ?path, "Failed to parse settings file");
        e
    })?;
    Ok(settings)
}

/// Save settings to `path`
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<()> {
    let value = toml::to_string(settings)?;
    atomic_write(path, value.as_bytes())
}

/// Save settings to the default location
pub fn save_settings(settings: &Settings) -> Result<()> {
    save_settings_to(&settings_path()?, settings)
}

/// Load settings, writing a default file on first start
pub fn load_or_init_settings() -> Result<Settings> {
    let path = settings_path()?;
    if path.exists() {
        return load_settings_from(&path);
    }
    let settings = Settings::default();
    save_settings(&settings)?;
    info!(path = ?path, "Wrote default settings file");
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config::StorageBackend;
    use crate::error::Error;

    #[test]
    fn test_missing_and_blank_files_give_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE);
        assert_eq!(load_settings_from(&path).expect("load"), Settings::default());

        fs::write(&path, "  \n").expect("write");
        assert_eq!(load_settings_from(&path).expect("load"), Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE);

        let mut settings = Settings::default();
        settings.storage.backend = StorageBackend::Memory;
        settings.storage.monthly_log = true;
        settings.device.poll_interval_ms = 250;

        save_settings_to(&path, &settings).expect("save");
        assert_eq!(load_settings_from(&path).expect("load"), settings);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join(SETTINGS_FILE);
        fs::write(&path, "[storage\nbackend = ").expect("write");

        assert!(matches!(load_settings_from(&path), Err(Error::TomlDe { .. })));
    }
}
