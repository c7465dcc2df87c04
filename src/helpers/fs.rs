//! File System Utilities
//!
//! Application directory management and crash-safe file writes.

use crate::constants::APP_NAME;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use home::home_dir;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("org", "carbonwise", APP_NAME).ok_or_else(|| Error::Invalid {
        message: "Could not determine project directories".to_string(),
    })
}

/// Get or create the application's configuration directory
///
/// Platform-specific locations:
/// - **Linux**: `~/.config/carbon-wise/` or `$XDG_CONFIG_HOME/carbon-wise/`
/// - **macOS**: `~/Library/Application Support/org.carbonwise.carbon-wise/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\carbonwise\carbon-wise\config\`
pub fn get_or_create_config_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let config_dir = project_dirs.config_dir();

    if !config_dir.exists() {
        fs::create_dir_all(config_dir)?;
    }

    // Pick up files from the pre-XDG location once
    if let Some(home) = home_dir() {
        let old_config_path = home.join(format!(".{APP_NAME}"));
        if old_config_path.is_dir() {
            if let Err(e) = copy_dir_files(&old_config_path, config_dir) {
                tracing::warn!(error = %e, path = ?old_config_path, "Failed to migrate legacy config dir");
            } else {
                let _ = fs::remove_dir_all(&old_config_path);
            }
        }
    }

    Ok(config_dir.to_path_buf())
}

/// Get or create the data directory (history, logs)
///
/// Platform-specific locations:
/// - **Linux**: `~/.local/share/carbon-wise/`
/// - **macOS**: `~/Library/Application Support/org.carbonwise.carbon-wise/`
/// - **Windows**: `C:\Users\<User>\AppData\Roaming\carbonwise\carbon-wise\data\`
pub fn get_or_create_data_dir() -> Result<PathBuf> {
    let project_dirs = project_dirs()?;
    let data_dir = project_dirs.data_dir();

    if !data_dir.exists() {
        fs::create_dir_all(data_dir)?;
    }

    Ok(data_dir.to_path_buf())
}

/// Copy files (not directories) from source to destination
fn copy_dir_files(src: &Path, dst: &Path) -> Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            continue;
        }
        fs::copy(entry.path(), dst.join(entry.file_name()))?;
    }
    Ok(())
}

/// Write `data` to `path` through a synced temp file and a rename
///
/// A crash mid-write leaves the previous file intact.
pub fn atomic_write(path: &Path, data: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = PathBuf::from(tmp_name);

    let mut file = File::create(&tmp_path)?;
    file.write_all(data)?;
    file.sync_all()?;
    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_atomic_write_creates_parents_and_leaves_no_temp() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("history.json");

        atomic_write(&path, b"{}").expect("write");

        assert_eq!(fs::read(&path).expect("read"), b"{}");
        assert!(!dir.path().join("nested").join("history.json.tmp").exists());
    }

    #[test]
    fn test_atomic_write_overwrites() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("history.json");

        atomic_write(&path, b"first").expect("write");
        atomic_write(&path, b"second").expect("write");

        assert_eq!(fs::read_to_string(&path).expect("read"), "second");
    }

    #[test]
    fn test_copy_dir_files_skips_directories() {
        let src = tempfile::tempdir().expect("tempdir");
        let dst = tempfile::tempdir().expect("tempdir");
        fs::write(src.path().join("carbon-wise.toml"), "x = 1").expect("write");
        fs::create_dir(src.path().join("sub")).expect("mkdir");

        copy_dir_files(src.path(), dst.path()).expect("copy");

        assert!(dst.path().join("carbon-wise.toml").exists());
        assert!(!dst.path().join("sub").exists());
    }
}
