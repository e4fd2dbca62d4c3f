//! Project scope discovery and application settings

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use serde::Deserialize;
use thiserror::Error;

/// Name of the directory that marks the root of a project-local scope.
pub const MARKER_DIR: &str = ".gemini";

/// File inside the marker directory holding application settings.
const SETTINGS_FILE: &str = "settings.json";

/// Errors that can occur while loading application settings
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Unable to read settings file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Unable to parse JSON settings file {path}: {source}")]
    Json {
        source: serde_json::Error,
        path: PathBuf,
    },
}

/// Find the nearest marker directory, starting at the process working directory.
///
/// Returns `None` when no ancestor carries one, or when the working directory
/// cannot be determined.
#[must_use]
pub fn find_marker_dir() -> Option<PathBuf> {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| find_marker_dir_from(&cwd))
}

/// Find the nearest marker directory, starting at `start`.
///
/// Walks up through `start` and its ancestors and returns the first
/// `<ancestor>/.gemini` that exists and is a directory. The filesystem root is
/// inspected once before the search gives up, and stat failures count as
/// absence rather than errors.
#[must_use]
pub fn find_marker_dir_from(start: &Path) -> Option<PathBuf> {
    let mut path = start.to_path_buf();
    debug!("Searching for {MARKER_DIR} directory in {}", start.display());
    loop {
        let candidate = path.join(MARKER_DIR);
        if candidate.is_dir() {
            info!("Found marker directory: {}", candidate.display());
            return Some(candidate);
        }
        if !path.pop() {
            return None;
        }
    }
}

/// Application settings stored in `<marker>/settings.json`.
///
/// Opaque to the command loader, which only carries them along for the host.
/// Unknown keys are ignored; the host CLI owns that surface.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub theme: Option<String>,
    pub auto_accept: Option<bool>,
    pub sandbox: Option<bool>,
    pub preferred_editor: Option<String>,
}

impl Settings {
    /// Load settings from `<marker_dir>/settings.json`.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError::Read` if the file exists but cannot be read, or
    /// `SettingsError::Json` if it cannot be parsed.
    pub fn load(marker_dir: &Path) -> Result<Settings, SettingsError> {
        let path = marker_dir.join(SETTINGS_FILE);
        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings file at {}, using defaults", path.display());
                return Ok(Settings::default());
            }
            Err(e) => return Err(SettingsError::Read { path, source: e }),
        };
        serde_json::from_str(&contents).map_err(|e| SettingsError::Json { source: e, path })
    }

    /// Load settings, falling back to the defaults (with a warning) on failure.
    #[must_use]
    pub fn load_or_default(marker_dir: &Path) -> Settings {
        Settings::load(marker_dir).unwrap_or_else(|e| {
            warn!("{e}");
            Settings::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_marker_in_start_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(MARKER_DIR)).unwrap();

        let found = find_marker_dir_from(dir.path()).unwrap();
        assert_eq!(found, dir.path().join(MARKER_DIR));
    }

    #[test]
    fn test_marker_in_grandparent() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(MARKER_DIR)).unwrap();
        let nested = dir.path().join("a/b/c/d");
        fs::create_dir_all(&nested).unwrap();

        let found = find_marker_dir_from(&nested).unwrap();
        assert_eq!(found, dir.path().join(MARKER_DIR));
    }

    #[test]
    fn test_nearest_marker_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(MARKER_DIR)).unwrap();
        let nested = dir.path().join("child");
        fs::create_dir_all(nested.join(MARKER_DIR)).unwrap();

        let found = find_marker_dir_from(&nested).unwrap();
        assert_eq!(found, nested.join(MARKER_DIR));
    }

    #[test]
    fn test_marker_file_is_not_a_marker() {
        // A plain file named .gemini doesn't count; the walk continues upward.
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(MARKER_DIR)).unwrap();
        let child = dir.path().join("child");
        fs::create_dir(&child).unwrap();
        fs::write(child.join(MARKER_DIR), "not a directory").unwrap();

        let found = find_marker_dir_from(&child).unwrap();
        assert_eq!(found, dir.path().join(MARKER_DIR));
    }

    #[test]
    fn test_settings_missing_file_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert!(settings.theme.is_none());
        assert!(settings.auto_accept.is_none());
    }

    #[test]
    fn test_settings_parses_known_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join(SETTINGS_FILE),
            r#"{
                "theme": "dusk",
                "autoAccept": true,
                "futureKey": {"nested": 1}
            }"#,
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.theme.as_deref(), Some("dusk"));
        assert_eq!(settings.auto_accept, Some(true));
        assert!(settings.sandbox.is_none());
    }

    #[test]
    fn test_settings_malformed_json() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let result = Settings::load(dir.path());
        match result {
            Err(SettingsError::Json { path, .. }) => {
                assert_eq!(path, dir.path().join(SETTINGS_FILE));
            }
            other => panic!("Expected SettingsError::Json, got: {other:?}"),
        }
    }

    #[test]
    fn test_settings_load_or_default_swallows_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(SETTINGS_FILE), "{not json").unwrap();

        let settings = Settings::load_or_default(dir.path());
        assert!(settings.theme.is_none());
    }
}
