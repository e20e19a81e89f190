//! Persisted CLI settings.
//!
//! The working directory lives in a single `settings.json` next to the
//! invocation and is read in exactly one place; the library itself never
//! touches it and always receives the directory as an argument.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Settings file name, looked up in the current directory.
pub const SETTINGS_FILE: &str = "settings.json";

/// Default working directory when no settings exist.
pub const DEFAULT_IN_DIR: &str = "IN";

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "inDir", skip_serializing_if = "Option::is_none")]
    pub in_dir: Option<String>,
}

impl Settings {
    /// Load settings, falling back to defaults when the file is missing
    /// or unparsable.
    pub fn load(path: impl AsRef<Path>) -> Self {
        fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default()
    }

    pub fn save(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        fs::write(path, serde_json::to_string_pretty(self).unwrap_or_default())
    }
}

/// Resolve the working directory: an explicit `--dir` wins, then the
/// settings file, then `./IN`. Stray quotes from copy-pasted Windows
/// paths are trimmed.
pub fn working_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = explicit {
        return dir;
    }
    let settings = Settings::load(SETTINGS_FILE);
    match settings.in_dir {
        Some(dir) => PathBuf::from(dir.trim().trim_matches('"')),
        None => PathBuf::from(DEFAULT_IN_DIR),
    }
}
