use super::files::{atomic_write, ensure_dir, read_file};
use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Key holding the task collection
pub const TODO_KEY: &str = "todo-list";
/// Key holding the Spotify embed link
pub const SPOTIFY_KEY: &str = "spotify-embed-link";
/// Key holding user settings
pub const SETTINGS_KEY: &str = "settings";

/// Keyed JSON values, one `<key>.json` file each inside the data directory
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read `key`, falling back to `default` when the value is missing,
    /// unreadable or malformed. Failures are logged, never returned.
    pub fn read<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let content = match read_file(&path) {
            Ok(Some(content)) => content,
            Ok(None) => return default,
            Err(e) => {
                log::warn!("could not read {}: {:#}; using default", key, e);
                return default;
            }
        };

        match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                log::warn!("stored value for {} is malformed ({}); using default", key, e);
                default
            }
        }
    }

    /// Serialize `value` under `key`, replacing any previous value
    pub fn write<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        ensure_dir(&self.dir)?;
        let json = serde_json::to_string_pretty(value)?;
        atomic_write(self.path_for(key), &json)?;
        log::trace!("wrote {} ({} bytes)", key, json.len());
        Ok(())
    }
}
