use super::store::{Store, SETTINGS_KEY};
use crate::domain::quotes::DEFAULT_ROTATION_SECS;
use crate::domain::Priority;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const MAX_QUOTE_INTERVAL_SECS: u64 = 86_400;

/// User settings stored in settings.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_quote_interval")]
    pub quote_interval_secs: u64,
    #[serde(default)]
    pub default_priority: Priority,
}

fn default_log_level() -> String {
    crate::logging::DEFAULT_LEVEL.to_string()
}

fn default_quote_interval() -> u64 {
    DEFAULT_ROTATION_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            quote_interval_secs: default_quote_interval(),
            default_priority: Priority::default(),
        }
    }
}

impl Settings {
    /// Load settings, defaulting on a missing or corrupt file
    pub fn load(store: &Store) -> Self {
        store.read(SETTINGS_KEY, Settings::default())
    }

    /// Rotation interval, kept between one second and one day
    pub fn quote_interval(&self) -> Duration {
        Duration::from_secs(self.quote_interval_secs.clamp(1, MAX_QUOTE_INTERVAL_SECS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_settings_use_defaults() {
        let temp_dir = tempdir().unwrap();
        let settings = Settings::load(&Store::new(temp_dir.path()));

        assert_eq!(settings, Settings::default());
        assert_eq!(settings.quote_interval(), Duration::from_secs(60));
        assert_eq!(settings.default_priority, Priority::Medium);
    }

    #[test]
    fn test_partial_settings_fill_defaults() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("settings.json"),
            r#"{ "default_priority": "high" }"#,
        )
        .unwrap();

        let settings = Settings::load(&Store::new(temp_dir.path()));
        assert_eq!(settings.default_priority, Priority::High);
        assert_eq!(settings.log_level, "info");
        assert_eq!(settings.quote_interval_secs, 60);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let settings = Settings {
            quote_interval_secs: 0,
            ..Settings::default()
        };
        assert_eq!(settings.quote_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_huge_interval_is_capped() {
        let temp_dir = tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join("settings.json"),
            r#"{ "quote_interval_secs": 18446744073709551615 }"#,
        )
        .unwrap();

        let settings = Settings::load(&Store::new(temp_dir.path()));
        assert_eq!(settings.quote_interval_secs, u64::MAX);
        assert_eq!(settings.quote_interval(), Duration::from_secs(86_400));
    }
}
