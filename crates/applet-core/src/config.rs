use crate::error::{FeedError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// FeedConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for the activity feed generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_per_page")]
    pub default_per_page: u32,
    #[serde(default = "default_max_per_page")]
    pub max_per_page: u32,
    /// Upper bound on activities generated for one window.
    #[serde(default = "default_max_activities")]
    pub max_activities: usize,
    /// Width of the window used when `since` is absent or unparsable.
    #[serde(default = "default_window_days")]
    pub default_window_days: u32,
}

fn default_per_page() -> u32 {
    20
}

fn default_max_per_page() -> u32 {
    100
}

fn default_max_activities() -> usize {
    200
}

fn default_window_days() -> u32 {
    30
}

/// Default windows wider than this (about a century) draw a warning.
pub const MAX_WINDOW_DAYS: u32 = 36_500;

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            default_per_page: default_per_page(),
            max_per_page: default_max_per_page(),
            max_activities: default_max_activities(),
            default_window_days: default_window_days(),
        }
    }
}

// ---------------------------------------------------------------------------
// ServerConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    3141
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

fn default_version() -> u32 {
    1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            feed: FeedConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(FeedError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    /// Like `load`, but an uninitialized project gets the built-in defaults.
    pub fn load_or_default(root: &Path) -> Result<Self> {
        match Self::load(root) {
            Err(FeedError::NotInitialized) => Ok(Self::default()),
            other => other,
        }
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        let feed = &self.feed;

        if feed.max_per_page == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "feed.max_per_page must be at least 1".to_string(),
            });
        } else if feed.default_per_page == 0 || feed.default_per_page > feed.max_per_page {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "feed.default_per_page={} is outside 1..={}; it will be clamped",
                    feed.default_per_page, feed.max_per_page
                ),
            });
        }

        if feed.max_activities == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "feed.max_activities=0 disables the feed".to_string(),
            });
        } else if feed.max_activities > 10_000 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "feed.max_activities={} (>10000 is unusual; every request regenerates the window)",
                    feed.max_activities
                ),
            });
        }

        if feed.default_window_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "feed.default_window_days=0 yields an empty default window".to_string(),
            });
        } else if feed.default_window_days > MAX_WINDOW_DAYS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "feed.default_window_days={} exceeds {MAX_WINDOW_DAYS}; the window start saturates",
                    feed.default_window_days
                ),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_match_feed_contract() {
        let cfg = Config::default();
        assert_eq!(cfg.feed.default_per_page, 20);
        assert_eq!(cfg.feed.max_per_page, 100);
        assert_eq!(cfg.feed.max_activities, 200);
        assert_eq!(cfg.feed.default_window_days, 30);
        assert_eq!(cfg.server.port, 3141);
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(FeedError::NotInitialized)
        ));
        assert_eq!(Config::load_or_default(dir.path()).unwrap(), Config::default());
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let mut cfg = Config::default();
        cfg.feed.max_activities = 50;
        cfg.save(dir.path()).unwrap();
        let loaded = Config::load(dir.path()).unwrap();
        assert_eq!(loaded.feed.max_activities, 50);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let dir = TempDir::new().unwrap();
        let path = paths::config_path(dir.path());
        crate::io::atomic_write(&path, b"feed:\n  max_per_page: 50\n").unwrap();
        let cfg = Config::load(dir.path()).unwrap();
        assert_eq!(cfg.feed.max_per_page, 50);
        assert_eq!(cfg.feed.default_per_page, 20);
        assert_eq!(cfg.server.port, 3141);
    }

    #[test]
    fn validate_default_config_no_warnings() {
        assert!(Config::default().validate().is_empty());
    }

    #[test]
    fn validate_flags_oversized_window() {
        let mut cfg = Config::default();
        cfg.feed.default_window_days = u32::MAX;
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].level, WarnLevel::Warning);
        assert!(warnings[0].message.contains("default_window_days=4294967295"));

        cfg.feed.default_window_days = MAX_WINDOW_DAYS;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_flags_out_of_range_per_page() {
        let mut cfg = Config::default();
        cfg.feed.default_per_page = 500;
        let warnings = cfg.validate();
        assert!(warnings
            .iter()
            .any(|w| w.message.contains("default_per_page=500")));
    }

    #[test]
    fn validate_flags_zero_max_per_page_as_error() {
        let mut cfg = Config::default();
        cfg.feed.max_per_page = 0;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.level == WarnLevel::Error));
    }

    #[test]
    fn validate_flags_huge_cap() {
        let mut cfg = Config::default();
        cfg.feed.max_activities = 50_000;
        let warnings = cfg.validate();
        assert!(warnings.iter().any(|w| w.message.contains(">10000")));
    }
}
