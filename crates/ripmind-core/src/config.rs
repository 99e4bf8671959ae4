//! Flow configuration.
//!
//! Read from an optional `config.json` in the data directory. Every field has a
//! default, so a partial file only overrides what it names.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LetterError, LetterResult};

/// File name looked up in the data directory
pub const CONFIG_FILE: &str = "config.json";

/// Database file name in the data directory
pub const DATABASE_FILE: &str = "ripmind.redb";

/// Default SMS relay endpoint
pub const DEFAULT_NOTIFY_ENDPOINT: &str = "http://localhost:3000/api/send-sms";

/// How the "send live" choice behaves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiveMode {
    /// Forward to the notification endpoint, then show the completion screen
    #[default]
    Notify,
    /// Post to the in-page wall immediately
    Wall,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    /// Time on the sending screen before the live completion screen
    pub live_delay_ms: u64,
    /// Time on the sending screen before the archive opens
    pub archive_delay_ms: u64,
    /// Notification endpoint; `None` disables notifications
    pub notify_endpoint: Option<String>,
    pub live_mode: LiveMode,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            live_delay_ms: 3000,
            archive_delay_ms: 2000,
            notify_endpoint: Some(DEFAULT_NOTIFY_ENDPOINT.to_string()),
            live_mode: LiveMode::Notify,
        }
    }
}

impl FlowConfig {
    /// Load from `path`. A missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> LetterResult<Self> {
        let path = path.as_ref();
        let raw = match std::fs::read(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No config at {:?}, using defaults", path);
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_slice(&raw).map_err(|e| LetterError::Config(format!("{:?}: {}", path, e)))
    }

    /// Load `config.json` from a data directory.
    pub fn load_from_dir(data_dir: impl AsRef<Path>) -> LetterResult<Self> {
        Self::load(data_dir.as_ref().join(CONFIG_FILE))
    }

    pub fn live_delay(&self) -> Duration {
        Duration::from_millis(self.live_delay_ms)
    }

    pub fn archive_delay(&self) -> Duration {
        Duration::from_millis(self.archive_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = FlowConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config, FlowConfig::default());
        assert_eq!(config.live_delay(), Duration::from_secs(3));
        assert_eq!(config.archive_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_file_overrides() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE),
            r#"{ "live_mode": "wall", "notify_endpoint": null }"#,
        )
        .unwrap();

        let config = FlowConfig::load_from_dir(temp_dir.path()).unwrap();
        assert_eq!(config.live_mode, LiveMode::Wall);
        assert_eq!(config.notify_endpoint, None);
        assert_eq!(config.archive_delay_ms, 2000);
    }

    #[test]
    fn test_malformed_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE), "live_mode = wall").unwrap();

        let err = FlowConfig::load_from_dir(temp_dir.path()).unwrap_err();
        assert!(matches!(err, LetterError::Config(_)));
    }
}
