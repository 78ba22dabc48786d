//! Store configuration.
//!
//! Every recognized setting is listed here with its default. A config file
//! only needs the keys it wants to override:
//!
//! ```toml
//! id_prefix = "OPS"
//! strict_status = true
//!
//! [defaults]
//! priority = "high"
//!
//! [latency]
//! create_ms = 0
//! ```

use crate::{
    domain::issue::{IssueStatus, IssueType, Priority},
    error::{Result, TrackError},
};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};
use tokio::fs;

/// Values given to fields a creation payload leaves out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueDefaults {
    pub status: IssueStatus,
    pub priority: Priority,
    #[serde(rename = "type")]
    pub issue_type: IssueType,
}

impl Default for IssueDefaults {
    fn default() -> Self {
        Self {
            status: IssueStatus::Open,
            priority: Priority::Medium,
            issue_type: IssueType::Bug,
        }
    }
}

/// Simulated I/O latency per store operation, in milliseconds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatencyConfig {
    pub get_all_ms: u64,
    pub get_by_id_ms: u64,
    pub create_ms: u64,
    pub update_ms: u64,
    pub delete_ms: u64,
}

impl LatencyConfig {
    /// No simulated latency at all
    pub fn none() -> Self {
        Self {
            get_all_ms: 0,
            get_by_id_ms: 0,
            create_ms: 0,
            update_ms: 0,
            delete_ms: 0,
        }
    }

    pub fn get_all(&self) -> Duration {
        Duration::from_millis(self.get_all_ms)
    }

    pub fn get_by_id(&self) -> Duration {
        Duration::from_millis(self.get_by_id_ms)
    }

    pub fn create(&self) -> Duration {
        Duration::from_millis(self.create_ms)
    }

    pub fn update(&self) -> Duration {
        Duration::from_millis(self.update_ms)
    }

    pub fn delete(&self) -> Duration {
        Duration::from_millis(self.delete_ms)
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            get_all_ms: 300,
            get_by_id_ms: 200,
            create_ms: 400,
            update_ms: 350,
            delete_ms: 250,
        }
    }
}

/// Store and transition configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Prefix of display ids (`TRACK` in `TRACK-001`)
    pub id_prefix: String,
    /// Zero-padding width of the display id counter
    pub id_width: usize,
    /// Marker appended to the title of a duplicated issue
    pub copy_suffix: String,
    pub defaults: IssueDefaults,
    pub latency: LatencyConfig,
    /// Reject status changes to values outside the workflow
    pub strict_status: bool,
    /// Append a status-change activity on every transition
    pub record_status_activity: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            id_prefix: "TRACK".to_string(),
            id_width: 3,
            copy_suffix: " (Copy)".to_string(),
            defaults: IssueDefaults::default(),
            latency: LatencyConfig::default(),
            strict_status: false,
            record_status_activity: false,
        }
    }
}

impl StoreConfig {
    const MAX_ID_WIDTH: usize = 9;

    /// Parses a TOML document and validates it
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: StoreConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads and validates a TOML config file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).await?;
        Self::from_toml_str(&contents)
    }

    /// Checks semantic constraints serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.id_prefix.trim().is_empty() {
            return Err(TrackError::ConfigError(
                "id_prefix must not be empty".to_string(),
            ));
        }

        if self.id_width == 0 || self.id_width > Self::MAX_ID_WIDTH {
            return Err(TrackError::ConfigError(format!(
                "id_width must be between 1 and {}, got {}",
                Self::MAX_ID_WIDTH,
                self.id_width
            )));
        }

        if self.copy_suffix.is_empty() {
            return Err(TrackError::ConfigError(
                "copy_suffix must not be empty".to_string(),
            ));
        }

        if !self.defaults.status.is_workflow() {
            return Err(TrackError::ConfigError(format!(
                "defaults.status '{}' is not a workflow status",
                self.defaults.status
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = StoreConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.latency.create(), Duration::from_millis(400));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = StoreConfig::from_toml_str(
            r#"
            id_prefix = "OPS"

            [defaults]
            priority = "high"

            [latency]
            create_ms = 0
            "#,
        )
        .unwrap();

        assert_eq!(config.id_prefix, "OPS");
        assert_eq!(config.id_width, 3);
        assert_eq!(config.defaults.priority, Priority::High);
        assert_eq!(config.defaults.status, IssueStatus::Open);
        assert_eq!(config.latency.create_ms, 0);
        assert_eq!(config.latency.update_ms, 350);
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = StoreConfig::default();
        config.id_prefix = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.id_width = 0;
        assert!(config.validate().is_err());

        let mut config = StoreConfig::default();
        config.defaults.status = IssueStatus::from("triage");
        assert!(matches!(config.validate(), Err(TrackError::ConfigError(_))));
    }

    #[test]
    fn test_invalid_toml_is_a_parse_error() {
        let result = StoreConfig::from_toml_str("id_width = \"wide\"");
        assert!(matches!(result, Err(TrackError::ConfigParseError(_))));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("trackboard.toml");
        tokio::fs::write(&path, "strict_status = true\n").await.unwrap();

        let config = StoreConfig::load(&path).await.unwrap();
        assert!(config.strict_status);
        assert!(!config.record_status_activity);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let result = StoreConfig::load(temp_dir.path().join("missing.toml")).await;
        assert!(matches!(result, Err(TrackError::IoError(_))));
    }
}
