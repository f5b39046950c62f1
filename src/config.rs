//! Configuration file handling
//!
//! An optional JSON file tunes the demo: which key the lot is stored under,
//! how often the dashboard refreshes, and how full a freshly generated lot
//! is. Every field has a default, so a partial file (or none at all) works.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::lot::{DEFAULT_INITIAL_OCCUPANCY, DEFAULT_STORAGE_KEY, LotOptions};
use crate::presenter::DEFAULT_REFRESH_INTERVAL;

/// Demo settings that can be saved/loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Blob store key holding the lot
    pub storage_key: String,
    /// Seconds between automatic dashboard refreshes
    pub refresh_interval_secs: u64,
    /// Probability that a spot starts occupied in a new lot
    pub initial_occupancy: f64,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL.as_secs(),
            initial_occupancy: DEFAULT_INITIAL_OCCUPANCY,
        }
    }
}

impl DemoConfig {
    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .context("Failed to serialize configuration to JSON")?;

        fs::write(&path, json)
            .with_context(|| format!("Failed to write configuration to {:?}", path.as_ref()))?;

        Ok(())
    }

    /// Load configuration from a JSON file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read configuration from {:?}", path.as_ref()))?;

        let config: Self =
            serde_json::from_str(&content).context("Failed to parse configuration JSON")?;

        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        let key = self.storage_key.trim();
        if key.is_empty() {
            anyhow::bail!("Storage key must be specified");
        }
        if !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            anyhow::bail!("Storage key can only contain letters, numbers, '_' and '-'");
        }

        if self.refresh_interval_secs == 0 {
            anyhow::bail!("Refresh interval must be at least one second");
        }

        if !(0.0..=1.0).contains(&self.initial_occupancy) {
            anyhow::bail!(
                "Initial occupancy must be between 0 and 1, got {}",
                self.initial_occupancy
            );
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn lot_options(&self) -> LotOptions {
        LotOptions {
            storage_key: self.storage_key.trim().to_string(),
            initial_occupancy: self.initial_occupancy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let config = DemoConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.storage_key, "smartParkDemoData");
        assert_eq!(config.refresh_interval(), Duration::from_secs(10));
        assert_eq!(config.initial_occupancy, 0.3);
    }

    #[test]
    fn test_save_and_load_json_config() {
        let config = DemoConfig {
            storage_key: "northLot".to_string(),
            refresh_interval_secs: 3,
            initial_occupancy: 0.5,
        };

        let temp_file = NamedTempFile::new().unwrap();
        config.save_to_file(temp_file.path()).unwrap();

        let loaded = DemoConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(br#"{ "refresh_interval_secs": 5 }"#)
            .unwrap();
        temp_file.flush().unwrap();

        let loaded = DemoConfig::load_from_file(temp_file.path()).unwrap();
        assert_eq!(loaded.refresh_interval_secs, 5);
        assert_eq!(loaded.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded.initial_occupancy, DEFAULT_INITIAL_OCCUPANCY);
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = DemoConfig::load_from_file("/nonexistent/smartpark.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/smartpark.json"));
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(b"{ not json").unwrap();
        temp_file.flush().unwrap();

        let err = DemoConfig::load_from_file(temp_file.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to parse configuration JSON"));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = DemoConfig {
            refresh_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.refresh_interval_secs = 10;
        config.initial_occupancy = 1.5;
        assert!(config.validate().is_err());

        config.initial_occupancy = 0.3;
        config.storage_key = "../lot".to_string();
        assert!(config.validate().is_err());

        config.storage_key = "   ".to_string();
        assert!(config.validate().is_err());
    }
}
