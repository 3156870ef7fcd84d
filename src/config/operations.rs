//! Config loading, validation, and serialization.

use super::model::EngineConfig;
use crate::error::{DeskError, Result};
use std::path::Path;

impl EngineConfig {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(EngineConfig)` - Successfully loaded and validated config
    /// * `Err(DeskError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            DeskError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: EngineConfig = if yaml.trim().is_empty() {
            EngineConfig::default()
        } else {
            serde_yaml::from_str(yaml)
                .map_err(|e| DeskError::UserError(format!("failed to parse config YAML: {}", e)))?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| DeskError::UserError(format!("failed to serialize config to YAML: {}", e)))
    }

    /// Validate config values.
    ///
    /// - `journal_capacity` must be positive
    /// - `event_log`, when set, must not be an empty path
    pub fn validate(&self) -> Result<()> {
        if self.journal_capacity == 0 {
            return Err(DeskError::UserError(
                "config validation failed: journal_capacity must be greater than 0".to_string(),
            ));
        }

        if let Some(path) = &self.event_log
            && path.as_os_str().is_empty()
        {
            return Err(DeskError::UserError(
                "config validation failed: event_log must not be empty when set".to_string(),
            ));
        }

        Ok(())
    }
}
