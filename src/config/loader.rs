//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the engine
//! configuration from a YAML file.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;

use crate::error::{EngineError, EngineResult};

use super::types::EngineConfig;

/// Name of the configuration file inside the configuration directory.
const CONFIG_FILE: &str = "engine.yaml";

/// Longest workday the calendar count accepts.
const MAX_WORKDAY_HOURS: Decimal = Decimal::from_parts(24, 0, 0, false, 0);

/// Loads and provides access to the engine configuration.
///
/// # Directory Structure
///
/// ```text
/// config/billing/
/// └── engine.yaml   # Workday length, overtime default, rounding, server
/// ```
///
/// # Example
///
/// ```no_run
/// use contractor_billing::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/billing")?;
/// println!("Listening on {}", loader.config().server.bind_address);
/// # Ok::<(), contractor_billing::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config: EngineConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` on success, or an error if:
    /// - `engine.yaml` is missing (`ConfigNotFound`)
    /// - the file is not valid YAML or has mistyped fields (`ConfigParseError`)
    /// - the workday length is not in (0, 24] or the overtime multiplier is
    ///   negative (`ConfigParseError`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let config_path = path.as_ref().join(CONFIG_FILE);
        let config = Self::load_yaml(&config_path)?;
        Self::validate(&config, &config_path)?;
        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    fn load_yaml(path: &Path) -> EngineResult<EngineConfig> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate(config: &EngineConfig, path: &Path) -> EngineResult<()> {
        let invalid = |message: String| EngineError::ConfigParseError {
            path: path.display().to_string(),
            message,
        };

        if config.workday_hours <= Decimal::ZERO || config.workday_hours > MAX_WORKDAY_HOURS {
            return Err(invalid(format!(
                "workday_hours must be greater than 0 and at most {}, got {}",
                MAX_WORKDAY_HOURS, config.workday_hours
            )));
        }
        if config.default_overtime_multiplier < Decimal::ZERO {
            return Err(invalid(format!(
                "default_overtime_multiplier must not be negative, got {}",
                config.default_overtime_multiplier
            )));
        }
        Ok(())
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> EngineConfig {
        self.config
    }
}
