//! Single-file config loader.

use std::fs;
use std::path::Path;

use log::{debug, info};

use crate::{CarebookConfig, ConfigError};

/// Default config filename next to the service.
pub const DEFAULT_CONFIG_FILE: &str = "carebook.json5";

/// Load config from a json5 file, falling back to defaults when the file
/// does not exist. A present but unreadable or malformed file is an error.
pub fn load(path: impl AsRef<Path>) -> Result<CarebookConfig, ConfigError> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("config file absent, using defaults (path={})", path.display());
        return Ok(CarebookConfig::default());
    }
    let raw = fs::read_to_string(path)?;
    let config: CarebookConfig = json5::from_str(&raw)?;
    validate(&config)?;
    info!("config loaded (path={})", path.display());
    Ok(config)
}

fn validate(config: &CarebookConfig) -> Result<(), ConfigError> {
    if config.assistant.max_tool_steps == 0 {
        return Err(ConfigError::InvalidField {
            path: "assistant.max_tool_steps".to_string(),
            message: "must be at least 1".to_string(),
        });
    }
    if config.assistant.scheduling_keywords.is_empty() {
        return Err(ConfigError::InvalidField {
            path: "assistant.scheduling_keywords".to_string(),
            message: "must not be empty".to_string(),
        });
    }
    Ok(())
}
