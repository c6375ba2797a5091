//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::ClientResult;

/// Renders the effective configuration as TOML.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<String> {
    let toml_str = toml::to_string_pretty(config)?;
    Ok(format!("# config.toml ({})\n{}", path.display(), toml_str))
}

/// Validates the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<String> {
    config.validate()?;
    if config.events.path.is_none() {
        return Ok("Configuration is valid (no events.path, --events is required).".to_string());
    }
    Ok("Configuration is valid.".to_string())
}

/// The configuration file path in use.
pub fn path(path: &Path) -> String {
    format!("config: {}", path.display())
}
