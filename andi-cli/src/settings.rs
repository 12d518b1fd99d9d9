//! Engine configuration loading

use std::path::Path;

use andi_core::EngineConfig;
use anyhow::Context;
use tracing::info;

/// Load the engine config from a YAML file.
///
/// A missing or blank file yields the defaults.
pub fn load_config(path: &Path) -> anyhow::Result<EngineConfig> {
    if !path.exists() {
        info!("Config file not found, using defaults");
        return Ok(EngineConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(EngineConfig::default());
    }

    let config = EngineConfig::from_yaml(&content)
        .with_context(|| format!("parsing config file {}", path.display()))?;
    config.validate()?;
    Ok(config)
}
