use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use torus_core::SessionConfig;

/// Reads session settings from TOML. A missing file yields the defaults.
pub fn load_settings(path: &Path) -> Result<SessionConfig> {
    if !path.exists() {
        tracing::info!(path = %path.display(), "no settings file, using defaults");
        return Ok(SessionConfig::default());
    }
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings {}", path.display()))?;
    toml::from_str(&data).with_context(|| format!("failed to parse settings {}", path.display()))
}
