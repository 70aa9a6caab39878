//! Loading of the optional `template-kit.toml` settings file.

use crate::models::settings::Settings;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Load `template-kit.toml`; a missing file yields defaults.
pub fn load(path: &Path) -> Result<Settings> {
    if !path.exists() {
        return Ok(Settings::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("read settings {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("parse settings {}", path.display()))
}
