//! Settings file loading.
//!
//! Settings are TOML. Every key is optional; anything left out keeps its
//! default.
//!
//! ```toml
//! default_material = "stainless"
//! development_divisions = 24
//!
//! [stairs]
//! ideal_rise_mm = 180.0
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use fab_core::FabricationSettings;
use tracing::debug;

/// Parse and validate settings from TOML text.
pub fn parse_settings(text: &str) -> Result<FabricationSettings> {
    let settings: FabricationSettings = toml::from_str(text).context("invalid settings TOML")?;
    settings.validate()?;
    Ok(settings)
}

/// Load settings from `path`, or the defaults when no path is given.
pub fn load_settings(path: Option<&Path>) -> Result<FabricationSettings> {
    let Some(path) = path else {
        return Ok(FabricationSettings::default());
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read settings file {}", path.display()))?;
    let settings = parse_settings(&text).with_context(|| format!("in {}", path.display()))?;
    debug!(path = %path.display(), "settings loaded");
    Ok(settings)
}
