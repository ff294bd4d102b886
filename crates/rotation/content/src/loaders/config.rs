//! Engine configuration loader.

use std::path::Path;

use anyhow::Context;
use rotation_core::EngineConfig;

use crate::loaders::{LoadResult, parse_file};

/// Loader for [`EngineConfig`] from TOML or RON files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate an engine configuration.
    ///
    /// Missing sections and fields take their defaults, so a file only needs
    /// to name what it changes:
    ///
    /// ```toml
    /// [phases.profile.custom]
    /// p1 = 42.0
    /// p2 = 42.0
    /// p3 = 36.0
    ///
    /// [burst]
    /// policy = "every_two_minutes"
    /// ```
    pub fn load(path: &Path) -> LoadResult<EngineConfig> {
        let config: EngineConfig = parse_file(path)?;
        config
            .validate()
            .with_context(|| format!("invalid engine configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Parses a TOML string without touching the filesystem.
    pub fn from_toml_str(content: &str) -> LoadResult<EngineConfig> {
        let config: EngineConfig =
            toml::from_str(content).context("failed to parse engine configuration TOML")?;
        config.validate()?;
        Ok(config)
    }
}
