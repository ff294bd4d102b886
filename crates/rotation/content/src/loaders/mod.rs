//! Content loaders for reading configuration and scripts from files.
//!
//! Format is chosen by extension: `.toml` or `.ron`.

pub mod config;
pub mod opener;

pub use config::ConfigLoader;
pub use opener::{OpenerLoader, ScriptedStep};

use std::path::Path;

use anyhow::Context;

/// Common result type for loaders.
pub type LoadResult<T> = anyhow::Result<T>;

/// Supported on-disk formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Format {
    Toml,
    Ron,
}

impl Format {
    /// Detects the format from a file extension.
    pub fn from_path(path: &Path) -> LoadResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(Self::Toml),
            Some(ext) if ext.eq_ignore_ascii_case("ron") => Ok(Self::Ron),
            _ => anyhow::bail!(
                "unsupported file type for {} (expected .toml or .ron)",
                path.display()
            ),
        }
    }
}

/// Helper function to read file contents.
pub(crate) fn read_file(path: &Path) -> LoadResult<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Reads and deserializes `path` in the format given by its extension.
pub(crate) fn parse_file<T: serde::de::DeserializeOwned>(path: &Path) -> LoadResult<T> {
    let format = Format::from_path(path)?;
    let content = read_file(path)?;
    let value = match format {
        Format::Toml => toml::from_str(&content)
            .with_context(|| format!("failed to parse {} as TOML", path.display()))?,
        Format::Ron => ron::from_str(&content)
            .with_context(|| format!("failed to parse {} as RON", path.display()))?,
    };
    Ok(value)
}
