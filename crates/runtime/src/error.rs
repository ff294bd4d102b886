//! Unified error types surfaced by the runtime API.
//!
//! Decisions themselves never fail. Errors only arise while assembling an
//! engine: invalid configuration or an unusable rule book.
use thiserror::Error;

use rotation_core::ConfigError;

use crate::pipeline::Layer;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("rule layer {layer} has no rules")]
    EmptyLayer { layer: Layer },

    #[error("engine requires a rotation before building")]
    MissingRotation,
}
