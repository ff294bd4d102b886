//! Configuration errors.
//!
//! Decision-time code never fails: unusable actions and missing data are "no
//! match". The only fallible operation in this crate is validating an
//! [`EngineConfig`](crate::config::EngineConfig) before an engine is built.

/// Result alias for configuration validation.
pub type Result<T, E = ConfigError> = core::result::Result<T, E>;

/// A configuration value that cannot be used.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ConfigError {
    /// A numeric field lies outside its accepted range.
    #[error("{field} = {value} is outside {min}..={max}")]
    OutOfRange {
        field: &'static str,
        value: f32,
        min: f32,
        max: f32,
    },

    /// Two related fields are in the wrong order.
    #[error("{lower} ({lower_value}) must not exceed {upper} ({upper_value})")]
    Misordered {
        lower: &'static str,
        lower_value: f32,
        upper: &'static str,
        upper_value: f32,
    },

    /// A numeric field is NaN or infinite.
    #[error("{field} must be a finite number")]
    NotFinite { field: &'static str },
}

impl ConfigError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::OutOfRange { field, .. } | Self::NotFinite { field } => field,
            Self::Misordered { lower, .. } => lower,
        }
    }
}

/// Checks `min <= value <= max` for a named field.
pub(crate) fn check_range(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(ConfigError::NotFinite { field });
    }
    if value < min || value > max {
        return Err(ConfigError::OutOfRange {
            field,
            value,
            min,
            max,
        });
    }
    Ok(())
}

/// Checks `lower <= upper` for two named fields.
pub(crate) fn check_order(
    lower: (&'static str, f32),
    upper: (&'static str, f32),
) -> Result<()> {
    if lower.1 > upper.1 {
        return Err(ConfigError::Misordered {
            lower: lower.0,
            lower_value: lower.1,
            upper: upper.0,
            upper_value: upper.1,
        });
    }
    Ok(())
}
