//! Job content for the rotation engine.
//!
//! This crate houses static job data and provides loaders for RON/TOML files:
//! - Bard action catalog with classification traits
//! - Status and gauge identifiers, including the party burst set
//! - Phase switch mapping and the standard opener script
//! - Engine configuration and opener scripts (data-driven via TOML/RON)
//!
//! Content is consumed by the runtime and never appears in engine state.

pub mod bard;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use bard::{BardAction, BardKit, PHASE_ACTIONS, standard_opener};

#[cfg(feature = "loaders")]
pub use loaders::{ConfigLoader, LoadResult, OpenerLoader, ScriptedStep};
