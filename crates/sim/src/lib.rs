//! Deterministic encounter simulator for the rotation engine.
//!
//! The simulator plays the executor role: it freezes an [`Encounter`] into a
//! snapshot each tick, asks a [`DecisionProvider`](rotation_runtime::DecisionProvider)
//! for an action, and issues it once the player is free.
pub mod config;
pub mod encounter;
pub mod run;

pub use config::SimConfig;
pub use encounter::{Encounter, Waste};
pub use run::{DecisionRecord, Report, run};
