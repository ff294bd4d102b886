//! Runtime orchestration for the priority decision engine.
//!
//! This crate wires the pure building blocks of `rotation-core` and the job
//! data of `rotation-content` into a tick-driven [`Engine`]. Executors build
//! an engine with a [`Rotation`], call [`Engine::tick`] once per decision
//! opportunity, and issue the returned [`Decision`] themselves.
//!
//! Modules are organized by responsibility:
//! - [`engine`] hosts the orchestrator and builder
//! - [`pipeline`] evaluates the four rule layers
//! - [`rotation`] and [`rotations`] define and ship rule books
//! - [`provider`] abstracts decision sources for executors
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod provider;
pub mod rotation;
pub mod rotations;

pub use engine::{Engine, EngineBuilder, TickUpdate};
pub use error::{Result, RuntimeError};
pub use pipeline::{Decision, DecisionPipeline, Layer, RuleChain};
pub use provider::{DecisionProvider, IdleProvider};
pub use rotation::Rotation;
pub use rotations::Bard;
