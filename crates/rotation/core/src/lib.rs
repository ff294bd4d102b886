//! Deterministic building blocks for a priority-based action decision engine.
//!
//! `rotation-core` defines the per-tick state model and the pure predicates
//! every decision layer is built from: lookahead timing, the phase cycle, the
//! overflow guard, the burst alignment gate and the weave window. Nothing in
//! this crate performs I/O or keeps hidden state; the only cross-tick state
//! ([`PhaseController`], [`OpenerState`]) is owned by whoever drives it.
pub mod actions;
pub mod burst;
pub mod config;
pub mod context;
pub mod error;
pub mod opener;
pub mod overflow;
pub mod phase;
pub mod snapshot;
pub mod timing;
pub mod weave;

pub use actions::{ActionSpec, ActionTraits};
pub use burst::BurstPolicy;
pub use config::{
    BurstConfig, EngineConfig, OpenerConfig, OverflowConfig, PhaseConfig, TimingConfig,
    TimingProfile, Toggles, WeaveConfig,
};
pub use context::{DecisionContext, PhaseView};
pub use error::ConfigError;
pub use opener::{OpenerEvent, OpenerScript, OpenerState, OpenerStep, StepKind};
pub use phase::{
    PerPhase, Phase, PhaseActions, PhaseController, PhaseDurations, PhaseRates, PhaseTransition,
    ProductionRate,
};
pub use snapshot::{
    AbilityState, ActionId, Gauge, GaugeId, GcdTimer, IssuedAction, PartyMember, Snapshot,
    StateProvider, StatusId, StatusScope, StatusSet, StatusTimer, SupportRequests, TargetId,
    TargetInfo, TargetState, Tracked,
};
pub use weave::WeaveWindow;
