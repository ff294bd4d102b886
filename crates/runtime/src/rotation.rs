//! Job rotation abstraction.
//!
//! A [`Rotation`] bundles the static job data the engine needs between ticks
//! (phase switch actions, burst statuses, opener script) with the rule book
//! it assembles into a [`DecisionPipeline`].

use rotation_core::{ActionId, OpenerScript, PhaseActions, StatusId, Tracked};

use crate::error::Result;
use crate::pipeline::DecisionPipeline;

/// Trait for supplying a job's rule book to the [`Engine`](crate::Engine).
///
/// Implementations can cover:
/// - Shipped job rule books ([`Bard`](crate::rotations::Bard))
/// - Variants with a different opener or burst status set
/// - Test fixtures with a handful of rules
pub trait Rotation: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Switch action per phase, for the phase controller.
    fn phase_actions(&self) -> &PhaseActions;

    /// Party-wide statuses that raise the burst signal.
    fn party_burst(&self) -> &[StatusId];

    /// Opener script; may be empty.
    fn opener(&self) -> &OpenerScript;

    /// Burst potion used by the countdown, if the job has one.
    fn potion(&self) -> Option<ActionId> {
        None
    }

    /// Identifiers to copy when freezing a live provider into a snapshot.
    fn tracked(&self) -> Tracked;

    /// Builds the four rule layers.
    fn pipeline(&self) -> Result<DecisionPipeline>;
}
