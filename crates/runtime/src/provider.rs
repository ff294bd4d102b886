//! Abstraction for sourcing per-tick decisions.
//!
//! Executors drive a [`DecisionProvider`] so they can run against the rule
//! engine, a recorded replay, or a scripted fixture.

use rotation_core::Snapshot;

use crate::engine::Engine;
use crate::pipeline::Decision;

/// Trait for providing at most one action per tick.
///
/// Different implementations can handle:
/// - The priority [`Engine`]
/// - Replays of a recorded action log
/// - Testing fixtures
pub trait DecisionProvider {
    /// Pre-combat countdown tick.
    fn countdown(&mut self, remaining: f32, snapshot: &Snapshot) -> Option<Decision>;

    /// In-combat (or idle) tick.
    ///
    /// # Returns
    /// The action to issue, or `None` to issue nothing this tick
    fn next_action(&mut self, snapshot: Snapshot) -> Option<Decision>;
}

impl DecisionProvider for Engine {
    fn countdown(&mut self, remaining: f32, snapshot: &Snapshot) -> Option<Decision> {
        Engine::countdown(self, remaining, snapshot)
    }

    fn next_action(&mut self, snapshot: Snapshot) -> Option<Decision> {
        self.tick(snapshot)
    }
}

/// A provider that never acts. Useful as a baseline or fallback.
#[derive(Clone, Copy, Debug, Default)]
pub struct IdleProvider;

impl DecisionProvider for IdleProvider {
    fn countdown(&mut self, _remaining: f32, _snapshot: &Snapshot) -> Option<Decision> {
        None
    }

    fn next_action(&mut self, _snapshot: Snapshot) -> Option<Decision> {
        None
    }
}
