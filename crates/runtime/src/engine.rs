//! Decision engine orchestrator.
//!
//! The engine owns the only cross-tick state (phase controller and opener
//! counter) and exposes a builder-based API for executors to drive it once
//! per decision opportunity.

use rotation_core::{
    EngineConfig, OpenerEvent, OpenerState, PhaseController, PhaseTransition, PhaseView, Snapshot,
    StateProvider, Tracked,
};

use crate::error::{Result, RuntimeError};
use crate::pipeline::{Decision, DecisionPipeline, Layer};
use crate::rotation::Rotation;

/// What the tick update changed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TickUpdate {
    pub phase: Option<PhaseTransition>,
    pub opener: Option<OpenerEvent>,
}

/// Priority decision engine for one character.
///
/// Each instance owns its phase and opener state; a simulation and a live
/// session never share timers.
pub struct Engine {
    config: EngineConfig,
    rotation: Box<dyn Rotation>,
    pipeline: DecisionPipeline,
    tracked: Tracked,
    phase: PhaseController,
    opener: OpenerState,
}

impl Engine {
    /// Create a new engine builder
    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn rotation(&self) -> &dyn Rotation {
        self.rotation.as_ref()
    }

    #[must_use]
    pub fn pipeline(&self) -> &DecisionPipeline {
        &self.pipeline
    }

    #[must_use]
    pub fn phase(&self) -> &PhaseController {
        &self.phase
    }

    #[must_use]
    pub fn opener(&self) -> &OpenerState {
        &self.opener
    }

    /// Identifiers the rotation reads, for [`Snapshot::capture`].
    #[must_use]
    pub fn tracked(&self) -> &Tracked {
        &self.tracked
    }

    /// Back to the pre-combat state.
    pub fn reset(&mut self) {
        self.phase.reset();
        self.opener.reset();
    }

    /// Advances the phase controller and the opener counter.
    ///
    /// Call once per tick before [`decide`](Self::decide). Leaving combat
    /// resets both.
    pub fn tick_update<P: StateProvider + ?Sized>(&mut self, provider: &P) -> TickUpdate {
        let phase = self.phase.update(
            provider,
            self.rotation.phase_actions(),
            self.config.phases.max_duration,
        );
        if let Some(transition) = phase {
            tracing::info!(
                from = %transition.from,
                to = %transition.to,
                at = transition.at,
                "phase transition"
            );
        }

        let opener = if self.config.opener.enabled {
            self.opener
                .update(provider, self.rotation.opener(), self.config.opener.deadline)
        } else {
            None
        };
        match opener {
            Some(OpenerEvent::Completed) => tracing::info!("opener completed"),
            Some(OpenerEvent::Abandoned { step }) => {
                tracing::warn!(step, total = self.rotation.opener().len(), "opener abandoned");
            }
            Some(OpenerEvent::Advanced { step }) => tracing::debug!(step, "opener advanced"),
            Some(OpenerEvent::Reset) => tracing::debug!("opener reset"),
            None => {}
        }

        TickUpdate { phase, opener }
    }

    /// Chooses zero or one action for `snapshot`.
    ///
    /// Pure with respect to engine state: the same snapshot always yields the
    /// same decision.
    pub fn decide(&self, snapshot: Snapshot) -> Option<Decision> {
        let view = PhaseView::resolve(
            &self.phase,
            &self.config,
            self.rotation.phase_actions(),
            &snapshot,
        );
        let opener_step = (self.config.opener.enabled && snapshot.in_combat())
            .then(|| self.opener.current(self.rotation.opener()))
            .flatten();
        let in_combat = snapshot.in_combat();
        let has_target = snapshot.target().is_some();

        let mut ctx = rotation_core::DecisionContext::new(
            snapshot,
            self.config,
            view,
            opener_step,
            self.rotation.party_burst(),
        );
        let decision = self.pipeline.decide(&mut ctx);

        match decision {
            Some(decision) => tracing::debug!(
                layer = %decision.layer,
                rule = decision.rule,
                action = %decision.action,
                "decision"
            ),
            None if in_combat && has_target => {
                tracing::warn!(rotation = self.rotation.name(), "no action matched in combat");
            }
            None => {}
        }
        decision
    }

    /// Tick update followed by a decision on the same snapshot.
    pub fn tick(&mut self, snapshot: Snapshot) -> Option<Decision> {
        self.tick_update(&snapshot);
        self.decide(snapshot)
    }

    /// Freezes `provider` into a snapshot of the tracked ids, then ticks.
    pub fn tick_provider<P: StateProvider + ?Sized>(&mut self, provider: &P) -> Option<Decision> {
        let snapshot = Snapshot::capture(provider, &self.tracked);
        self.tick(snapshot)
    }

    /// Pre-combat decision while a pull countdown runs.
    ///
    /// Proposes the burst potion once `remaining` drops to the configured
    /// lead, if potion use is enabled.
    pub fn countdown(&self, remaining: f32, snapshot: &Snapshot) -> Option<Decision> {
        if !self.config.toggles.potion || remaining > self.config.timing.potion_countdown_lead {
            return None;
        }
        let potion = self.rotation.potion()?;
        let usable = rotation_core::timing::is_usable(snapshot, potion);
        usable.then(|| {
            tracing::debug!(remaining, action = %potion, "countdown potion");
            Decision {
                action: potion,
                layer: Layer::Countdown,
                rule: "countdown_potion",
            }
        })
    }
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("rotation", &self.rotation.name())
            .field("phase", &self.phase)
            .field("opener", &self.opener)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Engine`].
pub struct EngineBuilder {
    config: EngineConfig,
    rotation: Option<Box<dyn Rotation>>,
}

impl EngineBuilder {
    fn new() -> Self {
        Self {
            config: EngineConfig::default(),
            rotation: None,
        }
    }

    /// Override engine configuration
    pub fn config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the rule book (required)
    pub fn rotation(mut self, rotation: impl Rotation + 'static) -> Self {
        self.rotation = Some(Box::new(rotation));
        self
    }

    /// Validates the configuration and assembles the pipeline.
    pub fn build(self) -> Result<Engine> {
        self.config.validate()?;
        let rotation = self.rotation.ok_or(RuntimeError::MissingRotation)?;
        let pipeline = rotation.pipeline()?;
        let tracked = rotation.tracked();

        tracing::debug!(rotation = rotation.name(), "engine built");

        Ok(Engine {
            config: self.config,
            rotation,
            pipeline,
            tracked,
            phase: PhaseController::new(),
            opener: OpenerState::new(),
        })
    }
}
