//! Per-tick decision context.
//!
//! Rules never query the host directly. The engine freezes the snapshot,
//! resolves configuration and cross-tick state into a [`DecisionContext`],
//! and every rule reads from it. The context owns its data, so rule closures
//! take a plain `&DecisionContext`.

use crate::actions::ActionSpec;
use crate::burst;
use crate::config::EngineConfig;
use crate::opener::OpenerStep;
use crate::phase::{Phase, PhaseActions, PhaseController, ProductionRate};
use crate::snapshot::{ActionId, Snapshot, StateProvider, StatusId};
use crate::timing;
use crate::weave::WeaveWindow;

/// Read-only view of the phase controller for one tick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PhaseView {
    pub phase: Phase,
    /// Seconds in the current phase.
    pub elapsed: f32,
    /// Target duration of the current phase under the active profile.
    pub target: Option<f32>,
    /// Seconds until the current phase lapses on its own.
    pub remaining: f32,
    pub rate: ProductionRate,
    /// The target duration (less drift margin) has been reached.
    pub due: bool,
    /// Phase the cycle moves to next, skipping locked phases.
    pub next: Option<Phase>,
    /// Switch action for `next`.
    pub next_action: Option<ActionId>,
}

impl PhaseView {
    /// Resolves the controller's state against configuration and snapshot.
    #[must_use]
    pub fn resolve<P: StateProvider + ?Sized>(
        controller: &PhaseController,
        config: &EngineConfig,
        actions: &PhaseActions,
        provider: &P,
    ) -> Self {
        let phase = controller.phase();
        let durations = config.durations();
        let next = actions
            .candidates(provider, phase, config.phases.starting)
            .next();

        Self {
            phase,
            elapsed: controller.elapsed(),
            target: durations.get(phase),
            remaining: controller.remaining(config.phases.max_duration),
            rate: config.phases.rate(phase),
            due: controller.is_due(&durations, config.phases.drift_margin),
            next,
            next_action: next.and_then(|phase| actions.get(phase)),
        }
    }

    /// Returns `true` if the current phase lapses within `seconds`.
    #[must_use]
    pub fn ends_within(&self, seconds: f32) -> bool {
        self.phase.is_active() && self.remaining <= seconds
    }
}

/// Everything a rule may read during one tick.
#[derive(Clone, Debug)]
pub struct DecisionContext {
    snapshot: Snapshot,
    config: EngineConfig,
    phase: PhaseView,
    opener_step: Option<OpenerStep>,
    burst_signal: bool,
    opener_window: bool,
    burst_permitted: bool,
    weave: WeaveWindow,
    next_main: Option<ActionId>,
}

impl DecisionContext {
    /// Builds the context, deriving the burst and weave inputs from the
    /// snapshot.
    #[must_use]
    pub fn new(
        snapshot: Snapshot,
        config: EngineConfig,
        phase: PhaseView,
        opener_step: Option<OpenerStep>,
        burst_statuses: &[StatusId],
    ) -> Self {
        let in_combat = snapshot.in_combat();
        let combat_time = snapshot.combat_time();
        let burst_signal = burst::burst_signal(&snapshot, burst_statuses);
        let opener_window =
            burst::opener_window(in_combat, combat_time, config.timing.opener_window);
        let burst_permitted = burst::permits(&config.burst, burst_signal, opener_window, combat_time);
        let weave = WeaveWindow::compute(snapshot.gcd(), config.weave.min_lock);

        Self {
            snapshot,
            config,
            phase,
            opener_step,
            burst_signal,
            opener_window,
            burst_permitted,
            weave,
            next_main: None,
        }
    }

    /// Records the main action the pipeline expects to issue next.
    pub fn set_next_main(&mut self, action: Option<ActionId>) {
        self.next_main = action;
    }

    #[must_use]
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[must_use]
    pub fn phase(&self) -> &PhaseView {
        &self.phase
    }

    #[must_use]
    pub fn opener_step(&self) -> Option<OpenerStep> {
        self.opener_step
    }

    /// A party-wide burst buff is active somewhere in the party.
    #[must_use]
    pub fn burst_signal(&self) -> bool {
        self.burst_signal
    }

    #[must_use]
    pub fn in_opener_window(&self) -> bool {
        self.opener_window
    }

    /// The burst gate's answer for this tick.
    #[must_use]
    pub fn burst_permitted(&self) -> bool {
        self.burst_permitted
    }

    #[must_use]
    pub fn weave(&self) -> WeaveWindow {
        self.weave
    }

    /// Main action the main layer would pick this tick.
    #[must_use]
    pub fn next_main(&self) -> Option<ActionId> {
        self.next_main
    }

    /// Returns `true` if the next main action is one of `ids`.
    #[must_use]
    pub fn next_main_is(&self, ids: &[ActionId]) -> bool {
        self.next_main.is_some_and(|next| ids.contains(&next))
    }

    /// Returns `true` if `spec` may be proposed this tick.
    ///
    /// Combines the ability's own readiness with target presence, the weave
    /// window for off-GCD abilities and the burst gate for burst cooldowns.
    #[must_use]
    pub fn can_use(&self, spec: ActionSpec) -> bool {
        if !timing::is_usable(&self.snapshot, spec.id) {
            return false;
        }
        if spec.needs_target() && self.snapshot.target().is_none() {
            return false;
        }
        if spec.is_off_gcd() && !self.weave.allows_weave() {
            return false;
        }
        if spec.is_burst_cooldown() {
            if !self.burst_permitted {
                return false;
            }
            if self.config.burst.late_weave_only && !self.weave.is_late() {
                return false;
            }
        }
        true
    }

    /// Like [`can_use`](Self::can_use) but ignores the burst gate.
    #[must_use]
    pub fn can_use_ungated(&self, spec: ActionSpec) -> bool {
        self.can_use(spec.without(crate::actions::ActionTraits::BURST_COOLDOWN))
    }

    /// Returns `true` if `id` is unlocked.
    #[must_use]
    pub fn unlocked(&self, id: ActionId) -> bool {
        timing::is_unlocked(&self.snapshot, id)
    }

    /// Returns `true` if `id` is recharging.
    #[must_use]
    pub fn cooling_down(&self, id: ActionId) -> bool {
        self.snapshot
            .ability(id)
            .is_some_and(|state| state.is_cooling_down())
    }

    /// Returns `true` if `id` has a charge within `seconds`.
    #[must_use]
    pub fn ready_within(&self, id: ActionId, seconds: f32) -> bool {
        timing::will_be_ready(&self.snapshot, id, seconds)
    }

    /// Returns `true` if `id` has a charge within `slots` main-action slots.
    #[must_use]
    pub fn ready_within_slots(&self, id: ActionId, slots: u8) -> bool {
        self.ready_within(id, f32::from(slots) * self.snapshot.gcd().total)
    }
}
