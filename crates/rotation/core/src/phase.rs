//! Phase cycle controller.
//!
//! Tracks which resource-production phase is active and how long it has been
//! running. The controller is the single owner of this state; everything else
//! reads it through [`PhaseView`](crate::context::PhaseView).
//!
//! Transitions are observed, not predicted: the pipeline proposes the switch
//! action, the executor issues it, and the next [`PhaseController::update`]
//! sees it in [`StateProvider::last_action`].

use crate::snapshot::{ActionId, StateProvider};
use crate::timing;

/// Production phase. Exactly one is active at any time.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Phase {
    /// No phase running (out of combat, or a phase lapsed).
    #[default]
    None,
    P1,
    P2,
    P3,
}

impl Phase {
    /// The cycle in order.
    pub const CYCLE: [Phase; 3] = [Phase::P1, Phase::P2, Phase::P3];

    /// Successor in the cycle (`P3 -> P1`); `None` stays `None`.
    #[must_use]
    pub const fn next(self) -> Phase {
        match self {
            Phase::None => Phase::None,
            Phase::P1 => Phase::P2,
            Phase::P2 => Phase::P3,
            Phase::P3 => Phase::P1,
        }
    }

    /// Returns `true` for `P1..=P3`.
    #[must_use]
    pub const fn is_active(self) -> bool {
        !matches!(self, Phase::None)
    }

    /// Phases in cycle order starting at `self` (or at `P1` for `None`).
    pub fn cycle_from(self) -> impl Iterator<Item = Phase> {
        let start = match self {
            Phase::None | Phase::P1 => 0,
            Phase::P2 => 1,
            Phase::P3 => 2,
        };
        (0..3).map(move |offset| Self::CYCLE[(start + offset) % 3])
    }
}

/// How fast a phase generates spendable resources.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum ProductionRate {
    #[default]
    Low,
    Steady,
    High,
}

/// Per-phase values keyed by [`Phase`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerPhase<T> {
    pub p1: T,
    pub p2: T,
    pub p3: T,
}

impl<T: Copy> PerPhase<T> {
    /// Value for `phase`, `None` for [`Phase::None`].
    #[must_use]
    pub fn get(&self, phase: Phase) -> Option<T> {
        match phase {
            Phase::None => None,
            Phase::P1 => Some(self.p1),
            Phase::P2 => Some(self.p2),
            Phase::P3 => Some(self.p3),
        }
    }
}

/// Target duration of each phase in seconds.
pub type PhaseDurations = PerPhase<f32>;

/// Production-rate class of each phase.
pub type PhaseRates = PerPhase<ProductionRate>;

impl Default for PhaseRates {
    fn default() -> Self {
        Self {
            p1: ProductionRate::Steady,
            p2: ProductionRate::High,
            p3: ProductionRate::Low,
        }
    }
}

/// The action that starts each phase.
pub type PhaseActions = PerPhase<ActionId>;

impl PhaseActions {
    /// Phase started by `action`, if it is a switch action.
    #[must_use]
    pub fn phase_of(&self, action: ActionId) -> Option<Phase> {
        Phase::CYCLE
            .into_iter()
            .find(|phase| self.get(*phase) == Some(action))
    }

    /// Phases in cycle order after `current` whose switch action is unlocked.
    ///
    /// `current` itself is excluded; for [`Phase::None`] the cycle starts at
    /// `start`.
    pub fn candidates<'a, P: StateProvider + ?Sized>(
        &'a self,
        provider: &'a P,
        current: Phase,
        start: Phase,
    ) -> impl Iterator<Item = Phase> + 'a {
        let from = if current.is_active() { current.next() } else { start };
        from.cycle_from()
            .filter(move |phase| *phase != current)
            .filter(move |phase| {
                self.get(*phase)
                    .is_some_and(|action| timing::is_unlocked(provider, action))
            })
    }
}

/// A phase change observed by [`PhaseController::update`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseTransition {
    pub from: Phase,
    pub to: Phase,
    /// Combat time at which the change was observed.
    pub at: f32,
}

/// Cross-tick phase state owned by one engine instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PhaseController {
    phase: Phase,
    entered_at: f32,
    elapsed: f32,
    last_seen: Option<u64>,
}

impl PhaseController {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Active phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Seconds spent in the active phase (`0` for [`Phase::None`]).
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Returns to [`Phase::None`] with zero elapsed time.
    ///
    /// The last observed action sequence is kept so a stale switch from a
    /// previous engagement is not replayed.
    pub fn reset(&mut self) {
        self.phase = Phase::None;
        self.entered_at = 0.0;
        self.elapsed = 0.0;
    }

    /// Advances the controller from the current snapshot.
    ///
    /// - out of combat: resets
    /// - a newly issued switch action: enters its phase with elapsed `0`
    /// - otherwise: elapsed follows combat time; exceeding `max_duration`
    ///   drops back to [`Phase::None`]
    pub fn update<P: StateProvider + ?Sized>(
        &mut self,
        provider: &P,
        actions: &PhaseActions,
        max_duration: f32,
    ) -> Option<PhaseTransition> {
        let now = provider.combat_time();

        if !provider.in_combat() {
            // Consume whatever was issued before combat ended.
            if let Some(last) = provider.last_action() {
                self.last_seen = Some(last.sequence);
            }
            let from = self.phase;
            self.reset();
            return from.is_active().then_some(PhaseTransition {
                from,
                to: Phase::None,
                at: now,
            });
        }

        let fresh = provider
            .last_action()
            .filter(|last| self.last_seen != Some(last.sequence));
        if let Some(last) = fresh {
            self.last_seen = Some(last.sequence);
            if let Some(to) = actions.phase_of(last.action) {
                let from = self.phase;
                self.phase = to;
                self.entered_at = now;
                self.elapsed = 0.0;
                return Some(PhaseTransition { from, to, at: now });
            }
        }

        if !self.phase.is_active() {
            self.elapsed = 0.0;
            return None;
        }

        self.elapsed = (now - self.entered_at).max(0.0);
        if self.elapsed > max_duration {
            let from = self.phase;
            self.reset();
            return Some(PhaseTransition {
                from,
                to: Phase::None,
                at: now,
            });
        }
        None
    }

    /// Returns `true` once the active phase has reached its target duration,
    /// brought forward by `drift_margin`.
    #[must_use]
    pub fn is_due(&self, durations: &PhaseDurations, drift_margin: f32) -> bool {
        durations
            .get(self.phase)
            .is_some_and(|target| self.elapsed + drift_margin >= target)
    }

    /// Seconds until the active phase lapses on its own.
    #[must_use]
    pub fn remaining(&self, max_duration: f32) -> f32 {
        if self.phase.is_active() {
            (max_duration - self.elapsed).max(0.0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{AbilityState, IssuedAction, Snapshot};

    const ACTIONS: PhaseActions = PerPhase {
        p1: ActionId(3559),
        p2: ActionId(114),
        p3: ActionId(116),
    };

    fn issued(snapshot: Snapshot, action: ActionId, sequence: u64) -> Snapshot {
        let at = snapshot.combat_time();
        snapshot.with_last_action(IssuedAction {
            action,
            at,
            sequence,
        })
    }

    #[test]
    fn switch_action_enters_phase_with_zero_elapsed() {
        let mut controller = PhaseController::new();
        let snapshot = issued(Snapshot::in_combat_at(3.0), ACTIONS.p1, 1);

        let transition = controller.update(&snapshot, &ACTIONS, 45.0).unwrap();
        assert_eq!(transition.from, Phase::None);
        assert_eq!(transition.to, Phase::P1);
        assert_eq!(controller.elapsed(), 0.0);

        // Same action seen again on a later tick is not a new transition.
        let later = issued(Snapshot::in_combat_at(13.0), ACTIONS.p1, 1);
        assert!(controller.update(&later, &ACTIONS, 45.0).is_none());
        assert_eq!(controller.phase(), Phase::P1);
        assert!((controller.elapsed() - 10.0).abs() < 1e-5);
    }

    #[test]
    fn lapses_to_none_after_max_duration() {
        let mut controller = PhaseController::new();
        controller.update(&issued(Snapshot::in_combat_at(0.0), ACTIONS.p2, 1), &ACTIONS, 45.0);

        let late = issued(Snapshot::in_combat_at(45.5), ACTIONS.p2, 1);
        let transition = controller.update(&late, &ACTIONS, 45.0).unwrap();
        assert_eq!(transition.to, Phase::None);
        assert_eq!(controller.elapsed(), 0.0);
    }

    #[test]
    fn combat_end_resets_and_ignores_stale_switch() {
        let mut controller = PhaseController::new();
        controller.update(&issued(Snapshot::in_combat_at(1.0), ACTIONS.p3, 7), &ACTIONS, 45.0);

        let idle = Snapshot::idle().with_last_action(IssuedAction {
            action: ACTIONS.p3,
            at: 20.0,
            sequence: 7,
        });
        let transition = controller.update(&idle, &ACTIONS, 45.0).unwrap();
        assert_eq!(transition.to, Phase::None);

        let next_fight = issued(Snapshot::in_combat_at(0.5), ACTIONS.p3, 7);
        assert!(controller.update(&next_fight, &ACTIONS, 45.0).is_none());
        assert_eq!(controller.phase(), Phase::None);
    }

    #[test]
    fn due_applies_drift_margin() {
        let durations = PerPhase {
            p1: 43.0,
            p2: 43.0,
            p3: 34.0,
        };
        let mut controller = PhaseController::new();
        controller.update(&issued(Snapshot::in_combat_at(0.0), ACTIONS.p1, 1), &ACTIONS, 45.0);
        controller.update(&issued(Snapshot::in_combat_at(42.0), ACTIONS.p1, 1), &ACTIONS, 45.0);

        assert!(!controller.is_due(&durations, 0.0));
        assert!(controller.is_due(&durations, 1.0));
        assert!((controller.remaining(45.0) - 3.0).abs() < 1e-5);
    }

    #[test]
    fn candidates_skip_locked_phases() {
        let snapshot = Snapshot::in_combat_at(1.0)
            .with_ability(ACTIONS.p1, AbilityState::locked())
            .with_ability(ACTIONS.p2, AbilityState::ready(1, 120.0))
            .with_ability(ACTIONS.p3, AbilityState::cooling(10.0, 120.0));

        let order: Vec<_> = ACTIONS.candidates(&snapshot, Phase::None, Phase::P1).collect();
        assert_eq!(order, vec![Phase::P2, Phase::P3]);

        let order: Vec<_> = ACTIONS.candidates(&snapshot, Phase::P2, Phase::P1).collect();
        assert_eq!(order, vec![Phase::P3]);
    }

    #[test]
    fn cycle_wraps() {
        assert_eq!(Phase::P3.next(), Phase::P1);
        assert_eq!(
            Phase::P2.cycle_from().collect::<Vec<_>>(),
            vec![Phase::P2, Phase::P3, Phase::P1]
        );
        assert_eq!(Phase::P1.to_string(), "p1");
    }
}
