//! Scripted opening sequence.
//!
//! An [`OpenerScript`] is a fixed list of main and off-GCD steps for the first
//! seconds of combat. [`OpenerState`] is the bounded step counter the engine
//! owns across ticks: it advances when the executor reports the current
//! step's action as issued and resets whenever combat is not active.

use crate::snapshot::{ActionId, StateProvider};
use crate::timing;

/// Which decision layer a scripted step belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StepKind {
    Main,
    OffGcd,
}

/// One step of an opener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenerStep {
    pub action: ActionId,
    pub kind: StepKind,
}

impl OpenerStep {
    #[must_use]
    pub const fn main(action: ActionId) -> Self {
        Self {
            action,
            kind: StepKind::Main,
        }
    }

    #[must_use]
    pub const fn off_gcd(action: ActionId) -> Self {
        Self {
            action,
            kind: StepKind::OffGcd,
        }
    }
}

/// An ordered, hand-authored opening sequence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenerScript {
    steps: Vec<OpenerStep>,
}

impl OpenerScript {
    #[must_use]
    pub fn new(steps: Vec<OpenerStep>) -> Self {
        Self { steps }
    }

    #[must_use]
    pub fn steps(&self) -> &[OpenerStep] {
        &self.steps
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl FromIterator<OpenerStep> for OpenerScript {
    fn from_iter<I: IntoIterator<Item = OpenerStep>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

/// What happened to the script during an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpenerEvent {
    /// The step counter moved forward to `step`.
    Advanced { step: usize },
    /// Every step was issued.
    Completed,
    /// The deadline passed with steps left.
    Abandoned { step: usize },
    /// Combat ended; the counter returned to zero.
    Reset,
}

/// Bounded step counter for an [`OpenerScript`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OpenerState {
    step: usize,
    finished: bool,
    last_seen: Option<u64>,
}

impl OpenerState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the next step to issue.
    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    /// Returns `true` once the script completed or was abandoned.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Back to step zero.
    pub fn reset(&mut self) {
        self.step = 0;
        self.finished = false;
    }

    /// The step to propose this tick, if the script is still running.
    #[must_use]
    pub fn current(&self, script: &OpenerScript) -> Option<OpenerStep> {
        if self.finished {
            return None;
        }
        script.steps().get(self.step).copied()
    }

    /// Advances the counter from the current snapshot.
    ///
    /// Steps whose action cannot be ready before `deadline` are skipped: locked
    /// actions, and actions the general pipeline already spent ahead of the
    /// script. A step that is merely unusable this tick is kept; the general
    /// pipeline covers the tick.
    pub fn update<P: StateProvider + ?Sized>(
        &mut self,
        provider: &P,
        script: &OpenerScript,
        deadline: f32,
    ) -> Option<OpenerEvent> {
        let fresh = provider
            .last_action()
            .filter(|last| self.last_seen != Some(last.sequence));
        if let Some(last) = fresh {
            self.last_seen = Some(last.sequence);
        }

        if !provider.in_combat() {
            let was_running = self.step > 0 || self.finished;
            self.reset();
            return was_running.then_some(OpenerEvent::Reset);
        }
        if self.finished {
            return None;
        }

        let start = self.step;
        let issued_step = match (fresh, self.current(script)) {
            (Some(last), Some(step)) => last.action == step.action,
            _ => false,
        };
        if issued_step {
            self.step += 1;
        }
        let left = deadline - provider.combat_time();
        if left >= 0.0 {
            while let Some(step) = script.steps().get(self.step) {
                if timing::will_be_ready(provider, step.action, left) {
                    break;
                }
                self.step += 1;
            }
        }

        if self.step >= script.len() {
            self.finished = true;
            return Some(OpenerEvent::Completed);
        }
        if provider.combat_time() > deadline {
            self.finished = true;
            return Some(OpenerEvent::Abandoned { step: self.step });
        }
        (self.step != start).then_some(OpenerEvent::Advanced { step: self.step })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::{AbilityState, IssuedAction, Snapshot};

    const STORMBITE: ActionId = ActionId(7407);
    const MINUET: ActionId = ActionId(3559);
    const CAUSTIC: ActionId = ActionId(7406);

    fn script() -> OpenerScript {
        [
            OpenerStep::main(STORMBITE),
            OpenerStep::off_gcd(MINUET),
            OpenerStep::main(CAUSTIC),
        ]
        .into_iter()
        .collect()
    }

    fn snapshot(time: f32) -> Snapshot {
        Snapshot::in_combat_at(time)
            .with_ability(STORMBITE, AbilityState::ready(1, 0.0))
            .with_ability(MINUET, AbilityState::ready(1, 120.0))
            .with_ability(CAUSTIC, AbilityState::ready(1, 0.0))
    }

    fn issued(time: f32, action: ActionId, sequence: u64) -> Snapshot {
        snapshot(time).with_last_action(IssuedAction {
            action,
            at: time,
            sequence,
        })
    }

    #[test]
    fn advances_on_matching_issue_only() {
        let script = script();
        let mut state = OpenerState::new();

        assert_eq!(state.update(&snapshot(0.0), &script, 20.0), None);
        assert_eq!(state.current(&script), Some(OpenerStep::main(STORMBITE)));

        // Something else was issued: no advance.
        assert_eq!(state.update(&issued(0.5, CAUSTIC, 1), &script, 20.0), None);
        assert_eq!(state.step(), 0);

        assert_eq!(
            state.update(&issued(1.0, STORMBITE, 2), &script, 20.0),
            Some(OpenerEvent::Advanced { step: 1 })
        );
        // The same report seen twice does not advance again.
        assert_eq!(state.update(&issued(1.5, STORMBITE, 2), &script, 20.0), None);
        assert_eq!(state.step(), 1);
    }

    #[test]
    fn completes_after_last_step() {
        let script = script();
        let mut state = OpenerState::new();

        state.update(&issued(0.5, STORMBITE, 1), &script, 20.0);
        state.update(&issued(1.0, MINUET, 2), &script, 20.0);
        let event = state.update(&issued(3.0, CAUSTIC, 3), &script, 20.0);

        assert_eq!(event, Some(OpenerEvent::Completed));
        assert!(state.is_finished());
        assert_eq!(state.current(&script), None);
    }

    #[test]
    fn abandons_after_deadline() {
        let script = script();
        let mut state = OpenerState::new();

        let event = state.update(&snapshot(21.0), &script, 20.0);
        assert_eq!(event, Some(OpenerEvent::Abandoned { step: 0 }));
        assert_eq!(state.current(&script), None);
    }

    #[test]
    fn skips_locked_steps() {
        let script = script();
        let mut state = OpenerState::new();
        let low_level = snapshot(0.5).with_ability(MINUET, AbilityState::locked());

        state.update(
            &low_level.clone().with_last_action(IssuedAction {
                action: STORMBITE,
                at: 0.5,
                sequence: 1,
            }),
            &script,
            20.0,
        );
        assert_eq!(state.current(&script), Some(OpenerStep::main(CAUSTIC)));
    }

    #[test]
    fn skips_steps_recharging_past_deadline() {
        let script = script();
        let mut state = OpenerState::new();
        let spent_early = issued(0.5, STORMBITE, 1)
            .with_ability(MINUET, AbilityState::cooling(100.0, 120.0));

        assert_eq!(
            state.update(&spent_early, &script, 20.0),
            Some(OpenerEvent::Advanced { step: 2 })
        );
        assert_eq!(state.current(&script), Some(OpenerStep::main(CAUSTIC)));
    }

    #[test]
    fn waits_for_steps_ready_before_deadline() {
        let script = script();
        let mut state = OpenerState::new();
        let cooling = issued(0.5, STORMBITE, 1)
            .with_ability(MINUET, AbilityState::cooling(5.0, 120.0));

        state.update(&cooling, &script, 20.0);
        assert_eq!(state.current(&script), Some(OpenerStep::off_gcd(MINUET)));
    }

    #[test]
    fn resets_out_of_combat() {
        let script = script();
        let mut state = OpenerState::new();
        state.update(&issued(0.5, STORMBITE, 1), &script, 20.0);

        assert_eq!(
            state.update(&Snapshot::idle(), &script, 20.0),
            Some(OpenerEvent::Reset)
        );
        assert_eq!(state.step(), 0);
        assert_eq!(state.update(&Snapshot::idle(), &script, 20.0), None);
    }
}
