//! Bard job data: catalog, phase mapping and opener.
//!
//! Phases map onto the three songs:
//!
//! | Phase | Switch action | Production |
//! |---|---|---|
//! | P1 | Wanderer's Minuet | Repertoire stacks for Pitch Perfect |
//! | P2 | Mage's Ballad | Bloodletter resets (high) |
//! | P3 | Army's Paeon | speed stacks (low) |

pub mod actions;
pub mod statuses;

pub use actions::BardAction;

use rotation_core::{OpenerScript, OpenerStep, PerPhase, PhaseActions, StatusId, Tracked};
use strum::IntoEnumIterator;

/// Song switch action for each phase.
pub const PHASE_ACTIONS: PhaseActions = PerPhase {
    p1: BardAction::WanderersMinuet.id(),
    p2: BardAction::MagesBallad.id(),
    p3: BardAction::ArmysPaeon.id(),
};

/// Static data the runtime needs to drive the Bard rule book.
#[derive(Clone, Debug, PartialEq)]
pub struct BardKit {
    pub phase_actions: PhaseActions,
    pub party_burst: Vec<StatusId>,
    pub opener: OpenerScript,
}

impl Default for BardKit {
    fn default() -> Self {
        Self {
            phase_actions: PHASE_ACTIONS,
            party_burst: statuses::PARTY_BURST.to_vec(),
            opener: standard_opener(),
        }
    }
}

impl BardKit {
    /// Replaces the opener script (builder pattern).
    #[must_use]
    pub fn with_opener(mut self, opener: OpenerScript) -> Self {
        self.opener = opener;
        self
    }

    /// Every identifier the rule book reads, for [`Snapshot::capture`].
    ///
    /// [`Snapshot::capture`]: rotation_core::Snapshot::capture
    #[must_use]
    pub fn tracked(&self) -> Tracked {
        let mut player_statuses = vec![
            statuses::player::RAGING_STRIKES,
            statuses::player::BARRAGE,
            statuses::player::BATTLE_VOICE,
            statuses::player::RADIANT_FINALE,
            statuses::player::HAWKS_EYE,
            statuses::player::ARMYS_ETHOS,
            statuses::player::MEDICATED,
            statuses::player::DOOM,
        ];
        player_statuses.extend(self.party_burst.iter().copied());
        player_statuses.sort_unstable();
        player_statuses.dedup();

        Tracked {
            actions: BardAction::iter().map(BardAction::id).collect(),
            player_statuses,
            target_statuses: statuses::target::ALL_DOTS.to_vec(),
            party_statuses: self.party_burst.clone(),
            gauges: vec![statuses::SOUL_VOICE, statuses::REPERTOIRE],
        }
    }
}

/// Two-minute opener: both debuffs, first song, full burst stack.
#[must_use]
pub fn standard_opener() -> OpenerScript {
    use BardAction::*;

    [
        OpenerStep::main(Stormbite.id()),
        OpenerStep::off_gcd(WanderersMinuet.id()),
        OpenerStep::off_gcd(EmpyrealArrow.id()),
        OpenerStep::main(CausticBite.id()),
        OpenerStep::off_gcd(BattleVoice.id()),
        OpenerStep::off_gcd(RadiantFinale.id()),
        OpenerStep::main(BurstShot.id()),
        OpenerStep::off_gcd(RagingStrikes.id()),
        OpenerStep::off_gcd(HeartbreakShot.id()),
        OpenerStep::main(RadiantEncore.id()),
        OpenerStep::off_gcd(Barrage.id()),
        OpenerStep::main(RefulgentArrow.id()),
        OpenerStep::off_gcd(Sidewinder.id()),
        OpenerStep::main(ResonantArrow.id()),
        OpenerStep::off_gcd(EmpyrealArrow.id()),
    ]
    .into_iter()
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_core::{Phase, StepKind};

    #[test]
    fn phase_actions_round_trip() {
        assert_eq!(
            PHASE_ACTIONS.phase_of(BardAction::MagesBallad.id()),
            Some(Phase::P2)
        );
        assert_eq!(PHASE_ACTIONS.phase_of(BardAction::HeavyShot.id()), None);
    }

    #[test]
    fn opener_alternates_layers_sensibly() {
        let opener = standard_opener();
        assert_eq!(opener.steps()[0].kind, StepKind::Main);
        // Never more than two weaves between main actions.
        let mut run = 0;
        for step in opener.steps() {
            run = if step.kind == StepKind::OffGcd { run + 1 } else { 0 };
            assert!(run <= 2);
        }
    }

    #[test]
    fn tracked_covers_party_burst_and_gauges() {
        let tracked = BardKit::default().tracked();
        assert!(tracked.party_statuses.contains(&StatusId(1878)));
        assert!(tracked.player_statuses.contains(&statuses::player::BATTLE_VOICE));
        assert_eq!(tracked.gauges.len(), 2);
        assert!(tracked.actions.contains(&BardAction::Tincture.id()));
    }
}
