//! Deterministic single-target encounter acting as the executor.
//!
//! The encounter owns every piece of combat state the engine reads: recast
//! timers, procs, damage-over-time debuffs, gauges and the active song. It
//! freezes that state into a [`Snapshot`] each tick and applies whatever
//! decision the engine returns once the player is free to act.

use std::collections::BTreeMap;

use rotation_content::bard::{BardAction, statuses};
use rotation_core::{
    AbilityState, Gauge, GcdTimer, IssuedAction, PartyMember, Snapshot, StatusId, StatusSet,
    StatusTimer, TargetId, TargetState,
};
use strum::IntoEnumIterator;

use crate::config::SimConfig;

/// Animation lock after any action.
pub const ANIMATION_LOCK: f32 = 0.6;
/// Length of one song.
pub const SONG_DURATION: f32 = 45.0;
/// Interval between song procs and debuff ticks.
pub const PROC_INTERVAL: f32 = 3.0;
/// Length of a damage-over-time debuff.
pub const DOT_DURATION: f32 = 45.0;
/// Party raid buff cadence and length.
pub const PARTY_BURST_PERIOD: f32 = 120.0;
pub const PARTY_BURST_LENGTH: f32 = 20.0;

const SHARED_SPENDERS: [BardAction; 3] = [
    BardAction::Bloodletter,
    BardAction::HeartbreakShot,
    BardAction::RainOfDeath,
];

/// Actions gated by a one-shot grant instead of a recast timer.
const GRANTED: [BardAction; 4] = [
    BardAction::BlastArrow,
    BardAction::ResonantArrow,
    BardAction::RadiantEncore,
    BardAction::PitchPerfect,
];

/// Recast table: `(max charges, seconds per charge)`.
fn recast(action: BardAction) -> Option<(u8, f32)> {
    use BardAction::*;

    let recast = match action {
        RagingStrikes | Barrage | BattleVoice => (1, 120.0),
        RadiantFinale => (1, 110.0),
        WanderersMinuet | MagesBallad | ArmysPaeon => (1, 120.0),
        EmpyrealArrow => (1, 15.0),
        Sidewinder => (1, 60.0),
        Bloodletter => (3, 15.0),
        WardensPaean => (1, 45.0),
        NaturesMinne => (1, 120.0),
        Troubadour => (1, 90.0),
        Tincture => (1, 270.0),
        _ => return None,
    };
    Some(recast)
}

/// Counters describing how a pull went.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Waste {
    /// Spender charges produced while the pool was full.
    pub spender_charges: u32,
    /// Spend gauge produced at the cap.
    pub soul_voice: u32,
    /// Repertoire stacks produced at the cap.
    pub repertoire: u32,
}

/// Combat state of the simulated player and target.
#[derive(Clone, Debug)]
pub struct Encounter {
    in_combat: bool,
    time: f32,
    slot: f32,
    gcd: f32,
    lock: f32,
    hostiles: u8,
    party_burst_at: f32,
    abilities: BTreeMap<BardAction, AbilityState>,
    grants: BTreeMap<BardAction, bool>,
    player: StatusSet,
    target: StatusSet,
    soul_voice: Gauge,
    repertoire: Gauge,
    song: Option<(BardAction, f32)>,
    proc_clock: f32,
    proc_count: u32,
    last: Option<IssuedAction>,
    sequence: u64,
    waste: Waste,
}

impl Encounter {
    /// Fresh pre-pull state with every cooldown ready.
    pub fn new(config: &SimConfig) -> Self {
        let abilities = BardAction::iter()
            .filter(|action| !GRANTED.contains(action))
            .map(|action| {
                let state = match recast(action) {
                    Some((max, recharge)) => AbilityState::ready(max, recharge),
                    None => AbilityState::ready(1, 0.0),
                };
                (action, state)
            })
            .collect();
        let grants = GRANTED.iter().map(|action| (*action, false)).collect();

        Self {
            in_combat: false,
            time: 0.0,
            slot: config.gcd,
            gcd: 0.0,
            lock: 0.0,
            hostiles: config.targets,
            party_burst_at: config.party_burst_at,
            abilities,
            grants,
            player: StatusSet::new(),
            target: StatusSet::new(),
            soul_voice: statuses::soul_voice(0),
            repertoire: statuses::repertoire(0),
            song: None,
            proc_clock: PROC_INTERVAL,
            proc_count: 0,
            last: None,
            sequence: 0,
            waste: Waste::default(),
        }
    }

    pub fn in_combat(&self) -> bool {
        self.in_combat
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn song(&self) -> Option<BardAction> {
        self.song.map(|(action, _)| action)
    }

    pub fn waste(&self) -> &Waste {
        &self.waste
    }

    pub fn target_statuses(&self) -> &StatusSet {
        &self.target
    }

    pub fn player_statuses(&self) -> &StatusSet {
        &self.player
    }

    /// Pulls the boss.
    pub fn start_combat(&mut self) {
        self.in_combat = true;
        self.time = 0.0;
    }

    /// Freezes the current state for the engine.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = if self.in_combat {
            Snapshot::in_combat_at(self.time)
                .with_target(TargetState::new(TargetId(1), true))
                .with_hostiles(self.hostiles)
        } else {
            Snapshot::idle()
        };
        snapshot = snapshot
            .with_gcd(GcdTimer::new(self.gcd, self.slot))
            .with_average_cast_time(self.slot)
            .with_gauge(statuses::SOUL_VOICE, self.soul_voice)
            .with_gauge(statuses::REPERTOIRE, self.repertoire);

        for (action, state) in &self.abilities {
            snapshot = snapshot.with_ability(action.id(), self.usable_state(*action, *state));
        }
        for (action, granted) in &self.grants {
            let charges = u8::from(*granted);
            snapshot =
                snapshot.with_ability(action.id(), AbilityState::new(charges, 1, 0.0, 0.0, true));
        }
        for (id, timer) in self.player.iter() {
            snapshot = snapshot.with_player_status(id, timer.remaining);
        }
        if self.in_combat {
            for (id, timer) in self.target.iter() {
                snapshot = snapshot.with_target_status(id, timer.remaining);
            }
        }
        if self.party_burst_active() {
            let mut member = PartyMember::default();
            member
                .statuses
                .insert(statuses::PARTY_BURST[0], StatusTimer::new(self.party_burst_left()));
            snapshot = snapshot.with_party_member(member);
        }
        if let Some(last) = self.last {
            snapshot = snapshot.with_last_action(last);
        }
        snapshot
    }

    /// Applies proc and pool gating on top of the recast state.
    fn usable_state(&self, action: BardAction, state: AbilityState) -> AbilityState {
        use BardAction::*;

        match action {
            HeartbreakShot | RainOfDeath => {
                self.abilities.get(&Bloodletter).copied().unwrap_or(state)
            }
            RefulgentArrow | StraightShot | Shadowbite | WideVolley if !self.has_proc() => {
                AbilityState::new(0, 1, 0.0, 0.0, true)
            }
            _ => state,
        }
    }

    fn available(&self, action: BardAction) -> bool {
        if let Some(granted) = self.grants.get(&action) {
            return *granted;
        }
        self.abilities
            .get(&action)
            .is_some_and(|state| self.usable_state(action, *state).is_usable())
    }

    fn has_proc(&self) -> bool {
        self.player.contains(statuses::player::HAWKS_EYE)
            || self.player.contains(statuses::player::BARRAGE)
    }

    fn party_burst_active(&self) -> bool {
        self.in_combat && self.party_burst_left() > 0.0
    }

    fn party_burst_left(&self) -> f32 {
        let since = self.time - self.party_burst_at;
        if since < 0.0 {
            return 0.0;
        }
        (PARTY_BURST_LENGTH - since % PARTY_BURST_PERIOD).max(0.0)
    }

    /// Returns `true` if the player can issue `action` right now.
    pub fn accepts(&self, action: BardAction) -> bool {
        if self.lock > 0.0 || !self.available(action) {
            return false;
        }
        action.spec().is_off_gcd() || self.gcd <= 0.0
    }

    /// Issues `action`, applying its effects.
    pub fn issue(&mut self, action: BardAction) {
        use BardAction::*;

        if !action.spec().is_off_gcd() {
            self.gcd = self.slot;
        }
        self.lock = ANIMATION_LOCK;

        if SHARED_SPENDERS.contains(&action) {
            self.spend_charge(Bloodletter);
        } else if recast(action).is_some() {
            self.spend_charge(action);
        }
        if let Some(granted) = self.grants.get_mut(&action) {
            *granted = false;
        }

        match action {
            Stormbite | Windbite => self.apply_dot(action),
            CausticBite | VenomousBite => self.apply_dot(action),
            IronJaws => self.refresh_dots(),
            StraightShot | RefulgentArrow | Shadowbite | WideVolley => {
                self.player.remove(statuses::player::HAWKS_EYE);
                self.player.remove(statuses::player::BARRAGE);
            }
            ApexArrow => {
                if self.soul_voice.drain() >= 80 {
                    self.grants.insert(BlastArrow, true);
                }
            }
            RagingStrikes => self.buff(statuses::player::RAGING_STRIKES, 20.0),
            BattleVoice => self.buff(statuses::player::BATTLE_VOICE, 15.0),
            RadiantFinale => {
                self.buff(statuses::player::RADIANT_FINALE, 15.0);
                self.grants.insert(RadiantEncore, true);
            }
            Barrage => {
                self.buff(statuses::player::BARRAGE, 10.0);
                self.buff(statuses::player::HAWKS_EYE, 10.0);
                self.grants.insert(ResonantArrow, true);
            }
            EmpyrealArrow => self.song_proc(),
            WanderersMinuet | MagesBallad | ArmysPaeon => {
                self.repertoire.drain();
                self.song = Some((action, SONG_DURATION));
                self.proc_clock = PROC_INTERVAL;
            }
            PitchPerfect => {
                self.repertoire.drain();
            }
            WardensPaean => {
                self.player.remove(statuses::player::DOOM);
            }
            Tincture => self.buff(statuses::player::MEDICATED, 30.0),
            _ => {}
        }
        self.sync_pitch_perfect();

        self.sequence += 1;
        self.last = Some(IssuedAction {
            action: action.id(),
            at: self.time,
            sequence: self.sequence,
        });
    }

    /// Advances every timer by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if self.in_combat {
            self.time += dt;
        }
        self.gcd = (self.gcd - dt).max(0.0);
        self.lock = (self.lock - dt).max(0.0);
        self.player.tick(dt);
        self.target.tick(dt);

        for state in self.abilities.values_mut() {
            if state.charges >= state.max_charges {
                continue;
            }
            state.recharge_remaining -= dt;
            while state.recharge_remaining <= 0.0 && state.charges < state.max_charges {
                state.charges += 1;
                state.recharge_remaining = if state.charges < state.max_charges {
                    state.recharge_remaining + state.recharge_time
                } else {
                    0.0
                };
            }
        }

        if let Some((action, remaining)) = self.song {
            let remaining = remaining - dt;
            if remaining <= 0.0 {
                self.song = None;
                self.repertoire.drain();
                self.sync_pitch_perfect();
            } else {
                self.song = Some((action, remaining));
                self.proc_clock -= dt;
                if self.proc_clock <= 0.0 {
                    self.proc_clock += PROC_INTERVAL;
                    self.proc_tick();
                }
            }
        }
    }

    fn proc_tick(&mut self) {
        if !self.in_combat {
            return;
        }
        self.song_proc();
        self.proc_count += 1;
        let dots_up = statuses::target::ALL_DOTS
            .iter()
            .any(|id| self.target.contains(*id));
        if dots_up && self.proc_count % 2 == 0 {
            self.buff(statuses::player::HAWKS_EYE, 30.0);
        }
    }

    fn song_proc(&mut self) {
        let Some((song, _)) = self.song else {
            return;
        };
        self.waste.soul_voice += u32::from(self.soul_voice.produce(5));
        match song {
            BardAction::WanderersMinuet | BardAction::ArmysPaeon => {
                self.waste.repertoire += u32::from(self.repertoire.produce(1));
            }
            BardAction::MagesBallad => self.regain_spender(),
            _ => {}
        }
        self.sync_pitch_perfect();
    }

    fn regain_spender(&mut self) {
        let Some(pool) = self.abilities.get_mut(&BardAction::Bloodletter) else {
            return;
        };
        if pool.charges >= pool.max_charges {
            self.waste.spender_charges += 1;
            return;
        }
        pool.charges += 1;
        if pool.charges == pool.max_charges {
            pool.recharge_remaining = 0.0;
        }
    }

    fn sync_pitch_perfect(&mut self) {
        let available =
            self.song() == Some(BardAction::WanderersMinuet) && !self.repertoire.is_empty();
        self.grants.insert(BardAction::PitchPerfect, available);
    }

    fn spend_charge(&mut self, action: BardAction) {
        let Some(state) = self.abilities.get_mut(&action) else {
            return;
        };
        if state.charges == 0 {
            return;
        }
        if state.charges == state.max_charges {
            state.recharge_remaining = state.recharge_time;
        }
        state.charges -= 1;
    }

    fn buff(&mut self, id: StatusId, seconds: f32) {
        self.player.insert(id, StatusTimer::new(seconds));
    }

    fn apply_dot(&mut self, action: BardAction) {
        use BardAction::*;

        let id = match action {
            Stormbite => statuses::target::STORMBITE,
            Windbite => statuses::target::WINDBITE,
            CausticBite => statuses::target::CAUSTIC_BITE,
            _ => statuses::target::VENOMOUS_BITE,
        };
        self.target.insert(id, StatusTimer::new(DOT_DURATION));
    }

    fn refresh_dots(&mut self) {
        let present: Vec<StatusId> = statuses::target::ALL_DOTS
            .iter()
            .copied()
            .filter(|id| self.target.contains(*id))
            .collect();
        for id in present {
            self.target.insert(id, StatusTimer::new(DOT_DURATION));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_core::StateProvider;

    fn encounter() -> Encounter {
        let mut encounter = Encounter::new(&SimConfig::default());
        encounter.start_combat();
        encounter
    }

    #[test]
    fn snapshot_mirrors_shared_spender_pool() {
        let mut encounter = encounter();
        encounter.issue(BardAction::HeartbreakShot);

        let snapshot = encounter.snapshot();
        let pool = snapshot.ability(BardAction::Bloodletter.id()).unwrap();
        assert_eq!(pool.charges, 2);
        assert_eq!(snapshot.ability(BardAction::RainOfDeath.id()), Some(pool));
    }

    #[test]
    fn main_actions_wait_for_the_slot() {
        let mut encounter = encounter();
        encounter.issue(BardAction::BurstShot);
        assert!(!encounter.accepts(BardAction::BurstShot));

        encounter.advance(ANIMATION_LOCK);
        assert!(encounter.accepts(BardAction::EmpyrealArrow));
        assert!(!encounter.accepts(BardAction::BurstShot));

        encounter.advance(2.0);
        assert!(encounter.accepts(BardAction::BurstShot));
    }

    #[test]
    fn spent_cooldowns_are_refused() {
        let mut encounter = encounter();
        encounter.issue(BardAction::RagingStrikes);
        encounter.advance(ANIMATION_LOCK);
        assert!(!encounter.accepts(BardAction::RagingStrikes));
        assert!(!encounter.accepts(BardAction::BlastArrow));
    }

    #[test]
    fn barrage_grants_resonant_arrow_and_proc() {
        let mut encounter = encounter();
        encounter.issue(BardAction::Barrage);

        let snapshot = encounter.snapshot();
        assert!(snapshot.ability(BardAction::ResonantArrow.id()).unwrap().is_usable());
        assert!(snapshot.ability(BardAction::RefulgentArrow.id()).unwrap().is_usable());
        assert!(!snapshot.ability(BardAction::Barrage.id()).unwrap().is_usable());
    }

    #[test]
    fn minuet_procs_enable_pitch_perfect() {
        let mut encounter = encounter();
        encounter.issue(BardAction::WanderersMinuet);
        assert!(!encounter.snapshot().ability(BardAction::PitchPerfect.id()).unwrap().is_usable());

        encounter.advance(PROC_INTERVAL);
        let snapshot = encounter.snapshot();
        assert!(snapshot.ability(BardAction::PitchPerfect.id()).unwrap().is_usable());
        assert_eq!(snapshot.gauge(statuses::REPERTOIRE).map(|g| g.value()), Some(1));
    }

    #[test]
    fn ballad_procs_overflow_a_full_pool() {
        let mut encounter = encounter();
        encounter.issue(BardAction::MagesBallad);
        encounter.advance(PROC_INTERVAL);
        assert_eq!(encounter.waste().spender_charges, 1);
    }

    #[test]
    fn iron_jaws_refreshes_present_dots_only() {
        let mut encounter = encounter();
        encounter.issue(BardAction::Stormbite);
        encounter.advance(20.0);
        encounter.issue(BardAction::IronJaws);

        let storm = encounter.target_statuses().get(statuses::target::STORMBITE).unwrap();
        assert_eq!(storm.remaining, DOT_DURATION);
        assert!(!encounter.target_statuses().contains(statuses::target::CAUSTIC_BITE));
    }

    #[test]
    fn song_expires_and_clears_repertoire() {
        let mut encounter = encounter();
        encounter.issue(BardAction::WanderersMinuet);
        for _ in 0..10 {
            encounter.advance(5.0);
        }
        assert_eq!(encounter.song(), None);
        assert!(!encounter.snapshot().ability(BardAction::PitchPerfect.id()).unwrap().is_usable());
    }

    #[test]
    fn party_burst_repeats_every_two_minutes() {
        let mut encounter = encounter();
        encounter.advance(8.0);
        assert!(encounter.snapshot().party_has_any(&statuses::PARTY_BURST));
        encounter.advance(30.0);
        assert!(!encounter.snapshot().party_has_any(&statuses::PARTY_BURST));
        encounter.advance(90.0);
        assert!(encounter.snapshot().party_has_any(&statuses::PARTY_BURST));
    }

    #[test]
    fn countdown_state_is_out_of_combat() {
        let encounter = Encounter::new(&SimConfig::default());
        let snapshot = encounter.snapshot();
        assert!(!snapshot.is_in_combat());
        assert!(snapshot.target().is_none());
    }
}
