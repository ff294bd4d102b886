//! Status and gauge identifiers read by the Bard rule book.

use rotation_core::{Gauge, GaugeId, StatusId};

/// Statuses on the player.
pub mod player {
    use super::StatusId;

    pub const RAGING_STRIKES: StatusId = StatusId(125);
    pub const BARRAGE: StatusId = StatusId(128);
    pub const BATTLE_VOICE: StatusId = StatusId(141);
    pub const RADIANT_FINALE: StatusId = StatusId(2722);
    /// Proc that enables the empowered single-target and area shots.
    pub const HAWKS_EYE: StatusId = StatusId(3861);
    /// Lingering effect after the third phase ends early.
    pub const ARMYS_ETHOS: StatusId = StatusId(1933);
    pub const MEDICATED: StatusId = StatusId(49);
    /// Lethal debuff that only a cleanse removes.
    pub const DOOM: StatusId = StatusId(910);

    /// Own burst buffs, in application order.
    pub const OWN_BURST: [StatusId; 3] = [BATTLE_VOICE, RADIANT_FINALE, RAGING_STRIKES];
}

/// Damage-over-time debuffs on the target.
pub mod target {
    use super::StatusId;

    pub const VENOMOUS_BITE: StatusId = StatusId(124);
    pub const WINDBITE: StatusId = StatusId(129);
    pub const CAUSTIC_BITE: StatusId = StatusId(1200);
    pub const STORMBITE: StatusId = StatusId(1201);

    /// Either generation of the poison debuff.
    pub const POISON: [StatusId; 2] = [VENOMOUS_BITE, CAUSTIC_BITE];
    /// Either generation of the wind debuff.
    pub const WIND: [StatusId; 2] = [WINDBITE, STORMBITE];
    pub const ALL_DOTS: [StatusId; 4] = [WINDBITE, STORMBITE, VENOMOUS_BITE, CAUSTIC_BITE];
}

/// Party-wide raid buffs that open a burst window when any member has one.
pub const PARTY_BURST: [StatusId; 10] = [
    StatusId(1878), // Divination
    StatusId(1185), // Brotherhood
    StatusId(786),  // Battle Litany
    StatusId(2599), // Arcane Circle
    StatusId(3685), // Starry Muse
    StatusId(1297), // Embolden
    StatusId(2703), // Searing Light
    player::BATTLE_VOICE,
    StatusId(1822), // Technical Finish
    player::RADIANT_FINALE,
];

/// Spend gauge filled by phase procs and drained by the gauge spender.
pub const SOUL_VOICE: GaugeId = GaugeId(0);
/// Phase-bound proc stacks spent by the first phase's finisher.
pub const REPERTOIRE: GaugeId = GaugeId(1);

pub const SOUL_VOICE_MAX: u16 = 100;
pub const REPERTOIRE_MAX: u16 = 3;

/// Spend gauge holding `value`.
#[must_use]
pub const fn soul_voice(value: u16) -> Gauge {
    Gauge::new(value, SOUL_VOICE_MAX)
}

/// Repertoire stacks.
#[must_use]
pub const fn repertoire(value: u16) -> Gauge {
    Gauge::new(value, REPERTOIRE_MAX)
}
