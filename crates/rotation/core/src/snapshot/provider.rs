//! Read-only state contract between the host and the engine.
//!
//! The host (game client bindings, a simulator, a replay) implements
//! [`StateProvider`]. Every query is side-effect free and must return the same
//! answer for the duration of one tick.

use bitflags::bitflags;

use super::ability::AbilityState;
use super::gauge::Gauge;
use super::ids::{ActionId, GaugeId, StatusId, TargetId};
use super::status::StatusTimer;

/// Whose statuses a query looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum StatusScope {
    /// The acting character.
    Player,
    /// The current hostile target.
    Target,
    /// Any member of the party, the acting character included.
    AnyPartyMember,
}

bitflags! {
    /// Party-support requests raised by the host for this tick.
    ///
    /// The host decides *who* needs help; the engine only decides *whether*
    /// answering the request is the best use of the tick.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct SupportRequests: u8 {
        /// A party member carries a cleansable debuff.
        const DISPEL        = 1 << 0;
        /// A single party member needs healing support.
        const HEAL_SINGLE   = 1 << 1;
        /// Incoming party-wide damage calls for area mitigation.
        const MITIGATE_AREA = 1 << 2;
    }
}

/// Timing of the main-action (global cooldown) slot.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GcdTimer {
    /// Seconds until the next main action can be issued.
    pub remaining: f32,
    /// Length of one main-action slot in seconds.
    pub total: f32,
}

impl GcdTimer {
    /// Default slot length used when the host does not report one.
    pub const DEFAULT_SLOT: f32 = 2.5;

    /// Creates a timer, clamping `remaining` into `0..=total`.
    #[must_use]
    pub fn new(remaining: f32, total: f32) -> Self {
        let total = total.max(0.0);
        Self {
            remaining: remaining.clamp(0.0, total),
            total,
        }
    }

    /// A slot that is free right now.
    #[must_use]
    pub fn ready(total: f32) -> Self {
        Self::new(0.0, total)
    }
}

impl Default for GcdTimer {
    fn default() -> Self {
        Self::ready(Self::DEFAULT_SLOT)
    }
}

/// The most recent action the executor issued.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IssuedAction {
    /// Action that was issued.
    pub action: ActionId,
    /// Combat time at which it was issued.
    pub at: f32,
    /// Monotonic counter assigned by the executor, one per issued action.
    pub sequence: u64,
}

/// Identity and classification of the current target.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetInfo {
    /// Target identifier.
    pub id: TargetId,
    /// Whether the target is a primary boss-tier enemy.
    pub is_boss: bool,
}

/// Read-only view of combat state.
///
/// # Contract
///
/// - Queries are side-effect free.
/// - Answers are consistent within one tick.
/// - Absent data is reported as `None`/`false`/`0`; the engine treats absence
///   as the most conservative value ("status absent", "not a boss",
///   "ability unusable").
pub trait StateProvider {
    /// Whether the character is in combat.
    fn in_combat(&self) -> bool;

    /// Seconds since combat started (`0` out of combat).
    fn combat_time(&self) -> f32;

    /// Charge/recharge state of an ability.
    fn ability(&self, id: ActionId) -> Option<AbilityState>;

    /// Status on the acting character.
    fn player_status(&self, id: StatusId) -> Option<StatusTimer>;

    /// Status on the current target applied by the acting character.
    fn target_status(&self, id: StatusId) -> Option<StatusTimer>;

    /// Number of party members, the acting character included.
    fn party_len(&self) -> usize;

    /// Status on the party member at `index` (`0..party_len()`).
    fn party_member_status(&self, index: usize, id: StatusId) -> Option<StatusTimer>;

    /// Current value of a gauge.
    fn gauge(&self, id: GaugeId) -> Option<Gauge>;

    /// The current hostile target, if any.
    fn target(&self) -> Option<TargetInfo>;

    /// Hostile targets within range of area actions.
    fn hostiles_in_range(&self) -> u8;

    /// Main-action slot timing.
    fn gcd(&self) -> GcdTimer;

    /// Average cast time used by expiry lookahead.
    fn average_cast_time(&self) -> f32 {
        self.gcd().total
    }

    /// The most recently issued action.
    fn last_action(&self) -> Option<IssuedAction>;

    /// Party-support requests for this tick.
    fn requests(&self) -> SupportRequests;

    /// Status lookup by scope.
    ///
    /// For [`StatusScope::AnyPartyMember`] the longest remaining timer among
    /// members is returned, scanning members in index order.
    fn status(&self, scope: StatusScope, id: StatusId) -> Option<StatusTimer> {
        match scope {
            StatusScope::Player => self.player_status(id),
            StatusScope::Target => self.target_status(id),
            StatusScope::AnyPartyMember => (0..self.party_len())
                .filter_map(|index| self.party_member_status(index, id))
                .chain(self.player_status(id))
                .reduce(|best, next| if next.remaining > best.remaining { next } else { best }),
        }
    }
}
