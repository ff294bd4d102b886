//! Immutable per-tick state snapshot.
//!
//! A [`Snapshot`] is produced fresh for every tick, either built directly by
//! the host or frozen from any [`StateProvider`] via [`Snapshot::capture`],
//! and discarded once the tick's decision is made. The engine keeps no
//! snapshot data across ticks.
//!
//! Storage is ordered (`BTreeMap`, `ArrayVec`) so every scan is deterministic.

pub mod ability;
pub mod gauge;
pub mod ids;
pub mod provider;
pub mod status;

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

pub use ability::AbilityState;
pub use gauge::Gauge;
pub use ids::{ActionId, GaugeId, StatusId, TargetId};
pub use provider::{
    GcdTimer, IssuedAction, StateProvider, StatusScope, SupportRequests, TargetInfo,
};
pub use status::{StatusSet, StatusTimer};

/// Maximum party size tracked by a snapshot.
pub const MAX_PARTY: usize = 8;

/// The current hostile target and the statuses the player applied to it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TargetState {
    /// Identity and classification.
    pub info: TargetInfo,
    /// Player-applied statuses on the target.
    pub statuses: StatusSet,
}

impl TargetState {
    /// A target with no statuses.
    #[must_use]
    pub fn new(id: TargetId, is_boss: bool) -> Self {
        Self {
            info: TargetInfo { id, is_boss },
            statuses: StatusSet::new(),
        }
    }
}

/// One party member's statuses.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PartyMember {
    /// Statuses currently on this member.
    pub statuses: StatusSet,
}

/// Which ids to read when freezing a [`StateProvider`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tracked {
    /// Abilities whose charge state is copied.
    pub actions: Vec<ActionId>,
    /// Statuses read on the player.
    pub player_statuses: Vec<StatusId>,
    /// Statuses read on the target.
    pub target_statuses: Vec<StatusId>,
    /// Statuses read on each party member.
    pub party_statuses: Vec<StatusId>,
    /// Gauges copied.
    pub gauges: Vec<GaugeId>,
}

/// Frozen combat state for one tick.
///
/// # Example
///
/// ```
/// use rotation_core::snapshot::{AbilityState, ActionId, Snapshot, StatusId};
///
/// let snapshot = Snapshot::in_combat_at(12.0)
///     .with_ability(ActionId(101), AbilityState::ready(1, 120.0))
///     .with_player_status(StatusId(125), 18.0);
///
/// assert!(snapshot.is_in_combat());
/// assert!(snapshot.player_statuses().contains(StatusId(125)));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Snapshot {
    in_combat: bool,
    combat_time: f32,
    abilities: BTreeMap<ActionId, AbilityState>,
    player: StatusSet,
    target: Option<TargetState>,
    party: ArrayVec<PartyMember, MAX_PARTY>,
    gauges: BTreeMap<GaugeId, Gauge>,
    hostiles_in_range: u8,
    gcd: GcdTimer,
    average_cast_time: Option<f32>,
    last_action: Option<IssuedAction>,
    requests: SupportRequests,
}

impl Snapshot {
    /// An out-of-combat snapshot with no data.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// An in-combat snapshot at the given combat time.
    #[must_use]
    pub fn in_combat_at(combat_time: f32) -> Self {
        Self {
            in_combat: true,
            combat_time: combat_time.max(0.0),
            ..Self::default()
        }
    }

    /// Freezes a provider into an owned snapshot, reading only tracked ids.
    ///
    /// Party members beyond [`MAX_PARTY`] are ignored.
    #[must_use]
    pub fn capture<P: StateProvider + ?Sized>(provider: &P, tracked: &Tracked) -> Self {
        let abilities = tracked
            .actions
            .iter()
            .filter_map(|id| provider.ability(*id).map(|state| (*id, state)))
            .collect();

        let player = tracked
            .player_statuses
            .iter()
            .filter_map(|id| provider.player_status(*id).map(|timer| (*id, timer)))
            .collect();

        let target = provider.target().map(|info| TargetState {
            info,
            statuses: tracked
                .target_statuses
                .iter()
                .filter_map(|id| provider.target_status(*id).map(|timer| (*id, timer)))
                .collect(),
        });

        let party = (0..provider.party_len().min(MAX_PARTY))
            .map(|index| PartyMember {
                statuses: tracked
                    .party_statuses
                    .iter()
                    .filter_map(|id| {
                        provider
                            .party_member_status(index, *id)
                            .map(|timer| (*id, timer))
                    })
                    .collect(),
            })
            .collect();

        let gauges = tracked
            .gauges
            .iter()
            .filter_map(|id| provider.gauge(*id).map(|gauge| (*id, gauge)))
            .collect();

        Self {
            in_combat: provider.in_combat(),
            combat_time: provider.combat_time().max(0.0),
            abilities,
            player,
            target,
            party,
            gauges,
            hostiles_in_range: provider.hostiles_in_range(),
            gcd: provider.gcd(),
            average_cast_time: Some(provider.average_cast_time()),
            last_action: provider.last_action(),
            requests: provider.requests(),
        }
    }

    // ===== builder =====

    /// Moves the snapshot into combat at `combat_time` (builder pattern).
    #[must_use]
    pub fn with_combat_time(mut self, combat_time: f32) -> Self {
        self.in_combat = true;
        self.combat_time = combat_time.max(0.0);
        self
    }

    /// Sets an ability's state (builder pattern).
    #[must_use]
    pub fn with_ability(mut self, id: ActionId, state: AbilityState) -> Self {
        self.abilities.insert(id, state);
        self
    }

    /// Applies a single-stack status to the player (builder pattern).
    #[must_use]
    pub fn with_player_status(mut self, id: StatusId, remaining: f32) -> Self {
        self.player.insert(id, StatusTimer::new(remaining));
        self
    }

    /// Sets the current target (builder pattern).
    #[must_use]
    pub fn with_target(mut self, target: TargetState) -> Self {
        self.target = Some(target);
        self
    }

    /// Applies a status to the current target (builder pattern).
    ///
    /// Does nothing when there is no target.
    #[must_use]
    pub fn with_target_status(mut self, id: StatusId, remaining: f32) -> Self {
        if let Some(target) = self.target.as_mut() {
            target.statuses.insert(id, StatusTimer::new(remaining));
        }
        self
    }

    /// Adds a party member (builder pattern).
    ///
    /// Members beyond [`MAX_PARTY`] are dropped.
    #[must_use]
    pub fn with_party_member(mut self, member: PartyMember) -> Self {
        let _ = self.party.try_push(member);
        self
    }

    /// Sets a gauge (builder pattern).
    #[must_use]
    pub fn with_gauge(mut self, id: GaugeId, gauge: Gauge) -> Self {
        self.gauges.insert(id, gauge);
        self
    }

    /// Sets the hostile count in area range (builder pattern).
    #[must_use]
    pub fn with_hostiles(mut self, count: u8) -> Self {
        self.hostiles_in_range = count;
        self
    }

    /// Sets the main-action slot timing (builder pattern).
    #[must_use]
    pub fn with_gcd(mut self, gcd: GcdTimer) -> Self {
        self.gcd = gcd;
        self
    }

    /// Overrides the average cast time (builder pattern).
    #[must_use]
    pub fn with_average_cast_time(mut self, seconds: f32) -> Self {
        self.average_cast_time = Some(seconds.max(0.0));
        self
    }

    /// Records the last issued action (builder pattern).
    #[must_use]
    pub fn with_last_action(mut self, last: IssuedAction) -> Self {
        self.last_action = Some(last);
        self
    }

    /// Sets the support requests (builder pattern).
    #[must_use]
    pub fn with_requests(mut self, requests: SupportRequests) -> Self {
        self.requests = requests;
        self
    }

    // ===== accessors =====

    /// Whether the character is in combat.
    #[must_use]
    pub fn is_in_combat(&self) -> bool {
        self.in_combat
    }

    /// Player statuses.
    #[must_use]
    pub fn player_statuses(&self) -> &StatusSet {
        &self.player
    }

    /// Current target with its statuses.
    #[must_use]
    pub fn target_state(&self) -> Option<&TargetState> {
        self.target.as_ref()
    }

    /// Party members in host order.
    #[must_use]
    pub fn party(&self) -> &[PartyMember] {
        &self.party
    }

    /// Returns `true` if the player or any party member has one of `ids`.
    #[must_use]
    pub fn party_has_any(&self, ids: &[StatusId]) -> bool {
        self.player.contains_any(ids)
            || self
                .party
                .iter()
                .any(|member| member.statuses.contains_any(ids))
    }
}

impl StateProvider for Snapshot {
    fn in_combat(&self) -> bool {
        self.in_combat
    }

    fn combat_time(&self) -> f32 {
        if self.in_combat { self.combat_time } else { 0.0 }
    }

    fn ability(&self, id: ActionId) -> Option<AbilityState> {
        self.abilities.get(&id).copied()
    }

    fn player_status(&self, id: StatusId) -> Option<StatusTimer> {
        self.player.get(id)
    }

    fn target_status(&self, id: StatusId) -> Option<StatusTimer> {
        self.target.as_ref()?.statuses.get(id)
    }

    fn party_len(&self) -> usize {
        self.party.len()
    }

    fn party_member_status(&self, index: usize, id: StatusId) -> Option<StatusTimer> {
        self.party.get(index)?.statuses.get(id)
    }

    fn gauge(&self, id: GaugeId) -> Option<Gauge> {
        self.gauges.get(&id).copied()
    }

    fn target(&self) -> Option<TargetInfo> {
        self.target.as_ref().map(|target| target.info)
    }

    fn hostiles_in_range(&self) -> u8 {
        self.hostiles_in_range
    }

    fn gcd(&self) -> GcdTimer {
        self.gcd
    }

    fn average_cast_time(&self) -> f32 {
        self.average_cast_time.unwrap_or(self.gcd.total)
    }

    fn last_action(&self) -> Option<IssuedAction> {
        self.last_action
    }

    fn requests(&self) -> SupportRequests {
        self.requests
    }
}
