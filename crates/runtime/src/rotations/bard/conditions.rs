//! Shared predicates for the Bard rule layers.
//!
//! Every helper reads only from the [`DecisionContext`]; absent data falls
//! back to the conservative answer (status absent, gauge empty, not a boss).

use rotation_content::bard::{BardAction, statuses};
use rotation_core::timing;
use rotation_core::{ActionId, DecisionContext, Phase, StateProvider, StatusId, StatusScope};

pub(super) fn can(ctx: &DecisionContext, action: BardAction) -> bool {
    ctx.can_use(action.spec())
}

pub(super) fn unlocked(ctx: &DecisionContext, action: BardAction) -> bool {
    ctx.unlocked(action.id())
}

pub(super) fn cooling(ctx: &DecisionContext, action: BardAction) -> bool {
    ctx.cooling_down(action.id())
}

pub(super) fn ready_within(ctx: &DecisionContext, action: BardAction, seconds: f32) -> bool {
    ctx.ready_within(action.id(), seconds)
}

/// First action in `order` that passes [`can`].
pub(super) fn first_usable(ctx: &DecisionContext, order: &[BardAction]) -> Option<ActionId> {
    order
        .iter()
        .find(|action| can(ctx, **action))
        .map(|action| action.id())
}

/// Usability check for an identifier coming from data (opener scripts).
pub(super) fn can_id(ctx: &DecisionContext, id: ActionId) -> bool {
    BardAction::from_id(id).is_some_and(|action| can(ctx, action))
}

pub(super) fn song(ctx: &DecisionContext) -> Phase {
    ctx.phase().phase
}

pub(super) fn has_song(ctx: &DecisionContext) -> bool {
    song(ctx).is_active()
}

pub(super) fn has_buff(ctx: &DecisionContext, id: StatusId) -> bool {
    timing::has_status(ctx.snapshot(), StatusScope::Player, id)
}

pub(super) fn has_raging_strikes(ctx: &DecisionContext) -> bool {
    has_buff(ctx, statuses::player::RAGING_STRIKES)
}

pub(super) fn has_battle_voice(ctx: &DecisionContext) -> bool {
    has_buff(ctx, statuses::player::BATTLE_VOICE)
}

pub(super) fn has_radiant_finale(ctx: &DecisionContext) -> bool {
    has_buff(ctx, statuses::player::RADIANT_FINALE)
}

/// Hawk's Eye or Barrage: the empowered shots are available.
pub(super) fn has_proc(ctx: &DecisionContext) -> bool {
    has_buff(ctx, statuses::player::HAWKS_EYE) || has_buff(ctx, statuses::player::BARRAGE)
}

/// Own burst buffs are all up, for whichever of them are unlocked.
pub(super) fn in_burst_status(ctx: &DecisionContext) -> bool {
    let voice = unlocked(ctx, BardAction::BattleVoice);
    let finale = unlocked(ctx, BardAction::RadiantFinale);
    let raging = has_raging_strikes(ctx);

    match (voice, finale) {
        (false, _) => raging,
        (true, false) => raging && has_battle_voice(ctx),
        (true, true) => raging && has_battle_voice(ctx) && has_radiant_finale(ctx),
    }
}

/// Second half of the slot: procs from the last main action have landed.
pub(super) fn late_weave(ctx: &DecisionContext) -> bool {
    ctx.weave().is_late()
}

pub(super) fn soul_voice(ctx: &DecisionContext) -> u16 {
    ctx.snapshot()
        .gauge(statuses::SOUL_VOICE)
        .map_or(0, |gauge| gauge.value())
}

pub(super) fn repertoire(ctx: &DecisionContext) -> u16 {
    ctx.snapshot()
        .gauge(statuses::REPERTOIRE)
        .map_or(0, |gauge| gauge.value())
}

pub(super) fn target_has_any(ctx: &DecisionContext, ids: &[StatusId]) -> bool {
    timing::has_any_status(ctx.snapshot(), StatusScope::Target, ids)
}

/// Both damage-over-time families are ticking on the target.
pub(super) fn dots_applied(ctx: &DecisionContext) -> bool {
    target_has_any(ctx, &statuses::target::WIND) && target_has_any(ctx, &statuses::target::POISON)
}

/// Any applied damage-over-time effect ends within `seconds` of the next slot.
pub(super) fn any_dot_ending(ctx: &DecisionContext, seconds: f32) -> bool {
    statuses::target::ALL_DOTS.iter().any(|id| {
        timing::has_status(ctx.snapshot(), StatusScope::Target, *id)
            && timing::will_status_end(ctx.snapshot(), StatusScope::Target, *id, seconds)
    })
}

/// Damage-over-time may be applied to the current target.
pub(super) fn dot_target_ok(ctx: &DecisionContext) -> bool {
    !ctx.config().toggles.dot_boss_only
        || ctx.snapshot().target().is_some_and(|target| target.is_boss)
}

/// Enough hostiles in range for the area variants.
pub(super) fn aoe(ctx: &DecisionContext) -> bool {
    ctx.snapshot().hostiles_in_range() >= ctx.config().toggles.aoe_threshold
}

/// Charge spender to use for a dump: area variant first when it pays off.
pub(super) fn charge_spender(ctx: &DecisionContext) -> Option<ActionId> {
    if aoe(ctx) {
        first_usable(
            ctx,
            &[
                BardAction::RainOfDeath,
                BardAction::HeartbreakShot,
                BardAction::Bloodletter,
            ],
        )
    } else {
        first_usable(ctx, &[BardAction::HeartbreakShot, BardAction::Bloodletter])
    }
}

/// Charge state of the shared spender charges.
pub(super) fn spender_charges(ctx: &DecisionContext) -> Option<rotation_core::AbilityState> {
    let snapshot = ctx.snapshot();
    snapshot
        .ability(BardAction::HeartbreakShot.id())
        .filter(|state| state.unlocked)
        .or_else(|| snapshot.ability(BardAction::Bloodletter.id()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_core::{EngineConfig, PhaseView, Snapshot, TargetId, TargetState};

    fn ctx(snapshot: Snapshot) -> DecisionContext {
        DecisionContext::new(snapshot, EngineConfig::default(), PhaseView::default(), None, &[])
    }

    #[test]
    fn burst_status_tracks_unlocked_buffs() {
        use rotation_core::AbilityState;

        let raging_only = Snapshot::in_combat_at(10.0)
            .with_player_status(statuses::player::RAGING_STRIKES, 15.0);
        assert!(in_burst_status(&ctx(raging_only.clone())));

        let voice_unlocked =
            raging_only.with_ability(BardAction::BattleVoice.id(), AbilityState::ready(1, 120.0));
        assert!(!in_burst_status(&ctx(voice_unlocked)));
    }

    #[test]
    fn missing_gauges_read_as_empty() {
        let context = ctx(Snapshot::in_combat_at(10.0));
        assert_eq!(soul_voice(&context), 0);
        assert_eq!(repertoire(&context), 0);
    }

    #[test]
    fn boss_only_toggle_needs_a_boss() {
        let mut config = EngineConfig::default();
        config.toggles.dot_boss_only = true;
        let trash = Snapshot::in_combat_at(10.0).with_target(TargetState::new(TargetId(2), false));
        let context = DecisionContext::new(trash, config, PhaseView::default(), None, &[]);

        assert!(!dot_target_ok(&context));
    }

    #[test]
    fn dots_need_both_families() {
        let snapshot = Snapshot::in_combat_at(10.0)
            .with_target(TargetState::new(TargetId(1), true))
            .with_target_status(statuses::target::STORMBITE, 30.0);
        assert!(!dots_applied(&ctx(snapshot.clone())));

        let both = snapshot.with_target_status(statuses::target::CAUSTIC_BITE, 30.0);
        assert!(dots_applied(&ctx(both)));
    }
}
