//! Main-action layer: debuff upkeep, gauge spend, area actions, filler.

use priority_rules::builder::{chain, when};
use rotation_content::bard::{BardAction, statuses};
use rotation_core::overflow;
use rotation_core::timing;
use rotation_core::{ActionId, DecisionContext, Phase, StateProvider, StatusScope, StepKind};

use super::conditions::*;
use crate::pipeline::RuleChain;

/// Debuffs with at least this much left are worth extending with expiring buffs.
const SNAPSHOT_DOT_WINDOW: f32 = 30.0;
/// Gauge spender is held this long before the party buff returns.
const APEX_VOICE_HOLD: f32 = 25.0;
/// Early spend once Raging Strikes has this little left.
const APEX_RAGING_TAIL: f32 = 10.0;
/// Early spend in the second phase once it has this little left.
const APEX_PHASE_TAIL: f32 = 18.0;

pub(super) fn layer() -> RuleChain {
    chain()
        .rule("opener_main", opener_main)
        .rule(
            "iron_jaws_refresh",
            when(
                |ctx: &DecisionContext| {
                    dots_applied(ctx) && any_dot_ending(ctx, ctx.config().timing.refresh_lookahead)
                },
                BardAction::IronJaws.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::IronJaws)),
        )
        .rule(
            "iron_jaws_snapshot",
            when(snapshot_buffs, BardAction::IronJaws.id())
                .and(|ctx: &DecisionContext| can(ctx, BardAction::IronJaws)),
        )
        .rule(
            "resonant_arrow",
            when(
                |ctx: &DecisionContext| can(ctx, BardAction::ResonantArrow),
                BardAction::ResonantArrow.id(),
            ),
        )
        .rule(
            "apex_arrow",
            when(apex_arrow_due, BardAction::ApexArrow.id()),
        )
        .rule(
            "radiant_encore",
            when(in_burst_status, BardAction::RadiantEncore.id())
                .and(|ctx: &DecisionContext| can(ctx, BardAction::RadiantEncore)),
        )
        .rule(
            "blast_arrow",
            when(
                |ctx: &DecisionContext| {
                    !has_raging_strikes(ctx) || cooling(ctx, BardAction::Barrage)
                },
                BardAction::BlastArrow.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::BlastArrow)),
        )
        .rule("area", area)
        .rule(
            "stormbite",
            when(
                |ctx: &DecisionContext| !target_has_any(ctx, &statuses::target::WIND),
                BardAction::Stormbite.id(),
            )
            .and(dot_target_ok)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::Stormbite)),
        )
        .rule(
            "caustic_bite",
            when(
                |ctx: &DecisionContext| !target_has_any(ctx, &statuses::target::POISON),
                BardAction::CausticBite.id(),
            )
            .and(dot_target_ok)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::CausticBite)),
        )
        .rule(
            "windbite",
            when(
                |ctx: &DecisionContext| {
                    !unlocked(ctx, BardAction::Stormbite)
                        && early_dot_due(ctx, statuses::target::WINDBITE)
                },
                BardAction::Windbite.id(),
            )
            .and(dot_target_ok)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::Windbite)),
        )
        .rule(
            "venomous_bite",
            when(
                |ctx: &DecisionContext| {
                    !unlocked(ctx, BardAction::CausticBite)
                        && early_dot_due(ctx, statuses::target::VENOMOUS_BITE)
                },
                BardAction::VenomousBite.id(),
            )
            .and(dot_target_ok)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::VenomousBite)),
        )
        .rule(
            "refulgent_arrow",
            when(has_proc, BardAction::RefulgentArrow.id())
                .and(|ctx: &DecisionContext| can(ctx, BardAction::RefulgentArrow)),
        )
        .rule(
            "straight_shot",
            when(
                |ctx: &DecisionContext| !unlocked(ctx, BardAction::RefulgentArrow),
                BardAction::StraightShot.id(),
            )
            .and(has_proc)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::StraightShot)),
        )
        .rule("filler", |ctx: &DecisionContext| {
            first_usable(ctx, &[BardAction::BurstShot, BardAction::HeavyShot])
        })
}

fn opener_main(ctx: &DecisionContext) -> Option<ActionId> {
    ctx.opener_step()
        .filter(|step| step.kind == StepKind::Main)
        .filter(|step| can_id(ctx, step.action))
        .map(|step| step.action)
}

/// Own buffs about to drop while the debuffs still have a long way to go:
/// refresh now to carry the buffed values forward.
fn snapshot_buffs(ctx: &DecisionContext) -> bool {
    if !dots_applied(ctx) || !any_dot_ending(ctx, SNAPSHOT_DOT_WINDOW) {
        return false;
    }
    let own = &statuses::player::OWN_BURST;
    let snapshot = ctx.snapshot();
    timing::has_any_status(snapshot, StatusScope::Player, own)
        && own.iter().any(|id| {
            timing::has_status(snapshot, StatusScope::Player, *id)
                && timing::will_status_end_gcd(
                    snapshot,
                    StatusScope::Player,
                    *id,
                    1,
                    ctx.config().timing.snapshot_lookahead,
                )
        })
}

/// Before the refresh action is learned, the basic debuffs are re-applied as
/// they run out.
fn early_dot_due(ctx: &DecisionContext, status: rotation_core::StatusId) -> bool {
    if unlocked(ctx, BardAction::IronJaws) {
        return !target_has_any(ctx, &[status]);
    }
    timing::will_status_end(
        ctx.snapshot(),
        StatusScope::Target,
        status,
        ctx.config().timing.refresh_lookahead,
    )
}

/// Spend the gauge in the burst window or before it overflows, but never
/// right before a debuff refresh or the next party buff.
fn apex_arrow_due(ctx: &DecisionContext) -> bool {
    if !can(ctx, BardAction::ApexArrow) {
        return false;
    }
    let Some(gauge) = ctx.snapshot().gauge(statuses::SOUL_VOICE) else {
        return false;
    };
    let overflow = ctx.config().overflow;
    let spend_at = overflow.gauge_spend_threshold.min(gauge.max());
    let early_at = overflow.gauge_early_threshold;
    let value = soul_voice(ctx);
    let raging = has_raging_strikes(ctx);

    if aoe(ctx) && value >= spend_at {
        return true;
    }
    if any_dot_ending(ctx, ctx.snapshot().gcd().total + ctx.config().timing.snapshot_lookahead) {
        return false;
    }
    if song(ctx) == Phase::P1 && value >= early_at && !raging {
        return false;
    }
    if value >= spend_at && ready_within(ctx, BardAction::BattleVoice, APEX_VOICE_HOLD) {
        return false;
    }
    if value >= early_at
        && raging
        && timing::will_status_end(
            ctx.snapshot(),
            StatusScope::Player,
            statuses::player::RAGING_STRIKES,
            APEX_RAGING_TAIL,
        )
    {
        return true;
    }
    if value >= spend_at && raging && has_battle_voice(ctx) {
        return true;
    }
    if song(ctx) == Phase::P2 && value >= early_at && ctx.phase().ends_within(APEX_PHASE_TAIL) {
        return true;
    }
    overflow::should_force_spend(gauge, ctx.phase().rate, in_burst_status(ctx), &overflow)
}

/// Area variants once enough hostiles are in range.
fn area(ctx: &DecisionContext) -> Option<ActionId> {
    if !aoe(ctx) {
        return None;
    }
    if has_proc(ctx) {
        first_usable(ctx, &[BardAction::Shadowbite, BardAction::WideVolley])
    } else {
        first_usable(ctx, &[BardAction::Ladonsbite, BardAction::QuickNock])
    }
}
