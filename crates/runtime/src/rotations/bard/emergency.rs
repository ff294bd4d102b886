//! Emergency layer: cleanses, scripted opener weaves, potion, proc windows and
//! overflow dumps.

use priority_rules::builder::{chain, when};
use rotation_content::bard::{BardAction, statuses};
use rotation_core::overflow;
use rotation_core::{ActionId, DecisionContext, Phase, StepKind};

use super::conditions::*;
use crate::pipeline::RuleChain;

pub(super) fn layer(potion: ActionId) -> RuleChain {
    chain()
        .rule(
            "doom_cleanse",
            when(
                |ctx: &DecisionContext| has_buff(ctx, statuses::player::DOOM),
                BardAction::WardensPaean.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::WardensPaean)),
        )
        .rule("opener_off_gcd", opener_off_gcd)
        .rule(
            "potion",
            when(move |ctx: &DecisionContext| wants_potion(ctx, potion), potion),
        )
        .rule(
            "barrage_proc_window",
            when(barrage_window, BardAction::Barrage.id()),
        )
        .rule(
            "pitch_perfect_proc",
            when(pitch_perfect_due, BardAction::PitchPerfect.id()),
        )
        .rule("overflow_dump", overflow_dump)
}

fn opener_off_gcd(ctx: &DecisionContext) -> Option<ActionId> {
    ctx.opener_step()
        .filter(|step| step.kind == StepKind::OffGcd)
        .filter(|step| can_id(ctx, step.action))
        .map(|step| step.action)
}

fn wants_potion(ctx: &DecisionContext, potion: ActionId) -> bool {
    let toggles = ctx.config().toggles;
    if !toggles.potion || !can_id(ctx, potion) {
        return false;
    }
    if has_buff(ctx, statuses::player::MEDICATED) {
        return false;
    }
    if ctx.in_opener_window() && !toggles.potion_in_opener {
        return false;
    }
    ctx.burst_permitted() && has_raging_strikes(ctx)
}

/// Barrage under Raging Strikes when Empyreal Arrow will not come up first.
fn barrage_window(ctx: &DecisionContext) -> bool {
    let refresh_next = ctx.next_main_is(&[
        BardAction::StraightShot.id(),
        BardAction::VenomousBite.id(),
        BardAction::Windbite.id(),
        BardAction::IronJaws.id(),
    ]);
    if refresh_next {
        return false;
    }
    if unlocked(ctx, BardAction::RagingStrikes) && !has_raging_strikes(ctx) {
        return false;
    }
    let empyreal_far = !unlocked(ctx, BardAction::EmpyrealArrow)
        || (cooling(ctx, BardAction::EmpyrealArrow)
            && !ctx.ready_within_slots(BardAction::EmpyrealArrow.id(), 1));

    empyreal_far
        && repertoire(ctx) != statuses::REPERTOIRE_MAX
        && !has_buff(ctx, statuses::player::HAWKS_EYE)
        && can(ctx, BardAction::Barrage)
}

/// Full repertoire, or stacks left as the first phase runs out.
fn pitch_perfect_due(ctx: &DecisionContext) -> bool {
    if song(ctx) != Phase::P1 || !can(ctx, BardAction::PitchPerfect) {
        return false;
    }
    let stacks = repertoire(ctx);
    stacks == statuses::REPERTOIRE_MAX
        || (stacks > 0 && ctx.phase().ends_within(ctx.config().phases.proc_spend_window))
}

fn overflow_dump(ctx: &DecisionContext) -> Option<ActionId> {
    let state = spender_charges(ctx)?;
    let rate = ctx.phase().rate;
    if !overflow::should_dump_charges(&state, rate, &ctx.config().overflow) {
        return None;
    }
    charge_spender(ctx)
}
