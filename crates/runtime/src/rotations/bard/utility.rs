//! General-utility layer: phase cycle and party support.

use priority_rules::builder::{chain, when};
use rotation_content::bard::BardAction;
use rotation_core::{ActionId, DecisionContext, Phase, PhaseActions, StateProvider, SupportRequests};

use super::conditions::*;
use crate::pipeline::RuleChain;

pub(super) fn layer(actions: PhaseActions) -> RuleChain {
    chain()
        .rule("phase_start", move |ctx: &DecisionContext| {
            phase_start(ctx, &actions)
        })
        .rule("phase_transition", phase_transition)
        .rule("phase_fallback", move |ctx: &DecisionContext| {
            phase_fallback(ctx, &actions)
        })
        .rule(
            "dispel",
            when(
                |ctx: &DecisionContext| {
                    ctx.config().toggles.dispel_party && requested(ctx, SupportRequests::DISPEL)
                },
                BardAction::WardensPaean.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::WardensPaean)),
        )
        .rule(
            "heal_single",
            when(
                |ctx: &DecisionContext| requested(ctx, SupportRequests::HEAL_SINGLE),
                BardAction::NaturesMinne.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::NaturesMinne)),
        )
        .rule(
            "mitigate_area",
            when(
                |ctx: &DecisionContext| requested(ctx, SupportRequests::MITIGATE_AREA),
                BardAction::Troubadour.id(),
            )
            .and(|ctx: &DecisionContext| {
                !(ctx.config().toggles.suppress_mitigation_in_burst && in_burst_status(ctx))
            })
            .and(|ctx: &DecisionContext| can(ctx, BardAction::Troubadour)),
        )
}

fn requested(ctx: &DecisionContext, request: SupportRequests) -> bool {
    ctx.snapshot().requests().contains(request)
}

/// No phase yet: the configured starting phase, then the rest in cycle order.
fn phase_start(ctx: &DecisionContext, actions: &PhaseActions) -> Option<ActionId> {
    if has_song(ctx) || !ctx.snapshot().in_combat() {
        return None;
    }
    actions
        .candidates(ctx.snapshot(), Phase::None, ctx.config().phases.starting)
        .filter_map(|phase| actions.get(phase))
        .find(|action| can_id(ctx, *action))
}

/// Regular cycle step once the current phase has run its target duration.
fn phase_transition(ctx: &DecisionContext) -> Option<ActionId> {
    let view = ctx.phase();
    if !view.phase.is_active() || !view.due {
        return None;
    }
    let next = view.next_action.filter(|action| can_id(ctx, *action))?;
    (leaving_is_safe(ctx) || view.ends_within(ctx.config().phases.proc_spend_window))
        .then_some(next)
}

/// The regular next phase is still cooling down as this one runs out: take
/// any later phase that is ready.
fn phase_fallback(ctx: &DecisionContext, actions: &PhaseActions) -> Option<ActionId> {
    let view = ctx.phase();
    if !view.ends_within(ctx.config().phases.fallback_window) {
        return None;
    }
    let regular_ready = view.next_action.is_some_and(|action| can_id(ctx, action));
    if regular_ready {
        return None;
    }
    actions
        .candidates(ctx.snapshot(), view.phase, ctx.config().phases.starting)
        .skip(1)
        .filter_map(|phase| actions.get(phase))
        .find(|action| can_id(ctx, *action))
}

/// Leaving the first phase discards its proc stacks unless nothing is left
/// to spend them on.
fn leaving_is_safe(ctx: &DecisionContext) -> bool {
    song(ctx) != Phase::P1 || repertoire(ctx) == 0 || ctx.snapshot().hostiles_in_range() == 0
}
