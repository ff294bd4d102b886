//! Attack/buff layer: the burst chain behind the alignment gate, then damage
//! cooldowns with anti-drift guards.

use priority_rules::builder::{chain, when};
use rotation_content::bard::{BardAction, statuses};
use rotation_core::{DecisionContext, Phase};

use super::conditions::*;
use crate::pipeline::RuleChain;

/// Empyreal Arrow is held while Raging Strikes comes back within this window.
const EMPYREAL_HOLD: f32 = 15.0;
/// Sidewinder is held while a burst buff comes back within this window.
const SIDEWINDER_HOLD: f32 = 10.0;

pub(super) fn layer() -> RuleChain {
    chain()
        .rule(
            "battle_voice",
            when(battle_voice_ready, BardAction::BattleVoice.id())
                .and(|ctx: &DecisionContext| can(ctx, BardAction::BattleVoice)),
        )
        .rule(
            "radiant_finale",
            when(
                |ctx: &DecisionContext| burst_chain_open(ctx) && has_battle_voice(ctx),
                BardAction::RadiantFinale.id(),
            )
            .and(|ctx: &DecisionContext| can(ctx, BardAction::RadiantFinale)),
        )
        .rule(
            "raging_strikes",
            when(raging_strikes_ready, BardAction::RagingStrikes.id())
                .and(|ctx: &DecisionContext| can(ctx, BardAction::RagingStrikes)),
        )
        .rule(
            "raging_strikes_low_level",
            when(raging_strikes_low_level, BardAction::RagingStrikes.id()),
        )
        .rule(
            "empyreal_arrow",
            when(
                |ctx: &DecisionContext| {
                    has_song(ctx)
                        && (cooling(ctx, BardAction::RagingStrikes)
                            || !ready_within(ctx, BardAction::RagingStrikes, EMPYREAL_HOLD))
                },
                BardAction::EmpyrealArrow.id(),
            )
            .and(not_holding_for_voice)
            .and(|ctx: &DecisionContext| can(ctx, BardAction::EmpyrealArrow)),
        )
        .rule(
            "pitch_perfect_pre_overflow",
            when(pitch_perfect_before_empyreal, BardAction::PitchPerfect.id())
                .and(not_holding_for_voice)
                .and(late_weave),
        )
        .rule(
            "sidewinder",
            when(sidewinder_ready, BardAction::Sidewinder.id())
                .and(not_holding_for_voice)
                .and(|ctx: &DecisionContext| can(ctx, BardAction::Sidewinder)),
        )
        .rule("burst_charge_spend", |ctx: &DecisionContext| {
            if !late_weave(ctx) || !not_holding_for_voice(ctx) || !in_burst_status(ctx) {
                return None;
            }
            charge_spender(ctx)
        })
}

/// The burst chain runs under a phase once the level-appropriate kit exists.
fn burst_chain_open(ctx: &DecisionContext) -> bool {
    has_song(ctx) && unlocked(ctx, BardAction::MagesBallad)
}

/// Opens the chain only when Raging Strikes will follow in time and both
/// damage-over-time effects are up to benefit from it.
fn battle_voice_ready(ctx: &DecisionContext) -> bool {
    if !burst_chain_open(ctx) || !dots_applied(ctx) {
        return false;
    }
    if !unlocked(ctx, BardAction::RadiantFinale) {
        return !cooling(ctx, BardAction::RagingStrikes);
    }
    let alignment = ctx.config().timing.buff_alignment;
    !cooling(ctx, BardAction::RadiantFinale)
        && unlocked(ctx, BardAction::RagingStrikes)
        && (!cooling(ctx, BardAction::RagingStrikes)
            || ready_within(ctx, BardAction::RagingStrikes, alignment))
}

/// Raging Strikes goes last, once the buffs before it are applied.
fn raging_strikes_ready(ctx: &DecisionContext) -> bool {
    if !burst_chain_open(ctx) {
        return false;
    }
    match (
        unlocked(ctx, BardAction::BattleVoice),
        unlocked(ctx, BardAction::RadiantFinale),
    ) {
        (_, true) => has_radiant_finale(ctx) && has_battle_voice(ctx),
        (true, false) => has_battle_voice(ctx),
        (false, false) => true,
    }
}

/// Before the phase kit exists the buff is used freely, paired with the proc
/// shot once that is learned.
fn raging_strikes_low_level(ctx: &DecisionContext) -> bool {
    if unlocked(ctx, BardAction::MagesBallad) {
        return false;
    }
    let paired = !unlocked(ctx, BardAction::StraightShot)
        || ctx.next_main_is(&[BardAction::StraightShot.id()]);
    paired && ctx.can_use_ungated(BardAction::RagingStrikes.spec())
}

/// Battle Voice is ready while Radiant Finale is not: hold everything else in
/// this layer so the chain is not delayed.
fn not_holding_for_voice(ctx: &DecisionContext) -> bool {
    !(unlocked(ctx, BardAction::RadiantFinale)
        && cooling(ctx, BardAction::RadiantFinale)
        && unlocked(ctx, BardAction::BattleVoice)
        && !cooling(ctx, BardAction::BattleVoice))
}

/// Two stacks with Empyreal Arrow about to add a third.
fn pitch_perfect_before_empyreal(ctx: &DecisionContext) -> bool {
    song(ctx) == Phase::P1
        && repertoire(ctx) == statuses::REPERTOIRE_MAX - 1
        && ctx.ready_within_slots(BardAction::EmpyrealArrow.id(), 1)
        && cooling(ctx, BardAction::RadiantFinale)
        && can(ctx, BardAction::PitchPerfect)
}

/// Sidewinder only while no burst buff is about to return.
fn sidewinder_ready(ctx: &DecisionContext) -> bool {
    let voice_far = cooling(ctx, BardAction::BattleVoice)
        && !ready_within(ctx, BardAction::BattleVoice, SIDEWINDER_HOLD);
    let finale_far = !unlocked(ctx, BardAction::RadiantFinale)
        || (cooling(ctx, BardAction::RadiantFinale)
            && !ready_within(ctx, BardAction::RadiantFinale, SIDEWINDER_HOLD));

    voice_far && finale_far && cooling(ctx, BardAction::RagingStrikes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rotation_core::{
        AbilityState, EngineConfig, GcdTimer, PhaseView, Snapshot, StatusId, TargetId,
        TargetState,
    };

    fn ctx(snapshot: Snapshot, burst_signal: bool) -> DecisionContext {
        let view = PhaseView {
            phase: Phase::P1,
            ..PhaseView::default()
        };
        let burst: &[StatusId] = if burst_signal {
            &statuses::PARTY_BURST
        } else {
            &[]
        };
        DecisionContext::new(snapshot, EngineConfig::default(), view, None, burst)
    }

    fn base(time: f32) -> Snapshot {
        Snapshot::in_combat_at(time)
            .with_gcd(GcdTimer::new(1.0, 2.5))
            .with_target(TargetState::new(TargetId(1), true))
            .with_target_status(statuses::target::STORMBITE, 40.0)
            .with_target_status(statuses::target::CAUSTIC_BITE, 40.0)
            .with_ability(BardAction::MagesBallad.id(), AbilityState::ready(1, 120.0))
            .with_ability(BardAction::BattleVoice.id(), AbilityState::ready(1, 120.0))
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::ready(1, 110.0))
            .with_ability(BardAction::RagingStrikes.id(), AbilityState::ready(1, 120.0))
            .with_ability(BardAction::EmpyrealArrow.id(), AbilityState::ready(1, 15.0))
    }

    #[test]
    fn chain_starts_with_battle_voice_in_opener() {
        let found = layer().evaluate_match(&ctx(base(6.0), false)).unwrap();
        assert_eq!(found.rule, "battle_voice");
    }

    #[test]
    fn chain_is_held_outside_opener_without_party_burst() {
        let found = layer().evaluate_match(&ctx(base(200.0), false));
        assert!(found.is_none_or(|found| found.action != BardAction::BattleVoice.id()));
    }

    #[test]
    fn raging_strikes_follows_both_buffs() {
        let snapshot = base(8.0)
            .with_ability(BardAction::BattleVoice.id(), AbilityState::cooling(118.0, 120.0))
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(108.0, 110.0))
            .with_player_status(statuses::player::BATTLE_VOICE, 15.0)
            .with_player_status(statuses::player::RADIANT_FINALE, 15.0);

        let found = layer().evaluate_match(&ctx(snapshot, false)).unwrap();
        assert_eq!(found.rule, "raging_strikes");
    }

    #[test]
    fn voice_pending_holds_damage_cooldowns() {
        let snapshot = base(200.0)
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(30.0, 110.0))
            .with_ability(BardAction::RagingStrikes.id(), AbilityState::cooling(30.0, 120.0));

        assert!(layer().evaluate_match(&ctx(snapshot, false)).is_none());
    }

    fn own_burst(gcd_remaining: f32) -> Snapshot {
        base(200.0)
            .with_gcd(GcdTimer::new(gcd_remaining, 2.5))
            .with_ability(BardAction::BattleVoice.id(), AbilityState::cooling(100.0, 120.0))
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(100.0, 110.0))
            .with_ability(BardAction::RagingStrikes.id(), AbilityState::cooling(100.0, 120.0))
            .with_ability(BardAction::EmpyrealArrow.id(), AbilityState::cooling(10.0, 15.0))
            .with_ability(BardAction::HeartbreakShot.id(), AbilityState::ready(3, 15.0))
            .with_player_status(statuses::player::RAGING_STRIKES, 10.0)
            .with_player_status(statuses::player::BATTLE_VOICE, 10.0)
            .with_player_status(statuses::player::RADIANT_FINALE, 10.0)
    }

    #[test]
    fn burst_charges_wait_for_late_weave() {
        assert!(layer().evaluate_match(&ctx(own_burst(2.0), false)).is_none());

        let found = layer().evaluate_match(&ctx(own_burst(1.0), false)).unwrap();
        assert_eq!(found.rule, "burst_charge_spend");
        assert_eq!(found.action, BardAction::HeartbreakShot.id());
    }

    #[test]
    fn pitch_perfect_pre_overflow_waits_for_late_weave() {
        let stacked = |gcd_remaining: f32| {
            base(200.0)
                .with_gcd(GcdTimer::new(gcd_remaining, 2.5))
                .with_ability(BardAction::BattleVoice.id(), AbilityState::cooling(60.0, 120.0))
                .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(50.0, 110.0))
                .with_ability(BardAction::RagingStrikes.id(), AbilityState::cooling(60.0, 120.0))
                .with_ability(BardAction::EmpyrealArrow.id(), AbilityState::cooling(1.0, 15.0))
                .with_ability(BardAction::PitchPerfect.id(), AbilityState::ready(1, 0.0))
                .with_gauge(statuses::REPERTOIRE, statuses::repertoire(2))
        };

        assert!(layer().evaluate_match(&ctx(stacked(2.0), false)).is_none());
        let found = layer().evaluate_match(&ctx(stacked(1.0), false)).unwrap();
        assert_eq!(found.rule, "pitch_perfect_pre_overflow");
    }

    #[test]
    fn empyreal_fires_between_bursts() {
        let snapshot = base(200.0)
            .with_ability(BardAction::BattleVoice.id(), AbilityState::cooling(60.0, 120.0))
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(50.0, 110.0))
            .with_ability(BardAction::RagingStrikes.id(), AbilityState::cooling(60.0, 120.0));

        let found = layer().evaluate_match(&ctx(snapshot, false)).unwrap();
        assert_eq!(found.rule, "empyreal_arrow");
    }
}
