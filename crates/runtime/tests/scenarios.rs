use rotation_content::bard::{BardAction, statuses};
use rotation_core::{
    AbilityState, EngineConfig, GcdTimer, IssuedAction, Phase, Snapshot, TargetId, TargetState,
};
use rotation_runtime::{Bard, Engine, Layer};

fn engine_without_opener() -> Engine {
    let mut config = EngineConfig::default();
    config.opener.enabled = false;
    Engine::builder()
        .config(config)
        .rotation(Bard::default())
        .build()
        .unwrap()
}

fn in_combat(time: f32, gcd_remaining: f32) -> Snapshot {
    Snapshot::in_combat_at(time)
        .with_gcd(GcdTimer::new(gcd_remaining, 2.5))
        .with_target(TargetState::new(TargetId(1), true))
        .with_hostiles(1)
        .with_ability(BardAction::BurstShot.id(), AbilityState::ready(1, 0.0))
}

fn issued(action: BardAction, at: f32, sequence: u64) -> IssuedAction {
    IssuedAction {
        action: action.id(),
        at,
        sequence,
    }
}

#[test]
fn scenario_a_burst_permitted_in_opener_without_party_signal() {
    let mut engine = engine_without_opener();
    let song = in_combat(3.0, 1.0)
        .with_ability(BardAction::WanderersMinuet.id(), AbilityState::cooling(119.0, 120.0))
        .with_last_action(issued(BardAction::WanderersMinuet, 3.0, 1));
    engine.tick_update(&song);
    assert_eq!(engine.phase().phase(), Phase::P1);

    let snapshot = song
        .with_target_status(statuses::target::STORMBITE, 40.0)
        .with_target_status(statuses::target::CAUSTIC_BITE, 40.0)
        .with_ability(BardAction::MagesBallad.id(), AbilityState::ready(1, 120.0))
        .with_ability(BardAction::BattleVoice.id(), AbilityState::ready(1, 120.0))
        .with_ability(BardAction::RadiantFinale.id(), AbilityState::ready(1, 110.0))
        .with_ability(BardAction::RagingStrikes.id(), AbilityState::ready(1, 120.0));

    let decision = engine.tick(snapshot.with_combat_time(5.0)).unwrap();
    assert_eq!(decision.layer, Layer::AttackBuff);
    assert_eq!(decision.rule, "battle_voice");
}

#[test]
fn scenario_b_drift_corrected_phase_transition() {
    let mut engine = engine_without_opener();
    let entered = in_combat(10.0, 1.0)
        .with_ability(BardAction::WanderersMinuet.id(), AbilityState::cooling(119.0, 120.0))
        .with_ability(BardAction::MagesBallad.id(), AbilityState::ready(1, 120.0))
        .with_last_action(issued(BardAction::WanderersMinuet, 10.0, 1));
    engine.tick_update(&entered);

    // Target duration 43 s, one second short of it.
    let decision = engine.tick(entered.with_combat_time(52.0)).unwrap();
    assert!((engine.phase().elapsed() - 42.0).abs() < 1e-4);
    assert_eq!(decision.layer, Layer::GeneralUtility);
    assert_eq!(decision.rule, "phase_transition");
    assert_eq!(decision.action, BardAction::MagesBallad.id());
}

#[test]
fn scenario_c_overflow_dump_fires_outside_burst() {
    let engine = engine_without_opener();
    // Two charges held, the third 90% recharged.
    let snapshot = in_combat(100.0, 1.0).with_ability(
        BardAction::HeartbreakShot.id(),
        AbilityState::new(2, 3, 1.5, 15.0, true),
    );

    let decision = engine.decide(snapshot).unwrap();
    assert_eq!(decision.layer, Layer::Emergency);
    assert_eq!(decision.rule, "overflow_dump");
    assert_eq!(decision.action, BardAction::HeartbreakShot.id());
}

#[test]
fn scenario_d_debuff_refresh_due_immediately() {
    let engine = engine_without_opener();
    let snapshot = in_combat(60.0, 0.0)
        .with_average_cast_time(2.5)
        .with_target_status(statuses::target::STORMBITE, 2.0)
        .with_target_status(statuses::target::CAUSTIC_BITE, 30.0)
        .with_ability(BardAction::IronJaws.id(), AbilityState::ready(1, 0.0));

    let decision = engine.decide(snapshot).unwrap();
    assert_eq!(decision.layer, Layer::MainAction);
    assert_eq!(decision.rule, "iron_jaws_refresh");
}

#[test]
fn opener_script_drives_first_actions() {
    let mut engine = Engine::builder().rotation(Bard::default()).build().unwrap();
    let kit = in_combat(0.5, 0.0)
        .with_ability(BardAction::Stormbite.id(), AbilityState::ready(1, 0.0))
        .with_ability(BardAction::WanderersMinuet.id(), AbilityState::ready(1, 120.0))
        .with_ability(BardAction::EmpyrealArrow.id(), AbilityState::ready(1, 15.0));

    let first = engine.tick(kit.clone()).unwrap();
    assert_eq!(first.rule, "opener_main");
    assert_eq!(first.action, BardAction::Stormbite.id());

    let after_first = kit
        .with_combat_time(1.0)
        .with_gcd(GcdTimer::new(2.0, 2.5))
        .with_last_action(issued(BardAction::Stormbite, 0.5, 1));
    let second = engine.tick(after_first).unwrap();
    assert_eq!(second.rule, "opener_off_gcd");
    assert_eq!(second.action, BardAction::WanderersMinuet.id());
    assert_eq!(engine.opener().step(), 1);
}

#[test]
fn opener_is_abandoned_after_deadline() {
    let mut engine = Engine::builder().rotation(Bard::default()).build().unwrap();
    let snapshot = in_combat(25.0, 0.0)
        .with_ability(BardAction::Stormbite.id(), AbilityState::ready(1, 0.0));

    let update = engine.tick_update(&snapshot);
    assert!(matches!(
        update.opener,
        Some(rotation_core::OpenerEvent::Abandoned { .. })
    ));
    assert!(engine.opener().is_finished());
}

#[test]
fn out_of_combat_issues_nothing_without_target() {
    let mut engine = engine_without_opener();
    assert_eq!(engine.tick(Snapshot::idle()), None);
}

#[test]
fn party_support_requests_are_answered() {
    let engine = engine_without_opener();
    let snapshot = in_combat(80.0, 1.0)
        .with_requests(rotation_core::SupportRequests::HEAL_SINGLE)
        .with_ability(BardAction::NaturesMinne.id(), AbilityState::ready(1, 120.0));

    let decision = engine.decide(snapshot).unwrap();
    assert_eq!(decision.rule, "heal_single");
}
