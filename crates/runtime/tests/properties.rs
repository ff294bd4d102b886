use proptest::prelude::*;
use rotation_content::bard::{BardAction, statuses};
use rotation_core::{
    AbilityState, BurstPolicy, EngineConfig, GcdTimer, IssuedAction, Phase, Snapshot,
    TargetId, TargetState,
};
use rotation_runtime::{Bard, Engine, Layer};

const SLOT: f32 = 2.5;

fn engine(config: EngineConfig) -> Engine {
    Engine::builder()
        .config(config)
        .rotation(Bard::default())
        .build()
        .unwrap()
}

fn ability(charges: u8, max: u8, recharge: f32) -> AbilityState {
    AbilityState::new(charges, max, recharge * 0.5, recharge, true)
}

prop_compose! {
    fn arb_snapshot()(
        time in 0.0f32..400.0,
        gcd in 0.0f32..SLOT,
        voice_cd in 0.0f32..120.0,
        raging_cd in 0.0f32..120.0,
        spender_charges in 0u8..=3,
        soul_voice in 0u16..=100,
        repertoire in 0u16..=3,
        wind in proptest::option::of(0.0f32..45.0),
        poison in proptest::option::of(0.0f32..45.0),
        raging_buff in proptest::option::of(0.0f32..20.0),
        hostiles in 0u8..6,
        party_burst in any::<bool>(),
    ) -> Snapshot {
        let mut snapshot = Snapshot::in_combat_at(time)
            .with_gcd(GcdTimer::new(gcd, SLOT))
            .with_target(TargetState::new(TargetId(1), true))
            .with_hostiles(hostiles)
            .with_gauge(statuses::SOUL_VOICE, statuses::soul_voice(soul_voice))
            .with_gauge(statuses::REPERTOIRE, statuses::repertoire(repertoire))
            .with_ability(BardAction::BattleVoice.id(), AbilityState::cooling(voice_cd, 120.0))
            .with_ability(BardAction::RadiantFinale.id(), AbilityState::cooling(voice_cd, 110.0))
            .with_ability(BardAction::RagingStrikes.id(), AbilityState::cooling(raging_cd, 120.0))
            .with_ability(BardAction::HeartbreakShot.id(), ability(spender_charges, 3, 15.0));
        for action in [
            BardAction::BurstShot,
            BardAction::IronJaws,
            BardAction::Stormbite,
            BardAction::CausticBite,
            BardAction::ApexArrow,
            BardAction::Ladonsbite,
            BardAction::EmpyrealArrow,
            BardAction::Sidewinder,
            BardAction::PitchPerfect,
            BardAction::MagesBallad,
        ] {
            snapshot = snapshot.with_ability(action.id(), AbilityState::ready(1, 0.0));
        }
        if let Some(remaining) = wind {
            snapshot = snapshot.with_target_status(statuses::target::STORMBITE, remaining);
        }
        if let Some(remaining) = poison {
            snapshot = snapshot.with_target_status(statuses::target::CAUSTIC_BITE, remaining);
        }
        if let Some(remaining) = raging_buff {
            snapshot = snapshot.with_player_status(statuses::player::RAGING_STRIKES, remaining);
        }
        if party_burst {
            snapshot = snapshot.with_player_status(statuses::PARTY_BURST[0], 15.0);
        }
        snapshot
    }
}

fn arb_policy() -> impl Strategy<Value = BurstPolicy> {
    prop_oneof![
        Just(BurstPolicy::Never),
        Just(BurstPolicy::PreventCap),
        Just(BurstPolicy::WithOthers),
        Just(BurstPolicy::EveryTwoMinutes),
        Just(BurstPolicy::Always),
    ]
}

fn is_burst_cooldown(decision: &rotation_runtime::Decision) -> bool {
    BardAction::from_id(decision.action)
        .map(BardAction::spec)
        .is_some_and(|spec| spec.is_burst_cooldown())
}

proptest! {
    #[test]
    fn decisions_are_deterministic(snapshot in arb_snapshot()) {
        let first = engine(EngineConfig::default());
        let second = engine(EngineConfig::default());

        let a = first.decide(snapshot.clone());
        let b = first.decide(snapshot.clone());
        let c = second.decide(snapshot);
        prop_assert_eq!(a, b);
        prop_assert_eq!(a, c);
    }

    #[test]
    fn late_weave_only_never_fires_burst_early(snapshot in arb_snapshot()) {
        let mut config = EngineConfig::default();
        config.burst.late_weave_only = true;
        let remaining = rotation_core::StateProvider::gcd(&snapshot).remaining;

        if let Some(decision) = engine(config).decide(snapshot) {
            if is_burst_cooldown(&decision) {
                prop_assert!(remaining > 0.0 && remaining <= SLOT / 2.0);
            }
        }
    }

    #[test]
    fn off_gcd_actions_only_inside_a_weave_window(snapshot in arb_snapshot()) {
        let remaining = rotation_core::StateProvider::gcd(&snapshot).remaining;
        let min_lock = EngineConfig::default().weave.min_lock;

        if let Some(decision) = engine(EngineConfig::default()).decide(snapshot) {
            if decision.layer != Layer::MainAction {
                prop_assert!(remaining > 0.0);
                prop_assert!(remaining <= SLOT / 2.0 || remaining > min_lock);
            }
        }
    }

    #[test]
    fn opener_window_always_permits_burst(
        time in 0.0f32..19.9,
        policy in arb_policy(),
        party_burst in any::<bool>(),
    ) {
        let mut config = EngineConfig::default();
        config.burst.policy = policy;
        let mut snapshot = Snapshot::in_combat_at(time);
        if party_burst {
            snapshot = snapshot.with_player_status(statuses::PARTY_BURST[0], 15.0);
        }
        let ctx = rotation_core::DecisionContext::new(
            snapshot,
            config,
            rotation_core::PhaseView::default(),
            None,
            &statuses::PARTY_BURST,
        );
        prop_assert!(ctx.in_opener_window());
        prop_assert!(ctx.burst_permitted());
    }

    #[test]
    fn charges_at_dump_threshold_are_spent(
        time in 30.0f32..400.0,
        recharge_left in 0.0f32..3.0,
        gcd in 0.7f32..SLOT,
    ) {
        let mut config = EngineConfig::default();
        config.opener.enabled = false;
        let snapshot = Snapshot::in_combat_at(time)
            .with_gcd(GcdTimer::new(gcd, SLOT))
            .with_target(TargetState::new(TargetId(1), true))
            .with_ability(
                BardAction::HeartbreakShot.id(),
                AbilityState::new(2, 3, recharge_left, 15.0, true),
            );

        let decision = engine(config).decide(snapshot).unwrap();
        prop_assert_eq!(decision.layer, Layer::Emergency);
        prop_assert_eq!(decision.action, BardAction::HeartbreakShot.id());
    }

    #[test]
    fn phase_elapsed_is_never_negative(
        steps in proptest::collection::vec((0.1f32..6.0, proptest::option::of(0usize..3)), 1..60),
    ) {
        let mut engine = engine(EngineConfig::default());
        let switches = [
            BardAction::WanderersMinuet,
            BardAction::MagesBallad,
            BardAction::ArmysPaeon,
        ];
        let mut time = 0.0;
        let mut last = None;
        let mut sequence = 0;

        for (dt, switch) in steps {
            time += dt;
            if let Some(index) = switch {
                sequence += 1;
                last = Some(IssuedAction {
                    action: switches[index].id(),
                    at: time,
                    sequence,
                });
            }
            let mut snapshot = Snapshot::in_combat_at(time);
            if let Some(issued) = last {
                snapshot = snapshot.with_last_action(issued);
            }

            let update = engine.tick_update(&snapshot);
            let elapsed = engine.phase().elapsed();
            prop_assert!(elapsed >= 0.0);
            if let Some(transition) = update.phase {
                prop_assert_eq!(transition.to, engine.phase().phase());
                prop_assert_eq!(elapsed, 0.0);
            }
            if engine.phase().phase() == Phase::None {
                prop_assert_eq!(elapsed, 0.0);
            }
            prop_assert!(elapsed <= EngineConfig::default().phases.max_duration);
        }
    }
}
