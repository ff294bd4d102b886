//! Bard action catalog.

use rotation_core::{ActionId, ActionSpec, ActionTraits};

/// Every action the Bard rule book can propose.
///
/// Discriminants are the host's action identifiers.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u32)]
pub enum BardAction {
    // ===== main actions =====
    HeavyShot = 97,
    StraightShot = 98,
    VenomousBite = 100,
    QuickNock = 106,
    Windbite = 113,
    IronJaws = 3560,
    CausticBite = 7406,
    Stormbite = 7407,
    RefulgentArrow = 7409,
    Shadowbite = 16494,
    BurstShot = 16495,
    ApexArrow = 16496,
    Ladonsbite = 25783,
    BlastArrow = 25784,
    WideVolley = 36974,
    ResonantArrow = 36976,
    RadiantEncore = 36977,

    // ===== off-GCD abilities =====
    RagingStrikes = 101,
    Barrage = 107,
    Bloodletter = 110,
    MagesBallad = 114,
    ArmysPaeon = 116,
    RainOfDeath = 117,
    BattleVoice = 118,
    EmpyrealArrow = 3558,
    WanderersMinuet = 3559,
    WardensPaean = 3561,
    Sidewinder = 3562,
    PitchPerfect = 7404,
    Troubadour = 7405,
    NaturesMinne = 7408,
    RadiantFinale = 25785,
    HeartbreakShot = 36975,

    // ===== consumables =====
    /// Dexterity tincture used for burst windows.
    Tincture = 44_158,
}

impl BardAction {
    /// Host identifier.
    #[must_use]
    pub const fn id(self) -> ActionId {
        ActionId(self as u32)
    }

    /// Catalog entry with classification traits.
    #[must_use]
    pub const fn spec(self) -> ActionSpec {
        use ActionTraits as T;
        use BardAction::*;

        let id = self as u32;
        match self {
            HeavyShot | StraightShot | BurstShot | RefulgentArrow | BlastArrow | ResonantArrow
            | RadiantEncore => ActionSpec::main(id),
            VenomousBite | Windbite | CausticBite | Stormbite | IronJaws => {
                ActionSpec::main(id).with(T::DOT)
            }
            QuickNock | Ladonsbite | WideVolley | Shadowbite => ActionSpec::main(id).with(T::AOE),
            ApexArrow => ActionSpec::main(id).with(T::GAUGE_SPENDER),

            RagingStrikes => ActionSpec::off_gcd(id).with(T::BURST_COOLDOWN),
            BattleVoice | RadiantFinale => ActionSpec::off_gcd(id).with(T::BURST_COOLDOWN),
            Barrage => ActionSpec::off_gcd(id),
            Bloodletter | HeartbreakShot => ActionSpec::off_gcd(id)
                .with(T::NEEDS_TARGET)
                .with(T::CHARGE_SPENDER),
            RainOfDeath => ActionSpec::off_gcd(id)
                .with(T::NEEDS_TARGET)
                .with(T::CHARGE_SPENDER)
                .with(T::AOE),
            EmpyrealArrow | Sidewinder | PitchPerfect => {
                ActionSpec::off_gcd(id).with(T::NEEDS_TARGET)
            }
            WanderersMinuet | MagesBallad | ArmysPaeon => ActionSpec::off_gcd(id)
                .with(T::NEEDS_TARGET)
                .with(T::PHASE_SWITCH),
            WardensPaean | Troubadour | NaturesMinne => ActionSpec::off_gcd(id).with(T::SUPPORT),
            Tincture => ActionSpec::off_gcd(id).with(T::ITEM),
        }
    }

    /// Reverse lookup from a host identifier.
    #[must_use]
    pub fn from_id(id: ActionId) -> Option<Self> {
        use strum::IntoEnumIterator;
        Self::iter().find(|action| action.id() == id)
    }
}

impl From<BardAction> for ActionId {
    fn from(action: BardAction) -> Self {
        action.id()
    }
}

impl From<BardAction> for ActionSpec {
    fn from(action: BardAction) -> Self {
        action.spec()
    }
}
