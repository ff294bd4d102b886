//! Action descriptors.
//!
//! Catalogs describe each action with an [`ActionSpec`]: its opaque id plus a
//! set of [`ActionTraits`] the decision pipeline keys off (main vs. off-GCD,
//! burst-gated, phase switch, ...).

use bitflags::bitflags;

use crate::snapshot::ActionId;

bitflags! {
    /// Classification flags for an action.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct ActionTraits: u16 {
        /// Non-blocking ability inserted between main actions.
        const OFF_GCD        = 1 << 0;
        /// Requires a hostile target.
        const NEEDS_TARGET   = 1 << 1;
        /// High-value cooldown gated by burst alignment.
        const BURST_COOLDOWN = 1 << 2;
        /// Starts a production phase.
        const PHASE_SWITCH   = 1 << 3;
        /// Applies or refreshes a damage-over-time debuff.
        const DOT            = 1 << 4;
        /// Hits every hostile in range.
        const AOE            = 1 << 5;
        /// Spends a charge-stacking resource.
        const CHARGE_SPENDER = 1 << 6;
        /// Spends a gauge.
        const GAUGE_SPENDER  = 1 << 7;
        /// Party support (cleanse, heal, mitigation).
        const SUPPORT        = 1 << 8;
        /// Consumable item use.
        const ITEM           = 1 << 9;
    }
}

/// Static description of one action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActionSpec {
    /// Host-side identifier.
    pub id: ActionId,
    /// Classification flags.
    pub traits: ActionTraits,
}

impl ActionSpec {
    /// Creates a main (GCD) action.
    #[must_use]
    pub const fn main(id: u32) -> Self {
        Self {
            id: ActionId(id),
            traits: ActionTraits::NEEDS_TARGET,
        }
    }

    /// Creates an off-GCD ability.
    #[must_use]
    pub const fn off_gcd(id: u32) -> Self {
        Self {
            id: ActionId(id),
            traits: ActionTraits::OFF_GCD,
        }
    }

    /// Adds traits (builder pattern).
    #[must_use]
    pub const fn with(mut self, traits: ActionTraits) -> Self {
        self.traits = self.traits.union(traits);
        self
    }

    /// Removes traits (builder pattern).
    #[must_use]
    pub const fn without(mut self, traits: ActionTraits) -> Self {
        self.traits = self.traits.difference(traits);
        self
    }

    #[must_use]
    pub const fn is_off_gcd(&self) -> bool {
        self.traits.contains(ActionTraits::OFF_GCD)
    }

    #[must_use]
    pub const fn is_burst_cooldown(&self) -> bool {
        self.traits.contains(ActionTraits::BURST_COOLDOWN)
    }

    #[must_use]
    pub const fn needs_target(&self) -> bool {
        self.traits.contains(ActionTraits::NEEDS_TARGET)
    }
}

impl From<ActionSpec> for ActionId {
    fn from(spec: ActionSpec) -> Self {
        spec.id
    }
}
