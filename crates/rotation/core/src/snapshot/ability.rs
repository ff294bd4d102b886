//! Charge and recharge state of a single ability.

/// Charge/recharge state of an ability as seen at one tick.
///
/// Single-use cooldowns are modelled as abilities with one charge: a ready
/// ability has `charges == 1`, a cooling one has `charges == 0` and a positive
/// `recharge_remaining`.
///
/// # Invariants
///
/// - `charges <= max_charges`
/// - `recharge_remaining >= 0` and `recharge_time >= 0`
/// - a full ability (`charges == max_charges`) has `recharge_remaining == 0`
///
/// [`AbilityState::new`] normalizes its inputs so these always hold.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AbilityState {
    /// Charges available right now.
    pub charges: u8,
    /// Maximum number of charges the ability can hold.
    pub max_charges: u8,
    /// Seconds until the next charge is restored.
    pub recharge_remaining: f32,
    /// Seconds one charge takes to restore.
    pub recharge_time: f32,
    /// Whether the ability is learned (level/quest requirements met).
    pub unlocked: bool,
}

impl AbilityState {
    /// Creates a normalized ability state.
    #[must_use]
    pub fn new(
        charges: u8,
        max_charges: u8,
        recharge_remaining: f32,
        recharge_time: f32,
        unlocked: bool,
    ) -> Self {
        let max_charges = max_charges.max(1);
        let charges = charges.min(max_charges);
        let recharge_time = non_negative(recharge_time);
        let recharge_remaining = if charges == max_charges {
            0.0
        } else {
            non_negative(recharge_remaining)
        };

        Self {
            charges,
            max_charges,
            recharge_remaining,
            recharge_time,
            unlocked,
        }
    }

    /// An unlocked ability with every charge available.
    #[must_use]
    pub fn ready(max_charges: u8, recharge_time: f32) -> Self {
        Self::new(max_charges, max_charges, 0.0, recharge_time, true)
    }

    /// An unlocked single-charge ability that is cooling down.
    #[must_use]
    pub fn cooling(remaining: f32, recharge_time: f32) -> Self {
        Self::new(0, 1, remaining, recharge_time, true)
    }

    /// An ability the character has not learned yet.
    #[must_use]
    pub fn locked() -> Self {
        Self::new(0, 1, 0.0, 0.0, false)
    }

    /// Returns `true` if at least one use is available now.
    #[must_use]
    pub fn is_usable(&self) -> bool {
        self.unlocked && self.charges > 0
    }

    /// Returns `true` while any charge is recharging.
    #[must_use]
    pub fn is_cooling_down(&self) -> bool {
        self.unlocked && self.charges < self.max_charges
    }

    /// Charges including the partial progress of the recharging one.
    ///
    /// A locked ability reports `0.0`.
    #[must_use]
    pub fn fractional_charges(&self) -> f32 {
        if !self.unlocked {
            return 0.0;
        }
        if self.charges >= self.max_charges || self.recharge_time <= 0.0 {
            return f32::from(self.charges);
        }
        let progress = 1.0 - self.recharge_remaining / self.recharge_time;
        f32::from(self.charges) + progress.clamp(0.0, 1.0)
    }

    /// Seconds until the ability holds at least `count` charges.
    ///
    /// Returns `None` for locked abilities or counts above the maximum.
    #[must_use]
    pub fn time_until_charges(&self, count: u8) -> Option<f32> {
        if !self.unlocked || count > self.max_charges {
            return None;
        }
        if self.charges >= count {
            return Some(0.0);
        }
        let missing = count - self.charges;
        Some(self.recharge_remaining + f32::from(missing - 1) * self.recharge_time)
    }

    /// Returns `true` if at least one use will be available within `seconds`.
    #[must_use]
    pub fn will_have_charge(&self, seconds: f32) -> bool {
        self.will_have_charges(1, seconds)
    }

    /// Returns `true` if `count` charges will be held within `seconds`.
    #[must_use]
    pub fn will_have_charges(&self, count: u8, seconds: f32) -> bool {
        self.time_until_charges(count)
            .is_some_and(|needed| needed <= seconds)
    }
}

impl Default for AbilityState {
    fn default() -> Self {
        Self::locked()
    }
}

fn non_negative(value: f32) -> f32 {
    if value.is_nan() { 0.0 } else { value.max(0.0) }
}
