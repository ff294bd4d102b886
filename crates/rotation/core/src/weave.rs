//! Weave window calculator.

use crate::snapshot::GcdTimer;

/// Whether an off-GCD ability fits before the next main action.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum WeaveWindow {
    /// The main slot is free (or too close): issue nothing off-GCD.
    #[default]
    NoWindow,
    /// Early in the slot: safe for urgent insertions only.
    EarlyOnly,
    /// Second half of the slot: the preferred, information-rich weave.
    LateReady,
}

impl WeaveWindow {
    /// Computes the window for this tick.
    ///
    /// - `remaining <= 0`: [`NoWindow`](Self::NoWindow)
    /// - `0 < remaining <= total / 2`: [`LateReady`](Self::LateReady)
    /// - `remaining > min_lock`: [`EarlyOnly`](Self::EarlyOnly)
    /// - otherwise [`NoWindow`](Self::NoWindow)
    #[must_use]
    pub fn compute(gcd: GcdTimer, min_lock: f32) -> Self {
        if gcd.remaining <= 0.0 {
            Self::NoWindow
        } else if gcd.remaining <= gcd.total / 2.0 {
            Self::LateReady
        } else if gcd.remaining > min_lock {
            Self::EarlyOnly
        } else {
            Self::NoWindow
        }
    }

    /// Returns `true` if any off-GCD rule may be attempted.
    #[must_use]
    pub const fn allows_weave(self) -> bool {
        !matches!(self, Self::NoWindow)
    }

    #[must_use]
    pub const fn is_late(self) -> bool {
        matches!(self, Self::LateReady)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn windows_by_remaining_time() {
        assert_eq!(WeaveWindow::compute(GcdTimer::ready(2.5), 0.6), WeaveWindow::NoWindow);
        assert_eq!(
            WeaveWindow::compute(GcdTimer::new(2.4, 2.5), 0.6),
            WeaveWindow::EarlyOnly
        );
        assert_eq!(
            WeaveWindow::compute(GcdTimer::new(1.25, 2.5), 0.6),
            WeaveWindow::LateReady
        );
        assert_eq!(
            WeaveWindow::compute(GcdTimer::new(0.1, 2.5), 0.6),
            WeaveWindow::LateReady
        );
    }

    #[test]
    fn short_slot_without_room_has_no_window() {
        // Half of a 1.0 s slot is 0.5; 0.55 is past it but not above the lock.
        assert_eq!(
            WeaveWindow::compute(GcdTimer::new(0.55, 1.0), 0.6),
            WeaveWindow::NoWindow
        );
    }

    proptest! {
        #[test]
        fn late_never_past_half_slot(
            remaining in 0.0f32..5.0,
            total in 0.5f32..5.0,
            lock in 0.0f32..1.0,
        ) {
            let gcd = GcdTimer::new(remaining, total);
            if WeaveWindow::compute(gcd, lock).is_late() {
                prop_assert!(gcd.remaining > 0.0);
                prop_assert!(gcd.remaining <= gcd.total / 2.0);
            }
        }
    }
}
