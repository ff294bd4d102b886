//! Resource overflow guard.
//!
//! Answers one question per resource: must it be spent now so production is
//! not discarded at the cap?

use crate::config::OverflowConfig;
use crate::phase::ProductionRate;
use crate::snapshot::{AbilityState, Gauge};

/// Returns `true` if a charge-stacking ability must be spent now.
///
/// Holds when any of these is true:
/// - fractional charges reach the dump threshold
/// - the ability will be full within the lookahead for `rate`
/// - `rate` is [`ProductionRate::High`] and charges reach the secondary threshold
///
/// Locked abilities never need dumping.
#[must_use]
pub fn should_dump_charges(
    state: &AbilityState,
    rate: ProductionRate,
    config: &OverflowConfig,
) -> bool {
    if !state.unlocked {
        return false;
    }
    let charges = state.fractional_charges();
    if charges >= config.dump_threshold {
        return true;
    }
    if state.will_have_charges(state.max_charges, config.lookahead(rate)) {
        return true;
    }
    rate == ProductionRate::High && charges >= config.secondary_threshold
}

/// Returns `true` if a gauge with a binary consumer must be spent now.
///
/// - at or above the spend threshold (clamped to the gauge's capacity)
/// - at or above the early threshold while a burst window is active
/// - within `high_rate_headroom` of the cap during high production
#[must_use]
pub fn should_force_spend(
    gauge: Gauge,
    rate: ProductionRate,
    burst_active: bool,
    config: &OverflowConfig,
) -> bool {
    let spend_at = config.gauge_spend_threshold.min(gauge.max());
    if gauge.max() == 0 {
        return false;
    }
    if gauge.value() >= spend_at {
        return true;
    }
    if burst_active && gauge.value() >= config.gauge_early_threshold.min(spend_at) {
        return true;
    }
    rate == ProductionRate::High
        && gauge.value().saturating_add(config.high_rate_headroom) >= gauge.max()
}
