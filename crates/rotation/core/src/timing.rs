//! Lookahead predicates over a [`StateProvider`].
//!
//! Every higher layer is built from these. They read the snapshot only; none
//! of them looks at phase, burst or opener state.
//!
//! Conservative defaults apply throughout: an ability that is missing or not
//! unlocked is never ready, and a missing status has already ended.

use crate::snapshot::{ActionId, StateProvider, StatusId, StatusScope};

/// Returns `true` if `id` can be used right now.
#[must_use]
pub fn is_usable<P: StateProvider + ?Sized>(provider: &P, id: ActionId) -> bool {
    provider.ability(id).is_some_and(|state| state.is_usable())
}

/// Returns `true` if `id` is unlocked, regardless of charges.
#[must_use]
pub fn is_unlocked<P: StateProvider + ?Sized>(provider: &P, id: ActionId) -> bool {
    provider.ability(id).is_some_and(|state| state.unlocked)
}

/// Returns `true` if `id` will have at least one use within `seconds`.
///
/// Charge-based: holds when a charge is available or `recharge_remaining <= seconds`.
#[must_use]
pub fn will_be_ready<P: StateProvider + ?Sized>(provider: &P, id: ActionId, seconds: f32) -> bool {
    provider
        .ability(id)
        .is_some_and(|state| state.will_have_charge(seconds))
}

/// Returns `true` if `id` will hold `count` charges within `seconds`.
#[must_use]
pub fn will_have_charges<P: StateProvider + ?Sized>(
    provider: &P,
    id: ActionId,
    count: u8,
    seconds: f32,
) -> bool {
    provider
        .ability(id)
        .is_some_and(|state| state.will_have_charges(count, seconds))
}

/// Returns `true` if `id` is at full charges or will be within `seconds`.
#[must_use]
pub fn will_cap<P: StateProvider + ?Sized>(provider: &P, id: ActionId, seconds: f32) -> bool {
    provider
        .ability(id)
        .is_some_and(|state| state.will_have_charges(state.max_charges, seconds))
}

/// Charges of `id` including recharge progress (`0.0` when unknown).
#[must_use]
pub fn fractional_charges<P: StateProvider + ?Sized>(provider: &P, id: ActionId) -> f32 {
    provider
        .ability(id)
        .map_or(0.0, |state| state.fractional_charges())
}

/// Seconds until `id` has a charge, or `None` if it never will.
#[must_use]
pub fn time_until_ready<P: StateProvider + ?Sized>(provider: &P, id: ActionId) -> Option<f32> {
    provider.ability(id)?.time_until_charges(1)
}

/// Returns `true` if the status is present in `scope`.
#[must_use]
pub fn has_status<P: StateProvider + ?Sized>(provider: &P, scope: StatusScope, id: StatusId) -> bool {
    provider.status(scope, id).is_some()
}

/// Returns `true` if any of `ids` is present in `scope`.
#[must_use]
pub fn has_any_status<P: StateProvider + ?Sized>(
    provider: &P,
    scope: StatusScope,
    ids: &[StatusId],
) -> bool {
    ids.iter().any(|id| has_status(provider, scope, *id))
}

/// Remaining seconds of a status (`0.0` when absent).
#[must_use]
pub fn status_remaining<P: StateProvider + ?Sized>(
    provider: &P,
    scope: StatusScope,
    id: StatusId,
) -> f32 {
    provider.status(scope, id).map_or(0.0, |timer| timer.remaining)
}

/// Stack count of a status (`0` when absent).
#[must_use]
pub fn status_stacks<P: StateProvider + ?Sized>(provider: &P, scope: StatusScope, id: StatusId) -> u8 {
    provider.status(scope, id).map_or(0, |timer| timer.stacks)
}

/// Returns `true` if the status will have ended `seconds` after the next
/// decision point.
///
/// Evaluates `remaining <= seconds + average_cast_time`. A missing status has
/// already ended.
#[must_use]
pub fn will_status_end<P: StateProvider + ?Sized>(
    provider: &P,
    scope: StatusScope,
    id: StatusId,
    seconds: f32,
) -> bool {
    match provider.status(scope, id) {
        Some(timer) => timer.remaining <= seconds + provider.average_cast_time(),
        None => true,
    }
}

/// [`will_status_end`] measured in main-action slots plus an offset.
#[must_use]
pub fn will_status_end_gcd<P: StateProvider + ?Sized>(
    provider: &P,
    scope: StatusScope,
    id: StatusId,
    slots: u8,
    offset: f32,
) -> bool {
    let seconds = f32::from(slots) * provider.gcd().total + offset;
    will_status_end(provider, scope, id, seconds)
}

/// Returns `true` if every status in `ids` will have ended (see [`will_status_end`]).
#[must_use]
pub fn will_all_end<P: StateProvider + ?Sized>(
    provider: &P,
    scope: StatusScope,
    ids: &[StatusId],
    seconds: f32,
) -> bool {
    ids.iter()
        .all(|id| will_status_end(provider, scope, *id, seconds))
}
