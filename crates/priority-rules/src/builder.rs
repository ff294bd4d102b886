//! Builder utilities for ergonomic rule construction.
//!
//! Instead of writing `Guarded::new(...)` or `Not::new(Box::new(...))`, rule
//! tables can use the shorter functions in this module:
//!
//! ```
//! use priority_rules::builder::{chain, not, when};
//!
//! let layer = chain()
//!     .rule("big", when(|v: &i32| *v > 10, "big"))
//!     .rule("small", when(not(|v: &i32| *v > 10), "small"));
//!
//! assert_eq!(layer.evaluate_match(&3).unwrap().rule, "small");
//! ```

use crate::{All, Any, FirstMatch, Guard, Guarded, Not};

/// Creates an empty first-match chain.
///
/// Shorthand for `FirstMatch::new()`.
#[inline]
pub fn chain<C, A>() -> FirstMatch<C, A> {
    FirstMatch::new()
}

/// Creates a `(guard, action)` rule.
///
/// Shorthand for `Guarded::new(guard, action)`.
#[inline]
pub fn when<C, A>(guard: impl Guard<C> + 'static, action: A) -> Guarded<C, A> {
    Guarded::new(guard, action)
}

/// Creates a rule that always proposes `action`.
///
/// Shorthand for `Guarded::always(action)`.
#[inline]
pub fn always<C, A>(action: A) -> Guarded<C, A> {
    Guarded::always(action)
}

/// Creates a negated guard.
///
/// Shorthand for `Not::new(Box::new(guard))`.
#[inline]
pub fn not<C: 'static>(guard: impl Guard<C> + 'static) -> Not<C> {
    Not::new(Box::new(guard))
}

/// Creates a conjunction of two guards.
#[inline]
pub fn both<C: 'static>(a: impl Guard<C> + 'static, b: impl Guard<C> + 'static) -> All<C> {
    All::new(vec![Box::new(a), Box::new(b)])
}

/// Creates a disjunction of two guards.
#[inline]
pub fn either<C: 'static>(a: impl Guard<C> + 'static, b: impl Guard<C> + 'static) -> Any<C> {
    Any::new(vec![Box::new(a), Box::new(b)])
}
