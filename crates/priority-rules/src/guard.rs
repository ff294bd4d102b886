//! Guard predicates and their combinators.
//!
//! Guards are pure boolean checks over a context. Combinators wrap guards to
//! express negation ([`Not`]), conjunction ([`All`]) and disjunction ([`Any`]).

/// A boolean predicate over a context.
pub trait Guard<C>: Send + Sync {
    /// Returns `true` if the guarded condition holds for `ctx`.
    fn check(&self, ctx: &C) -> bool;
}

impl<C, F> Guard<C> for F
where
    F: Fn(&C) -> bool + Send + Sync,
{
    #[inline]
    fn check(&self, ctx: &C) -> bool {
        self(ctx)
    }
}

/// Inverts the result of its inner guard.
///
/// This is analogous to a logical NOT (!) operation.
pub struct Not<C> {
    inner: Box<dyn Guard<C>>,
}

impl<C> Not<C> {
    /// Creates a new negation of the given guard.
    pub fn new(inner: Box<dyn Guard<C>>) -> Self {
        Self { inner }
    }
}

impl<C> Guard<C> for Not<C> {
    fn check(&self, ctx: &C) -> bool {
        !self.inner.check(ctx)
    }
}

/// Passes only when every inner guard passes.
///
/// Guards are checked left to right and evaluation stops at the first
/// failure (short-circuited AND). An empty `All` passes.
pub struct All<C> {
    guards: Vec<Box<dyn Guard<C>>>,
}

impl<C> All<C> {
    /// Creates a conjunction of the given guards.
    pub fn new(guards: Vec<Box<dyn Guard<C>>>) -> Self {
        Self { guards }
    }
}

impl<C> Guard<C> for All<C> {
    fn check(&self, ctx: &C) -> bool {
        self.guards.iter().all(|guard| guard.check(ctx))
    }
}

/// Passes when at least one inner guard passes.
///
/// Short-circuited OR. An empty `Any` fails.
pub struct Any<C> {
    guards: Vec<Box<dyn Guard<C>>>,
}

impl<C> Any<C> {
    /// Creates a disjunction of the given guards.
    pub fn new(guards: Vec<Box<dyn Guard<C>>>) -> Self {
        Self { guards }
    }
}

impl<C> Guard<C> for Any<C> {
    fn check(&self, ctx: &C) -> bool {
        self.guards.iter().any(|guard| guard.check(ctx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn positive() -> Box<dyn Guard<i32>> {
        Box::new(|value: &i32| *value > 0)
    }

    fn even() -> Box<dyn Guard<i32>> {
        Box::new(|value: &i32| value % 2 == 0)
    }

    #[test]
    fn not_inverts() {
        let guard = Not::new(positive());

        assert!(!guard.check(&10));
        assert!(guard.check(&-10));
    }

    #[test]
    fn all_requires_every_guard() {
        let guard = All::new(vec![positive(), even()]);

        assert!(guard.check(&4));
        assert!(!guard.check(&3));
        assert!(!guard.check(&-4));
    }

    #[test]
    fn all_short_circuits() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let counted: Box<dyn Guard<i32>> = Box::new(move |_: &i32| {
            counter.fetch_add(1, Ordering::SeqCst);
            true
        });

        let guard = All::new(vec![positive(), counted]);
        assert!(!guard.check(&-1));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn any_requires_one_guard() {
        let guard = Any::new(vec![positive(), even()]);

        assert!(guard.check(&3));
        assert!(guard.check(&-2));
        assert!(!guard.check(&-3));
    }

    #[test]
    fn empty_combinators() {
        assert!(All::<i32>::new(Vec::new()).check(&0));
        assert!(!Any::<i32>::new(Vec::new()).check(&0));
    }
}
