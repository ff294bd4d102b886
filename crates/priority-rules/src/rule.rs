//! Core rule trait.
//!
//! This module defines the [`Rule`] trait, the unit every decision layer is
//! built from. The trait is generic over a context type `C` (the per-tick
//! blackboard) and an action type `A` (what a matching rule proposes).

/// A rule that may propose an action for the given context.
pub trait Rule<C, A>: Send + Sync {
    /// Evaluate this rule against the given context.
    ///
    /// # Returns
    ///
    /// - `Some(action)` if the rule's conditions hold
    /// - `None` if the rule does not apply this tick
    fn evaluate(&self, ctx: &C) -> Option<A>;
}

/// Closures of the form `Fn(&C) -> Option<A>` are rules.
///
/// This covers rules whose action depends on the context, e.g. picking the
/// area variant of an action when several targets are in range.
impl<C, A, F> Rule<C, A> for F
where
    F: Fn(&C) -> Option<A> + Send + Sync,
{
    #[inline]
    fn evaluate(&self, ctx: &C) -> Option<A> {
        self(ctx)
    }
}
