//! Rule composition.
//!
//! [`Guarded`] pairs a list of guards with a fixed action (AND logic), and
//! [`FirstMatch`] tries named rules in order until one applies (OR logic with
//! priority). Together they express a priority layer as an explicit list.

use crate::{Guard, Match, Rule};

/// A `(guard, action)` pair.
///
/// # Semantics
///
/// Guards are checked from left to right:
/// - If a guard fails, evaluation **stops immediately** and returns `None`
/// - If every guard passes, the rule returns a clone of its action
///
/// This is analogous to a short-circuited logical AND (&&) operation followed
/// by an action.
pub struct Guarded<C, A> {
    guards: Vec<Box<dyn Guard<C>>>,
    action: A,
}

impl<C, A> Guarded<C, A> {
    /// Creates a rule that proposes `action` whenever `guard` holds.
    pub fn new(guard: impl Guard<C> + 'static, action: A) -> Self {
        Self {
            guards: vec![Box::new(guard)],
            action,
        }
    }

    /// Creates a rule that proposes `action` unconditionally.
    pub fn always(action: A) -> Self {
        Self {
            guards: Vec::new(),
            action,
        }
    }

    /// Adds another guard that must also hold (builder pattern).
    #[must_use]
    pub fn and(mut self, guard: impl Guard<C> + 'static) -> Self {
        self.guards.push(Box::new(guard));
        self
    }

    /// The action this rule proposes.
    pub fn action(&self) -> &A {
        &self.action
    }
}

impl<C, A> Rule<C, A> for Guarded<C, A>
where
    A: Clone + Send + Sync,
{
    fn evaluate(&self, ctx: &C) -> Option<A> {
        self.guards
            .iter()
            .all(|guard| guard.check(ctx))
            .then(|| self.action.clone())
    }
}

struct Entry<C, A> {
    name: &'static str,
    rule: Box<dyn Rule<C, A>>,
}

/// Ordered chain of named rules evaluated by first match.
///
/// # Semantics
///
/// A `FirstMatch` evaluates its rules from front to back:
/// - If a rule returns `Some`, the chain **stops immediately** and returns it
/// - If a rule returns `None`, the chain **continues** to the next rule
/// - If every rule returns `None`, the chain returns `None`
///
/// An empty chain is valid and never matches.
///
/// # Determinism
///
/// Rules live in a `Vec` in registration order, so the winner for a given
/// context never depends on hashing or iteration order of other collections.
pub struct FirstMatch<C, A> {
    entries: Vec<Entry<C, A>>,
}

impl<C, A> FirstMatch<C, A> {
    /// Creates an empty chain.
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends a named rule at the lowest priority (builder pattern).
    #[must_use]
    pub fn rule(mut self, name: &'static str, rule: impl Rule<C, A> + 'static) -> Self {
        self.push(name, rule);
        self
    }

    /// Appends a named rule at the lowest priority.
    pub fn push(&mut self, name: &'static str, rule: impl Rule<C, A> + 'static) {
        self.entries.push(Entry {
            name,
            rule: Box::new(rule),
        });
    }

    /// Appends every rule of `other` after the rules of `self`.
    #[must_use]
    pub fn then(mut self, other: FirstMatch<C, A>) -> Self {
        self.entries.extend(other.entries);
        self
    }

    /// Rule names in priority order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|entry| entry.name)
    }

    /// Number of rules in the chain.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the chain has no rules.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Evaluates the chain and reports which rule matched.
    pub fn evaluate_match(&self, ctx: &C) -> Option<Match<A>> {
        self.entries.iter().enumerate().find_map(|(index, entry)| {
            entry.rule.evaluate(ctx).map(|action| Match {
                index,
                rule: entry.name,
                action,
            })
        })
    }
}

impl<C, A> Default for FirstMatch<C, A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C, A> Rule<C, A> for FirstMatch<C, A> {
    fn evaluate(&self, ctx: &C) -> Option<A> {
        self.evaluate_match(ctx).map(|found| found.action)
    }
}

impl<C, A> std::fmt::Debug for FirstMatch<C, A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.names()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestContext {
        value: i32,
    }

    fn above(limit: i32) -> impl Fn(&TestContext) -> bool + Send + Sync {
        move |ctx: &TestContext| ctx.value > limit
    }

    #[test]
    fn guarded_requires_all_guards() {
        let rule = Guarded::new(above(0), "go").and(|ctx: &TestContext| ctx.value % 2 == 0);

        assert_eq!(rule.evaluate(&TestContext { value: 4 }), Some("go"));
        assert_eq!(rule.evaluate(&TestContext { value: 3 }), None);
        assert_eq!(rule.evaluate(&TestContext { value: -2 }), None);
    }

    #[test]
    fn guarded_always_matches() {
        let rule: Guarded<TestContext, &str> = Guarded::always("filler");
        assert_eq!(rule.evaluate(&TestContext { value: 0 }), Some("filler"));
    }

    #[test]
    fn first_match_returns_highest_priority() {
        let chain = FirstMatch::new()
            .rule("never", Guarded::new(above(100), 1))
            .rule("positive", Guarded::new(above(0), 2))
            .rule("fallback", Guarded::always(3));

        let found = chain.evaluate_match(&TestContext { value: 5 }).unwrap();
        assert_eq!(found.index, 1);
        assert_eq!(found.rule, "positive");
        assert_eq!(found.action, 2);

        let found = chain.evaluate_match(&TestContext { value: -5 }).unwrap();
        assert_eq!(found.rule, "fallback");
    }

    #[test]
    fn first_match_empty_never_matches() {
        let chain: FirstMatch<TestContext, u8> = FirstMatch::new();
        assert!(chain.is_empty());
        assert_eq!(chain.evaluate(&TestContext { value: 1 }), None);
    }

    #[test]
    fn first_match_mixes_closure_rules() {
        let chain = FirstMatch::new()
            .rule("dynamic", |ctx: &TestContext| {
                (ctx.value > 10).then_some(ctx.value * 2)
            })
            .rule("fallback", Guarded::always(0));

        assert_eq!(chain.evaluate(&TestContext { value: 11 }), Some(22));
        assert_eq!(chain.evaluate(&TestContext { value: 1 }), Some(0));
    }

    #[test]
    fn then_appends_lower_priority_rules() {
        let head = FirstMatch::new().rule("a", Guarded::new(above(0), 'a'));
        let tail = FirstMatch::new().rule("b", Guarded::always('b'));
        let chain = head.then(tail);

        assert_eq!(chain.names().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(chain.evaluate(&TestContext { value: 1 }), Some('a'));
        assert_eq!(chain.evaluate(&TestContext { value: 0 }), Some('b'));
    }
}
