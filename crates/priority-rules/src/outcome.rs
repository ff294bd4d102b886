//! Result of evaluating a named rule chain.

/// The first rule in a [`FirstMatch`](crate::FirstMatch) chain that applied.
///
/// Carries the rule's position and static name alongside the proposed action
/// so callers can attribute a decision to the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Match<A> {
    /// Zero-based position of the rule within its chain.
    pub index: usize,
    /// Static name the rule was registered under.
    pub rule: &'static str,
    /// Action proposed by the rule.
    pub action: A,
}

impl<A> Match<A> {
    /// Maps the proposed action, keeping the attribution.
    #[inline]
    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Match<B> {
        Match {
            index: self.index,
            rule: self.rule,
            action: f(self.action),
        }
    }
}
