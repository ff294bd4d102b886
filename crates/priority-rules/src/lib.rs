//! Lightweight first-match rule chains for deterministic per-tick decisions.
//!
//! A decision layer is an ordered list of `(guard, action)` pairs. Evaluation
//! walks the list front to back and returns the action of the first rule whose
//! guards all pass. Rule order is plain data, so it can be inspected and tested
//! instead of being buried in nested conditionals.
//!
//! - **No mutation**: rules read an immutable context and return `Option<A>`
//! - **No hidden state**: the same context always yields the same match
//! - **Zero dependencies**: pure Rust with no external crates
//!
//! # Architecture
//!
//! - [`Guard`]: boolean predicate over a context (closures implement it)
//! - [`Rule`]: produces an action or `None` (closures implement it)
//! - [`Guarded`]: a rule made of AND-ed guards plus a fixed action
//! - [`FirstMatch`]: ordered, named chain returning the first match
//! - Guard combinators: [`Not`], [`All`], [`Any`]

pub mod builder;
pub mod chain;
pub mod guard;
pub mod outcome;
pub mod rule;

// Re-export core types for ergonomic API
pub use chain::{FirstMatch, Guarded};
pub use guard::{All, Any, Guard, Not};
pub use outcome::Match;
pub use rule::Rule;
