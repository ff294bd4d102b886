//! Four-layer decision pipeline.
//!
//! Each layer is an ordered [`FirstMatch`] chain. Per tick:
//!
//! 1. The main-action layer is evaluated first as a lookahead so off-GCD
//!    rules can see which main action comes next.
//! 2. If the weave window allows it, the off-GCD layers run in priority
//!    order (emergency, general utility, attack/buff); the first match wins.
//! 3. Otherwise, or if no off-GCD rule matched, the main action is chosen.
//!
//! No match in any layer is a valid outcome: nothing is issued this tick.

use priority_rules::{FirstMatch, Match};
use rotation_core::{ActionId, DecisionContext};

use crate::error::{Result, RuntimeError};

/// Rule chain type every layer uses.
pub type RuleChain = FirstMatch<DecisionContext, ActionId>;

/// Decision layers in priority order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, strum::Display, strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum Layer {
    /// Pre-combat countdown (not part of the per-tick pipeline).
    Countdown,
    Emergency,
    GeneralUtility,
    AttackBuff,
    MainAction,
}

impl Layer {
    /// Off-GCD layers in evaluation order.
    pub const OFF_GCD: [Layer; 3] = [Layer::Emergency, Layer::GeneralUtility, Layer::AttackBuff];
}

/// The action chosen for one tick and the rule that chose it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Decision {
    pub action: ActionId,
    pub layer: Layer,
    /// Static name of the matching rule.
    pub rule: &'static str,
}

impl Decision {
    fn from_match(layer: Layer, found: Match<ActionId>) -> Self {
        Self {
            action: found.action,
            layer,
            rule: found.rule,
        }
    }
}

/// Ordered rule layers for one rotation.
pub struct DecisionPipeline {
    emergency: RuleChain,
    utility: RuleChain,
    attack: RuleChain,
    main: RuleChain,
}

impl DecisionPipeline {
    /// Assembles a pipeline.
    ///
    /// Off-GCD layers may be empty; the main layer must hold at least one rule
    /// so a filler action always exists.
    pub fn new(
        emergency: RuleChain,
        utility: RuleChain,
        attack: RuleChain,
        main: RuleChain,
    ) -> Result<Self> {
        if main.is_empty() {
            return Err(RuntimeError::EmptyLayer {
                layer: Layer::MainAction,
            });
        }
        Ok(Self {
            emergency,
            utility,
            attack,
            main,
        })
    }

    /// Rule chain backing `layer` (`None` for [`Layer::Countdown`]).
    pub fn layer(&self, layer: Layer) -> Option<&RuleChain> {
        match layer {
            Layer::Countdown => None,
            Layer::Emergency => Some(&self.emergency),
            Layer::GeneralUtility => Some(&self.utility),
            Layer::AttackBuff => Some(&self.attack),
            Layer::MainAction => Some(&self.main),
        }
    }

    /// Evaluates every layer for one tick.
    pub fn decide(&self, ctx: &mut DecisionContext) -> Option<Decision> {
        let main = self.main.evaluate_match(ctx);
        ctx.set_next_main(main.map(|found| found.action));

        if ctx.weave().allows_weave() {
            for layer in Layer::OFF_GCD {
                let Some(chain) = self.layer(layer) else {
                    continue;
                };
                if let Some(found) = chain.evaluate_match(ctx) {
                    return Some(Decision::from_match(layer, found));
                }
                tracing::trace!(%layer, "no rule matched, falling through");
            }
        } else {
            tracing::trace!(weave = %ctx.weave(), "off-GCD layers skipped");
        }

        main.map(|found| Decision::from_match(Layer::MainAction, found))
    }
}

impl std::fmt::Debug for DecisionPipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecisionPipeline")
            .field("emergency", &self.emergency)
            .field("utility", &self.utility)
            .field("attack", &self.attack)
            .field("main", &self.main)
            .finish()
    }
}
