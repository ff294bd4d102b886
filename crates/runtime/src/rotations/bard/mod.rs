//! Canonical Bard rule book.
//!
//! The three song phases cycle Wanderer's Minuet → Mage's Ballad → Army's
//! Paeon. The burst chain (Battle Voice → Radiant Finale → Raging Strikes)
//! sits behind the alignment gate; everything else is phase- and
//! resource-driven.

mod attack;
mod conditions;
mod emergency;
mod main_action;
mod utility;

use rotation_content::bard::{BardAction, BardKit};
use rotation_core::{ActionId, OpenerScript, PhaseActions, StatusId, Tracked};

use crate::error::Result;
use crate::pipeline::DecisionPipeline;
use crate::rotation::Rotation;

/// Bard rotation backed by a [`BardKit`].
#[derive(Clone, Debug, Default)]
pub struct Bard {
    kit: BardKit,
}

impl Bard {
    #[must_use]
    pub fn new(kit: BardKit) -> Self {
        Self { kit }
    }

    #[must_use]
    pub fn kit(&self) -> &BardKit {
        &self.kit
    }
}

impl Rotation for Bard {
    fn name(&self) -> &'static str {
        "bard"
    }

    fn phase_actions(&self) -> &PhaseActions {
        &self.kit.phase_actions
    }

    fn party_burst(&self) -> &[StatusId] {
        &self.kit.party_burst
    }

    fn opener(&self) -> &OpenerScript {
        &self.kit.opener
    }

    fn potion(&self) -> Option<ActionId> {
        Some(BardAction::Tincture.id())
    }

    fn tracked(&self) -> Tracked {
        self.kit.tracked()
    }

    fn pipeline(&self) -> Result<DecisionPipeline> {
        DecisionPipeline::new(
            emergency::layer(BardAction::Tincture.id()),
            utility::layer(self.kit.phase_actions),
            attack::layer(),
            main_action::layer(),
        )
    }
}
