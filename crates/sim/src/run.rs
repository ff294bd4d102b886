//! Tick loop driving a decision provider against an [`Encounter`].

use std::collections::BTreeMap;

use rotation_content::bard::BardAction;
use rotation_core::Snapshot;
use rotation_runtime::{Decision, DecisionProvider, Layer};
use serde::Serialize;
use tracing::{debug, info, trace, warn};

use crate::config::SimConfig;
use crate::encounter::{Encounter, Waste};

/// Pre-pull countdown length.
pub const COUNTDOWN: f32 = 5.0;

/// One issued action, as written to the JSON decision log.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct DecisionRecord {
    /// Combat time; negative during the countdown.
    pub time: f32,
    pub action: BardAction,
    pub layer: Layer,
    pub rule: &'static str,
    /// Song active when the action was issued.
    pub song: Option<BardAction>,
}

/// Summary of one simulated pull.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Report {
    /// Ticks on which the provider proposed an action.
    pub decisions: u32,
    /// Proposals the player could not issue yet (slot or animation lock busy).
    pub deferred: u32,
    /// Proposals naming an action outside the job catalog.
    pub unknown: u32,
    /// Issued count per action.
    pub issued: BTreeMap<BardAction, u32>,
    pub waste: Waste,
    /// Fraction of combat time with both debuffs on the target.
    pub dot_uptime: f32,
}

impl Report {
    /// Total issued actions.
    pub fn total(&self) -> u32 {
        self.issued.values().sum()
    }

    pub fn count(&self, action: BardAction) -> u32 {
        self.issued.get(&action).copied().unwrap_or(0)
    }
}

/// Runs the countdown and `config.duration` seconds of combat.
///
/// `sink` receives every issued action in order.
pub fn run<P, F>(provider: &mut P, config: &SimConfig, mut sink: F) -> Report
where
    P: DecisionProvider + ?Sized,
    F: FnMut(&DecisionRecord),
{
    let mut encounter = Encounter::new(config);
    let mut report = Report::default();

    let mut remaining = COUNTDOWN;
    while remaining > 0.0 {
        let snapshot = encounter.snapshot();
        if let Some(decision) = provider.countdown(remaining, &snapshot) {
            apply(&mut encounter, &mut report, decision, -remaining, &mut sink);
        }
        encounter.advance(config.tick);
        remaining -= config.tick;
    }

    info!(duration = config.duration, "pull started");
    encounter.start_combat();
    let mut dotted = 0.0;
    while encounter.time() < config.duration {
        let snapshot = encounter.snapshot();
        if both_dots(&snapshot) {
            dotted += config.tick;
        }
        if let Some(decision) = provider.next_action(snapshot) {
            let time = encounter.time();
            apply(&mut encounter, &mut report, decision, time, &mut sink);
        }
        encounter.advance(config.tick);
    }
    provider.next_action(Snapshot::idle());

    report.waste = encounter.waste().clone();
    if config.duration > 0.0 {
        report.dot_uptime = (dotted / config.duration).min(1.0);
    }
    info!(
        issued = report.total(),
        deferred = report.deferred,
        dot_uptime = report.dot_uptime,
        "pull finished"
    );
    report
}

fn apply<F>(
    encounter: &mut Encounter,
    report: &mut Report,
    decision: Decision,
    time: f32,
    sink: &mut F,
) where
    F: FnMut(&DecisionRecord),
{
    report.decisions += 1;
    let Some(action) = BardAction::from_id(decision.action) else {
        warn!(action = %decision.action, rule = decision.rule, "unknown action proposed");
        report.unknown += 1;
        return;
    };
    if !encounter.accepts(action) {
        trace!(%action, "player busy, deferring");
        report.deferred += 1;
        return;
    }

    let record = DecisionRecord {
        time,
        action,
        layer: decision.layer,
        rule: decision.rule,
        song: encounter.song(),
    };
    encounter.issue(action);
    *report.issued.entry(action).or_default() += 1;
    debug!(time, %action, layer = %decision.layer, rule = decision.rule, "issued");
    sink(&record);
}

fn both_dots(snapshot: &Snapshot) -> bool {
    use rotation_content::bard::statuses::target;

    let statuses = match snapshot.target_state() {
        Some(state) => &state.statuses,
        None => return false,
    };
    statuses.contains_any(&target::WIND) && statuses.contains_any(&target::POISON)
}
