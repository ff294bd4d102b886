//! Engine configuration and tunable parameters.
//!
//! Every numeric threshold the decision layers use lives here so variants can
//! be expressed as data. The whole tree is read once per tick and never
//! mutated by the engine.
//!
//! With the `serde` feature every struct accepts partial input: missing
//! fields take their defaults.

use crate::burst::BurstPolicy;
use crate::error::{Result, check_order, check_range};
use crate::phase::{PerPhase, Phase, PhaseDurations, PhaseRates, ProductionRate};

/// Named per-phase target durations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TimingProfile {
    /// 43 / 43 / 34 seconds.
    #[default]
    Standard,
    /// 45 / 45 / 30 seconds.
    Extended,
    /// User-supplied durations.
    Custom { p1: f32, p2: f32, p3: f32 },
}

impl TimingProfile {
    /// Resolves the profile to concrete durations.
    #[must_use]
    pub const fn durations(&self) -> PhaseDurations {
        match *self {
            Self::Standard => PerPhase {
                p1: 43.0,
                p2: 43.0,
                p3: 34.0,
            },
            Self::Extended => PerPhase {
                p1: 45.0,
                p2: 45.0,
                p3: 30.0,
            },
            Self::Custom { p1, p2, p3 } => PerPhase { p1, p2, p3 },
        }
    }
}

/// Phase cycle settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PhaseConfig {
    /// Phase entered first when combat starts.
    pub starting: Phase,
    pub profile: TimingProfile,
    /// Seconds a transition is brought forward to absorb tick granularity.
    pub drift_margin: f32,
    /// A phase lapses on its own after this many seconds.
    pub max_duration: f32,
    /// Seconds before lapsing at which a different next phase may be used
    /// when the regular one is still cooling down.
    pub fallback_window: f32,
    /// Seconds before lapsing at which phase-bound procs are spent.
    pub proc_spend_window: f32,
    pub rates: PhaseRates,
}

impl Default for PhaseConfig {
    fn default() -> Self {
        Self {
            starting: Phase::P1,
            profile: TimingProfile::Standard,
            drift_margin: Self::DEFAULT_DRIFT_MARGIN,
            max_duration: Self::DEFAULT_MAX_DURATION,
            fallback_window: 2.0,
            proc_spend_window: 3.0,
            rates: PhaseRates::default(),
        }
    }
}

impl PhaseConfig {
    pub const DEFAULT_DRIFT_MARGIN: f32 = 2.0;
    pub const DEFAULT_MAX_DURATION: f32 = 45.0;
    pub const MAX_DRIFT_MARGIN: f32 = 5.0;

    /// Production class of `phase` ([`ProductionRate::Low`] for `None`).
    #[must_use]
    pub fn rate(&self, phase: Phase) -> ProductionRate {
        self.rates.get(phase).unwrap_or_default()
    }
}

/// Lookahead windows, in seconds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TimingConfig {
    /// Extra lookahead for re-applying a debuff before it falls off.
    pub refresh_lookahead: f32,
    /// Extra lookahead for re-applying a debuff while own buffs are about to
    /// end, so the refreshed debuff keeps their bonus.
    pub snapshot_lookahead: f32,
    /// Slack allowed between linked burst cooldowns coming off cooldown.
    pub buff_alignment: f32,
    /// Combat time below which the opener exemption applies.
    pub opener_window: f32,
    /// Countdown remaining at which the pre-pull potion is used.
    pub potion_countdown_lead: f32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            refresh_lookahead: 0.5,
            snapshot_lookahead: 1.0,
            buff_alignment: 1.0,
            opener_window: 20.0,
            potion_countdown_lead: 0.7,
        }
    }
}

/// Overflow thresholds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OverflowConfig {
    /// Fractional charges at which spending is forced.
    pub dump_threshold: f32,
    /// Fractional charges at which spending is forced during high production.
    pub secondary_threshold: f32,
    /// Seconds ahead a cap is anticipated, per production class.
    pub low_lookahead: f32,
    pub steady_lookahead: f32,
    pub high_lookahead: f32,
    /// Gauge value at which the spender is forced.
    pub gauge_spend_threshold: u16,
    /// Gauge value at which the spender is allowed inside a burst window.
    pub gauge_early_threshold: u16,
    /// Distance from the gauge cap treated as full during high production.
    pub high_rate_headroom: u16,
}

impl Default for OverflowConfig {
    fn default() -> Self {
        Self {
            dump_threshold: 2.8,
            secondary_threshold: 1.0,
            low_lookahead: 3.0,
            steady_lookahead: 3.0,
            high_lookahead: 7.5,
            gauge_spend_threshold: 100,
            gauge_early_threshold: 80,
            high_rate_headroom: 10,
        }
    }
}

impl OverflowConfig {
    /// Cap lookahead for a production class.
    #[must_use]
    pub const fn lookahead(&self, rate: ProductionRate) -> f32 {
        match rate {
            ProductionRate::Low => self.low_lookahead,
            ProductionRate::Steady => self.steady_lookahead,
            ProductionRate::High => self.high_lookahead,
        }
    }
}

/// Burst alignment settings.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BurstConfig {
    pub policy: BurstPolicy,
    /// Exempt the opener window from alignment.
    pub force_in_opener: bool,
    /// Only fire burst cooldowns in the late half of a main-action slot.
    pub late_weave_only: bool,
    /// Cycle length for [`BurstPolicy::EveryTwoMinutes`].
    pub cycle: f32,
    /// Open part of each cycle.
    pub window: f32,
}

impl Default for BurstConfig {
    fn default() -> Self {
        Self {
            policy: BurstPolicy::WithOthers,
            force_in_opener: true,
            late_weave_only: false,
            cycle: 120.0,
            window: 20.0,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WeaveConfig {
    /// Reaction/animation lock an off-GCD ability needs.
    pub min_lock: f32,
}

impl Default for WeaveConfig {
    fn default() -> Self {
        Self { min_lock: 0.6 }
    }
}

/// Per-rule switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Toggles {
    /// Apply damage-over-time debuffs to boss targets only.
    pub dot_boss_only: bool,
    pub potion: bool,
    /// Allow the potion during the opener window without a party burst.
    pub potion_in_opener: bool,
    /// Answer dispel requests from other party members.
    pub dispel_party: bool,
    /// Hold area mitigation while own burst buffs are running.
    pub suppress_mitigation_in_burst: bool,
    /// Hostiles in range needed before area actions are preferred.
    pub aoe_threshold: u8,
}

impl Default for Toggles {
    fn default() -> Self {
        Self {
            dot_boss_only: false,
            potion: false,
            potion_in_opener: true,
            dispel_party: true,
            suppress_mitigation_in_burst: true,
            aoe_threshold: 3,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct OpenerConfig {
    pub enabled: bool,
    /// Combat time after which an unfinished script is abandoned.
    pub deadline: f32,
}

impl Default for OpenerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            deadline: 20.0,
        }
    }
}

/// Complete engine configuration.
///
/// # Example
///
/// ```
/// use rotation_core::config::{EngineConfig, TimingProfile};
///
/// let mut config = EngineConfig::default();
/// config.phases.profile = TimingProfile::Custom { p1: 42.0, p2: 42.0, p3: 36.0 };
/// assert!(config.validate().is_ok());
///
/// config.phases.profile = TimingProfile::Custom { p1: 50.0, p2: 42.0, p3: 36.0 };
/// assert!(config.validate().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    pub phases: PhaseConfig,
    pub timing: TimingConfig,
    pub overflow: OverflowConfig,
    pub burst: BurstConfig,
    pub weave: WeaveConfig,
    pub toggles: Toggles,
    pub opener: OpenerConfig,
}

impl EngineConfig {
    /// Rejects values the decision layers cannot work with.
    pub fn validate(&self) -> Result<()> {
        let phases = &self.phases;
        check_range("phases.max_duration", phases.max_duration, 1.0, 120.0)?;
        let durations = phases.profile.durations();
        check_range("phases.profile.p1", durations.p1, 0.0, phases.max_duration)?;
        check_range("phases.profile.p2", durations.p2, 0.0, phases.max_duration)?;
        check_range("phases.profile.p3", durations.p3, 0.0, phases.max_duration)?;
        check_range(
            "phases.drift_margin",
            phases.drift_margin,
            0.0,
            PhaseConfig::MAX_DRIFT_MARGIN,
        )?;
        check_range(
            "phases.fallback_window",
            phases.fallback_window,
            0.0,
            phases.max_duration,
        )?;
        check_range(
            "phases.proc_spend_window",
            phases.proc_spend_window,
            0.0,
            phases.max_duration,
        )?;

        let timing = &self.timing;
        check_range("timing.refresh_lookahead", timing.refresh_lookahead, 0.0, 30.0)?;
        check_range("timing.snapshot_lookahead", timing.snapshot_lookahead, 0.0, 30.0)?;
        check_range("timing.buff_alignment", timing.buff_alignment, 1.0, 5.0)?;
        check_range("timing.opener_window", timing.opener_window, 0.0, 120.0)?;
        check_range(
            "timing.potion_countdown_lead",
            timing.potion_countdown_lead,
            0.0,
            5.0,
        )?;

        let overflow = &self.overflow;
        check_range("overflow.dump_threshold", overflow.dump_threshold, 0.0, 10.0)?;
        check_order(
            ("overflow.secondary_threshold", overflow.secondary_threshold),
            ("overflow.dump_threshold", overflow.dump_threshold),
        )?;
        check_range("overflow.low_lookahead", overflow.low_lookahead, 0.0, 30.0)?;
        check_range("overflow.steady_lookahead", overflow.steady_lookahead, 0.0, 30.0)?;
        check_range("overflow.high_lookahead", overflow.high_lookahead, 0.0, 30.0)?;
        check_range(
            "overflow.gauge_spend_threshold",
            f32::from(overflow.gauge_spend_threshold),
            80.0,
            100.0,
        )?;
        check_order(
            (
                "overflow.gauge_early_threshold",
                f32::from(overflow.gauge_early_threshold),
            ),
            (
                "overflow.gauge_spend_threshold",
                f32::from(overflow.gauge_spend_threshold),
            ),
        )?;

        let burst = &self.burst;
        check_range("burst.cycle", burst.cycle, 1.0, 600.0)?;
        check_range("burst.window", burst.window, 0.0, burst.cycle)?;

        check_range("weave.min_lock", self.weave.min_lock, 0.0, 2.5)?;
        check_range("opener.deadline", self.opener.deadline, 0.0, 120.0)?;
        Ok(())
    }

    /// Target durations under the active profile.
    #[must_use]
    pub fn durations(&self) -> PhaseDurations {
        self.phases.profile.durations()
    }
}
