//! Burst alignment gate.
//!
//! Decides whether a high-value cooldown may fire this tick. The gate only
//! forbids; it never forces an action.

use crate::config::BurstConfig;
use crate::snapshot::{StateProvider, StatusId, StatusScope};

/// When burst cooldowns are allowed outside the opener.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumString,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum BurstPolicy {
    /// Self-managed: only the opener exemption applies.
    Never,
    /// Spend as soon as the cooldown would otherwise cap.
    PreventCap,
    /// Wait for a party-wide burst buff.
    #[default]
    WithOthers,
    /// Fixed windows at the start of every cycle of combat time.
    EveryTwoMinutes,
    /// Alignment disabled.
    Always,
}

/// Returns `true` if any of `burst_statuses` is active on the player or any
/// party member.
#[must_use]
pub fn burst_signal<P: StateProvider + ?Sized>(provider: &P, burst_statuses: &[StatusId]) -> bool {
    burst_statuses
        .iter()
        .any(|id| provider.status(StatusScope::AnyPartyMember, *id).is_some())
}

/// Returns `true` near the start of an engagement.
#[must_use]
pub fn opener_window(in_combat: bool, combat_time: f32, threshold: f32) -> bool {
    in_combat && combat_time < threshold
}

/// Gate evaluation for one tick.
///
/// Order: alignment disabled, then opener exemption, then policy.
#[must_use]
pub fn permits(config: &BurstConfig, signal: bool, in_opener: bool, combat_time: f32) -> bool {
    if config.policy == BurstPolicy::Always {
        return true;
    }
    if in_opener && config.force_in_opener {
        return true;
    }
    match config.policy {
        BurstPolicy::Always | BurstPolicy::PreventCap => true,
        BurstPolicy::WithOthers => signal,
        BurstPolicy::EveryTwoMinutes => {
            config.cycle > 0.0 && combat_time.rem_euclid(config.cycle) < config.window
        }
        BurstPolicy::Never => false,
    }
}
