//! Status effect timers.

use std::collections::BTreeMap;

use super::ids::StatusId;

/// A status effect currently applied to some actor.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusTimer {
    /// Seconds until the status falls off.
    pub remaining: f32,
    /// Stack count, `1` for non-stacking effects.
    pub stacks: u8,
}

impl StatusTimer {
    /// A single-stack status with `remaining` seconds left.
    #[must_use]
    pub fn new(remaining: f32) -> Self {
        Self {
            remaining: remaining.max(0.0),
            stacks: 1,
        }
    }

    /// Sets the stack count (builder pattern).
    #[must_use]
    pub fn with_stacks(mut self, stacks: u8) -> Self {
        self.stacks = stacks;
        self
    }
}

/// Statuses on one actor, keyed by id.
///
/// Backed by a `BTreeMap` so iteration is ordered by id.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StatusSet {
    entries: BTreeMap<StatusId, StatusTimer>,
}

impl StatusSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies (or refreshes) a status.
    pub fn insert(&mut self, id: StatusId, timer: StatusTimer) {
        self.entries.insert(id, timer);
    }

    /// Removes a status, returning its timer if it was present.
    pub fn remove(&mut self, id: StatusId) -> Option<StatusTimer> {
        self.entries.remove(&id)
    }

    /// Timer of the given status, if present.
    #[must_use]
    pub fn get(&self, id: StatusId) -> Option<StatusTimer> {
        self.entries.get(&id).copied()
    }

    /// Returns `true` if the status is present.
    #[must_use]
    pub fn contains(&self, id: StatusId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Returns `true` if any of the given statuses is present.
    #[must_use]
    pub fn contains_any(&self, ids: &[StatusId]) -> bool {
        ids.iter().any(|id| self.contains(*id))
    }

    /// Iterates statuses in id order.
    pub fn iter(&self) -> impl Iterator<Item = (StatusId, StatusTimer)> + '_ {
        self.entries.iter().map(|(id, timer)| (*id, *timer))
    }

    /// Advances every timer by `dt` seconds and drops expired statuses.
    pub fn tick(&mut self, dt: f32) {
        self.entries.retain(|_, timer| {
            timer.remaining -= dt;
            timer.remaining > 0.0
        });
    }

    /// Number of active statuses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no status is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(StatusId, StatusTimer)> for StatusSet {
    fn from_iter<T: IntoIterator<Item = (StatusId, StatusTimer)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
