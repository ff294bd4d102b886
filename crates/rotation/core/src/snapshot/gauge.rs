//! Bounded scalar resources.

/// A bounded scalar resource such as a 0–100 meter or a 0–3 stack counter.
///
/// # Invariants
///
/// `value <= max` at all times; production at the cap is discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "RawGauge"))]
pub struct Gauge {
    value: u16,
    max: u16,
}

/// Wire form of [`Gauge`]; clamped through [`Gauge::new`] on the way in.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawGauge {
    value: u16,
    max: u16,
}

#[cfg(feature = "serde")]
impl From<RawGauge> for Gauge {
    fn from(raw: RawGauge) -> Self {
        Self::new(raw.value, raw.max)
    }
}

impl Gauge {
    /// Creates a gauge, clamping `value` to `max`.
    #[must_use]
    pub const fn new(value: u16, max: u16) -> Self {
        let value = if value > max { max } else { value };
        Self { value, max }
    }

    /// An empty gauge with the given capacity.
    #[must_use]
    pub const fn empty(max: u16) -> Self {
        Self::new(0, max)
    }

    /// Current value.
    #[must_use]
    pub const fn value(&self) -> u16 {
        self.value
    }

    /// Capacity.
    #[must_use]
    pub const fn max(&self) -> u16 {
        self.max
    }

    /// Returns `true` if the gauge is at capacity.
    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.value >= self.max
    }

    /// Returns `true` if the gauge holds nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.value == 0
    }

    /// Adds `amount`, saturating at the cap.
    ///
    /// Returns the portion that did not fit (lost production).
    pub fn produce(&mut self, amount: u16) -> u16 {
        let room = self.max.saturating_sub(self.value);
        let stored = amount.min(room);
        self.value += stored;
        amount - stored
    }

    /// Removes up to `amount`, returning how much was actually spent.
    pub fn spend(&mut self, amount: u16) -> u16 {
        let spent = amount.min(self.value);
        self.value -= spent;
        spent
    }

    /// Empties the gauge, returning the previous value.
    pub fn drain(&mut self) -> u16 {
        core::mem::take(&mut self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_clamps_to_max() {
        assert_eq!(Gauge::new(120, 100).value(), 100);
    }

    #[test]
    fn produce_at_cap_is_lost() {
        let mut gauge = Gauge::new(95, 100);

        assert_eq!(gauge.produce(10), 5);
        assert!(gauge.is_full());
        assert_eq!(gauge.produce(5), 5);
        assert_eq!(gauge.value(), 100);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialized_value_is_clamped() {
        let mut gauge: Gauge = serde_json::from_str(r#"{"value":150,"max":100}"#).unwrap();

        assert_eq!(gauge.value(), 100);
        assert_eq!(gauge.produce(5), 5);
        assert_eq!(gauge.value(), 100);
    }

    #[test]
    fn spend_and_drain() {
        let mut gauge = Gauge::new(3, 3);

        assert_eq!(gauge.spend(1), 1);
        assert_eq!(gauge.drain(), 2);
        assert!(gauge.is_empty());
        assert_eq!(gauge.spend(1), 0);
    }
}
