//! Output sink seen by the keyer.
//!
//! The core never touches pins. Hardware adapters live in [`crate::hal`].

/// Transmit power level, selected by attenuator control lines.
///
/// Levels are exclusive: selecting one replaces the previous one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerLevel {
    /// Both attenuator stages engaged.
    UltraLow,
    /// "L" attenuator only.
    Low,
    /// "M" attenuator only.
    Medium,
    /// No attenuation.
    #[default]
    High,
}

impl PowerLevel {
    /// Attenuator line states as `(medium, low)`.
    #[inline]
    pub const fn attenuators(self) -> (bool, bool) {
        match self {
            PowerLevel::UltraLow => (true, true),
            PowerLevel::Low => (false, true),
            PowerLevel::Medium => (true, false),
            PowerLevel::High => (false, false),
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            PowerLevel::UltraLow => "ultra-low",
            PowerLevel::Low => "low",
            PowerLevel::Medium => "medium",
            PowerLevel::High => "high",
        }
    }
}

/// Key, sidetone and power control.
pub trait OutputSink {
    /// Assert or release the key. The sidetone follows the key.
    fn set_key(&mut self, on: bool);

    /// Select the transmit power level.
    fn set_power_level(&mut self, level: PowerLevel);
}

impl<T: OutputSink + ?Sized> OutputSink for &mut T {
    #[inline]
    fn set_key(&mut self, on: bool) {
        (**self).set_key(on);
    }

    #[inline]
    fn set_power_level(&mut self, level: PowerLevel) {
        (**self).set_power_level(level);
    }
}

/// Sink that discards everything. Used for dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullOutput;

impl OutputSink for NullOutput {
    #[inline]
    fn set_key(&mut self, _on: bool) {}

    #[inline]
    fn set_power_level(&mut self, _level: PowerLevel) {}
}
