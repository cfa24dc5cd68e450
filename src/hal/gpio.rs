//! GPIO output adapter: key line, attenuator lines, sidetone PWM.

use embedded_hal::digital::{OutputPin, PinState};
use embedded_hal::pwm::SetDutyCycle;

use crate::fault::{FaultCode, FaultState};
use crate::output::{OutputSink, PowerLevel};

/// Sidetone duty cycle while keyed (square wave).
pub const SIDETONE_DUTY_PERCENT: u8 = 50;

/// [`OutputSink`] over `embedded-hal` pins.
///
/// - `key`: RF key line, polarity set by [`key_active_high`](Self::key_active_high)
/// - `medium` / `low`: attenuator controls, high = attenuator engaged
/// - `tone`: sidetone PWM channel running at the sidetone frequency
///
/// Pin errors are latched in the [`FaultState`]; the adapter keeps going.
pub struct PinOutput<'f, K, M, L, T> {
    key: K,
    medium: M,
    low: L,
    tone: T,
    key_active_high: bool,
    faults: &'f FaultState,
}

impl<'f, K, M, L, T> PinOutput<'f, K, M, L, T>
where
    K: OutputPin,
    M: OutputPin,
    L: OutputPin,
    T: SetDutyCycle,
{
    pub fn new(key: K, medium: M, low: L, tone: T, faults: &'f FaultState) -> Self {
        Self {
            key,
            medium,
            low,
            tone,
            key_active_high: true,
            faults,
        }
    }

    /// Select the key line level that means "RF on".
    pub fn key_active_high(mut self, active_high: bool) -> Self {
        self.key_active_high = active_high;
        self
    }

    pub fn into_parts(self) -> (K, M, L, T) {
        (self.key, self.medium, self.low, self.tone)
    }
}

impl<K, M, L, T> OutputSink for PinOutput<'_, K, M, L, T>
where
    K: OutputPin,
    M: OutputPin,
    L: OutputPin,
    T: SetDutyCycle,
{
    fn set_key(&mut self, on: bool) {
        let tone = if on {
            self.tone.set_duty_cycle_percent(SIDETONE_DUTY_PERCENT)
        } else {
            self.tone.set_duty_cycle_fully_off()
        };
        if tone.is_err() {
            self.faults.set(FaultCode::Sidetone, u32::from(on));
        }

        let level = PinState::from(on == self.key_active_high);
        if self.key.set_state(level).is_err() {
            self.faults.set(FaultCode::KeyOutput, u32::from(on));
        }
    }

    fn set_power_level(&mut self, level: PowerLevel) {
        let (medium, low) = level.attenuators();
        let medium = self.medium.set_state(PinState::from(medium));
        let low = self.low.set_state(PinState::from(low));
        if medium.is_err() || low.is_err() {
            self.faults.set(FaultCode::PowerOutput, level as u32);
        }
    }
}
