//! CW keyer.
//!
//! Turns one character into timed key transitions. Pure sequencing: the
//! key/sidetone lines sit behind [`OutputSink`] and every interval goes
//! through an `embedded_hal` [`DelayNs`], so the whole keyer runs on host
//! with a recording sink and a fake delay.
//!
//! An element's ON phase is always a single delay call.

use embedded_hal::delay::DelayNs;

use crate::morse::{self, Element};
use crate::output::{OutputSink, PowerLevel};
use crate::timing::{self, Timing};

/// Delay that returns immediately. Used for dry runs.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullDelay;

impl DelayNs for NullDelay {
    #[inline]
    fn delay_ns(&mut self, _ns: u32) {}

    #[inline]
    fn delay_us(&mut self, _us: u32) {}

    #[inline]
    fn delay_ms(&mut self, _ms: u32) {}
}

/// Character keyer.
///
/// # Example
///
/// ```
/// use fn_beacon::keyer::{CwKeyer, NullDelay};
/// use fn_beacon::output::NullOutput;
///
/// let mut keyer = CwKeyer::new(NullOutput, NullDelay);
/// keyer.send_character(b'E', 20);
///
/// // dit + element gap + letter gap = 5 dits of 60 ms
/// assert_eq!(keyer.elapsed_us(), 300_000);
/// ```
pub struct CwKeyer<O, D> {
    output: O,
    delay: D,
    elapsed_us: u64,
}

impl<O: OutputSink, D: DelayNs> CwKeyer<O, D> {
    pub fn new(output: O, delay: D) -> Self {
        Self {
            output,
            delay,
            elapsed_us: 0,
        }
    }

    /// Send one character at `wpm`.
    ///
    /// A space is a word gap with no key activity. `&` is sent as the
    /// "ES" prosign: an extra dit and letter gap ahead of the table's "S".
    /// A speed of 0 disables Morse output entirely.
    pub fn send_character(&mut self, code: u8, wpm: u8) {
        if wpm == 0 {
            return;
        }
        let timing = Timing::for_wpm(wpm);

        if code == b' ' {
            self.hold(timing.word_gap_us());
            return;
        }

        let encoding = morse::lookup(code);

        if code == b'&' {
            self.key(true);
            self.hold(timing.dit_us());
            self.key(false);
            self.hold(timing.letter_gap_us());
        }

        for element in encoding.elements() {
            self.key(true);
            self.hold(match element {
                Element::Dit => timing.dit_us(),
                Element::Dah => timing.dah_us(),
            });
            self.key(false);
            self.hold(timing.element_gap_us());
        }

        self.hold(timing.letter_gap_us());
    }

    /// Carrier on for `seconds`, then key up.
    pub fn key_down_pause(&mut self, seconds: u8) {
        self.key(true);
        self.key_up_pause(seconds);
    }

    /// Silence for `seconds`, ending with the key released.
    pub fn key_up_pause(&mut self, seconds: u8) {
        self.hold(Timing::seconds().units_us(u32::from(seconds)));
        self.key(false);
    }

    /// Forward a power level change to the output.
    #[inline]
    pub fn set_power_level(&mut self, level: PowerLevel) {
        self.output.set_power_level(level);
    }

    /// Total time spent in delays since creation (beacon time).
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        self.elapsed_us
    }

    #[inline]
    pub fn output(&self) -> &O {
        &self.output
    }

    #[inline]
    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// Release the output and delay.
    pub fn into_parts(self) -> (O, D) {
        (self.output, self.delay)
    }

    // --- Private methods ---

    #[inline]
    fn key(&mut self, on: bool) {
        self.output.set_key(on);
    }

    #[inline]
    fn hold(&mut self, us: u32) {
        self.delay.delay_us(us);
        self.elapsed_us += u64::from(us);
    }
}

/// Length of one character in dits, including its trailing gaps.
pub fn character_units(code: u8) -> u32 {
    if code == b' ' {
        return timing::WORD_GAP;
    }
    let encoding = morse::lookup(code);
    let prefix = if code == b'&' {
        timing::DIT + timing::LETTER_GAP
    } else {
        0
    };
    prefix
        + encoding.keyed_units()
        + u32::from(encoding.count()) * timing::ELEMENT_GAP
        + timing::LETTER_GAP
}
