//! Morse timing base.
//!
//! Every interval is an integer number of dits. The dit length follows
//! the PARIS calibration (50 dits per word): `dit = 1.2 / WPM` seconds.
//!
//! Element weights:
//!
//! | Interval        | Dits |
//! |-----------------|------|
//! | dit             | 1    |
//! | dah             | 3    |
//! | inter-element   | 1    |
//! | inter-letter    | 3    |
//! | inter-word      | 9    |
//!
//! The word space is one 9-dit delay sent for the space character, not
//! three letter spaces.

/// Dit length in dits.
pub const DIT: u32 = 1;
/// Dah length in dits.
pub const DAH: u32 = 3;
/// Gap after every element.
pub const ELEMENT_GAP: u32 = 1;
/// Gap after every character.
pub const LETTER_GAP: u32 = 3;
/// Delay sent for the space character.
pub const WORD_GAP: u32 = 9;

/// Unit used when no speed applies (pause directives).
pub const SECOND_US: u32 = 1_000_000;

/// Dit duration in microseconds at `wpm`.
///
/// A speed of 0 selects the fixed one-second unit instead of dividing
/// by zero.
#[inline]
pub const fn dit_duration_us(wpm: u8) -> u32 {
    if wpm == 0 {
        SECOND_US
    } else {
        1_200_000 / wpm as u32
    }
}

/// Interval table for one speed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    dit_us: u32,
}

impl Timing {
    /// Timing for the given speed (0 = one-second units).
    pub const fn for_wpm(wpm: u8) -> Self {
        Self {
            dit_us: dit_duration_us(wpm),
        }
    }

    /// One-second units, used by the pause directives.
    pub const fn seconds() -> Self {
        Self::for_wpm(0)
    }

    #[inline]
    pub const fn dit_us(&self) -> u32 {
        self.dit_us
    }

    #[inline]
    pub const fn dah_us(&self) -> u32 {
        self.units_us(DAH)
    }

    #[inline]
    pub const fn element_gap_us(&self) -> u32 {
        self.units_us(ELEMENT_GAP)
    }

    #[inline]
    pub const fn letter_gap_us(&self) -> u32 {
        self.units_us(LETTER_GAP)
    }

    #[inline]
    pub const fn word_gap_us(&self) -> u32 {
        self.units_us(WORD_GAP)
    }

    /// `units` dits in microseconds.
    #[inline]
    pub const fn units_us(&self, units: u32) -> u32 {
        self.dit_us * units
    }
}
