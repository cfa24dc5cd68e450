//! Speed register.
//!
//! Holds the code speed that survives between `transmit` calls. It is
//! passed by reference to whoever needs it, so it can live in a `static`
//! or on the stack of the firmware entry point.

use core::sync::atomic::{AtomicU8, Ordering};

use crate::config::{MAX_WPM, MIN_WPM};

/// Persistent WPM value, always within `MIN_WPM..=MAX_WPM`.
pub struct SpeedRegister {
    wpm: AtomicU8,
}

impl SpeedRegister {
    /// Create a register holding `wpm`.
    ///
    /// An out-of-range default is clamped into the accepted range.
    pub const fn new(wpm: u8) -> Self {
        let wpm = if wpm < MIN_WPM {
            MIN_WPM
        } else if wpm > MAX_WPM {
            MAX_WPM
        } else {
            wpm
        };
        Self {
            wpm: AtomicU8::new(wpm),
        }
    }

    /// Check whether `wpm` would be accepted by [`set`](Self::set).
    #[inline]
    pub const fn accepts(wpm: u8) -> bool {
        wpm >= MIN_WPM && wpm <= MAX_WPM
    }

    /// Store `wpm` if it is in range and return the current value.
    ///
    /// Out-of-range values (including 0) leave the register untouched, so
    /// `set(0)` doubles as a read.
    #[inline]
    pub fn set(&self, wpm: u8) -> u8 {
        if Self::accepts(wpm) {
            self.wpm.store(wpm, Ordering::Relaxed);
        }
        self.get()
    }

    /// Current speed.
    #[inline]
    pub fn get(&self) -> u8 {
        self.wpm.load(Ordering::Relaxed)
    }
}

impl Default for SpeedRegister {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_WPM)
    }
}
