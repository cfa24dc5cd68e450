//! Module: config
//!
//! Purpose: Compile-time configuration for the beacon.
//!
//! Architecture:
//! - `BeaconConfig::DEFAULT` is the single source of truth for the firmware
//! - Message strings are edited here and rebuilt, there is no runtime editing
//! - Speed limits are shared by the speed register and the `z` directive
//!
//! Safety: Safe. Plain data.

use crate::logging::LogLevel;

/// Slowest accepted code speed (WPM).
pub const MIN_WPM: u8 = 5;

/// Fastest accepted code speed (WPM).
pub const MAX_WPM: u8 = 30;

/// Speed the register holds at power-up.
pub const DEFAULT_WPM: u8 = 20;

/// Sidetone square-wave frequency.
pub const SIDETONE_HZ: u32 = 600;

/// Beacon configuration.
#[derive(Clone, Copy, Debug)]
pub struct BeaconConfig {
    /// Initial speed register value (WPM).
    pub wpm: u8,

    /// Sent once at power-up.
    pub boot_message: &'static [u8],

    /// Repeated forever after the boot message.
    ///
    /// Upper-case text is sent as Morse. Lower-case bytes are directives:
    /// `a`/`b` pauses, `z` speed, `u`/`l`/`m`/`h` power level.
    pub message: &'static [u8],

    /// Sidetone frequency in Hz.
    pub sidetone_hz: u32,

    /// Key line level that means "RF on".
    pub key_active_high: bool,

    /// Minimum level pushed to the log stream.
    pub log_level: LogLevel,
}

impl BeaconConfig {
    /// Factory configuration.
    ///
    /// 20 WPM call and grid at high power, one second of silence, then
    /// four seconds of carrier at medium and low power.
    pub const DEFAULT: Self = Self {
        wpm: DEFAULT_WPM,
        boot_message: b"V1.0 BOOT ",
        message: b"z20h VVV DE KE0FF/B EM10GO a0b3 mb3 lb3a9",
        sidetone_hz: SIDETONE_HZ,
        key_active_high: true,
        log_level: LogLevel::Info,
    };
}

impl Default for BeaconConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
