//! # FnBeacon
//!
//! CW beacon controller: sends a fixed message as Morse with embedded
//! power, pause and speed directives.
//!
//! ## Architecture
//!
//! ```text
//! message ──▶ Scanner ──▶ Beacon ──┬──▶ CwKeyer ──▶ OutputSink (key, tone)
//!                                  │        └─────▶ DelayNs
//!                                  ├──▶ SpeedRegister
//!                                  └──▶ OutputSink (power level)
//! ```
//!
//! The core (`morse`, `timing`, `keyer`, `directive`, `beacon`) is pure
//! logic and runs on host. Pins and delays come in through `embedded-hal`
//! traits; [`hal`] holds the adapters.

#![cfg_attr(not(test), no_std)]

pub mod beacon;
pub mod config;
pub mod directive;
pub mod fault;
pub mod hal;
pub mod keyer;
pub mod log_globals;
pub mod logging;
pub mod morse;
pub mod output;
pub mod speed;
pub mod timing;
pub mod uart_logger;

pub use beacon::{estimate_cycle_us, Beacon, Transmission};
pub use config::BeaconConfig;
pub use directive::{Directive, Scanner, Token};
pub use fault::{FaultCode, FaultState};
pub use keyer::CwKeyer;
pub use log_globals::{BEACON_LOG, FAULTS};
pub use output::{OutputSink, PowerLevel};
pub use speed::SpeedRegister;
