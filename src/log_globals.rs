//! Global log and fault instances.
//!
//! One beacon task produces, the UART drain consumes between passes.

use crate::fault::FaultState;
use crate::logging::LogStream;

/// Log stream for the beacon task.
pub static BEACON_LOG: LogStream = LogStream::new();

/// Fault latch shared by the output adapters and the firmware loop.
pub static FAULTS: FaultState = FaultState::new();
