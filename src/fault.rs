//! Output fault latch.
//!
//! The beacon keeps transmitting through output failures; a broken pin
//! degrades the signal but never halts the message. Adapters record what
//! went wrong here and the firmware loop reports it between passes.

use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

/// Which output misbehaved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum FaultCode {
    None = 0,
    /// Key line could not be driven.
    KeyOutput = 1,
    /// An attenuator control line could not be driven.
    PowerOutput = 2,
    /// Sidetone PWM could not be updated.
    Sidetone = 3,
}

const CODES: usize = 4;

impl FaultCode {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => FaultCode::KeyOutput,
            2 => FaultCode::PowerOutput,
            3 => FaultCode::Sidetone,
            _ => FaultCode::None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FaultCode::None => "none",
            FaultCode::KeyOutput => "key output",
            FaultCode::PowerOutput => "power output",
            FaultCode::Sidetone => "sidetone",
        }
    }
}

/// Latest output fault plus per-output counters.
///
/// ```ignore
/// static FAULTS: FaultState = FaultState::new();
///
/// // adapter
/// if pin.set_high().is_err() {
///     FAULTS.set(FaultCode::KeyOutput, 1);
/// }
///
/// // between passes
/// if let Some(fault) = FAULTS.take() {
///     report(fault);
/// }
/// ```
pub struct FaultState {
    active: AtomicBool,
    code: AtomicU8,
    /// Adapter specific: key state or requested power level.
    detail: AtomicU32,
    /// Since boot, indexed by code. Never cleared.
    counts: [AtomicU32; CODES],
}

impl FaultState {
    pub const fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            code: AtomicU8::new(FaultCode::None as u8),
            detail: AtomicU32::new(0),
            counts: [
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
                AtomicU32::new(0),
            ],
        }
    }

    /// Latch `code` with its detail word.
    pub fn set(&self, code: FaultCode, detail: u32) {
        self.code.store(code as u8, Ordering::Relaxed);
        self.detail.store(detail, Ordering::Relaxed);
        self.counts[code as usize].fetch_add(1, Ordering::Relaxed);
        self.active.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Most recent code; `None` until the first fault.
    #[inline]
    pub fn code(&self) -> FaultCode {
        FaultCode::from_u8(self.code.load(Ordering::Acquire))
    }

    #[inline]
    pub fn detail(&self) -> u32 {
        self.detail.load(Ordering::Acquire)
    }

    /// Faults of `code` since boot.
    #[inline]
    pub fn count_for(&self, code: FaultCode) -> u32 {
        self.counts[code as usize].load(Ordering::Relaxed)
    }

    /// Faults of any kind since boot.
    pub fn count(&self) -> u32 {
        self.counts.iter().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Drop the active flag. Counters stay.
    #[inline]
    pub fn clear(&self) {
        self.active.store(false, Ordering::Release);
    }

    pub fn snapshot(&self) -> FaultSnapshot {
        FaultSnapshot {
            active: self.is_active(),
            code: self.code(),
            detail: self.detail(),
            count: self.count(),
        }
    }

    /// Snapshot and clear if a fault is pending.
    pub fn take(&self) -> Option<FaultSnapshot> {
        if !self.active.swap(false, Ordering::AcqRel) {
            return None;
        }
        Some(FaultSnapshot {
            active: true,
            code: self.code(),
            detail: self.detail(),
            count: self.count(),
        })
    }
}

impl Default for FaultState {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FaultSnapshot {
    pub active: bool,
    pub code: FaultCode,
    pub detail: u32,
    pub count: u32,
}
