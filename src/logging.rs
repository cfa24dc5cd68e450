//! Beacon log ring.
//!
//! ```text
//! Beacon (producer)       LogStream               Firmware loop (drain)
//! ─────────────────       ─────────               ─────────────────────
//! rt_info!() ──────────▶ [E0][E1][E2]..[En] ────▶ uart_logger::drain_to
//! never blocks            fixed slots              between passes
//! ```
//!
//! Keying intervals must not stretch because of logging: a push never
//! waits, it drops the entry and counts it when the ring is full. Entries
//! above the stream's verbosity are rejected before any formatting.
//!
//! One producer (the task that owns the [`Beacon`](crate::Beacon)) and one
//! consumer. The indices are atomics so the stream can be a `static`.

use core::cell::UnsafeCell;
use core::fmt;
use core::sync::atomic::{AtomicU32, AtomicU8, Ordering};

/// Longest message kept per entry; longer text is cut.
pub const MAX_MSG_LEN: usize = 120;

/// Default ring capacity (entries).
pub const LOG_BUFFER_SIZE: usize = 64;

/// Severity, most severe first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum LogLevel {
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warn => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
            LogLevel::Trace => "TRACE",
        }
    }

    /// Inverse of `as u8`; anything past `Trace` saturates.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => LogLevel::Error,
            1 => LogLevel::Warn,
            2 => LogLevel::Info,
            3 => LogLevel::Debug,
            _ => LogLevel::Trace,
        }
    }
}

/// One log record, stamped with beacon time.
#[derive(Clone, Copy)]
pub struct LogEntry {
    /// Microseconds of keyer delay issued before the record was made.
    pub timestamp_us: u64,
    pub level: LogLevel,
    /// Valid bytes in `msg`.
    pub len: u8,
    pub msg: [u8; MAX_MSG_LEN],
}

impl LogEntry {
    const BLANK: Self = Self {
        timestamp_us: 0,
        level: LogLevel::Info,
        len: 0,
        msg: [0; MAX_MSG_LEN],
    };

    /// Build an entry, cutting `text` to [`MAX_MSG_LEN`] bytes.
    pub fn new(timestamp_us: u64, level: LogLevel, text: &[u8]) -> Self {
        let mut entry = Self::BLANK;
        let len = text.len().min(MAX_MSG_LEN);
        entry.timestamp_us = timestamp_us;
        entry.level = level;
        entry.len = len as u8;
        entry.msg[..len].copy_from_slice(&text[..len]);
        entry
    }

    /// Message text. A cut inside a multi-byte character shows a placeholder.
    pub fn text(&self) -> &str {
        core::str::from_utf8(&self.msg[..usize::from(self.len)]).unwrap_or("<invalid utf8>")
    }
}

impl Default for LogEntry {
    fn default() -> Self {
        Self::BLANK
    }
}

/// Fixed-capacity log ring with a verbosity filter.
///
/// `N` must be a power of two.
pub struct LogStream<const N: usize = LOG_BUFFER_SIZE> {
    slots: UnsafeCell<[LogEntry; N]>,
    head: AtomicU32,
    tail: AtomicU32,
    dropped: AtomicU32,
    level: AtomicU8,
}

// SAFETY: the producer only writes the slot at `head` before publishing it
// with a release store; the consumer only reads slots below `head`.
unsafe impl<const N: usize> Sync for LogStream<N> {}

impl<const N: usize> LogStream<N> {
    const MASK: u32 = (N as u32).wrapping_sub(1);

    /// Empty stream recording `Info` and above.
    pub const fn new() -> Self {
        assert!(N.is_power_of_two(), "log ring size must be a power of 2");

        Self {
            slots: UnsafeCell::new([LogEntry::BLANK; N]),
            head: AtomicU32::new(0),
            tail: AtomicU32::new(0),
            dropped: AtomicU32::new(0),
            level: AtomicU8::new(LogLevel::Info as u8),
        }
    }

    /// Record `level` and everything more severe.
    #[inline]
    pub fn set_level(&self, level: LogLevel) {
        self.level.store(level as u8, Ordering::Relaxed);
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed))
    }

    #[inline]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level as u8 <= self.level.load(Ordering::Relaxed)
    }

    /// Queue a record.
    ///
    /// Returns `false` if the level is filtered out or the ring is full.
    /// Only a full ring bumps the drop counter.
    pub fn push(&self, timestamp_us: u64, level: LogLevel, msg: &[u8]) -> bool {
        if !self.enabled(level) {
            return false;
        }

        let head = self.head.load(Ordering::Relaxed);
        let tail = self.tail.load(Ordering::Acquire);
        if head.wrapping_sub(tail) >= N as u32 {
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        // SAFETY: slot `head` is outside the consumer's readable range
        // until `head` is advanced below.
        unsafe {
            (*self.slots.get())[(head & Self::MASK) as usize] = LogEntry::new(timestamp_us, level, msg);
        }
        self.head.store(head.wrapping_add(1), Ordering::Release);
        true
    }

    /// Take the oldest record, if any.
    pub fn drain(&self) -> Option<LogEntry> {
        let tail = self.tail.load(Ordering::Relaxed);
        let head = self.head.load(Ordering::Acquire);
        if tail == head {
            return None;
        }

        // SAFETY: slot `tail` was published by the release store on `head`.
        let entry = unsafe { (*self.slots.get())[(tail & Self::MASK) as usize] };
        self.tail.store(tail.wrapping_add(1), Ordering::Release);
        Some(entry)
    }

    /// Records lost to a full ring since the last reset.
    #[inline]
    pub fn dropped(&self) -> u32 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn reset_dropped(&self) {
        self.dropped.store(0, Ordering::Relaxed);
    }

    #[inline]
    pub fn has_entries(&self) -> bool {
        self.pending() != 0
    }

    /// Records waiting for the drain.
    #[inline]
    pub fn pending(&self) -> u32 {
        let tail = self.tail.load(Ordering::Relaxed);
        self.head.load(Ordering::Acquire).wrapping_sub(tail)
    }
}

impl<const N: usize> Default for LogStream<N> {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `args` into `buf`, cutting whatever does not fit.
///
/// Returns the number of bytes written.
pub fn format_to_buffer(buf: &mut [u8], args: fmt::Arguments<'_>) -> usize {
    let mut writer = BufWriter::new(buf);
    let _ = fmt::write(&mut writer, args);
    writer.len()
}

/// `fmt::Write` into a byte slice, silently truncating.
pub struct BufWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> BufWriter<'a> {
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    pub fn len(&self) -> usize {
        self.pos
    }

    pub fn is_empty(&self) -> bool {
        self.pos == 0
    }
}

impl fmt::Write for BufWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let free = &mut self.buf[self.pos..];
        let n = s.len().min(free.len());
        free[..n].copy_from_slice(&s.as_bytes()[..n]);
        self.pos += n;
        Ok(())
    }
}

/// Format and queue a record at an explicit level.
///
/// Nothing is formatted when the stream filters the level out.
///
/// ```ignore
/// rt_log!(LogLevel::Info, BEACON_LOG, beacon.elapsed_us(), "speed {} wpm", wpm);
/// ```
#[macro_export]
macro_rules! rt_log {
    ($level:expr, $stream:expr, $timestamp:expr, $($arg:tt)*) => {{
        let level = $level;
        if $stream.enabled(level) {
            let mut buf = [0u8; $crate::logging::MAX_MSG_LEN];
            let len = $crate::logging::format_to_buffer(&mut buf, format_args!($($arg)*));
            $stream.push($timestamp, level, &buf[..len]);
        }
    }};
}

#[macro_export]
macro_rules! rt_error {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Error, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_warn {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Warn, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_info {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Info, $stream, $timestamp, $($arg)*)
    };
}

#[macro_export]
macro_rules! rt_debug {
    ($stream:expr, $timestamp:expr, $($arg:tt)*) => {
        $crate::rt_log!($crate::logging::LogLevel::Debug, $stream, $timestamp, $($arg)*)
    };
}
