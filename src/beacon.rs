//! Beacon message interpreter.
//!
//! Feeds a message through the [`Scanner`] and dispatches each token:
//! text goes to the [`CwKeyer`], directives change power, speed or insert
//! pauses. One [`transmit`](Beacon::transmit) call is one pass over the
//! message; the firmware loop repeats it forever.
//!
//! Nothing here can fail. Bad directives degrade the output (ignored
//! bytes, rejected speeds) and are reported in the [`Transmission`]
//! summary and the log.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::directive::{Directive, Scanner, Token};
use crate::keyer::{CwKeyer, NullDelay};
use crate::logging::{LogLevel, LogStream};
use crate::output::{NullOutput, OutputSink};
use crate::speed::SpeedRegister;

/// Summary of one pass over a message.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Transmission {
    /// Text bytes handed to the keyer (spaces included).
    pub characters: u32,
    /// Directives applied.
    pub directives: u32,
    /// Directive-range bytes with no meaning.
    pub ignored: u32,
    /// Speed directives outside the accepted range.
    pub rejected_speeds: u32,
    /// Speed in effect when the pass ended.
    pub wpm: u8,
}

/// Message interpreter bound to a keyer and a speed register.
pub struct Beacon<'r, O, D> {
    keyer: CwKeyer<O, D>,
    speed: &'r SpeedRegister,
    log: Option<&'r LogStream>,
}

impl<'r, O: OutputSink, D: DelayNs> Beacon<'r, O, D> {
    pub fn new(keyer: CwKeyer<O, D>, speed: &'r SpeedRegister) -> Self {
        Self {
            keyer,
            speed,
            log: None,
        }
    }

    /// Report directive activity to `log`.
    pub fn with_log(mut self, log: &'r LogStream) -> Self {
        self.log = Some(log);
        self
    }

    /// Send `stream` once, starting at `wpm`.
    ///
    /// A valid `z` directive changes both the active speed for the rest of
    /// the pass and the speed register.
    pub fn transmit(&mut self, stream: &[u8], wpm: u8) -> Transmission {
        let mut report = Transmission {
            wpm,
            ..Transmission::default()
        };
        self.log(
            LogLevel::Debug,
            format_args!("pass: {} bytes @ {} wpm", stream.len(), wpm),
        );

        for token in Scanner::new(stream) {
            match token {
                Token::Literal(code) => {
                    self.keyer.send_character(code, report.wpm);
                    report.characters += 1;
                }
                Token::Directive(directive) => self.apply(directive, &mut report),
                Token::Ignored(byte) => {
                    report.ignored += 1;
                    self.log(LogLevel::Debug, format_args!("ignored byte {:#04x}", byte));
                }
            }
        }

        report
    }

    /// Explicit speed write; see [`SpeedRegister::set`].
    #[inline]
    pub fn set_speed(&self, wpm: u8) -> u8 {
        self.speed.set(wpm)
    }

    /// Speed register value.
    #[inline]
    pub fn speed(&self) -> u8 {
        self.speed.get()
    }

    /// Beacon time accumulated by the keyer.
    #[inline]
    pub fn elapsed_us(&self) -> u64 {
        self.keyer.elapsed_us()
    }

    #[inline]
    pub fn keyer(&self) -> &CwKeyer<O, D> {
        &self.keyer
    }

    #[inline]
    pub fn keyer_mut(&mut self) -> &mut CwKeyer<O, D> {
        &mut self.keyer
    }

    pub fn into_keyer(self) -> CwKeyer<O, D> {
        self.keyer
    }

    // --- Private methods ---

    fn apply(&mut self, directive: Directive, report: &mut Transmission) {
        match directive {
            Directive::Power(level) => {
                self.keyer.set_power_level(level);
                self.log(LogLevel::Info, format_args!("power {}", level.as_str()));
            }
            Directive::KeyUp { seconds } => {
                self.log(LogLevel::Debug, format_args!("key-up pause {} s", seconds));
                self.keyer.key_up_pause(seconds);
            }
            Directive::KeyDown { seconds } => {
                self.log(LogLevel::Debug, format_args!("key-down pause {} s", seconds));
                self.keyer.key_down_pause(seconds);
            }
            Directive::Speed { wpm } => {
                if !SpeedRegister::accepts(wpm) {
                    report.rejected_speeds += 1;
                    self.log(
                        LogLevel::Warn,
                        format_args!("speed {} rejected, keeping {}", wpm, report.wpm),
                    );
                    return;
                }
                self.speed.set(wpm);
                report.wpm = wpm;
                self.log(LogLevel::Info, format_args!("speed {} wpm", wpm));
            }
        }
        report.directives += 1;
    }

    fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) {
        if let Some(log) = self.log {
            crate::rt_log!(level, log, self.keyer.elapsed_us(), "{}", args);
        }
    }
}

/// Time one pass over `stream` takes when started at `wpm`.
///
/// Runs the interpreter against a null output and a no-op delay with a
/// scratch speed register, so nothing observable changes.
pub fn estimate_cycle_us(stream: &[u8], wpm: u8) -> u64 {
    let scratch = SpeedRegister::new(wpm);
    let mut beacon = Beacon::new(CwKeyer::new(NullOutput, NullDelay), &scratch);
    beacon.transmit(stream, wpm);
    beacon.elapsed_us()
}
