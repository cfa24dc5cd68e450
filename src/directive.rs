//! Message stream scanner.
//!
//! Splits a message into Morse text and inline directives. Bytes up to
//! [`morse::LAST_CODE`] are text; anything above is a directive command,
//! optionally followed by parameter bytes whose low nibble is the value.
//!
//! | Command | Parameter bytes | Directive            |
//! |---------|-----------------|----------------------|
//! | `a`     | 1               | key-up pause (n+1 s) |
//! | `b`     | 1               | key-down pause       |
//! | `z`     | 2               | speed, tens then units |
//! | `u`     | 0               | power ultra-low      |
//! | `l`     | 0               | power low            |
//! | `m`     | 0               | power medium         |
//! | `h`     | 0               | power high           |
//!
//! A missing parameter (end of stream or NUL) reads as 0 and is not
//! consumed. The scanner never reads past a NUL.

use crate::morse;
use crate::output::PowerLevel;

/// Parsed control directive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Directive {
    /// Select a power level.
    Power(PowerLevel),
    /// Silence, key released. 1..=16 seconds.
    KeyUp { seconds: u8 },
    /// Carrier on. 1..=16 seconds.
    KeyDown { seconds: u8 },
    /// Requested speed; applied only if the speed register accepts it.
    Speed { wpm: u8 },
}

impl Directive {
    /// Parameter bytes consumed after the command byte, or `None` if the
    /// byte is not a known command.
    pub const fn parameter_bytes(command: u8) -> Option<usize> {
        match command {
            b'a' | b'b' => Some(1),
            b'z' => Some(2),
            b'u' | b'l' | b'm' | b'h' => Some(0),
            _ => None,
        }
    }
}

/// One classified unit of the message stream.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Token {
    /// Byte to send as Morse.
    Literal(u8),
    /// Control directive with its parameters already consumed.
    Directive(Directive),
    /// Directive-range byte with no meaning.
    Ignored(u8),
}

/// Left-to-right tokenizer over a message.
#[derive(Clone, Debug)]
pub struct Scanner<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> Scanner<'a> {
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes consumed so far.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    #[inline]
    fn peek(&self) -> Option<u8> {
        match self.bytes.get(self.pos) {
            Some(&0) | None => None,
            Some(&byte) => Some(byte),
        }
    }

    /// Low nibble of the next byte, consuming it if present.
    fn parameter(&mut self) -> u8 {
        match self.peek() {
            Some(byte) => {
                self.pos += 1;
                byte & 0x0f
            }
            None => 0,
        }
    }

    fn directive(&mut self, command: u8) -> Token {
        let directive = match command {
            b'a' => Directive::KeyUp {
                seconds: self.parameter() + 1,
            },
            b'b' => Directive::KeyDown {
                seconds: self.parameter() + 1,
            },
            b'z' => {
                let tens = self.parameter();
                let units = self.parameter();
                Directive::Speed {
                    wpm: tens * 10 + units,
                }
            }
            b'u' => Directive::Power(PowerLevel::UltraLow),
            b'l' => Directive::Power(PowerLevel::Low),
            b'm' => Directive::Power(PowerLevel::Medium),
            b'h' => Directive::Power(PowerLevel::High),
            other => return Token::Ignored(other),
        };
        Token::Directive(directive)
    }
}

impl Iterator for Scanner<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let byte = self.peek()?;
        self.pos += 1;

        if morse::is_literal(byte) {
            Some(Token::Literal(byte))
        } else {
            Some(self.directive(byte))
        }
    }
}

impl core::iter::FusedIterator for Scanner<'_> {}
