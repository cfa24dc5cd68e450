//! Bit-banged I2C master on two open-drain GPIOs.
//!
//! `set_high` releases a line (pulled up externally), `set_low` drives it
//! low. SDA must be readable back while released. Clock stretching is not
//! supported. Pin errors are treated as a released line, so a broken SDA
//! reads as NACK and the register helpers report it.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{InputPin, OutputPin};

use super::i2c::{Ack, I2cBus};

/// Half clock period for ~100 kHz.
pub const DEFAULT_HALF_PERIOD_US: u32 = 5;

pub struct BitBangI2c<SCL, SDA, D> {
    scl: SCL,
    sda: SDA,
    delay: D,
    half_period_us: u32,
}

impl<SCL, SDA, D> BitBangI2c<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    /// Take the pins and release both lines (bus idle).
    pub fn new(scl: SCL, sda: SDA, delay: D) -> Self {
        let mut bus = Self {
            scl,
            sda,
            delay,
            half_period_us: DEFAULT_HALF_PERIOD_US,
        };
        bus.sda_release();
        bus.scl_release();
        bus
    }

    pub fn with_half_period_us(mut self, half_period_us: u32) -> Self {
        self.half_period_us = half_period_us.max(1);
        self
    }

    pub fn release(self) -> (SCL, SDA, D) {
        (self.scl, self.sda, self.delay)
    }

    // --- Private methods ---

    #[inline]
    fn wait(&mut self) {
        self.delay.delay_us(self.half_period_us);
    }

    #[inline]
    fn scl_release(&mut self) {
        let _ = self.scl.set_high();
    }

    #[inline]
    fn scl_low(&mut self) {
        let _ = self.scl.set_low();
    }

    #[inline]
    fn sda_release(&mut self) {
        let _ = self.sda.set_high();
    }

    #[inline]
    fn sda_low(&mut self) {
        let _ = self.sda.set_low();
    }

    fn write_bit(&mut self, bit: bool) {
        if bit {
            self.sda_release();
        } else {
            self.sda_low();
        }
        self.wait();
        self.scl_release();
        self.wait();
        self.scl_low();
    }

    fn read_bit(&mut self) -> bool {
        self.sda_release();
        self.wait();
        self.scl_release();
        self.wait();
        let bit = self.sda.is_high().unwrap_or(true);
        self.scl_low();
        bit
    }
}

impl<SCL, SDA, D> I2cBus for BitBangI2c<SCL, SDA, D>
where
    SCL: OutputPin,
    SDA: OutputPin + InputPin,
    D: DelayNs,
{
    fn start(&mut self) {
        // SCL may be low mid-transfer (repeated start): release SDA first
        self.sda_release();
        self.scl_release();
        self.wait();
        self.sda_low();
        self.wait();
        self.scl_low();
    }

    fn send_byte(&mut self, byte: u8) -> Ack {
        for i in (0..8).rev() {
            self.write_bit((byte >> i) & 1 == 1);
        }
        if self.read_bit() {
            Ack::Nack
        } else {
            Ack::Ack
        }
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        let mut value = 0u8;
        for _ in 0..8 {
            value = (value << 1) | u8::from(self.read_bit());
        }
        self.write_bit(!ack);
        value
    }

    fn stop(&mut self) {
        self.sda_low();
        self.wait();
        self.scl_release();
        self.wait();
        self.sda_release();
        self.wait();
    }
}
