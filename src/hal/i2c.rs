//! I2C register access.
//!
//! Register helpers on top of a stage-level bus: every stage that can be
//! NACKed maps to its own error, the transfer stops at the first NACK,
//! and a stop condition is always sent before returning. No retries; the
//! caller decides.

/// Acknowledge bit seen after a byte.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ack {
    Ack,
    Nack,
}

/// Stage-level I2C master.
pub trait I2cBus {
    /// Start (or repeated start) condition.
    fn start(&mut self);

    /// Clock out one byte, MSB first, and sample the acknowledge bit.
    fn send_byte(&mut self, byte: u8) -> Ack;

    /// Clock in one byte, answering ACK if `ack` is true, NACK otherwise.
    fn read_byte(&mut self, ack: bool) -> u8;

    /// Stop condition.
    fn stop(&mut self);
}

impl<B: I2cBus + ?Sized> I2cBus for &mut B {
    fn start(&mut self) {
        (**self).start();
    }

    fn send_byte(&mut self, byte: u8) -> Ack {
        (**self).send_byte(byte)
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        (**self).read_byte(ack)
    }

    fn stop(&mut self) {
        (**self).stop();
    }
}

/// Register transfer error, one per stage that can be NACKed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum I2cError {
    /// Address byte NACKed: nothing at that address.
    NoDevice,
    /// Register address byte NACKed.
    RegWriteFail,
    /// Data byte NACKed.
    WriteDataFail,
    /// Address NACKed after the repeated start.
    RestartFail,
}

impl I2cError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoDevice => "I01",
            Self::RegWriteFail => "I02",
            Self::WriteDataFail => "I03",
            Self::RestartFail => "I04",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NoDevice => "no device",
            Self::RegWriteFail => "register write failed",
            Self::WriteDataFail => "data write failed",
            Self::RestartFail => "restart failed",
        }
    }
}

impl core::fmt::Display for I2cError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}: {}", self.code(), self.message())
    }
}

const WRITE_FLAG: u8 = 0x00;
const READ_FLAG: u8 = 0x01;

#[inline]
fn send<B: I2cBus>(bus: &mut B, byte: u8, on_nack: I2cError) -> Result<(), I2cError> {
    match bus.send_byte(byte) {
        Ack::Ack => Ok(()),
        Ack::Nack => Err(on_nack),
    }
}

/// Write `data` to register `reg` of the device at 7-bit address `addr`.
pub fn write_byte_to_reg<B: I2cBus>(
    bus: &mut B,
    addr: u8,
    reg: u8,
    data: u8,
) -> Result<(), I2cError> {
    bus.start();
    let result = write_stages(bus, addr, reg, data);
    bus.stop();
    result
}

fn write_stages<B: I2cBus>(bus: &mut B, addr: u8, reg: u8, data: u8) -> Result<(), I2cError> {
    send(bus, (addr << 1) | WRITE_FLAG, I2cError::NoDevice)?;
    send(bus, reg, I2cError::RegWriteFail)?;
    send(bus, data, I2cError::WriteDataFail)
}

/// Read a big-endian 16-bit value starting at register `reg`.
///
/// Write phase selects the register, a repeated start switches to read,
/// the first byte is ACKed and the second NACKed.
pub fn read_16_from_reg<B: I2cBus>(bus: &mut B, addr: u8, reg: u8) -> Result<u16, I2cError> {
    bus.start();
    let result = read_stages(bus, addr, reg);
    bus.stop();
    result
}

fn read_stages<B: I2cBus>(bus: &mut B, addr: u8, reg: u8) -> Result<u16, I2cError> {
    send(bus, (addr << 1) | WRITE_FLAG, I2cError::NoDevice)?;
    send(bus, reg, I2cError::RegWriteFail)?;
    bus.start();
    send(bus, (addr << 1) | READ_FLAG, I2cError::RestartFail)?;
    let hi = bus.read_byte(true);
    let lo = bus.read_byte(false);
    Ok(u16::from_be_bytes([hi, lo]))
}
