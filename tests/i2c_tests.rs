//! I2C register helper tests.
//!
//! A scripted stage-level bus checks error mapping and stop handling; a
//! simulated open-drain wire checks the bit-banged framing.

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use fn_beacon::hal::{read_16_from_reg, write_byte_to_reg, Ack, BitBangI2c, I2cBus, I2cError};
use fn_beacon::keyer::NullDelay;

const DEVICE: u8 = 0x18;

// ============================================================================
// Scripted bus
// ============================================================================

#[derive(Debug, PartialEq, Eq)]
enum Stage {
    Start,
    Send(u8),
    Read(bool),
    Stop,
}

/// NACKs the `nack_at`-th sent byte (0-based), ACKs the rest.
struct ScriptedBus {
    stages: Vec<Stage>,
    sent: usize,
    nack_at: Option<usize>,
    read_data: Vec<u8>,
}

impl ScriptedBus {
    fn new(nack_at: Option<usize>) -> Self {
        Self {
            stages: Vec::new(),
            sent: 0,
            nack_at,
            read_data: vec![0x12, 0x34],
        }
    }

    fn stops(&self) -> usize {
        self.stages.iter().filter(|s| **s == Stage::Stop).count()
    }
}

impl I2cBus for ScriptedBus {
    fn start(&mut self) {
        self.stages.push(Stage::Start);
    }

    fn send_byte(&mut self, byte: u8) -> Ack {
        self.stages.push(Stage::Send(byte));
        let index = self.sent;
        self.sent += 1;
        if Some(index) == self.nack_at {
            Ack::Nack
        } else {
            Ack::Ack
        }
    }

    fn read_byte(&mut self, ack: bool) -> u8 {
        self.stages.push(Stage::Read(ack));
        if self.read_data.is_empty() {
            0xFF
        } else {
            self.read_data.remove(0)
        }
    }

    fn stop(&mut self) {
        self.stages.push(Stage::Stop);
    }
}

#[test]
fn test_write_register_sequence() {
    let mut bus = ScriptedBus::new(None);
    assert_eq!(write_byte_to_reg(&mut bus, DEVICE, 0x0D, 0x08), Ok(()));
    assert_eq!(
        bus.stages,
        [
            Stage::Start,
            Stage::Send(0x30),
            Stage::Send(0x0D),
            Stage::Send(0x08),
            Stage::Stop,
        ]
    );
}

#[test]
fn test_write_nack_at_each_stage() {
    let expected = [
        I2cError::NoDevice,
        I2cError::RegWriteFail,
        I2cError::WriteDataFail,
    ];
    for (stage, error) in expected.into_iter().enumerate() {
        let mut bus = ScriptedBus::new(Some(stage));
        assert_eq!(write_byte_to_reg(&mut bus, DEVICE, 0x0D, 0x08), Err(error));
        assert_eq!(bus.stops(), 1, "stage {}", stage);
        assert_eq!(bus.stages.last(), Some(&Stage::Stop));
        // nothing sent after the NACKed byte
        assert_eq!(bus.sent, stage + 1);
    }
}

#[test]
fn test_read_register_sequence() {
    let mut bus = ScriptedBus::new(None);
    assert_eq!(read_16_from_reg(&mut bus, DEVICE, 0x0D), Ok(0x1234));
    assert_eq!(
        bus.stages,
        [
            Stage::Start,
            Stage::Send(0x30),
            Stage::Send(0x0D),
            Stage::Start,
            Stage::Send(0x31),
            Stage::Read(true),
            Stage::Read(false),
            Stage::Stop,
        ]
    );
}

#[test]
fn test_read_nack_at_each_stage() {
    let expected = [
        I2cError::NoDevice,
        I2cError::RegWriteFail,
        I2cError::RestartFail,
    ];
    for (stage, error) in expected.into_iter().enumerate() {
        let mut bus = ScriptedBus::new(Some(stage));
        assert_eq!(read_16_from_reg(&mut bus, DEVICE, 0x0D), Err(error));
        assert_eq!(bus.stops(), 1, "stage {}", stage);
        assert!(!bus.stages.iter().any(|s| matches!(s, Stage::Read(_))));
    }
}

#[test]
fn test_error_codes() {
    assert_eq!(I2cError::RegWriteFail.code(), "I02");
    assert_eq!(I2cError::WriteDataFail.to_string(), "I03: data write failed");
}

// ============================================================================
// Simulated open-drain wire
// ============================================================================

/// Two-line bus with one device that ACKs every byte once addressed.
///
/// Bytes are decoded on SCL rising edges; START and STOP are SDA edges
/// while SCL is high.
struct Wire {
    scl: bool,
    sda_master: bool,
    address: u8,
    addressed: bool,
    first_byte: bool,
    ack_pending: bool,
    clocks: u8,
    shift: u8,
    bytes: Vec<u8>,
    starts: u32,
    stops: u32,
}

impl Wire {
    fn new(address: u8) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self {
            scl: true,
            sda_master: true,
            address,
            addressed: false,
            first_byte: false,
            ack_pending: false,
            clocks: 0,
            shift: 0,
            bytes: Vec::new(),
            starts: 0,
            stops: 0,
        }))
    }

    fn sda(&self) -> bool {
        self.sda_master && !self.ack_pending
    }

    fn set_scl(&mut self, high: bool) {
        if high == self.scl {
            return;
        }
        self.scl = high;
        if high {
            self.clocks += 1;
            if self.clocks <= 8 {
                self.shift = (self.shift << 1) | u8::from(self.sda());
            }
            return;
        }

        match self.clocks {
            8 => {
                self.bytes.push(self.shift);
                if self.first_byte {
                    self.addressed = self.shift >> 1 == self.address;
                    self.first_byte = false;
                }
                self.ack_pending = self.addressed;
            }
            9 => {
                self.ack_pending = false;
                self.clocks = 0;
                self.shift = 0;
            }
            _ => {}
        }
    }

    fn set_sda(&mut self, high: bool) {
        if self.scl && high != self.sda_master {
            if high {
                self.stops += 1;
                self.addressed = false;
            } else {
                self.starts += 1;
                self.first_byte = true;
                self.ack_pending = false;
                self.clocks = 0;
                self.shift = 0;
            }
        }
        self.sda_master = high;
    }
}

struct Scl(Rc<RefCell<Wire>>);
struct Sda(Rc<RefCell<Wire>>);

impl ErrorType for Scl {
    type Error = Infallible;
}

impl OutputPin for Scl {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_scl(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_scl(true);
        Ok(())
    }
}

impl ErrorType for Sda {
    type Error = Infallible;
}

impl OutputPin for Sda {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_sda(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        self.0.borrow_mut().set_sda(true);
        Ok(())
    }
}

impl InputPin for Sda {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(self.0.borrow().sda())
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        Ok(!self.0.borrow().sda())
    }
}

fn bitbang(wire: &Rc<RefCell<Wire>>) -> BitBangI2c<Scl, Sda, NullDelay> {
    BitBangI2c::new(Scl(wire.clone()), Sda(wire.clone()), NullDelay)
}

#[test]
fn test_bitbang_write_framing() {
    let wire = Wire::new(DEVICE);
    let mut bus = bitbang(&wire);

    assert_eq!(write_byte_to_reg(&mut bus, DEVICE, 0x0D, 0x08), Ok(()));

    let wire = wire.borrow();
    assert_eq!(wire.bytes, [0x30, 0x0D, 0x08]);
    assert_eq!(wire.starts, 1);
    assert_eq!(wire.stops, 1);
    assert!(wire.scl && wire.sda_master, "bus left idle");
}

#[test]
fn test_bitbang_read_framing() {
    let wire = Wire::new(DEVICE);
    let mut bus = bitbang(&wire);

    // device does not drive data, lines float high
    assert_eq!(read_16_from_reg(&mut bus, DEVICE, 0x0D), Ok(0xFFFF));

    let wire = wire.borrow();
    assert_eq!(wire.bytes, [0x30, 0x0D, 0x31, 0xFF, 0xFF]);
    assert_eq!(wire.starts, 2);
    assert_eq!(wire.stops, 1);
}

#[test]
fn test_bitbang_no_device() {
    let wire = Wire::new(DEVICE);
    let mut bus = bitbang(&wire);

    assert_eq!(
        write_byte_to_reg(&mut bus, 0x20, 0x0D, 0x08),
        Err(I2cError::NoDevice)
    );

    let wire = wire.borrow();
    assert_eq!(wire.bytes, [0x40]);
    assert_eq!(wire.starts, 1);
    assert_eq!(wire.stops, 1);
}
