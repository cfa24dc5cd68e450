//! Hardware Abstraction Layer for FnBeacon.
//!
//! Thin adapters over `embedded-hal` traits.
//! Business logic stays in core modules, HAL is just I/O.

pub mod bitbang;
pub mod gpio;
pub mod i2c;

pub use bitbang::BitBangI2c;
pub use gpio::PinOutput;
pub use i2c::{read_16_from_reg, write_byte_to_reg, Ack, I2cBus, I2cError};
