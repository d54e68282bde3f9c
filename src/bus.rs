//! Register bus access.
//!
//! The sweep code talks to the target device through [`RegisterBus`], a
//! blocking transmit/receive pair. Firmware binds it to the ESP-IDF I2C
//! driver via [`I2cDevice`]; tests substitute scripted implementations.

use embedded_hal::i2c::{Error, ErrorKind, I2c};

/// Default 7-bit device address (AT24-style EEPROM).
pub const DEFAULT_DEVICE_ADDR: u8 = 0x50;

/// Bus transaction error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError {
    /// Device did not acknowledge the transfer.
    Nack,
    /// Controller-level failure.
    Bus,
}

impl core::fmt::Display for BusError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Nack => f.write_str("no acknowledge from device"),
            Self::Bus => f.write_str("bus controller failure"),
        }
    }
}

/// Blocking access to one target device.
///
/// Both operations wait without timeout: they return only once the
/// transfer has completed or the controller reported a failure, never
/// early.
pub trait RegisterBus {
    /// Transmit `bytes` to the device as a single transaction.
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), BusError>;

    /// Receive exactly `buf.len()` bytes from the device as a single
    /// transaction.
    fn receive(&mut self, buf: &mut [u8]) -> Result<(), BusError>;
}

/// [`RegisterBus`] over any `embedded-hal` I2C master, bound to a single
/// 7-bit device address.
pub struct I2cDevice<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cDevice<I2C> {
    /// Bind `i2c` to the device at `address`.
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// The bound device address.
    pub fn address(&self) -> u8 {
        self.address
    }
}

impl<I2C: I2c> RegisterBus for I2cDevice<I2C> {
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.i2c.write(self.address, bytes).map_err(to_bus_error)
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        self.i2c.read(self.address, buf).map_err(to_bus_error)
    }
}

fn to_bus_error<E: Error>(err: E) -> BusError {
    match err.kind() {
        ErrorKind::NoAcknowledge(_) => BusError::Nack,
        _ => BusError::Bus,
    }
}
