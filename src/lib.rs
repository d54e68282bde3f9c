//! # eeprom-probe
//!
//! Serial diagnostic console for an 8-bit-addressed I2C peripheral.
//!
//! One JSON command per line arrives over the serial link:
//!
//! - `{"cmd": "read", "value": 0}` dumps all 256 device registers as a
//!   16x16 hex grid;
//! - `{"cmd": "write", "value": "<512 hex chars>"}` programs a full
//!   256-byte image, one register per transaction.
//!
//! Failed addresses are reported per cell (`--` in the grid, diagnostic
//! lines in the write summary); a sweep never retries and never aborts
//! early.
//!
//! The library is host-testable: hardware access sits behind the
//! [`bus::RegisterBus`] and [`dispatcher::LineSource`] seams, and the
//! firmware binary wires those to the ESP-IDF UART and I2C drivers.

#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod bus;
pub mod command;
pub mod dispatcher;
pub mod pacing;
pub mod scanner;
pub mod writer;

pub use bus::{BusError, I2cDevice, RegisterBus, DEFAULT_DEVICE_ADDR};
pub use command::{decode, Command, CommandKind, DecodeError};
pub use dispatcher::{dispatch_line, Dispatcher, LineSource, LINE_BUF_SIZE};
pub use scanner::{scan, ScanResult, ADDRESS_COUNT};
pub use writer::{decode_payload, write_image, PayloadError, WriteFailure, WriteReport, PAYLOAD_LEN};
