//! Image write (write path).

use alloc::vec::Vec;
use core::fmt::Write;

use log::{info, warn};

use crate::bus::RegisterBus;
use crate::pacing;
use crate::scanner::ADDRESS_COUNT;

/// Required payload length: two hex characters per byte.
pub const PAYLOAD_LEN: usize = ADDRESS_COUNT * 2;

/// Payload validation failure. No bus transaction has been attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadError {
    /// Payload is not exactly [`PAYLOAD_LEN`] characters.
    InvalidLength { actual: usize },
    /// Payload holds a character outside `[0-9a-fA-F]`.
    InvalidEncoding { offset: usize },
}

impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { actual } => write!(
                f,
                "payload must be {} hex characters ({} bytes), got {}",
                PAYLOAD_LEN, ADDRESS_COUNT, actual
            ),
            Self::InvalidEncoding { offset } => {
                write!(f, "invalid hex character at offset {}", offset)
            }
        }
    }
}

/// One failed write transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteFailure {
    pub addr: u8,
    pub value: u8,
}

/// Outcome of one full write sweep.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReport {
    written: usize,
    failures: Vec<WriteFailure>,
}

impl WriteReport {
    /// Number of bytes acknowledged by the device.
    pub fn written(&self) -> usize {
        self.written
    }

    /// Failed addresses with the byte value each attempt carried.
    pub fn failures(&self) -> &[WriteFailure] {
        &self.failures
    }

    /// Render one diagnostic line per failure, then the summary line.
    pub fn render(&self, out: &mut dyn Write) {
        for failure in &self.failures {
            let _ = writeln!(
                out,
                "write failed @ 0x{:02X} (value 0x{:02X})",
                failure.addr, failure.value
            );
        }
        let _ = writeln!(out, "{}/{} bytes succeeded", self.written, ADDRESS_COUNT);
    }
}

/// Decode the hex payload into the byte image it describes.
///
/// Strict: length and every character are validated here, before anything
/// touches the bus. Hex digits are case-insensitive, most-significant
/// nibble first.
pub fn decode_payload(payload: &str) -> Result<[u8; ADDRESS_COUNT], PayloadError> {
    if payload.len() != PAYLOAD_LEN {
        return Err(PayloadError::InvalidLength {
            actual: payload.len(),
        });
    }

    let mut image = [0u8; ADDRESS_COUNT];
    hex::decode_to_slice(payload, &mut image).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            PayloadError::InvalidEncoding { offset: index }
        }
        // Length mismatches are ruled out by the check above.
        _ => PayloadError::InvalidLength {
            actual: payload.len(),
        },
    })?;

    Ok(image)
}

/// Write a full 256-byte image, one `[address, byte]` transaction per
/// address in ascending order.
///
/// Validation failures return before any transaction. Individual
/// transaction failures are recorded and the sweep continues; nothing is
/// retried and the sweep never aborts early.
pub fn write_image(
    bus: &mut dyn RegisterBus,
    payload: &str,
) -> Result<WriteReport, PayloadError> {
    let image = decode_payload(payload)?;

    info!("writing {}-byte image", ADDRESS_COUNT);

    let mut report = WriteReport {
        written: 0,
        failures: Vec::new(),
    };

    for (addr, &value) in image.iter().enumerate() {
        let frame = [addr as u8, value];
        match bus.transmit(&frame) {
            Ok(()) => report.written += 1,
            Err(err) => {
                warn!("write failed @ {:#04X}: {}", addr, err);
                report.failures.push(WriteFailure {
                    addr: addr as u8,
                    value,
                });
            }
        }
        pacing::pace();
    }

    Ok(report)
}
