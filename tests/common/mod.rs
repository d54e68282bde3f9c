//! Shared mock collaborators for the integration tests.

#![allow(dead_code)]

use eeprom_probe::bus::{BusError, RegisterBus};
use eeprom_probe::dispatcher::LineSource;

/// Scripted in-memory device with 256 one-byte registers.
///
/// Register-select and write frames are recorded in order; failure
/// behavior is driven by the `fail_*` address lists.
pub struct MockDevice {
    pub regs: [u8; 256],
    /// Addresses whose select/write transmit is NAKed.
    pub fail_transmit: Vec<u8>,
    /// Addresses whose read-back is NAKed.
    pub fail_receive: Vec<u8>,
    /// Every transmit frame, in order.
    pub transmits: Vec<Vec<u8>>,
    selected: u8,
}

impl MockDevice {
    pub fn new() -> Self {
        Self::filled(0)
    }

    pub fn filled(value: u8) -> Self {
        Self {
            regs: [value; 256],
            fail_transmit: Vec::new(),
            fail_receive: Vec::new(),
            transmits: Vec::new(),
            selected: 0,
        }
    }
}

impl RegisterBus for MockDevice {
    fn transmit(&mut self, bytes: &[u8]) -> Result<(), BusError> {
        self.transmits.push(bytes.to_vec());

        match *bytes {
            [addr] => {
                if self.fail_transmit.contains(&addr) {
                    return Err(BusError::Nack);
                }
                self.selected = addr;
            }
            [addr, value] => {
                if self.fail_transmit.contains(&addr) {
                    return Err(BusError::Nack);
                }
                self.selected = addr;
                self.regs[addr as usize] = value;
            }
            _ => return Err(BusError::Bus),
        }

        Ok(())
    }

    fn receive(&mut self, buf: &mut [u8]) -> Result<(), BusError> {
        if self.fail_receive.contains(&self.selected) {
            return Err(BusError::Nack);
        }
        buf[0] = self.regs[self.selected as usize];
        Ok(())
    }
}

/// Line source replaying a fixed script of command lines.
pub struct ScriptedSource {
    lines: Vec<Vec<u8>>,
}

impl ScriptedSource {
    pub fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|line| line.as_bytes().to_vec()).collect(),
        }
    }
}

impl LineSource for ScriptedSource {
    fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize> {
        if self.lines.is_empty() {
            return None;
        }
        let line = self.lines.remove(0);
        buf[..line.len()].copy_from_slice(&line);
        if line.len() < buf.len() {
            buf[line.len()] = 0;
        }
        Some(line.len())
    }
}
