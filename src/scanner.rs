//! Address-space scan (read path).

use core::fmt::Write;

use log::{info, warn};

use crate::bus::RegisterBus;
use crate::pacing;

/// Number of one-byte register addresses on the target device.
pub const ADDRESS_COUNT: usize = 256;

/// Cells per rendered grid row.
const ROW_WIDTH: usize = 16;

/// Outcome of one full address sweep.
///
/// Always 256 cells; an unreadable address holds `None` and renders as
/// `--`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanResult {
    cells: [Option<u8>; ADDRESS_COUNT],
}

impl ScanResult {
    /// Value read at `addr`, or `None` if that address failed.
    pub fn cell(&self, addr: u8) -> Option<u8> {
        self.cells[addr as usize]
    }

    /// Number of addresses that could not be read.
    pub fn failed(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Render the 16x16 hex grid with offset header and row labels.
    pub fn render(&self, out: &mut dyn Write) {
        let _ = writeln!(out, "    00 01 02 03 04 05 06 07 08 09 0A 0B 0C 0D 0E 0F");

        for (addr, cell) in self.cells.iter().enumerate() {
            if addr % ROW_WIDTH == 0 {
                let _ = write!(out, "{:02X}: ", addr);
            }

            match cell {
                Some(value) => {
                    let _ = write!(out, "{:02X} ", value);
                }
                None => {
                    let _ = write!(out, "-- ");
                }
            }

            if addr % ROW_WIDTH == ROW_WIDTH - 1 {
                let _ = writeln!(out);
            }
        }
    }
}

/// Sweep all 256 addresses in ascending order.
///
/// Each address is selected with a one-byte transmit and read back with a
/// one-byte receive, both blocking. A failed address is recorded and the
/// sweep moves on; nothing is retried and the sweep never aborts early.
pub fn scan(bus: &mut dyn RegisterBus) -> ScanResult {
    info!("scanning {} device registers", ADDRESS_COUNT);

    let mut cells = [None; ADDRESS_COUNT];

    for addr in 0..ADDRESS_COUNT {
        let select = [addr as u8];
        if bus.transmit(&select).is_ok() {
            let mut byte = [0u8; 1];
            if bus.receive(&mut byte).is_ok() {
                cells[addr] = Some(byte[0]);
            }
        }
        pacing::pace();
    }

    let result = ScanResult { cells };
    if result.failed() > 0 {
        warn!("scan finished with {} unreadable addresses", result.failed());
    }
    result
}
