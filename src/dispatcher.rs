//! Command loop: pull a line, decode it, run it, report.

use core::fmt::Write;

use log::warn;

use crate::bus::RegisterBus;
use crate::command::{self, CommandKind};
use crate::pacing;
use crate::scanner;
use crate::writer;

/// Transport line buffer capacity in bytes. Longer input is truncated at
/// the transport and rejected by the decoder.
pub const LINE_BUF_SIZE: usize = 1024;

/// Source of complete command lines.
///
/// An implementation blocks up to its poll timeout. On success it fills
/// `buf` with the line bytes followed by a terminating NUL and returns
/// the line length; `None` means no complete line arrived in time.
pub trait LineSource {
    fn poll_line(&mut self, buf: &mut [u8]) -> Option<usize>;
}

/// Decode one line and run the command it carries.
///
/// Every failure is reported to `out` and consumes the line; nothing here
/// terminates the loop.
pub fn dispatch_line(bus: &mut dyn RegisterBus, line: &[u8], out: &mut dyn Write) {
    let cmd = match command::decode(line) {
        Ok(cmd) => cmd,
        Err(err) => {
            warn!("rejected command line: {}", err);
            let _ = writeln!(out, "error: {}", err);
            return;
        }
    };

    match cmd.kind {
        CommandKind::Read => {
            scanner::scan(bus).render(out);
        }
        CommandKind::Write => {
            // Decoder invariant: a write always carries a payload.
            let payload = cmd.payload.as_deref().unwrap_or("");
            match writer::write_image(bus, payload) {
                Ok(report) => report.render(out),
                Err(err) => {
                    let _ = writeln!(out, "error: {}", err);
                }
            }
        }
        CommandKind::Unsupported => {
            warn!("unsupported command '{}'", cmd.raw_kind);
            let _ = writeln!(out, "error: unsupported command '{}'", cmd.raw_kind);
        }
    }
}

/// The command loop. Owns the transport, borrows the bus.
///
/// One command is in flight at a time: the next line is not read until
/// the current command has fully completed.
pub struct Dispatcher<'b, L> {
    source: L,
    bus: &'b mut dyn RegisterBus,
    line: [u8; LINE_BUF_SIZE],
}

impl<'b, L: LineSource> Dispatcher<'b, L> {
    pub fn new(source: L, bus: &'b mut dyn RegisterBus) -> Self {
        Self {
            source,
            bus,
            line: [0u8; LINE_BUF_SIZE],
        }
    }

    /// Pull and fully process at most one command line.
    ///
    /// Returns whether a line was processed.
    pub fn poll(&mut self, out: &mut dyn Write) -> bool {
        match self.source.poll_line(&mut self.line) {
            Some(len) if len > 0 => {
                dispatch_line(self.bus, &self.line[..len], out);
                true
            }
            _ => false,
        }
    }

    /// Run forever: poll, idle briefly whenever no line is pending.
    pub fn run(&mut self, out: &mut dyn Write) -> ! {
        loop {
            if !self.poll(out) {
                pacing::idle();
            }
        }
    }
}
