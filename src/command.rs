//! Inbound command decoding.
//!
//! One JSON object per line: `{"cmd": "...", "value": ...}`. The decoder
//! turns it into a typed [`Command`]; downstream code never inspects the
//! parsed JSON itself.

use alloc::string::{String, ToString};

use serde_json::Value;

/// Keys every command object must carry, in the order they are checked.
const REQUIRED_FIELDS: [&str; 2] = ["cmd", "value"];

/// Command kind, derived from the exact `cmd` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// Dump the full address space.
    Read,
    /// Program the full address space from the hex payload.
    Write,
    /// Anything else; echoed back to the sender.
    Unsupported,
}

/// A decoded command, consumed by one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    pub kind: CommandKind,
    /// The verbatim `cmd` string, kept for diagnostics.
    pub raw_kind: String,
    /// Hex payload; present only for [`CommandKind::Write`].
    pub payload: Option<String>,
}

/// Decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Line is not a JSON object of the expected shape.
    MalformedInput,
    /// A required key is absent.
    MissingField(&'static str),
}

impl core::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MalformedInput => f.write_str("invalid JSON"),
            Self::MissingField(name) => write!(f, "missing field '{}'", name),
        }
    }
}

/// Decode one NUL-terminated line into a [`Command`].
///
/// The payload string of a write is captured as-is; length and hex
/// validation belong to the writer. Pure transformation, no side effects.
pub fn decode(line: &[u8]) -> Result<Command, DecodeError> {
    // The transport NUL-terminates; parse only up to the terminator.
    let end = line.iter().position(|&b| b == 0).unwrap_or(line.len());
    let root: Value =
        serde_json::from_slice(&line[..end]).map_err(|_| DecodeError::MalformedInput)?;
    let object = root.as_object().ok_or(DecodeError::MalformedInput)?;

    for field in REQUIRED_FIELDS {
        if !object.contains_key(field) {
            return Err(DecodeError::MissingField(field));
        }
    }

    let raw_kind = object
        .get("cmd")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MalformedInput)?;

    let (kind, payload) = match raw_kind {
        "read" => (CommandKind::Read, None),
        "write" => {
            let payload = object
                .get("value")
                .and_then(Value::as_str)
                .ok_or(DecodeError::MalformedInput)?;
            (CommandKind::Write, Some(payload.to_string()))
        }
        _ => (CommandKind::Unsupported, None),
    };

    Ok(Command {
        kind,
        raw_kind: raw_kind.to_string(),
        payload,
    })
}
