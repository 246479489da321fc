//! Input collection
//!
//! Turns command-line inputs (capture files, hex payloads, literal field
//! lists) into the records handed to the decoder.

use anyhow::{Context, Result};
use ril_signal_decoder::{RawStatusMessage, FIELD_COUNT, PAYLOAD_LEN};
use std::fs;
use std::num::ParseIntError;
use std::path::Path;
use std::sync::Arc;

/// One unit of work for the decoder
#[derive(Debug, Clone, PartialEq)]
pub enum InputRecord {
    /// Payload still to be read, starting `offset` bytes into `bytes`
    Payload {
        source: String,
        bytes: Arc<[u8]>,
        offset: usize,
    },
    /// Fields already parsed from the command line
    Fields { source: String, raw: RawStatusMessage },
}

impl InputRecord {
    pub fn source(&self) -> &str {
        match self {
            InputRecord::Payload { source, .. } => source,
            InputRecord::Fields { source, .. } => source,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("hex string has an odd number of digits")]
    OddLength,

    #[error("hex string contains non-ASCII characters")]
    NonAscii,

    #[error("invalid hex digit: {0}")]
    InvalidHex(ParseIntError),

    #[error("expected {expected} comma-separated values, got {actual}")]
    FieldCount { expected: usize, actual: usize },

    #[error("invalid field value {value:?}: {source}")]
    InvalidField {
        value: String,
        source: ParseIntError,
    },
}

/// Decode a hex string, ignoring whitespace and an optional `0x` prefix
pub fn decode_hex(s: &str) -> std::result::Result<Vec<u8>, InputError> {
    let s = s.trim();
    let digits: String = s
        .strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
        .split_whitespace()
        .collect();
    if !digits.is_ascii() {
        return Err(InputError::NonAscii);
    }
    if digits.len() % 2 != 0 {
        return Err(InputError::OddLength);
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&digits[i..i + 2], 16).map_err(InputError::InvalidHex))
        .collect()
}

/// Parse `a,b,c,d,e,f,g` into a raw message
pub fn parse_values(s: &str) -> std::result::Result<RawStatusMessage, InputError> {
    let parts: Vec<&str> = s.split(',').map(str::trim).collect();
    if parts.len() != FIELD_COUNT {
        return Err(InputError::FieldCount {
            expected: FIELD_COUNT,
            actual: parts.len(),
        });
    }

    let mut fields = [0i32; FIELD_COUNT];
    for (field, part) in fields.iter_mut().zip(parts) {
        *field = part.parse::<i32>().map_err(|source| InputError::InvalidField {
            value: part.to_string(),
            source,
        })?;
    }
    Ok(RawStatusMessage::new(fields))
}

/// Split a binary capture into one record per 28-byte payload
///
/// Records share the capture buffer and carry their byte offset into it. A
/// trailing partial payload is kept as its own record so the decoder can
/// report it.
pub fn load_capture(path: &Path) -> Result<Vec<InputRecord>> {
    let bytes: Arc<[u8]> = fs::read(path)
        .with_context(|| format!("Failed to read capture file: {:?}", path))?
        .into();
    log::info!("Loaded {} bytes from {:?}", bytes.len(), path);

    Ok((0..bytes.len())
        .step_by(PAYLOAD_LEN)
        .map(|offset| InputRecord::Payload {
            source: format!("{}@{}", path.display(), offset),
            bytes: Arc::clone(&bytes),
            offset,
        })
        .collect())
}

/// Collect all inputs in command-line order: capture file, hex payloads, values
pub fn collect(capture: Option<&Path>, hex: &[String], values: &[String]) -> Result<Vec<InputRecord>> {
    let mut records = Vec::new();

    if let Some(path) = capture {
        records.extend(load_capture(path)?);
    }

    for (i, s) in hex.iter().enumerate() {
        let bytes = decode_hex(s).with_context(|| format!("Invalid --hex payload #{}", i + 1))?;
        records.push(InputRecord::Payload {
            source: format!("hex#{}", i + 1),
            bytes: bytes.into(),
            offset: 0,
        });
    }

    for (i, s) in values.iter().enumerate() {
        let raw = parse_values(s).with_context(|| format!("Invalid --values entry #{}", i + 1))?;
        records.push(InputRecord::Fields {
            source: format!("values#{}", i + 1),
            raw,
        });
    }

    Ok(records)
}
