//! Core types for the RIL signal decoder library
//!
//! This module defines the raw firmware message, the canonical descriptor the
//! decoder emits, and the records describing which corrections were applied.
//! The decoder is stateless and only outputs values - it never tracks signal
//! history or classifies signal bars.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Number of integer fields in a signal-strength response
pub const FIELD_COUNT: usize = 7;

/// Size in bytes of a signal-strength response payload
pub const PAYLOAD_LEN: usize = FIELD_COUNT * 4;

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Buffer underflow: need {needed} bytes, only {available} available")]
    Underflow { needed: usize, available: usize },

    #[error("No decoding profile registered for {vendor}/{firmware}")]
    UnknownProfile { vendor: String, firmware: String },

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Raw signal-strength response as delivered by modem firmware
///
/// Seven opaque vendor-defined measurement slots, in wire order. No field has
/// a range restriction before a profile corrects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RawStatusMessage {
    pub fields: [i32; FIELD_COUNT],
}

impl RawStatusMessage {
    pub fn new(fields: [i32; FIELD_COUNT]) -> Self {
        Self { fields }
    }

    /// Value of the slot at `position`, `None` past the last slot
    pub fn field(&self, position: usize) -> Option<i32> {
        self.fields.get(position).copied()
    }
}

impl From<[i32; FIELD_COUNT]> for RawStatusMessage {
    fn from(fields: [i32; FIELD_COUNT]) -> Self {
        Self::new(fields)
    }
}

impl TryFrom<&[i32]> for RawStatusMessage {
    type Error = DecoderError;

    fn try_from(values: &[i32]) -> Result<Self> {
        let fields: [i32; FIELD_COUNT] = values.try_into().map_err(|_| {
            DecoderError::InvalidData(format!(
                "expected {} fields, got {}",
                FIELD_COUNT,
                values.len()
            ))
        })?;
        Ok(Self { fields })
    }
}

/// Canonical signal-strength descriptor handed to the platform
///
/// Slot meaning is fixed for every call:
///
/// | slot | metric |
/// |------|--------|
/// | 0 | GSM signal strength |
/// | 1 | GSM bit error rate |
/// | 2 | CDMA dBm |
/// | 3 | CDMA Ec/Io |
/// | 4 | EVDO dBm |
/// | 5 | EVDO Ec/Io |
/// | 6 | EVDO SNR |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct CanonicalSignalStrength {
    metrics: [i32; FIELD_COUNT],
    is_gsm: bool,
}

impl CanonicalSignalStrength {
    pub fn new(metrics: [i32; FIELD_COUNT], is_gsm: bool) -> Self {
        Self { metrics, is_gsm }
    }

    /// All seven metrics in slot order
    pub fn metrics(&self) -> [i32; FIELD_COUNT] {
        self.metrics
    }

    /// True when GSM is the primary technology for this descriptor
    pub fn is_gsm(&self) -> bool {
        self.is_gsm
    }

    pub fn gsm_signal_strength(&self) -> i32 {
        self.metrics[0]
    }

    pub fn gsm_bit_error_rate(&self) -> i32 {
        self.metrics[1]
    }

    pub fn cdma_dbm(&self) -> i32 {
        self.metrics[2]
    }

    pub fn cdma_ecio(&self) -> i32 {
        self.metrics[3]
    }

    pub fn evdo_dbm(&self) -> i32 {
        self.metrics[4]
    }

    pub fn evdo_ecio(&self) -> i32 {
        self.metrics[5]
    }

    pub fn evdo_snr(&self) -> i32 {
        self.metrics[6]
    }
}

impl fmt::Display for CanonicalSignalStrength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "gsm={} ber={} cdma_dbm={} cdma_ecio={} evdo_dbm={} evdo_ecio={} evdo_snr={} {}",
            self.metrics[0],
            self.metrics[1],
            self.metrics[2],
            self.metrics[3],
            self.metrics[4],
            self.metrics[5],
            self.metrics[6],
            if self.is_gsm { "gsm" } else { "cdma" }
        )
    }
}

/// Identifies a vendor/firmware decoding profile
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProfileKey {
    pub vendor: String,
    pub firmware: String,
}

impl ProfileKey {
    pub fn new(vendor: impl Into<String>, firmware: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            firmware: firmware.into(),
        }
    }
}

impl fmt::Display for ProfileKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.vendor, self.firmware)
    }
}

/// Kind of firmware correction a profile can apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CorrectionKind {
    /// Negative value replaced by its absolute value
    SignNormalization,
    /// Extended poor-signal range compressed into the platform band
    RangeRemap,
}

impl fmt::Display for CorrectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrectionKind::SignNormalization => write!(f, "SignNormalization"),
            CorrectionKind::RangeRemap => write!(f, "RangeRemap"),
        }
    }
}

/// A correction that was actually applied to one slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Correction {
    pub position: usize,
    pub kind: CorrectionKind,
    pub raw: i32,
    pub corrected: i32,
}

/// Output of a profile's decode function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub signal: CanonicalSignalStrength,
    /// Corrections in the order they were applied (empty for pass-through)
    pub corrections: Vec<Correction>,
}

/// Structured decode events delivered to a [`crate::DecodeObserver`]
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeEvent {
    /// A firmware correction changed one slot
    Corrected {
        profile: ProfileKey,
        correction: Correction,
    },

    /// A descriptor was produced
    Decoded {
        profile: ProfileKey,
        raw: RawStatusMessage,
        signal: CanonicalSignalStrength,
    },

    /// A payload could not be read
    Failed {
        profile: ProfileKey,
        /// Byte offset of the failed record within the input
        offset: usize,
        reason: String,
    },
}

impl DecodeEvent {
    /// Get the profile that produced this event
    pub fn profile(&self) -> &ProfileKey {
        match self {
            DecodeEvent::Corrected { profile, .. } => profile,
            DecodeEvent::Decoded { profile, .. } => profile,
            DecodeEvent::Failed { profile, .. } => profile,
        }
    }
}
