//! RIL Signal Decoder Library
//!
//! A stateless library that turns the 28-byte signal-strength response of
//! cellular-modem firmware into the platform's canonical signal-strength
//! descriptor, applying vendor firmware corrections along the way.
//!
//! # Architecture
//!
//! - [`RawMessageReader`] reads seven signed 32-bit integers from a payload
//! - vendor profiles are pure functions, looked up in a [`ProfileRegistry`]
//! - [`SignalDecoder`] binds one profile at configuration time and reports
//!   decode events to an optional [`DecodeObserver`]
//!
//! The library does NOT:
//! - Frame or deliver modem messages
//! - Correlate requests with responses or retry
//! - Handle any response other than the signal-strength query
//! - Bucket the descriptor into signal bars
//!
//! # Example Usage
//!
//! ```no_run
//! use ril_signal_decoder::{DecoderConfig, ProfileRegistry, SignalDecoder};
//!
//! let registry = ProfileRegistry::builtin();
//! let config = DecoderConfig::new().with_profile("samsung", "apollo");
//! let decoder = SignalDecoder::new(&registry, &config).unwrap();
//!
//! let payload: Vec<u8> = [5i32, 10, 101, -3, 20, 1, 8]
//!     .iter()
//!     .flat_map(|v| v.to_ne_bytes())
//!     .collect();
//!
//! match decoder.decode_payload(&payload) {
//!     Ok(signal) => println!("CDMA dBm: {}", signal.cdma_dbm()),
//!     Err(e) => eprintln!("Decode error: {}", e),
//! }
//! ```

// Public modules
pub mod config;
pub mod decoder;
pub mod profiles;
pub mod reader;
pub mod registry;
pub mod types;

// Re-export main types for convenience
pub use config::DecoderConfig;
pub use decoder::{DecodeObserver, RecordIterator, SignalDecoder};
pub use profiles::DecodeFn;
pub use reader::{RawMessageReader, WireByteOrder};
pub use registry::ProfileRegistry;
pub use types::{
    CanonicalSignalStrength, Correction, CorrectionKind, DecodeEvent, Decoded, DecoderError,
    ProfileKey, RawStatusMessage, Result, FIELD_COUNT, PAYLOAD_LEN,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
