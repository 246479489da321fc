//! Decoder configuration types
//!
//! The configuration selects the vendor/firmware profile and the payload byte
//! order. Both are fixed once a [`crate::SignalDecoder`] is built.

use crate::profiles::{APOLLO, SAMSUNG};
use crate::reader::WireByteOrder;
use crate::types::ProfileKey;
use serde::{Deserialize, Serialize};

/// Configuration for the decoder library
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Modem vendor name (e.g. "samsung")
    #[serde(default = "default_vendor")]
    pub vendor: String,

    /// Firmware profile within the vendor (e.g. "apollo")
    #[serde(default = "default_firmware")]
    pub firmware: String,

    /// Byte order of the response payload
    #[serde(default)]
    pub byte_order: WireByteOrder,
}

fn default_vendor() -> String {
    SAMSUNG.to_string()
}

fn default_firmware() -> String {
    APOLLO.to_string()
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            vendor: default_vendor(),
            firmware: default_firmware(),
            byte_order: WireByteOrder::default(),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: select the vendor/firmware profile
    pub fn with_profile(mut self, vendor: impl Into<String>, firmware: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self.firmware = firmware.into();
        self
    }

    /// Builder method: set the payload byte order
    pub fn with_byte_order(mut self, byte_order: WireByteOrder) -> Self {
        self.byte_order = byte_order;
        self
    }

    /// Key used to look the profile up in a registry
    pub fn profile_key(&self) -> ProfileKey {
        ProfileKey::new(self.vendor.clone(), self.firmware.clone())
    }
}
