//! Decoding profile registry
//!
//! Maps a `(vendor, firmware)` pair to the pure function that decodes that
//! firmware's signal-strength responses. A profile is chosen once, when the
//! decoder is configured, instead of being resolved per response.

use crate::profiles::{self, DecodeFn};
use crate::types::{DecoderError, ProfileKey, Result};
use std::collections::HashMap;
use std::fmt;

/// Registry of vendor/firmware decoding profiles
#[derive(Clone, Default)]
pub struct ProfileRegistry {
    profiles: HashMap<ProfileKey, DecodeFn>,
}

impl fmt::Debug for ProfileRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileRegistry")
            .field("profiles", &self.keys())
            .finish()
    }
}

impl ProfileRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Create a registry holding every built-in profile
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(profiles::samsung_apollo_key(), profiles::decode_samsung_apollo);
        registry.register(profiles::aosp_stock_key(), profiles::decode_aosp_stock);
        registry
    }

    /// Add a profile, replacing any existing one with the same key
    pub fn register(&mut self, key: ProfileKey, decode: DecodeFn) {
        log::debug!("Registering decoding profile {}", key);
        if self.profiles.insert(key.clone(), decode).is_some() {
            log::warn!("Decoding profile {} replaced", key);
        }
    }

    /// Look up the decode function for a profile
    pub fn get(&self, key: &ProfileKey) -> Result<DecodeFn> {
        self.profiles
            .get(key)
            .copied()
            .ok_or_else(|| DecoderError::UnknownProfile {
                vendor: key.vendor.clone(),
                firmware: key.firmware.clone(),
            })
    }

    pub fn contains(&self, key: &ProfileKey) -> bool {
        self.profiles.contains_key(key)
    }

    /// All registered profile keys, sorted
    pub fn keys(&self) -> Vec<ProfileKey> {
        let mut keys: Vec<ProfileKey> = self.profiles.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
