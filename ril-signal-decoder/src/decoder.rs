//! Main decoder API
//!
//! [`SignalDecoder`] is what a dispatcher holds. It binds one profile from a
//! [`ProfileRegistry`] at construction time, reads payloads with a
//! [`RawMessageReader`] and reports what happened to an optional
//! [`DecodeObserver`].

use crate::config::DecoderConfig;
use crate::profiles::DecodeFn;
use crate::reader::{RawMessageReader, WireByteOrder};
use crate::registry::ProfileRegistry;
use crate::types::{
    CanonicalSignalStrength, DecodeEvent, Decoded, ProfileKey, RawStatusMessage, Result,
};

/// Receives structured decode events
///
/// Events are emitted by the decoder after the pure profile function has
/// returned, never from inside it.
pub trait DecodeObserver: Send + Sync {
    fn on_event(&self, event: &DecodeEvent);
}

impl<F> DecodeObserver for F
where
    F: Fn(&DecodeEvent) + Send + Sync,
{
    fn on_event(&self, event: &DecodeEvent) {
        self(event)
    }
}

/// The main decoder struct - entry point for all decoding operations
pub struct SignalDecoder {
    profile: ProfileKey,
    decode: DecodeFn,
    byte_order: WireByteOrder,
    observer: Option<Box<dyn DecodeObserver>>,
}

impl SignalDecoder {
    /// Build a decoder for the profile named in `config`
    ///
    /// # Returns
    /// * `Err(DecoderError::UnknownProfile)` if the registry has no such profile
    ///
    /// # Example
    /// ```no_run
    /// use ril_signal_decoder::{DecoderConfig, ProfileRegistry, SignalDecoder};
    ///
    /// let registry = ProfileRegistry::builtin();
    /// let decoder = SignalDecoder::new(&registry, &DecoderConfig::new()).unwrap();
    /// let signal = decoder.decode_payload(&[0u8; 28]).unwrap();
    /// assert_eq!(signal.metrics(), [0; 7]);
    /// ```
    pub fn new(registry: &ProfileRegistry, config: &DecoderConfig) -> Result<Self> {
        let profile = config.profile_key();
        let decode = registry.get(&profile)?;
        log::info!(
            "Signal decoder using profile {} ({:?} byte order)",
            profile,
            config.byte_order
        );

        Ok(Self {
            profile,
            decode,
            byte_order: config.byte_order,
            observer: None,
        })
    }

    /// Attach an observer that receives every decode event
    pub fn with_observer(mut self, observer: impl DecodeObserver + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Profile selected for this decoder
    pub fn profile(&self) -> &ProfileKey {
        &self.profile
    }

    pub fn byte_order(&self) -> WireByteOrder {
        self.byte_order
    }

    /// Decode an already-parsed message. Never fails.
    pub fn decode_message(&self, raw: &RawStatusMessage) -> CanonicalSignalStrength {
        self.decode_detailed(raw).signal
    }

    /// Like [`Self::decode_message`], also returning the corrections applied
    pub fn decode_detailed(&self, raw: &RawStatusMessage) -> Decoded {
        let decoded = (self.decode)(raw);

        if let Some(observer) = &self.observer {
            for correction in &decoded.corrections {
                observer.on_event(&DecodeEvent::Corrected {
                    profile: self.profile.clone(),
                    correction: *correction,
                });
            }
            observer.on_event(&DecodeEvent::Decoded {
                profile: self.profile.clone(),
                raw: *raw,
                signal: decoded.signal,
            });
        }

        decoded
    }

    /// Read the payload at the start of `payload` without decoding it
    pub fn read_payload(&self, payload: &[u8]) -> Result<RawStatusMessage> {
        self.read_payload_at(payload, 0)
    }

    /// Read the payload starting `offset` bytes into `capture`
    ///
    /// Failure events report `offset` relative to the start of `capture`.
    pub fn read_payload_at(&self, capture: &[u8], offset: usize) -> Result<RawStatusMessage> {
        let mut reader = RawMessageReader::at(capture, offset, self.byte_order);
        self.read(&mut reader)
    }

    /// Decode the payload at the start of `payload`
    ///
    /// Bytes past the first 28 are ignored. A short payload fails with
    /// [`crate::DecoderError::Underflow`] and produces no descriptor.
    pub fn decode_payload(&self, payload: &[u8]) -> Result<CanonicalSignalStrength> {
        let raw = self.read_payload(payload)?;
        Ok(self.decode_message(&raw))
    }

    /// Decode a capture of back-to-back payloads
    ///
    /// A trailing partial record yields a single underflow error and ends
    /// the iteration.
    pub fn decode_records<'a>(&'a self, capture: &'a [u8]) -> RecordIterator<'a> {
        RecordIterator {
            decoder: self,
            reader: RawMessageReader::with_byte_order(capture, self.byte_order),
            finished: false,
        }
    }

    fn read(&self, reader: &mut RawMessageReader<'_>) -> Result<RawStatusMessage> {
        let offset = reader.position();
        reader.read_message().map_err(|e| {
            if let Some(observer) = &self.observer {
                observer.on_event(&DecodeEvent::Failed {
                    profile: self.profile.clone(),
                    offset,
                    reason: e.to_string(),
                });
            }
            e
        })
    }
}

/// Iterator over the descriptors in a multi-record capture
pub struct RecordIterator<'a> {
    decoder: &'a SignalDecoder,
    reader: RawMessageReader<'a>,
    finished: bool,
}

impl<'a> Iterator for RecordIterator<'a> {
    type Item = Result<CanonicalSignalStrength>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.reader.remaining() == 0 {
            return None;
        }

        match self.decoder.read(&mut self.reader) {
            Ok(raw) => Some(Ok(self.decoder.decode_message(&raw))),
            Err(e) => {
                // The cursor is unusable after a failed read
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}
