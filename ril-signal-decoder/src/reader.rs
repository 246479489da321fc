//! Raw message reader
//!
//! Sequential cursor over a response buffer. Each call to
//! [`RawMessageReader::read_message`] consumes one 28-byte payload of seven
//! signed 32-bit integers.

use crate::types::{DecoderError, RawStatusMessage, Result, FIELD_COUNT, PAYLOAD_LEN};
use byteorder::{BigEndian, ByteOrder, LittleEndian, NativeEndian, ReadBytesExt};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Byte order of the integers in a response payload
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WireByteOrder {
    /// Host byte order (what the modem transport delivers on-device)
    #[default]
    Native,
    Little,
    Big,
}

/// Cursor-based reader for signal-strength payloads
///
/// After an [`DecoderError::Underflow`] the reader is unusable: the caller
/// must abandon it instead of retrying on the same cursor.
pub struct RawMessageReader<'a> {
    cursor: Cursor<&'a [u8]>,
    byte_order: WireByteOrder,
}

impl<'a> RawMessageReader<'a> {
    /// Create a reader starting at the beginning of `buf`, native byte order
    pub fn new(buf: &'a [u8]) -> Self {
        Self::with_byte_order(buf, WireByteOrder::Native)
    }

    pub fn with_byte_order(buf: &'a [u8], byte_order: WireByteOrder) -> Self {
        Self {
            cursor: Cursor::new(buf),
            byte_order,
        }
    }

    /// Create a reader whose cursor starts at `offset`
    pub fn at(buf: &'a [u8], offset: usize, byte_order: WireByteOrder) -> Self {
        let mut reader = Self::with_byte_order(buf, byte_order);
        reader.cursor.set_position(offset as u64);
        reader
    }

    /// Current cursor position in bytes
    pub fn position(&self) -> usize {
        self.cursor.position() as usize
    }

    /// Bytes left between the cursor and the end of the buffer
    pub fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.position())
    }

    /// Read one payload, advancing the cursor by 28 bytes
    pub fn read_message(&mut self) -> Result<RawStatusMessage> {
        let available = self.remaining();
        if available < PAYLOAD_LEN {
            log::debug!(
                "Payload underflow at offset {}: {} of {} bytes",
                self.position(),
                available,
                PAYLOAD_LEN
            );
            return Err(DecoderError::Underflow {
                needed: PAYLOAD_LEN,
                available,
            });
        }

        let fields = match self.byte_order {
            WireByteOrder::Native => self.read_fields::<NativeEndian>()?,
            WireByteOrder::Little => self.read_fields::<LittleEndian>()?,
            WireByteOrder::Big => self.read_fields::<BigEndian>()?,
        };

        Ok(RawStatusMessage::new(fields))
    }

    fn read_fields<B: ByteOrder>(&mut self) -> Result<[i32; FIELD_COUNT]> {
        let mut fields = [0i32; FIELD_COUNT];
        for field in fields.iter_mut() {
            *field = self.cursor.read_i32::<B>()?;
        }
        Ok(fields)
    }
}
