//! Transport-Frame für Vendor-Model Nachrichten
//!
//! Die Firmware transportiert Mesh-Nachrichten über MQTT. Ein Frame trägt
//! Opcode, Adressen und Payload:
//!
//! | Offset | Länge  | Inhalt                    |
//! |--------|--------|---------------------------|
//! | 0      | 1      | Opcode                    |
//! | 1      | 2      | Quell-Adresse (BE)        |
//! | 3      | 2      | Ziel-Adresse (BE)         |
//! | 5      | 0..=32 | Payload                   |

use heapless::Vec;

use crate::types::InboundMessage;

pub const FRAME_HEADER_LEN: usize = 5;
pub const MAX_FRAME_PAYLOAD: usize = 32;
pub const MAX_FRAME_LEN: usize = FRAME_HEADER_LEN + MAX_FRAME_PAYLOAD;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameError {
    /// Weniger als 5 Bytes Header
    TooShort,
    PayloadTooLong,
    BufferTooSmall,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeshFrame {
    pub opcode: u8,
    pub source: u16,
    pub destination: u16,
    pub payload: Vec<u8, MAX_FRAME_PAYLOAD>,
}

impl MeshFrame {
    pub fn new(
        opcode: u8,
        source: u16,
        destination: u16,
        payload: &[u8],
    ) -> Result<Self, FrameError> {
        let payload = Vec::from_slice(payload).map_err(|_| FrameError::PayloadTooLong)?;
        Ok(Self {
            opcode,
            source,
            destination,
            payload,
        })
    }

    pub fn encoded_len(&self) -> usize {
        FRAME_HEADER_LEN + self.payload.len()
    }

    /// Schreibt den Frame in `buf` und gibt die Länge zurück
    pub fn encode(&self, buf: &mut [u8]) -> Result<usize, FrameError> {
        let len = self.encoded_len();
        if buf.len() < len {
            return Err(FrameError::BufferTooSmall);
        }

        buf[0] = self.opcode;
        buf[1..3].copy_from_slice(&self.source.to_be_bytes());
        buf[3..5].copy_from_slice(&self.destination.to_be_bytes());
        buf[FRAME_HEADER_LEN..len].copy_from_slice(&self.payload);
        Ok(len)
    }

    pub fn decode(bytes: &[u8]) -> Result<Self, FrameError> {
        if bytes.len() < FRAME_HEADER_LEN {
            return Err(FrameError::TooShort);
        }

        Self::new(
            bytes[0],
            u16::from_be_bytes([bytes[1], bytes[2]]),
            u16::from_be_bytes([bytes[3], bytes[4]]),
            &bytes[FRAME_HEADER_LEN..],
        )
    }

    pub fn as_inbound(&self) -> InboundMessage<'_> {
        InboundMessage {
            opcode: self.opcode,
            source: self.source,
            destination: self.destination,
            payload: &self.payload,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for FrameError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            FrameError::TooShort => defmt::write!(fmt, "frame too short"),
            FrameError::PayloadTooLong => defmt::write!(fmt, "payload too long"),
            FrameError::BufferTooSmall => defmt::write!(fmt, "buffer too small"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for MeshFrame {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(
            fmt,
            "MeshFrame {{ opcode: {=u8:#x}, src: {=u16:#x}, dst: {=u16:#x}, payload: {=[u8]:x} }}",
            self.opcode,
            self.source,
            self.destination,
            &self.payload[..]
        )
    }
}
