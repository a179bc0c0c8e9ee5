//! Frame Module
//!
//! The self-describing unit every partition file is made of.
//!
//! ## Responsibilities
//! - Length-prefix each payload so a file can be scanned front to back
//! - CRC32 checksums for corruption detection
//! - Decode a buffer of concatenated frames, rejecting anything partial
//!
//! ## File Format
//! ```text
//! ┌──────────────────────────────────────────┐
//! │ Frame 1                                  │
//! │ ┌──────────┬─────────┬─────────────────┐ │
//! │ │ Len (8)  │ CRC (4) │ Payload         │ │
//! │ └──────────┴─────────┴─────────────────┘ │
//! ├──────────────────────────────────────────┤
//! │ Frame 2                                  │
//! │ ┌──────────┬─────────┬─────────────────┐ │
//! │ │ Len (8)  │ CRC (4) │ Payload         │ │
//! │ └──────────┴─────────┴─────────────────┘ │
//! └──────────────────────────────────────────┘
//! ```
//!
//! `Len` counts the CRC field plus the payload (`4 + payload.len()`), so a
//! frame occupies `8 + Len` bytes. Both header fields are big-endian. The CRC
//! covers the payload only. There is no file header, footer or magic number.

mod codec;

use bytes::Bytes;

pub use codec::{decode, encode};

// =============================================================================
// Layout Constants
// =============================================================================

/// Size of the length field
pub const LENGTH_SIZE: usize = 8;

/// Size of the checksum field
pub const CHECKSUM_SIZE: usize = 4;

/// Length (8) + Checksum (4) = 12 bytes
pub const HEADER_SIZE: usize = LENGTH_SIZE + CHECKSUM_SIZE;

/// Smallest buffer `decode` accepts: a header plus at least one payload byte
pub const MIN_DECODE_LEN: usize = HEADER_SIZE + 1;

// =============================================================================
// Frame
// =============================================================================

/// A single decoded message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Declared length: checksum field plus payload
    pub length: u64,

    /// CRC32 of the payload as stored on disk
    pub checksum: u32,

    /// The message bytes
    pub payload: Bytes,
}

impl Frame {
    /// Build a frame for `payload`, computing its length and checksum
    pub fn new(payload: impl Into<Bytes>) -> Self {
        let payload = payload.into();
        Self {
            length: (CHECKSUM_SIZE + payload.len()) as u64,
            checksum: crc32fast::hash(&payload),
            payload,
        }
    }

    /// Bytes this frame occupies on disk
    pub fn encoded_len(&self) -> usize {
        LENGTH_SIZE + self.length as usize
    }

    /// Re-check the stored checksum against the payload
    pub fn verify(&self) -> bool {
        crc32fast::hash(&self.payload) == self.checksum
    }
}
