//! Frame codec
//!
//! Encoding and decoding functions for the on-disk frame format.

use bytes::{Buf, BufMut, Bytes, BytesMut};

use crate::error::{LogStoreError, Result};

use super::{Frame, CHECKSUM_SIZE, HEADER_SIZE, LENGTH_SIZE, MIN_DECODE_LEN};

/// The only buffer shorter than `MIN_DECODE_LEN` that decodes: one frame
/// with an empty payload (length 4, CRC32 of nothing is 0)
const EMPTY_FRAME: [u8; HEADER_SIZE] = [0, 0, 0, 0, 0, 0, 0, 4, 0, 0, 0, 0];

/// Encode a payload into a frame ready to append
///
/// Format: length (8, BE) + crc32 (4, BE) + payload
pub fn encode(payload: &[u8]) -> Bytes {
    let mut buf = BytesMut::with_capacity(HEADER_SIZE + payload.len());
    buf.put_u64((CHECKSUM_SIZE + payload.len()) as u64);
    buf.put_u32(crc32fast::hash(payload));
    buf.put_slice(payload);
    buf.freeze()
}

/// Decode a buffer of concatenated frames
///
/// The buffer must hold whole frames only: a partial header, a payload that
/// runs past the end, or a bad checksum fails the whole decode.
pub fn decode(buf: &[u8]) -> Result<Vec<Frame>> {
    if buf.len() < MIN_DECODE_LEN && buf != &EMPTY_FRAME[..] {
        tracing::warn!("Rejecting {} byte buffer: too short to decode", buf.len());
        return Err(LogStoreError::ShortPayload { len: buf.len() });
    }

    let mut frames = Vec::new();
    let mut pos = 0;

    while pos < buf.len() {
        let (frame, consumed) = decode_frame(&buf[pos..], pos).map_err(|e| {
            tracing::warn!("Decode failed after {} frames: {}", frames.len(), e);
            e
        })?;
        frames.push(frame);
        pos += consumed;
    }

    tracing::trace!("Decoded {} frames from {} bytes", frames.len(), buf.len());
    Ok(frames)
}

/// Decode the frame at the start of `bytes`
///
/// `offset` is where `bytes` begins in the caller's buffer (for errors).
/// Returns the frame and the number of bytes it occupied.
fn decode_frame(bytes: &[u8], offset: usize) -> Result<(Frame, usize)> {
    if bytes.len() < HEADER_SIZE {
        return Err(LogStoreError::TrailingBytes {
            offset,
            remaining: bytes.len(),
        });
    }

    let mut header = &bytes[..HEADER_SIZE];
    let length = header.get_u64();
    let checksum = header.get_u32();

    if length < CHECKSUM_SIZE as u64 {
        return Err(LogStoreError::InvalidFrameLength { offset, length });
    }

    // Everything after the length field belongs to this frame or later ones
    let remaining = bytes.len() - LENGTH_SIZE;
    if length > remaining as u64 {
        return Err(LogStoreError::TruncatedFrame {
            offset,
            declared: length,
            remaining,
        });
    }

    let end = LENGTH_SIZE + length as usize;
    let payload = &bytes[HEADER_SIZE..end];

    let actual = crc32fast::hash(payload);
    if actual != checksum {
        return Err(LogStoreError::ChecksumMismatch {
            offset,
            expected: checksum,
            actual,
        });
    }

    let frame = Frame {
        length,
        checksum,
        payload: Bytes::copy_from_slice(payload),
    };
    Ok((frame, end))
}
