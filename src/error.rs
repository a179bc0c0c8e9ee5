//! Error types for logstore
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using LogStoreError
pub type Result<T> = std::result::Result<T, LogStoreError>;

/// Unified error type for logstore operations
#[derive(Debug, Error)]
pub enum LogStoreError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    /// Errors from the underlying file, passed through unchanged
    #[error(transparent)]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Partition Errors
    // -------------------------------------------------------------------------
    #[error("Partition {index} doesn't exist (store has {count} partitions)")]
    NoPartition { index: usize, count: usize },

    // -------------------------------------------------------------------------
    // Frame Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Too short payload of messages: {len} bytes")]
    ShortPayload { len: usize },

    #[error(
        "Truncated frame at offset {offset}: declared length {declared}, only {remaining} bytes remain"
    )]
    TruncatedFrame {
        offset: usize,
        declared: u64,
        remaining: usize,
    },

    #[error("Checksum mismatch at offset {offset}: expected {expected:#010x}, got {actual:#010x}")]
    ChecksumMismatch {
        offset: usize,
        expected: u32,
        actual: u32,
    },

    #[error("Trailing bytes at offset {offset}: {remaining} bytes cannot hold a frame header")]
    TrailingBytes { offset: usize, remaining: usize },

    #[error("Invalid frame length {length} at offset {offset}")]
    InvalidFrameLength { offset: usize, length: u64 },

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
