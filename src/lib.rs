//! # logstore
//!
//! A minimal append-only log storage engine with:
//! - Key-hashed partitioning (FNV-1a) across N files
//! - Length-prefixed, CRC32-checked frames
//! - Per-partition single-writer/multi-reader locking
//! - Recovery of every message by sequential scan
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                         LogStore                             │
//! │           append(key, payload) / read / unmarshal            │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Router    │          │    Frame    │
//!   │  (FNV-1a)   │          │ (len + CRC) │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          └───────────┬────────────┘
//!                      ▼
//!             ┌─────────────────┐
//!             │   Partitions    │
//!             │ (RwLock<File>)  │
//!             └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod frame;
pub mod partition;
pub mod store;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{LogStoreError, Result};
pub use config::Config;
pub use frame::Frame;
pub use partition::Partition;
pub use store::LogStore;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of logstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
