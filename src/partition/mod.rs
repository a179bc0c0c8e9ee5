//! Partition Module
//!
//! Key-hashed shards of the log, each backed by one append-only file.
//!
//! ## Responsibilities
//! - Map a key to a partition index (FNV-1a, no coordination)
//! - Pair every partition file with its own RwLock
//! - Append whole frames under the write lock, read under the read lock
//!
//! ## Layout
//! ```text
//!            key ──► fnv1a_32(key) % N
//!                          │
//!      ┌───────────────────┼───────────────────┐
//!      ▼                   ▼                   ▼
//! ┌──────────┐       ┌──────────┐        ┌──────────┐
//! │ 0.bilog  │       │ 1.bilog  │  ...   │N-1.bilog │
//! │ RwLock   │       │ RwLock   │        │ RwLock   │
//! └──────────┘       └──────────┘        └──────────┘
//! ```

mod handle;
mod router;

pub use handle::Partition;
pub use router::{fnv1a_32, route, PartitionRouter};
