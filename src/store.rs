//! Log Store Module
//!
//! Owns the partitions and ties routing, framing and file I/O together.
//!
//! ## Responsibilities
//! - Create the data directory and every partition file on open
//! - Route appends by key and frame the payload
//! - Bounds-checked raw reads and frame decoding

use std::fs;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::config::Config;
use crate::error::{LogStoreError, Result};
use crate::frame::{self, Frame};
use crate::partition::{Partition, PartitionRouter};

/// Append-only log split across key-hashed partitions
///
/// ## Concurrency Model: per-partition Single-Writer / Multiple-Reader
///
/// - **Appends**: Serialized per partition by that partition's write lock
/// - **Reads**: Concurrent with each other, excluded by an append to the
///   same partition
/// - Partitions are independent; there is no store-wide lock
///
/// The partition list is fixed at open, so `LogStore` can be shared
/// across threads behind an `Arc` with no further synchronization.
pub struct LogStore {
    /// Store configuration
    config: Config,

    /// Key → partition index
    router: PartitionRouter,

    /// Partition handles, position == index
    partitions: Vec<Partition>,
}

impl LogStore {
    /// Open or create a store with the given config
    ///
    /// On startup:
    /// 1. Validate the partition count
    /// 2. Create the data directory if it doesn't exist
    /// 3. Open/create one file per partition
    ///
    /// Any failure aborts the open; there is no partially set up store.
    pub fn open(config: Config) -> Result<Self> {
        let num_partitions = NonZeroUsize::new(config.num_partitions).ok_or_else(|| {
            LogStoreError::Config("num_partitions must be at least 1".to_string())
        })?;

        let partitions = Self::setup(&config)?;

        tracing::info!(
            "Log store ready at {} with {} partitions",
            config.data_dir.display(),
            partitions.len()
        );

        Ok(Self {
            router: PartitionRouter::new(num_partitions),
            config,
            partitions,
        })
    }

    /// Open with a path and partition count (convenience method)
    ///
    /// Uses default config otherwise
    pub fn open_path(path: &Path, num_partitions: usize) -> Result<Self> {
        let config = Config::builder()
            .data_dir(path)
            .num_partitions(num_partitions)
            .build();
        Self::open(config)
    }

    /// Append `payload` to the partition `key` routes to
    ///
    /// Returns the number of bytes written (frame header included)
    pub fn append(&self, key: &str, payload: &[u8]) -> Result<usize> {
        let index = self.router.route(key);
        let encoded = frame::encode(payload);
        self.partitions[index].append(&encoded)
    }

    /// Get a partition by index
    pub fn partition(&self, index: usize) -> Result<&Partition> {
        self.partitions
            .get(index)
            .ok_or(LogStoreError::NoPartition {
                index,
                count: self.partitions.len(),
            })
    }

    /// Read raw bytes from a partition starting at `offset`
    ///
    /// Returns the number of bytes read; short at end of file
    pub fn read(&self, index: usize, offset: u64, buf: &mut [u8]) -> Result<usize> {
        self.partition(index)?.read_at(offset, buf)
    }

    /// Decode a buffer of concatenated frames
    pub fn unmarshal(&self, buf: &[u8]) -> Result<Vec<Frame>> {
        frame::decode(buf)
    }

    /// Read and decode every frame in a partition, in file order
    ///
    /// An empty partition yields no frames.
    pub fn scan(&self, index: usize) -> Result<Vec<Frame>> {
        let partition = self.partition(index)?;

        let size = partition.size()?;
        if size == 0 {
            return Ok(Vec::new());
        }

        let len = usize::try_from(size).map_err(|_| {
            LogStoreError::Config(format!(
                "partition {} is too large to scan into memory ({} bytes)",
                index, size
            ))
        })?;
        let mut buf = vec![0u8; len];
        let n = partition.read_at(0, &mut buf)?;
        buf.truncate(n);

        frame::decode(&buf)
    }

    /// Partition index `key` routes to
    pub fn route(&self, key: &str) -> usize {
        self.router.route(key)
    }

    // =========================================================================
    // Accessors (for testing and debugging)
    // =========================================================================

    /// Get the number of partitions
    pub fn num_partitions(&self) -> usize {
        self.partitions.len()
    }

    /// Get all partitions, ordered by index
    pub fn partitions(&self) -> &[Partition] {
        &self.partitions
    }

    /// Get the data directory path
    pub fn data_dir(&self) -> &Path {
        &self.config.data_dir
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    // =========================================================================
    // Private Helpers
    // =========================================================================

    /// Make sure the data directory and every partition file exist
    fn setup(config: &Config) -> Result<Vec<Partition>> {
        fs::create_dir_all(&config.data_dir)?;

        (0..config.num_partitions)
            .map(|index| Partition::open(&config.partition_path(index), index))
            .collect()
    }
}
