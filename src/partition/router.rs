//! Partition Router
//!
//! Deterministic key → partition assignment.

use std::num::NonZeroUsize;

/// FNV-1a 32-bit offset basis
const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;

/// FNV-1a 32-bit prime
const FNV_PRIME: u32 = 0x0100_0193;

/// Hash bytes with 32-bit FNV-1a
pub fn fnv1a_32(bytes: &[u8]) -> u32 {
    bytes.iter().fold(FNV_OFFSET_BASIS, |hash, &b| {
        (hash ^ b as u32).wrapping_mul(FNV_PRIME)
    })
}

/// Partition index for `key` among `num_partitions` partitions
///
/// Always in `[0, num_partitions)`. Changing the partition count remaps keys;
/// nothing rebalances data already written.
pub fn route(key: &str, num_partitions: NonZeroUsize) -> usize {
    fnv1a_32(key.as_bytes()) as usize % num_partitions.get()
}

/// Routes keys for a fixed partition count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartitionRouter {
    num_partitions: NonZeroUsize,
}

impl PartitionRouter {
    pub fn new(num_partitions: NonZeroUsize) -> Self {
        Self { num_partitions }
    }

    /// Partition index for `key`
    pub fn route(&self, key: &str) -> usize {
        route(key, self.num_partitions)
    }

    pub fn num_partitions(&self) -> usize {
        self.num_partitions.get()
    }
}
