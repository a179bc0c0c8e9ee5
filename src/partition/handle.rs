//! Partition Handle
//!
//! One append-only file and the lock that guards it.

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;

use crate::error::Result;

/// A single partition of the log
///
/// ## Concurrency:
/// - `file`: Protected by RwLock, there is no other way to reach it
///   - `append()` takes the write lock (one writer at a time)
///   - `read_at()` takes the read lock (many concurrent readers)
/// - Reads are positional, so readers never move a shared cursor
pub struct Partition {
    /// Position of this partition in the store
    index: usize,

    /// Backing file path
    path: PathBuf,

    /// File opened for read + append
    file: RwLock<File>,
}

impl Partition {
    /// Open (or create) the file backing partition `index`
    pub fn open(path: &Path, index: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .append(true)
            .open(path)?;

        tracing::debug!("Opened partition {} at {}", index, path.display());

        Ok(Self {
            index,
            path: path.to_path_buf(),
            file: RwLock::new(file),
        })
    }

    /// Append an encoded frame to the end of the file
    ///
    /// The whole buffer goes out in one `write_all` while the write lock is
    /// held, so frames from concurrent appenders never interleave.
    pub fn append(&self, frame: &[u8]) -> Result<usize> {
        let mut file = self.file.write();
        file.write_all(frame)?;

        tracing::debug!("Appended {} bytes to partition {}", frame.len(), self.index);
        Ok(frame.len())
    }

    /// Read up to `buf.len()` bytes starting at `offset`
    ///
    /// Returns the number of bytes read. Fewer than `buf.len()` means EOF
    /// was reached, which is not an error.
    pub fn read_at(&self, offset: u64, buf: &mut [u8]) -> Result<usize> {
        let file = self.file.read();
        let n = read_fully_at(&file, offset, buf)?;

        tracing::debug!(
            "Read {} bytes from partition {} at offset {}",
            n,
            self.index,
            offset
        );
        Ok(n)
    }

    /// Current size of the partition file in bytes
    pub fn size(&self) -> Result<u64> {
        let file = self.file.read();
        Ok(file.metadata()?.len())
    }

    /// Get the partition index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Get the backing file path
    pub fn path(&self) -> &Path {
        &self.path
    }
}

// =============================================================================
// Private Helpers
// =============================================================================

/// Fill `buf` from `offset`, stopping early only at EOF
fn read_fully_at(file: &File, offset: u64, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match read_at(file, &mut buf[filled..], offset + filled as u64) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

#[cfg(unix)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::unix::fs::FileExt;
    file.read_at(buf, offset)
}

#[cfg(windows)]
fn read_at(file: &File, buf: &mut [u8], offset: u64) -> io::Result<usize> {
    use std::os::windows::fs::FileExt;
    file.seek_read(buf, offset)
}
