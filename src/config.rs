//! Configuration for logstore
//!
//! Centralized configuration with sensible defaults.

use std::path::PathBuf;

/// Main configuration for a LogStore instance
#[derive(Debug, Clone)]
pub struct Config {
    // -------------------------------------------------------------------------
    // Storage Configuration
    // -------------------------------------------------------------------------
    /// Root directory for partition files
    /// Internal structure:
    ///   {data_dir}/
    ///     ├── 0.bilog
    ///     ├── 1.bilog
    ///     └── ...      (one file per partition)
    pub data_dir: PathBuf,

    /// Number of partitions keys are spread across (must be >= 1)
    pub num_partitions: usize,

    /// Suffix of every partition file, without the leading dot
    pub file_extension: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./logstore_data"),
            num_partitions: 10,
            file_extension: "bilog".to_string(),
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Path of the file backing partition `index`
    pub fn partition_path(&self, index: usize) -> PathBuf {
        self.data_dir
            .join(format!("{}.{}", index, self.file_extension))
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory (root for all partition files)
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Set the number of partitions
    pub fn num_partitions(mut self, count: usize) -> Self {
        self.config.num_partitions = count;
        self
    }

    /// Set the partition file extension
    pub fn file_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.file_extension = ext.into();
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
