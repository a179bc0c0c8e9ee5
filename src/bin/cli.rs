//! logstore CLI
//!
//! Command-line interface for appending to and inspecting a local log store.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use logstore::{Config, Frame, LogStore};
use tracing_subscriber::{fmt, EnvFilter};

/// logstore CLI
#[derive(Parser, Debug)]
#[command(name = "logstore-cli")]
#[command(about = "CLI for the logstore append-only log")]
#[command(version)]
struct Args {
    /// Data directory
    #[arg(short, long, default_value = "./logstore_data")]
    data_dir: PathBuf,

    /// Number of partitions
    #[arg(short, long, default_value = "10")]
    partitions: usize,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append a payload under a key
    Append {
        /// Routing key
        key: String,

        /// Payload (stored as UTF-8 bytes)
        payload: String,
    },

    /// Read raw bytes from a partition
    Read {
        /// Partition index
        partition: usize,

        /// Byte offset to start at
        #[arg(short, long, default_value = "0")]
        offset: u64,

        /// Maximum number of bytes to read
        #[arg(short, long, default_value = "4096")]
        len: usize,
    },

    /// Decode and print every frame in a partition
    Dump {
        /// Partition index
        partition: usize,
    },

    /// Show which partition a key routes to
    Route {
        /// Routing key
        key: String,
    },
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,logstore=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    tracing::info!("logstore CLI v{}", logstore::VERSION);

    let config = Config::builder()
        .data_dir(&args.data_dir)
        .num_partitions(args.partitions)
        .build();

    let store = match LogStore::open(config) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("Failed to open log store: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&store, args.command) {
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

fn run(store: &LogStore, command: Commands) -> logstore::Result<()> {
    match command {
        Commands::Append { key, payload } => {
            let n = store.append(&key, payload.as_bytes())?;
            println!("partition={} bytes_written={}", store.route(&key), n);
        }
        Commands::Read {
            partition,
            offset,
            len,
        } => {
            let mut buf = vec![0u8; len];
            let n = store.read(partition, offset, &mut buf)?;
            buf.truncate(n);

            println!("bytes_read={}", n);
            println!("{}", to_hex(&buf));

            // A read that doesn't start and end on frame boundaries won't decode
            match store.unmarshal(&buf) {
                Ok(frames) => frames.iter().for_each(print_frame),
                Err(e) => tracing::debug!("Buffer does not decode as frames: {}", e),
            }
        }
        Commands::Dump { partition } => {
            let frames = store.scan(partition)?;
            println!("partition={} frames={}", partition, frames.len());
            frames.iter().for_each(print_frame);
        }
        Commands::Route { key } => {
            println!("{}", store.route(&key));
        }
    }
    Ok(())
}

fn print_frame(frame: &Frame) {
    println!(
        "length={} checksum={:#010x} payload={}",
        frame.length,
        frame.checksum,
        String::from_utf8_lossy(&frame.payload)
    );
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
