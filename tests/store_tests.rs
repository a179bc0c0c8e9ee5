//! Tests for LogStore
//!
//! These tests verify:
//! - Setup of the data directory and partition files
//! - Append → Read → Unmarshal round trips
//! - Partition bounds checks
//! - Concurrent appends through the store
//! - Corruption detection on data read back from disk

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::{Read, Seek, SeekFrom, Write};
use std::sync::Arc;
use std::thread;

use logstore::frame::HEADER_SIZE;
use logstore::{Config, LogStore, LogStoreError};
use tempfile::TempDir;
use uuid::Uuid;

// =============================================================================
// Helper Functions
// =============================================================================

fn setup_temp_store(num_partitions: usize) -> (TempDir, LogStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = LogStore::open_path(temp_dir.path(), num_partitions).unwrap();
    (temp_dir, store)
}

// =============================================================================
// Setup Tests
// =============================================================================

#[test]
fn test_open_creates_directory_and_files() {
    let temp_dir = TempDir::new().unwrap();
    let data_dir = temp_dir.path().join("nested").join("logs");

    let config = Config::builder().data_dir(&data_dir).num_partitions(4).build();
    let store = LogStore::open(config).unwrap();

    assert!(data_dir.exists());
    for i in 0..4 {
        assert!(data_dir.join(format!("{}.bilog", i)).exists());
    }
    assert!(!data_dir.join("4.bilog").exists());
    assert_eq!(store.num_partitions(), 4);
    assert_eq!(store.data_dir(), data_dir.as_path());
}

#[test]
fn test_open_with_custom_extension() {
    let temp_dir = TempDir::new().unwrap();
    let config = Config::builder()
        .data_dir(temp_dir.path())
        .num_partitions(2)
        .file_extension("log")
        .build();

    let store = LogStore::open(config).unwrap();

    assert!(temp_dir.path().join("0.log").exists());
    assert!(temp_dir.path().join("1.log").exists());
    assert_eq!(store.config().file_extension, "log");
}

#[test]
fn test_open_zero_partitions_fails() {
    let temp_dir = TempDir::new().unwrap();

    let result = LogStore::open_path(temp_dir.path(), 0);
    assert!(matches!(result, Err(LogStoreError::Config(_))));
}

#[test]
fn test_open_fails_when_data_dir_is_a_file() {
    let temp_dir = TempDir::new().unwrap();
    let file_path = temp_dir.path().join("not-a-dir");
    std::fs::write(&file_path, b"x").unwrap();

    let result = LogStore::open_path(&file_path, 2);
    assert!(matches!(result, Err(LogStoreError::Io(_))));
}

#[test]
fn test_partitions_are_indexed_by_position() {
    let (_temp, store) = setup_temp_store(5);

    for (i, partition) in store.partitions().iter().enumerate() {
        assert_eq!(partition.index(), i);
    }
}

// =============================================================================
// Append / Read / Unmarshal Tests
// =============================================================================

#[test]
fn test_append_read_unmarshal_hello() {
    let (_temp, store) = setup_temp_store(10);

    let written = store.append("a", b"hello").unwrap();
    assert_eq!(written, HEADER_SIZE + 5);

    let mut buf = vec![0u8; 1024];
    let n = store.read(store.route("a"), 0, &mut buf).unwrap();
    assert_eq!(n, written);

    let frames = store.unmarshal(&buf[..n]).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(&frames[0].payload[..], b"hello");
    assert_eq!(frames[0].length, 9);
}

#[test]
fn test_append_lands_in_routed_partition_only() {
    let (_temp, store) = setup_temp_store(8);
    let target = store.route("orders");

    store.append("orders", b"order-1").unwrap();

    for partition in store.partitions() {
        let expected = if partition.index() == target { 19 } else { 0 };
        assert_eq!(partition.size().unwrap(), expected);
    }
}

#[test]
fn test_same_key_keeps_append_order() {
    let (_temp, store) = setup_temp_store(4);

    for i in 0..20 {
        store.append("user-42", format!("event-{}", i).as_bytes()).unwrap();
    }

    let frames = store.scan(store.route("user-42")).unwrap();
    assert_eq!(frames.len(), 20);
    for (i, frame) in frames.iter().enumerate() {
        assert_eq!(frame.payload, format!("event-{}", i).as_bytes());
    }
}

#[test]
fn test_append_empty_payload() {
    let (_temp, store) = setup_temp_store(3);

    assert_eq!(store.append("k", b"").unwrap(), HEADER_SIZE);

    let frames = store.scan(store.route("k")).unwrap();
    assert_eq!(frames.len(), 1);
    assert!(frames[0].payload.is_empty());
}

#[test]
fn test_read_at_frame_offset() {
    let (_temp, store) = setup_temp_store(1);

    let first = store.append("k", b"first").unwrap();
    store.append("k", b"second").unwrap();

    let mut buf = vec![0u8; 256];
    let n = store.read(0, first as u64, &mut buf).unwrap();

    let frames = store.unmarshal(&buf[..n]).unwrap();
    assert_eq!(frames.len(), 1);
    assert_eq!(&frames[0].payload[..], b"second");
}

#[test]
fn test_scan_empty_partition() {
    let (_temp, store) = setup_temp_store(3);

    assert!(store.scan(2).unwrap().is_empty());
}

#[test]
fn test_reopen_preserves_data() {
    let temp_dir = TempDir::new().unwrap();
    let keys: Vec<String> = (0..30).map(|_| Uuid::new_v4().to_string()).collect();

    {
        let store = LogStore::open_path(temp_dir.path(), 5).unwrap();
        for key in &keys {
            store.append(key, key.as_bytes()).unwrap();
        }
    }

    let store = LogStore::open_path(temp_dir.path(), 5).unwrap();
    let mut recovered = HashSet::new();
    for i in 0..store.num_partitions() {
        for frame in store.scan(i).unwrap() {
            recovered.insert(String::from_utf8(frame.payload.to_vec()).unwrap());
        }
    }

    let expected: HashSet<String> = keys.into_iter().collect();
    assert_eq!(recovered, expected);
}

// =============================================================================
// Bounds Tests
// =============================================================================

#[test]
fn test_partition_bounds() {
    let (_temp, store) = setup_temp_store(10);

    assert_eq!(store.partition(9).unwrap().index(), 9);
    assert!(matches!(
        store.partition(10),
        Err(LogStoreError::NoPartition { index: 10, count: 10 })
    ));
    assert!(matches!(
        store.partition(usize::MAX),
        Err(LogStoreError::NoPartition { .. })
    ));
}

#[test]
fn test_read_bounds() {
    let (_temp, store) = setup_temp_store(3);
    let mut buf = [0u8; 16];

    assert_eq!(store.read(2, 0, &mut buf).unwrap(), 0);
    assert!(matches!(
        store.read(3, 0, &mut buf),
        Err(LogStoreError::NoPartition { index: 3, .. })
    ));
}

#[test]
fn test_scan_bounds() {
    let (_temp, store) = setup_temp_store(3);

    assert!(matches!(store.scan(3), Err(LogStoreError::NoPartition { .. })));
}

// =============================================================================
// Unmarshal Tests
// =============================================================================

#[test]
fn test_unmarshal_short_buffer() {
    let (_temp, store) = setup_temp_store(1);

    assert!(matches!(
        store.unmarshal(&[0u8; 5]),
        Err(LogStoreError::ShortPayload { len: 5 })
    ));
}

#[test]
fn test_unmarshal_partial_read() {
    let (_temp, store) = setup_temp_store(1);
    store.append("k", b"a payload longer than the read buffer").unwrap();

    let mut buf = [0u8; 20];
    let n = store.read(0, 0, &mut buf).unwrap();
    assert_eq!(n, 20);

    assert!(matches!(
        store.unmarshal(&buf[..n]),
        Err(LogStoreError::TruncatedFrame { .. })
    ));
}

// =============================================================================
// Corruption Tests
// =============================================================================

#[test]
fn test_scan_detects_bit_flip_on_disk() {
    let (temp_dir, store) = setup_temp_store(1);
    store.append("k", b"intact").unwrap();
    store.append("k", b"will be corrupted").unwrap();

    let path = temp_dir.path().join("0.bilog");
    let flip_at = (HEADER_SIZE + 6 + HEADER_SIZE + 3) as u64;
    {
        let mut file = OpenOptions::new().read(true).write(true).open(&path).unwrap();
        let mut byte = [0u8; 1];
        file.seek(SeekFrom::Start(flip_at)).unwrap();
        file.read_exact(&mut byte).unwrap();
        byte[0] ^= 0x10;
        file.seek(SeekFrom::Start(flip_at)).unwrap();
        file.write_all(&byte).unwrap();
    }

    match store.scan(0) {
        Err(LogStoreError::ChecksumMismatch { offset, .. }) => {
            assert_eq!(offset, HEADER_SIZE + 6);
        }
        other => panic!("Expected ChecksumMismatch, got {:?}", other),
    }
}

// =============================================================================
// Concurrency Tests
// =============================================================================

#[test]
fn test_concurrent_appends_same_key() {
    let (_temp, store) = setup_temp_store(4);
    let store = Arc::new(store);
    let num_threads = 16;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                store
                    .append("shared-key", format!("payload-{}", t).as_bytes())
                    .unwrap();
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let frames = store.scan(store.route("shared-key")).unwrap();
    assert_eq!(frames.len(), num_threads);

    let got: HashSet<String> = frames
        .iter()
        .map(|f| String::from_utf8(f.payload.to_vec()).unwrap())
        .collect();
    let expected: HashSet<String> = (0..num_threads).map(|t| format!("payload-{}", t)).collect();
    assert_eq!(got, expected);
}

#[test]
fn test_concurrent_appends_across_partitions() {
    let (_temp, store) = setup_temp_store(6);
    let store = Arc::new(store);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            thread::spawn(move || {
                let mut written = Vec::new();
                for _ in 0..50 {
                    let key = Uuid::new_v4().to_string();
                    store.append(&key, key.as_bytes()).unwrap();
                    written.push(key);
                }
                written
            })
        })
        .collect();

    let mut expected = HashSet::new();
    for handle in handles {
        expected.extend(handle.join().unwrap());
    }

    let mut total = 0;
    for i in 0..store.num_partitions() {
        for frame in store.scan(i).unwrap() {
            let key = String::from_utf8(frame.payload.to_vec()).unwrap();
            // Payload is its own key, so it must sit in the partition the key routes to
            assert_eq!(store.route(&key), i);
            assert!(expected.contains(&key));
            total += 1;
        }
    }
    assert_eq!(total, 400);
}
