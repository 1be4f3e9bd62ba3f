//! End-to-end tests over files and arbitrary record sequences.

use std::fs::File;
use std::io::{BufReader, BufWriter, Cursor};
use std::path::Path;

use proptest::prelude::*;
use tempfile::TempDir;
use tfrecord_format::{frame_len, Error, ReaderOptions, RecordReader, RecordWriter};

fn write_all(records: &[Vec<u8>]) -> Vec<u8> {
    let mut writer = RecordWriter::new(Vec::new());
    for record in records {
        assert_eq!(writer.write_record(record).unwrap(), record.len());
    }
    writer.into_inner()
}

fn read_all(data: Vec<u8>, buffer_size: usize) -> Result<Vec<Vec<u8>>, Error> {
    RecordReader::new(Cursor::new(data), buffer_size, true)
        .records()
        .collect()
}

#[test]
fn reads_fixture() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/test.tfrecord");
    let file = File::open(path).unwrap();
    let mut reader = RecordReader::new(BufReader::new(file), 1000, true);

    let mut out = String::new();
    while reader.advance() {
        out.push_str(std::str::from_utf8(reader.value().unwrap()).unwrap());
    }
    assert!(reader.error().is_none());
    assert_eq!(out, "HelloWorldFromTensorflow");
    assert_eq!(reader.records_read(), 4);
}

#[test]
fn file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("roundtrip.tfrecord");
    let records: Vec<Vec<u8>> = vec![
        b"Hello".to_vec(),
        Vec::new(),
        vec![7u8; 4096],
        b"World!".to_vec(),
    ];

    {
        let mut writer = RecordWriter::new(BufWriter::new(File::create(&path).unwrap()));
        for record in &records {
            writer.write_record(record).unwrap();
        }
        writer.flush().unwrap();
    }

    let expected_len: u64 = records.iter().map(|r| frame_len(r.len() as u64)).sum();
    assert_eq!(std::fs::metadata(&path).unwrap().len(), expected_len);

    let file = BufReader::new(File::open(&path).unwrap());
    let options = ReaderOptions::new().with_buffer_size(64);
    let mut reader = RecordReader::with_options(file, options);
    let read: Vec<Vec<u8>> = reader.records().collect::<Result<_, _>>().unwrap();
    assert_eq!(read, records);
    assert_eq!(reader.position(), expected_len);
}

#[test]
fn truncation_at_frame_boundary_is_clean() {
    let records = vec![b"first".to_vec(), b"second".to_vec(), b"third".to_vec()];
    let data = write_all(&records);
    let boundary = (frame_len(5) + frame_len(6)) as usize;

    let read = read_all(data[..boundary].to_vec(), 16).unwrap();
    assert_eq!(read, records[..2].to_vec());
}

#[test]
fn truncation_inside_frame_is_fatal() {
    let records = vec![b"first".to_vec(), b"second".to_vec()];
    let data = write_all(&records);
    let first = frame_len(5) as usize;

    for cut in first + 1..data.len() {
        let mut reader = RecordReader::new(Cursor::new(data[..cut].to_vec()), 16, true);
        assert!(reader.advance(), "cut at {}", cut);
        assert_eq!(reader.value().unwrap(), b"first");
        assert!(!reader.advance(), "cut at {}", cut);
        let err = reader.error().unwrap();
        assert!(err.is_truncated(), "cut at {}: {}", cut, err);
        assert!(!err.is_checksum());
    }
}

#[test]
fn every_length_checksum_bit_is_checked() {
    let data = write_all(&[b"payload".to_vec()]);
    for byte in 8..12 {
        for bit in 0..8 {
            let mut corrupt = data.clone();
            corrupt[byte] ^= 1 << bit;
            let err = read_all(corrupt, 0).unwrap_err();
            assert!(err.is_checksum(), "byte {} bit {}", byte, bit);
        }
    }
}

#[test]
fn every_payload_bit_is_checked() {
    let payload = b"payload".to_vec();
    let data = write_all(&[payload.clone()]);
    for byte in 12..12 + payload.len() {
        for bit in 0..8 {
            let mut corrupt = data.clone();
            corrupt[byte] ^= 1 << bit;

            assert!(read_all(corrupt.clone(), 0).unwrap_err().is_checksum());

            let mut reader = RecordReader::new(Cursor::new(corrupt), 0, false);
            let value = reader.next_record().unwrap().unwrap().to_vec();
            assert_ne!(value, payload);
            assert_eq!(value.len(), payload.len());
        }
    }
}

#[test]
fn error_message_names_the_format() {
    let mut data = write_all(&[b"x".to_vec()]);
    data[12] ^= 0xff;
    let err = read_all(data, 0).unwrap_err();
    assert!(err.to_string().starts_with("checksum error in TFRecord payload"));
}

proptest! {
    #[test]
    fn roundtrip(
        records in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 0..20),
        buffer_size in 0usize..128,
    ) {
        let data = write_all(&records);
        let expected: u64 = records.iter().map(|r| frame_len(r.len() as u64)).sum();
        prop_assert_eq!(data.len() as u64, expected);
        prop_assert_eq!(read_all(data, buffer_size).unwrap(), records);
    }
}
