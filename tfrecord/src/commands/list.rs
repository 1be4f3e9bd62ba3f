use std::io::Read;

use tfrecord_format::{checksum, frame_len, RecordReader};

use super::{finish, format_size, open_reader};
use crate::cli::ListArgs;
use crate::error::Result;

#[derive(Debug, PartialEq, Eq)]
struct Entry {
    index: u64,
    offset: u64,
    length: u64,
    crc: u32,
}

/// Advance past the next record and describe where it sat in the stream.
fn next_entry<R: Read>(reader: &mut RecordReader<R>) -> Option<Entry> {
    if !reader.advance() {
        return None;
    }
    let payload = reader.value().unwrap_or_default();
    let length = payload.len() as u64;
    Some(Entry {
        index: reader.records_read() - 1,
        offset: reader.position() - frame_len(length),
        length,
        crc: checksum(payload),
    })
}

pub fn run(args: ListArgs) -> Result<()> {
    let mut reader = open_reader(&args.file, &args.read)?;

    println!("{:>8}  {:>14}  {:>12}  {:>10}", "Index", "Offset", "Length", "CRC");
    println!("{}", "-".repeat(50));

    while let Some(entry) = next_entry(&mut reader) {
        println!(
            "{:>8}  {:>14}  {:>12}  {:#010x}",
            entry.index,
            entry.offset,
            format_size(entry.length),
            entry.crc,
        );
    }

    finish(&args.file, reader)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ReadArgs;
    use crate::error::Error;
    use std::io::Cursor;
    use tfrecord_format::RecordWriter;

    fn stream(records: &[&[u8]]) -> Vec<u8> {
        let mut writer = RecordWriter::new(Vec::new());
        for record in records {
            writer.write_record(record).unwrap();
        }
        writer.into_inner()
    }

    #[test]
    fn entries_point_at_frame_starts() {
        let data = stream(&[b"Hello", b"", b"World!"]);
        let mut reader = RecordReader::new(Cursor::new(data), 0, true);

        let entries: Vec<_> = std::iter::from_fn(|| next_entry(&mut reader)).collect();
        assert_eq!(
            entries,
            vec![
                Entry {
                    index: 0,
                    offset: 0,
                    length: 5,
                    crc: 0xbeb9_ee8a,
                },
                Entry {
                    index: 1,
                    offset: 21,
                    length: 0,
                    crc: checksum(b""),
                },
                Entry {
                    index: 2,
                    offset: 37,
                    length: 6,
                    crc: 0x22ba_bbb2,
                },
            ]
        );
        assert!(reader.error().is_none());
    }

    #[test]
    fn reports_corruption_after_listing() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("in.tfrecord");
        let mut data = stream(&[b"Hello", b"World!"]);
        data[21 + 13] ^= 0x01;
        std::fs::write(&file, data).unwrap();

        let err = run(ListArgs {
            file,
            read: ReadArgs::default(),
        })
        .unwrap_err();
        match err {
            Error::ReadRecords { source, .. } => assert!(source.is_checksum()),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
