//! Streaming codec for TFRecord files.
//!
//! A stream is zero or more frames laid end to end, with no separators or padding:
//!
//! ```text
//! [ length: u64 ][ masked crc32c(length): u32 ][ payload ][ masked crc32c(payload): u32 ]
//! ```
//!
//! ```
//! use std::io::Cursor;
//! use tfrecord_format::{RecordReader, RecordWriter};
//!
//! let mut writer = RecordWriter::new(Vec::new());
//! writer.write_record(b"Hello").unwrap();
//! writer.write_record(b"World!").unwrap();
//!
//! let mut reader = RecordReader::new(Cursor::new(writer.into_inner()), 1024, true);
//! let mut out = Vec::new();
//! while reader.advance() {
//!     out.push(reader.value().unwrap().to_vec());
//! }
//! assert!(reader.error().is_none());
//! assert_eq!(out, vec![b"Hello".to_vec(), b"World!".to_vec()]);
//! ```

pub mod checksum;
mod error;
pub mod header;
mod reader;
mod writer;

pub use checksum::checksum;
pub use error::{Error, Result, Section};
pub use header::{frame_len, FrameHeader};
pub use reader::{ReaderOptions, RecordReader, Records};
pub use writer::RecordWriter;
