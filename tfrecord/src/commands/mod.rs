mod create;
mod extract;
mod list;
mod validate;

pub use create::run as create;
pub use extract::run as extract;
pub use list::run as list;
pub use validate::run as validate;

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use humansize::{file_size_opts as options, FileSize};
use tfrecord_format::{ReaderOptions, RecordReader};

use crate::cli::ReadArgs;
use crate::error::{Error, Result};

pub(crate) fn open_reader(path: &Path, args: &ReadArgs) -> Result<RecordReader<BufReader<File>>> {
    let file = File::open(path).map_err(|source| Error::OpenFile {
        path: path.to_path_buf(),
        source,
    })?;
    let options = ReaderOptions::new()
        .with_buffer_size(args.buffer_size)
        .with_verify_payload(!args.no_payload_crc);
    Ok(RecordReader::with_options(BufReader::new(file), options))
}

/// Turn a stopped reader into the command's result.
pub(crate) fn finish<R>(path: &Path, reader: RecordReader<R>) -> Result<()> {
    match reader.into_error() {
        Some(source) => Err(Error::ReadRecords {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(()),
    }
}

pub(crate) fn format_size(len: u64) -> String {
    len.file_size(options::BINARY)
        .unwrap_or_else(|_| len.to_string())
}
