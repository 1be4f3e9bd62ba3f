use std::fmt;
use std::io;

pub type Result<T> = std::result::Result<T, Error>;

/// Which checksum in a frame failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Length,
    Payload,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Section::Length => f.write_str("length"),
            Section::Payload => f.write_str("payload"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Failure of the underlying source, including streams that end inside a frame.
    #[error("io: {0}")]
    Io(#[from] io::Error),

    /// Stored and recomputed checksums disagree: the data is corrupt or not a TFRecord stream.
    #[error(
        "checksum error in TFRecord {section} at offset {offset}: stored {expected:#010x}, computed {actual:#010x}"
    )]
    Checksum {
        section: Section,
        offset: u64,
        expected: u32,
        actual: u32,
    },

    #[error("record of {length} bytes at offset {offset} cannot be buffered")]
    TooLarge { length: u64, offset: u64 },
}

impl Error {
    pub fn is_checksum(&self) -> bool {
        matches!(self, Error::Checksum { .. })
    }

    /// True when the stream ended part way through a frame.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Io(e) if e.kind() == io::ErrorKind::UnexpectedEof)
    }
    /// An owned copy for callers that outlive the reader's borrow. `io::Error` is not
    /// `Clone`, so an io failure keeps its kind and message but loses its source.
    pub(crate) fn detached(&self) -> Error {
        match self {
            Error::Io(e) => Error::Io(io::Error::new(e.kind(), e.to_string())),
            Error::Checksum {
                section,
                offset,
                expected,
                actual,
            } => Error::Checksum {
                section: *section,
                offset: *offset,
                expected: *expected,
                actual: *actual,
            },
            Error::TooLarge { length, offset } => Error::TooLarge {
                length: *length,
                offset: *offset,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_keeps_kind_and_fields() {
        let io = Error::from(io::Error::new(io::ErrorKind::UnexpectedEof, "short payload"));
        let copy = io.detached();
        assert!(copy.is_truncated());
        assert_eq!(copy.to_string(), io.to_string());

        let sum = Error::Checksum {
            section: Section::Payload,
            offset: 21,
            expected: 1,
            actual: 2,
        };
        assert_eq!(sum.detached().to_string(), sum.to_string());
    }
}
