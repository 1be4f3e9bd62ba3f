use std::convert::TryFrom;
use std::io::{self, Read};
use std::iter::FusedIterator;

use byteorder::{ByteOrder, LittleEndian};

use crate::checksum::checksum;
use crate::error::{Error, Result, Section};
use crate::header::{FrameHeader, FOOTER_SIZE, HEADER_SIZE};

/// Construction-time settings for a [`RecordReader`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Bytes preallocated for record payloads. Should be set to the upper bound of the
    /// common record size; larger records get a buffer of their own. Zero disables
    /// preallocation.
    pub buffer_size: usize,
    /// Verify the checksum of every payload. Length checksums are always verified.
    pub verify_payload: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        ReaderOptions {
            buffer_size: 0,
            verify_payload: true,
        }
    }
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_size(mut self, buffer_size: usize) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn with_verify_payload(mut self, verify_payload: bool) -> Self {
        self.verify_payload = verify_payload;
        self
    }
}

#[derive(Debug)]
enum State {
    Ready,
    Done(Option<Error>),
}

#[derive(Debug)]
enum Current {
    Empty,
    Scratch(usize),
    Owned(Vec<u8>),
}

/// Pulls TFRecord frames off a byte source one at a time.
///
/// Payloads are read into a reusable scratch buffer when they fit, so the slice
/// returned by [`RecordReader::value`] is only valid until the next call to
/// [`RecordReader::advance`]. Use [`RecordReader::records`] to get owned copies.
///
/// The first error ends iteration for good. A stream that ends exactly on a frame
/// boundary ends cleanly and leaves no error behind.
#[derive(Debug)]
pub struct RecordReader<R> {
    inner: R,
    verify_payload: bool,
    scratch: Vec<u8>,
    current: Current,
    state: State,
    position: u64,
    records_read: u64,
}

impl<R: Read> RecordReader<R> {
    pub fn new(inner: R, buffer_size: usize, verify_payload: bool) -> RecordReader<R> {
        Self::with_options(
            inner,
            ReaderOptions {
                buffer_size,
                verify_payload,
            },
        )
    }

    pub fn with_options(inner: R, options: ReaderOptions) -> RecordReader<R> {
        RecordReader {
            inner,
            verify_payload: options.verify_payload,
            scratch: vec![0u8; options.buffer_size],
            current: Current::Empty,
            state: State::Ready,
            position: 0,
            records_read: 0,
        }
    }

    /// Read the next record. Returns `false` at the end of the stream or on the first
    /// error; check [`RecordReader::error`] to tell the two apart.
    pub fn advance(&mut self) -> bool {
        if let State::Done(_) = self.state {
            return false;
        }

        self.current = Current::Empty;
        match self.read_frame() {
            Ok(Some(current)) => {
                self.current = current;
                self.records_read += 1;
                true
            }
            Ok(None) => {
                tracing::debug!(
                    records = self.records_read,
                    bytes = self.position,
                    "end of TFRecord stream"
                );
                self.state = State::Done(None);
                false
            }
            Err(error) => {
                tracing::debug!(
                    records = self.records_read,
                    position = self.position,
                    %error,
                    "TFRecord stream failed"
                );
                self.state = State::Done(Some(error));
                false
            }
        }
    }

    /// Advance and return the outcome in one value: `Ok(Some(_))` for a record,
    /// `Ok(None)` for a clean end, `Err(_)` once the stream has failed. A failed reader
    /// keeps returning the same error without touching the source again.
    pub fn next_record(&mut self) -> std::result::Result<Option<&[u8]>, &Error> {
        if self.advance() {
            return Ok(self.value());
        }
        match &self.state {
            State::Done(Some(error)) => Err(error),
            _ => Ok(None),
        }
    }

    /// Iterate over owned copies of the remaining records.
    pub fn records(&mut self) -> Records<'_, R> {
        Records {
            reader: self,
            finished: false,
        }
    }

    fn read_frame(&mut self) -> Result<Option<Current>> {
        let offset = self.position;

        let mut header = [0u8; HEADER_SIZE];
        let n = read_full(&mut self.inner, &mut header)?;
        if n == 0 {
            return Ok(None);
        }
        if n < HEADER_SIZE {
            return Err(truncated("header", offset, HEADER_SIZE, n));
        }
        self.position += HEADER_SIZE as u64;

        let length = FrameHeader::from_bytes(&header).verify(offset)?;
        let len = usize::try_from(length).map_err(|_| Error::TooLarge { length, offset })?;

        let mut current = if len <= self.scratch.len() {
            Current::Scratch(len)
        } else {
            let mut buf = Vec::new();
            buf.try_reserve_exact(len)
                .map_err(|_| Error::TooLarge { length, offset })?;
            buf.resize(len, 0);
            Current::Owned(buf)
        };
        let payload = match &mut current {
            Current::Owned(buf) => &mut buf[..],
            _ => &mut self.scratch[..len],
        };

        let n = read_full(&mut self.inner, payload)?;
        if n < len {
            return Err(truncated("payload", offset, len, n));
        }
        self.position += length;

        let mut footer = [0u8; FOOTER_SIZE];
        let n = read_full(&mut self.inner, &mut footer)?;
        if n < FOOTER_SIZE {
            return Err(truncated("footer", offset, FOOTER_SIZE, n));
        }
        self.position += FOOTER_SIZE as u64;

        if self.verify_payload {
            let expected = LittleEndian::read_u32(&footer);
            let actual = checksum(payload);
            if actual != expected {
                return Err(Error::Checksum {
                    section: Section::Payload,
                    offset,
                    expected,
                    actual,
                });
            }
        }

        tracing::trace!(offset, length, "read TFRecord frame");
        Ok(Some(current))
    }
}

impl<R> RecordReader<R> {
    /// The current record, or `None` before the first record and after the end.
    pub fn value(&self) -> Option<&[u8]> {
        match &self.current {
            Current::Empty => None,
            Current::Scratch(len) => Some(&self.scratch[..*len]),
            Current::Owned(buf) => Some(buf.as_slice()),
        }
    }

    /// The error that stopped iteration. A clean end of stream is not an error.
    pub fn error(&self) -> Option<&Error> {
        match &self.state {
            State::Done(Some(error)) => Some(error),
            _ => None,
        }
    }

    /// Consume the reader and return the error that stopped it, if any.
    pub fn into_error(self) -> Option<Error> {
        match self.state {
            State::Done(error) => error,
            State::Ready => None,
        }
    }

    pub fn is_done(&self) -> bool {
        matches!(self.state, State::Done(_))
    }

    /// Bytes consumed from the source by complete frame sections.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn records_read(&self) -> u64 {
        self.records_read
    }

    pub fn get_ref(&self) -> &R {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut R {
        &mut self.inner
    }

    /// Give the source back. Nothing is closed; a failed frame may be left half read.
    pub fn into_inner(self) -> R {
        self.inner
    }
}

/// Owned-copy iterator returned by [`RecordReader::records`].
///
/// Yields the terminal error once, then ends. The reader keeps the error, so
/// [`RecordReader::error`] still reports it afterwards.
#[derive(Debug)]
pub struct Records<'a, R> {
    reader: &'a mut RecordReader<R>,
    finished: bool,
}

impl<'a, R: Read> Iterator for Records<'a, R> {
    type Item = Result<Vec<u8>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if self.reader.advance() {
            return self.reader.value().map(|value| Ok(value.to_vec()));
        }
        self.finished = true;
        self.reader.error().map(|error| Err(error.detached()))
    }
}

impl<'a, R: Read> FusedIterator for Records<'a, R> {}

/// Like `read_exact`, but reports how much was read so a clean end of stream can be
/// told apart from a truncated frame.
fn read_full<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

fn truncated(section: &str, offset: u64, expected: usize, found: usize) -> Error {
    Error::Io(io::Error::new(
        io::ErrorKind::UnexpectedEof,
        format!(
            "truncated TFRecord {} in frame at offset {}: expected {} bytes, found {}",
            section, offset, expected, found
        ),
    ))
}
