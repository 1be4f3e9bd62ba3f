use std::io::{Result, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::checksum::checksum;
use crate::header::FrameHeader;

/// Frames records onto a byte sink.
///
/// The sink is never closed by the writer. A failed write leaves whatever part of the
/// frame already reached the sink in place.
#[derive(Debug)]
pub struct RecordWriter<W> {
    inner: W,
}

impl<W: Write> RecordWriter<W> {
    pub fn new(inner: W) -> RecordWriter<W> {
        RecordWriter { inner }
    }

    /// Write one record. Returns the payload length; frame overhead is not counted.
    pub fn write_record(&mut self, payload: &[u8]) -> Result<usize> {
        let header = FrameHeader::new(payload.len() as u64);
        self.inner.write_all(&header.to_bytes())?;
        self.inner.write_all(payload)?;
        self.inner.write_u32::<LittleEndian>(checksum(payload))?;

        tracing::trace!(length = payload.len(), "wrote TFRecord frame");
        Ok(payload.len())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}

impl<W> RecordWriter<W> {
    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

/// Every `write` call is one whole record.
///
/// `write_all` never calls `write` with an empty buffer, so empty records have to go
/// through [`RecordWriter::write_record`].
impl<W: Write> Write for RecordWriter<W> {
    fn write(&mut self, buf: &[u8]) -> Result<usize> {
        self.write_record(buf)
    }

    fn flush(&mut self) -> Result<()> {
        self.inner.flush()
    }
}
