use byteorder::{ByteOrder, LittleEndian};

use crate::checksum::checksum;
use crate::error::{Error, Section};

// All integers are little-endian.
//
// [ length (8) ][ masked crc32c of length (4) ][ payload (length) ][ masked crc32c of payload (4) ]
pub const LENGTH_SIZE: usize = 8;
pub const CRC_SIZE: usize = 4;
pub const HEADER_SIZE: usize = LENGTH_SIZE + CRC_SIZE;
pub const FOOTER_SIZE: usize = CRC_SIZE;
pub const FRAME_OVERHEAD: usize = HEADER_SIZE + FOOTER_SIZE;

/// On-stream size of a frame carrying `payload_len` bytes.
#[inline]
pub const fn frame_len(payload_len: u64) -> u64 {
    payload_len.saturating_add(FRAME_OVERHEAD as u64)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHeader {
    pub length: u64,
    pub length_crc: u32,
}

impl FrameHeader {
    pub fn new(length: u64) -> FrameHeader {
        let mut raw = [0u8; LENGTH_SIZE];
        LittleEndian::write_u64(&mut raw, length);
        FrameHeader {
            length,
            length_crc: checksum(&raw),
        }
    }

    pub fn to_bytes(&self) -> [u8; HEADER_SIZE] {
        let mut buf = [0u8; HEADER_SIZE];
        LittleEndian::write_u64(&mut buf[..LENGTH_SIZE], self.length);
        LittleEndian::write_u32(&mut buf[LENGTH_SIZE..], self.length_crc);
        buf
    }

    /// Decode without validating; see [`FrameHeader::verify`].
    pub fn from_bytes(buf: &[u8; HEADER_SIZE]) -> FrameHeader {
        FrameHeader {
            length: LittleEndian::read_u64(&buf[..LENGTH_SIZE]),
            length_crc: LittleEndian::read_u32(&buf[LENGTH_SIZE..]),
        }
    }

    /// Check the stored length checksum against the length bytes.
    ///
    /// `offset` is the position of the frame in its stream and only feeds the error.
    pub fn verify(&self, offset: u64) -> Result<u64, Error> {
        let actual = FrameHeader::new(self.length).length_crc;
        if actual != self.length_crc {
            return Err(Error::Checksum {
                section: Section::Length,
                offset,
                expected: self.length_crc,
                actual,
            });
        }
        Ok(self.length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_hello_header() {
        let header = FrameHeader::new(5);
        assert_eq!(
            header.to_bytes(),
            [5, 0, 0, 0, 0, 0, 0, 0, 0xea, 0xb2, 0x04, 0x3e]
        );
    }

    #[test]
    fn decode_is_inverse_of_encode() {
        let header = FrameHeader::new(0x0102_0304_0506_0708);
        let decoded = FrameHeader::from_bytes(&header.to_bytes());
        assert_eq!(decoded, header);
        assert_eq!(decoded.verify(0).unwrap(), 0x0102_0304_0506_0708);
    }

    #[test]
    fn rejects_flipped_length_bit() {
        let mut bytes = FrameHeader::new(6).to_bytes();
        bytes[0] ^= 0x40;
        let err = FrameHeader::from_bytes(&bytes).verify(42).unwrap_err();
        match err {
            Error::Checksum {
                section, offset, ..
            } => {
                assert_eq!(section, Section::Length);
                assert_eq!(offset, 42);
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn overhead() {
        assert_eq!(frame_len(0), 16);
        assert_eq!(frame_len(5), 21);
        assert_eq!(frame_len(6), 22);
    }
}
