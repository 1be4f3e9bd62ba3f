//! Masked CRC-32C as stored in TFRecord frames.
//!
//! The format never stores a raw CRC. Every checksum is rotated right by 15
//! bits and offset by [`MASK_DELTA`] before it is written, so that computing
//! the CRC of a string that itself contains embedded CRCs stays well behaved.

/// Offset added to the rotated CRC.
pub const MASK_DELTA: u32 = 0xa282_ead8;

/// Compute the masked CRC-32C of `bytes`.
#[inline]
pub fn checksum(bytes: &[u8]) -> u32 {
    mask(crc32c::crc32c(bytes))
}

/// Apply the format's rotate-and-add mask to a raw CRC-32C value.
#[inline]
pub const fn mask(crc: u32) -> u32 {
    crc.rotate_right(15).wrapping_add(MASK_DELTA)
}

/// Recover the raw CRC-32C from a masked value.
#[inline]
pub const fn unmask(masked: u32) -> u32 {
    masked.wrapping_sub(MASK_DELTA).rotate_left(15)
}
