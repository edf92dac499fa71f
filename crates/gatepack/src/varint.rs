//! # Varints
//!
//! Unsigned integers as little-endian groups of 7 bits. The high bit of each
//! byte is set when another byte follows.

use crate::error::Error;
use crate::error::Result;

/// The most bytes a `u64` can occupy once encoded.
pub const MAX_VARINT_LEN: usize = 10;

/// Appends `n` to `buf`.
pub fn encode_varint(buf: &mut Vec<u8>, mut n: u64) {
    while n >= 0x80 {
        buf.push((n as u8 & 0x7F) | 0x80);
        n >>= 7;
    }
    buf.push(n as u8);
}

/// Encodes `n` into a fresh buffer.
pub fn varint(n: u64) -> Vec<u8> {
    let mut buf = Vec::with_capacity(encoded_len(n));
    encode_varint(&mut buf, n);
    buf
}

/// Number of bytes `encode_varint` will emit for `n`.
pub fn encoded_len(n: u64) -> usize {
    let bits = 64 - (n | 1).leading_zeros() as usize;
    bits.div_ceil(7)
}

/// Reads a varint starting at `offset`.
///
/// Returns the value and the number of bytes consumed.
///
/// # Errors
/// `Error::MalformedVarint` if the input ends mid-sequence, the chain exceeds
/// `MAX_VARINT_LEN` bytes, or the final byte overflows 64 bits.
pub fn decode_varint(bytes: &[u8], offset: usize) -> Result<(u64, usize)> {
    let input = bytes.get(offset..).ok_or(Error::MalformedVarint)?;
    let mut value: u64 = 0;

    for (i, &byte) in input.iter().take(MAX_VARINT_LEN).enumerate() {
        let payload = (byte & 0x7F) as u64;
        // The tenth byte only has room for the top bit of a u64.
        if i == MAX_VARINT_LEN - 1 && payload > 1 {
            return Err(Error::MalformedVarint);
        }
        value |= payload << (7 * i);
        if byte & 0x80 == 0 {
            return Ok((value, i + 1));
        }
    }

    Err(Error::MalformedVarint)
}
