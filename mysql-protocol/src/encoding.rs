/*!
Length-encoded integers and byte strings.

Every variable-sized field of the protocol is built from these two
primitives. An integer takes 1, 3, 4 or 9 bytes depending on its magnitude
and the first byte alone determines the total width:

| first byte | meaning                          | width |
|------------|----------------------------------|-------|
| 0x00–0xfa  | the value itself                 | 1     |
| 0xfb       | NULL                             | 1     |
| 0xfc       | 2 little-endian bytes follow     | 3     |
| 0xfd       | 3 little-endian bytes follow     | 4     |
| 0xfe       | 8 little-endian bytes follow     | 9     |
*/
use std::convert::TryFrom;
use std::ops::Deref;

use bytes::{Buf, BufMut, BytesMut};
use snafu::ensure;

use crate::alloc::Allocator;
use crate::common::{StringFraming, NULL_MARKER};
use crate::errors::{self, DecodeError};

/// Largest length-encoded integer prefix.
pub const MAX_PREFIX_SIZE: usize = 9;

static TINY_INT_CACHE: [[u8; 1]; 251] = tiny_int_cache();

const fn tiny_int_cache() -> [[u8; 1]; 251] {
    let mut cache = [[0u8; 1]; 251];
    let mut i = 0;
    while i < cache.len() {
        cache[i][0] = i as u8;
        i += 1;
    }
    cache
}

/// Wire form of a length-encoded integer.
///
/// Small values borrow from a static table, larger ones are stored inline,
/// so producing one never allocates.
#[derive(Debug, Clone, Copy)]
pub enum LengthEncodedInt {
    Cached(&'static [u8; 1]),
    Inline { data: [u8; MAX_PREFIX_SIZE], len: u8 },
}

impl Deref for LengthEncodedInt {
    type Target = [u8];
    fn deref(&self) -> &[u8] {
        match self {
            LengthEncodedInt::Cached(byte) => &byte[..],
            LengthEncodedInt::Inline { data, len } => &data[..*len as usize],
        }
    }
}

impl AsRef<[u8]> for LengthEncodedInt {
    fn as_ref(&self) -> &[u8] {
        self
    }
}

fn inline(tag: u8, bytes: &[u8]) -> LengthEncodedInt {
    let mut data = [0u8; MAX_PREFIX_SIZE];
    data[0] = tag;
    data[1..=bytes.len()].copy_from_slice(bytes);
    LengthEncodedInt::Inline {
        data,
        len: bytes.len() as u8 + 1,
    }
}

/// Number of bytes a length-encoded integer starting with `tag` occupies.
pub fn prefix_size(tag: u8) -> usize {
    match tag {
        0xfc => 3,
        0xfd => 4,
        0xfe => 9,
        _ => 1,
    }
}

/// Decodes a length-encoded integer, `None` being NULL.
///
/// Returns the value and the number of bytes consumed.
///
/// # Panics
///
/// When `buf` is shorter than its first byte declares. Use
/// [`prefix_size`] to check beforehand when reading untrusted input.
pub fn decode_length_encoded_int(buf: &[u8]) -> (Option<u64>, usize) {
    match buf[0] {
        NULL_MARKER => (None, 1),
        0xfc => {
            let mut data = &buf[1..3];
            (Some(u64::from(data.get_u16_le())), 3)
        }
        0xfd => {
            let mut data = &buf[1..4];
            (Some(data.get_uint_le(3)), 4)
        }
        0xfe => {
            let mut data = &buf[1..9];
            (Some(data.get_u64_le()), 9)
        }
        byte => (Some(u64::from(byte)), 1),
    }
}

pub fn encode_length_encoded_int(n: u64) -> LengthEncodedInt {
    let bytes = n.to_le_bytes();
    match n {
        0..=250 => LengthEncodedInt::Cached(&TINY_INT_CACHE[n as usize]),
        251..=0xffff => inline(0xfc, &bytes[..2]),
        0x1_0000..=0xff_ffff => inline(0xfd, &bytes[..3]),
        _ => inline(0xfe, &bytes[..8]),
    }
}

pub fn put_length_encoded_int(buf: &mut BytesMut, n: u64) {
    buf.extend_from_slice(&encode_length_encoded_int(n));
}

/// Decodes a length-encoded byte string, `None` being NULL.
///
/// Returns the payload and the number of bytes consumed (prefix included).
/// If `buf` doesn't contain the whole string, [`DecodeError::Underflow`]
/// tells how many more bytes are needed.
pub fn decode_length_encoded_bytes(buf: &[u8]) -> Result<(Option<&[u8]>, usize), DecodeError> {
    ensure!(!buf.is_empty(), errors::Underflow { needed: 1_usize });
    let prefix = prefix_size(buf[0]);
    ensure!(
        buf.len() >= prefix,
        errors::Underflow {
            needed: prefix - buf.len()
        }
    );
    let (num, pos) = decode_length_encoded_int(buf);
    let len = match num {
        None => return Ok((None, pos)),
        Some(0) => return Ok((Some(&buf[pos..pos]), pos)),
        Some(len) => usize::try_from(len).unwrap_or(usize::MAX),
    };
    let end = pos.saturating_add(len);
    ensure!(
        buf.len() >= end,
        errors::Underflow {
            needed: end - buf.len()
        }
    );
    Ok((Some(&buf[pos..end]), end))
}

/// Appends `value` framed as requested.
pub fn put_bytes(buf: &mut BytesMut, value: &[u8], framing: StringFraming) {
    match framing {
        StringFraming::LengthEncoded => {
            buf.reserve(value.len() + MAX_PREFIX_SIZE);
            put_length_encoded_int(buf, value.len() as u64);
            buf.extend_from_slice(value);
        }
        StringFraming::ZeroTerminated => {
            buf.reserve(value.len() + 1);
            buf.extend_from_slice(value);
            buf.put_u8(0);
        }
    }
}

pub fn encode_length_encoded_bytes<A>(alloc: &mut A, value: &[u8]) -> BytesMut
where
    A: Allocator + ?Sized,
{
    let mut buf = alloc.alloc(value.len() + MAX_PREFIX_SIZE);
    put_bytes(&mut buf, value, StringFraming::LengthEncoded);
    buf
}

pub fn encode_zero_terminated_bytes<A>(alloc: &mut A, value: &[u8]) -> BytesMut
where
    A: Allocator + ?Sized,
{
    let mut buf = alloc.alloc(value.len() + 1);
    put_bytes(&mut buf, value, StringFraming::ZeroTerminated);
    buf
}

pub fn encode_bytes<A>(alloc: &mut A, value: &[u8], framing: StringFraming) -> BytesMut
where
    A: Allocator + ?Sized,
{
    match framing {
        StringFraming::LengthEncoded => encode_length_encoded_bytes(alloc, value),
        StringFraming::ZeroTerminated => encode_zero_terminated_bytes(alloc, value),
    }
}

/// Appends the low `width` bytes of `value` in little-endian order.
pub(crate) fn put_uint_width(buf: &mut BytesMut, value: u64, width: usize) {
    match width {
        1 => buf.put_u8(value as u8),
        2 => buf.put_u16_le(value as u16),
        4 => buf.put_u32_le(value as u32),
        _ => buf.put_u64_le(value),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cache_is_identity() {
        for (i, entry) in TINY_INT_CACHE.iter().enumerate() {
            assert_eq!(entry[0] as usize, i);
        }
    }

    #[test]
    fn small_values_are_cached() {
        assert!(matches!(
            encode_length_encoded_int(0),
            LengthEncodedInt::Cached(_)
        ));
        assert!(matches!(
            encode_length_encoded_int(250),
            LengthEncodedInt::Cached(_)
        ));
        assert!(matches!(
            encode_length_encoded_int(251),
            LengthEncodedInt::Inline { len: 3, .. }
        ));
    }

    #[test]
    fn fixed_widths() {
        let mut buf = BytesMut::new();
        put_uint_width(&mut buf, 0x0102_0304_0506_0708, 1);
        put_uint_width(&mut buf, 0x0102_0304_0506_0708, 2);
        put_uint_width(&mut buf, 0x0102_0304_0506_0708, 4);
        put_uint_width(&mut buf, 0x0102_0304_0506_0708, 8);
        assert_eq!(
            &buf[..],
            b"\x08\x08\x07\x08\x07\x06\x05\x08\x07\x06\x05\x04\x03\x02\x01"
        );
    }

    #[test]
    fn unknown_tag_is_value() {
        // 0xff is an error packet marker, never a valid prefix
        assert_eq!(decode_length_encoded_int(b"\xff"), (Some(0xff), 1));
    }
}
