/*!
NULL bitmaps of the binary protocol.

A bitmap has one bit per column, shifted by a protocol-defined offset: two
reserved bits for result rows, none for statement parameters. A NULL column
has its bit set and contributes no bytes to the value part of the row.
*/
use bytes::BytesMut;

/// Offset of the first column bit in a binary result row.
pub const BINARY_ROW_OFFSET: usize = 2;
/// Offset of the first parameter bit in a statement execute packet.
pub const PARAM_OFFSET: usize = 0;

/// Bytes occupied by a bitmap of `columns` bits starting at `offset`.
pub fn null_bitmap_len(columns: usize, offset: usize) -> usize {
    (columns + offset + 7) / 8
}

/// Appends a bitmap with the bits of null columns set.
///
/// `nulls` yields one flag per column.
pub fn put_null_bitmap<I>(buf: &mut BytesMut, nulls: I, offset: usize)
where
    I: IntoIterator<Item = bool>,
    I::IntoIter: ExactSizeIterator,
{
    let nulls = nulls.into_iter();
    let start = buf.len();
    buf.resize(start + null_bitmap_len(nulls.len(), offset), 0);
    let bits = &mut buf[start..];
    for (i, is_null) in nulls.enumerate() {
        if is_null {
            let pos = i + offset;
            bits[pos / 8] |= 1 << (pos % 8);
        }
    }
}

/// Read-only view of a received bitmap.
#[derive(Debug, Clone, Copy)]
pub struct NullBitmap<'a> {
    bits: &'a [u8],
    offset: usize,
}

impl<'a> NullBitmap<'a> {
    pub fn new(bits: &'a [u8], offset: usize) -> NullBitmap<'a> {
        NullBitmap { bits, offset }
    }
    /// Splits a bitmap for `columns` columns off the front of `buf`.
    ///
    /// Returns `None` if `buf` is too short.
    pub fn split(buf: &'a [u8], columns: usize, offset: usize) -> Option<(NullBitmap<'a>, &'a [u8])> {
        let len = null_bitmap_len(columns, offset);
        if buf.len() < len {
            return None;
        }
        let (bits, rest) = buf.split_at(len);
        Some((NullBitmap::new(bits, offset), rest))
    }
    /// Columns beyond the end of the bitmap are reported as not null.
    pub fn is_null(&self, column: usize) -> bool {
        let pos = column + self.offset;
        self.bits
            .get(pos / 8)
            .map(|byte| byte & (1 << (pos % 8)) != 0)
            .unwrap_or(false)
    }
    pub fn null_count(&self) -> usize {
        let total: u32 = self.bits.iter().map(|b| b.count_ones()).sum();
        // reserved bits are always zero
        total as usize
    }
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bits
    }
}
