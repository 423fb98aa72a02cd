/*!
Binary result rows, as sent for prepared statements.

```text
0x00 | null bitmap (offset 2) | value of every non-null column, in order
```
*/
use bytes::{BufMut, BytesMut};
use snafu::{ensure, ResultExt};

use crate::alloc::Allocator;
use crate::common::{ColumnInfo, ColumnType, StringFraming, OK_HEADER};
use crate::encoding::{put_bytes, put_uint_width, MAX_PREFIX_SIZE};
use crate::errors::{self, EncodeError};
use crate::model::CanonicalText;
use crate::null_bitmap::{null_bitmap_len, put_null_bitmap, BINARY_ROW_OFFSET};
use crate::temporal::{pack_datetime, pack_duration};
use crate::value::Datum;

/// Encodes a whole row for the binary protocol.
///
/// Fails with [`EncodeError::MalformedPacket`] if the number of values
/// doesn't match the number of columns. Errors of individual values are
/// wrapped into [`EncodeError::Column`].
pub fn encode_binary_row<A>(
    alloc: &mut A,
    columns: &[ColumnInfo],
    row: &[Datum],
) -> Result<BytesMut, EncodeError>
where
    A: Allocator + ?Sized,
{
    ensure!(
        columns.len() == row.len(),
        errors::MalformedPacket {
            columns: columns.len(),
            values: row.len(),
        }
    );
    let size = 1
        + null_bitmap_len(row.len(), BINARY_ROW_OFFSET)
        + row.iter().map(size_hint).sum::<usize>();
    let mut buf = alloc.alloc(size);
    buf.put_u8(OK_HEADER);
    put_null_bitmap(&mut buf, row.iter().map(Datum::is_null), BINARY_ROW_OFFSET);
    for (index, (column, value)) in columns.iter().zip(row).enumerate() {
        put_value_binary(&mut buf, column, value, StringFraming::LengthEncoded)
            .context(errors::Column { index })?;
    }
    Ok(buf)
}

/// Encodes a single value for the binary protocol.
///
/// Value and column type pairs that have no binary form produce an empty
/// buffer rather than an error.
pub fn encode_value_binary<A>(
    alloc: &mut A,
    column: &ColumnInfo,
    value: &Datum,
    framing: StringFraming,
) -> Result<BytesMut, EncodeError>
where
    A: Allocator + ?Sized,
{
    let mut buf = alloc.alloc(size_hint(value));
    put_value_binary(&mut buf, column, value, framing)?;
    Ok(buf)
}

/// Appends the binary form of `value` to `buf`.
pub fn put_value_binary(
    buf: &mut BytesMut,
    column: &ColumnInfo,
    value: &Datum,
    framing: StringFraming,
) -> Result<(), EncodeError> {
    match value {
        Datum::Int64(v) => put_int(buf, column, *v as u64, value),
        Datum::Uint64(v) => put_int(buf, column, *v, value),
        Datum::Float32(v) => buf.put_u32_le(v.to_bits()),
        Datum::Float64(v) => buf.put_u64_le(v.to_bits()),
        Datum::Str(v) => put_bytes(buf, v.as_bytes(), framing),
        Datum::Bytes(v) => put_bytes(buf, v, framing),
        Datum::Decimal(v) => put_bytes(buf, &v.canonical_text(), framing),
        Datum::Enum(v) => put_bytes(buf, &v.canonical_text(), framing),
        Datum::Set(v) => put_bytes(buf, &v.canonical_text(), framing),
        Datum::Bit(v) => put_bytes(buf, &v.canonical_text(), framing),
        Datum::Time(v) => pack_datetime(buf, v, None)?,
        Datum::Duration(v) => pack_duration(buf, v),
        // NULL is carried by the bitmap alone. Binary literals and JSON
        // have no binary row form and are sent as nothing at all.
        Datum::Null | Datum::BinaryLiteral(_) | Datum::Json(_) => {
            log::trace!("no binary encoding for {} value", value.kind());
        }
    }
    Ok(())
}

fn put_int(buf: &mut BytesMut, column: &ColumnInfo, bits: u64, value: &Datum) {
    let width = match column.tp {
        ColumnType::Tiny => 1,
        ColumnType::Short | ColumnType::Year => 2,
        ColumnType::Int24 | ColumnType::Long => 4,
        ColumnType::LongLong => 8,
        tp => {
            log::trace!("no binary encoding for {} value in {:?} column", value.kind(), tp);
            return;
        }
    };
    put_uint_width(buf, bits, width);
}

fn size_hint(value: &Datum) -> usize {
    match value {
        Datum::Null | Datum::BinaryLiteral(_) | Datum::Json(_) => 0,
        Datum::Int64(_) | Datum::Uint64(_) | Datum::Float64(_) => 8,
        Datum::Float32(_) => 4,
        Datum::Str(v) => v.len() + MAX_PREFIX_SIZE,
        Datum::Bytes(v) => v.len() + MAX_PREFIX_SIZE,
        Datum::Enum(v) => v.name().len() + MAX_PREFIX_SIZE,
        Datum::Set(v) => v.name().len() + MAX_PREFIX_SIZE,
        Datum::Bit(v) => v.as_bytes().len() + MAX_PREFIX_SIZE,
        Datum::Decimal(_) => 32,
        Datum::Time(_) => 12,
        Datum::Duration(_) => 13,
    }
}
