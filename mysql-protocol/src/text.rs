/*!
Text result rows, as sent for plain queries.

Every cell is a length-encoded string holding the value's text, NULL cells
are a single `0xfb` byte.
*/
use std::borrow::Cow;

use bytes::{BufMut, BytesMut};
use snafu::{ensure, ResultExt};

use crate::alloc::Allocator;
use crate::common::{ColumnInfo, StringFraming, NULL_MARKER};
use crate::encoding::{put_bytes, MAX_PREFIX_SIZE};
use crate::errors::{self, EncodeError};
use crate::model::CanonicalText;
use crate::value::Datum;

/// Text of a single value.
///
/// Strings and bytes are returned without copying. NULL has no text form
/// and fails with [`EncodeError::InvalidType`].
pub fn encode_value_text<'a>(
    column: &ColumnInfo,
    value: &'a Datum,
) -> Result<Cow<'a, [u8]>, EncodeError> {
    let text = match value {
        Datum::Int64(v) => Cow::Owned(v.to_string().into_bytes()),
        Datum::Uint64(v) => Cow::Owned(v.to_string().into_bytes()),
        Datum::Float32(v) => Cow::Owned(format_f32(*v, column.fixed_decimal()).into_bytes()),
        Datum::Float64(v) => Cow::Owned(format_f64(*v, column.fixed_decimal()).into_bytes()),
        Datum::Str(v) => Cow::Borrowed(v.as_bytes()),
        Datum::Bytes(v) => Cow::Borrowed(&v[..]),
        Datum::Decimal(v) => v.canonical_text(),
        Datum::Time(v) => v.canonical_text(),
        Datum::Duration(v) => v.canonical_text(),
        Datum::Enum(v) => v.canonical_text(),
        Datum::Set(v) => v.canonical_text(),
        Datum::Json(v) => v.canonical_text(),
        Datum::Bit(v) | Datum::BinaryLiteral(v) => v.canonical_text(),
        Datum::Null => {
            return errors::InvalidType { kind: value.kind() }.fail();
        }
    };
    Ok(text)
}

/// Encodes a whole row for the text protocol.
pub fn encode_text_row<A>(
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
    let mut buf = alloc.alloc(row.len() * MAX_PREFIX_SIZE);
    for (index, (column, value)) in columns.iter().zip(row).enumerate() {
        if value.is_null() {
            buf.put_u8(NULL_MARKER);
            continue;
        }
        let text = encode_value_text(column, value).context(errors::Column { index })?;
        put_bytes(&mut buf, &text, StringFraming::LengthEncoded);
    }
    Ok(buf)
}

fn special_float(is_nan: bool, is_infinite: bool, negative: bool) -> Option<String> {
    if is_nan {
        Some("NaN".into())
    } else if is_infinite {
        Some(if negative { "-Inf" } else { "+Inf" }.into())
    } else {
        None
    }
}

/// Fixed-point notation with `precision` digits, or the shortest text that
/// reads back as the same `f32`.
fn format_f32(v: f32, precision: Option<usize>) -> String {
    if let Some(s) = special_float(v.is_nan(), v.is_infinite(), v < 0.0) {
        return s;
    }
    match precision {
        Some(precision) => format!("{:.*}", precision, v),
        None => v.to_string(),
    }
}

fn format_f64(v: f64, precision: Option<usize>) -> String {
    if let Some(s) = special_float(v.is_nan(), v.is_infinite(), v < 0.0) {
        return s;
    }
    match precision {
        Some(precision) => format!("{:.*}", precision, v),
        None => v.to_string(),
    }
}
