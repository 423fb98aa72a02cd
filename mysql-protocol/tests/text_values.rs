use std::borrow::Cow;
use std::error::Error;

use pretty_assertions::assert_eq;
use test_case::test_case;

use mysql_protocol::alloc::StdAllocator;
use mysql_protocol::common::{ColumnInfo, ColumnType};
use mysql_protocol::errors::EncodeError;
use mysql_protocol::model::{BinaryLiteral, Decimal, Duration, Json, Time};
use mysql_protocol::text::{encode_text_row, encode_value_text};
use mysql_protocol::value::Datum;

mod base;

fn text(column: ColumnInfo, value: Datum) -> String {
    let bytes = encode_value_text(&column, &value).unwrap();
    String::from_utf8(bytes.into_owned()).unwrap()
}

#[test_case(3.14159, 2, "3.14" ; "two digits")]
#[test_case(-0.5, 3, "-0.500" ; "padded")]
#[test_case(1234.0, 0, "1234" ; "not fixed zero")]
#[test_case(0.1, 31, "0.1" ; "not fixed")]
#[test_case(1.0e-7, 31, "0.0000001" ; "small")]
fn doubles(value: f64, decimal: u8, expected: &str) {
    let column = ColumnInfo::new(ColumnType::Double).with_decimal(decimal);
    assert_eq!(text(column, Datum::Float64(value)), expected);
}

#[test]
fn special_doubles() {
    let column = ColumnInfo::new(ColumnType::Double);
    assert_eq!(text(column, Datum::Float64(f64::INFINITY)), "+Inf");
    assert_eq!(text(column, Datum::Float64(f64::NEG_INFINITY)), "-Inf");
    assert_eq!(text(column, Datum::Float64(f64::NAN)), "NaN");
}

#[test]
fn float_keeps_single_precision() {
    let column = ColumnInfo::new(ColumnType::Float);
    assert_eq!(text(column, Datum::Float32(0.3)), "0.3");
    let column = column.with_decimal(1);
    assert_eq!(text(column, Datum::Float32(2.26)), "2.3");
}

#[test]
fn scalars() -> Result<(), Box<dyn Error>> {
    let column = ColumnInfo::new(ColumnType::VarString);
    assert_eq!(text(column, Datum::Int64(-42)), "-42");
    assert_eq!(text(column, Datum::Uint64(u64::MAX)), "18446744073709551615");
    assert_eq!(text(column, "0.05".parse::<Decimal>()?.into()), "0.05");
    assert_eq!(text(column, Datum::Bit(BinaryLiteral::from_uint(65, 1)?)), "A");
    assert_eq!(
        text(column, Json::new_unchecked("[1, 2]".into()).into()),
        "[1, 2]"
    );
    Ok(())
}

#[test]
fn temporal() -> Result<(), Box<dyn Error>> {
    let column = ColumnInfo::new(ColumnType::Datetime);
    let time = Time::from_ymd(ColumnType::Datetime, 2001, 2, 3)?
        .and_hms_micro(4, 5, 6, 789_000)?
        .with_fsp(3)?;
    assert_eq!(text(column, time.into()), "2001-02-03 04:05:06.789");
    let date = Time::from_ymd(ColumnType::Date, 2001, 2, 3)?;
    assert_eq!(text(column, date.into()), "2001-02-03");
    let duration = Duration::new(-(3600 + 2) * 1_000_000 - 500_000, 1)?;
    assert_eq!(text(column, duration.into()), "-01:00:02.5");
    Ok(())
}

#[test]
fn strings_are_borrowed() {
    let value = Datum::from("hello");
    let column = ColumnInfo::new(ColumnType::VarString);
    assert!(matches!(
        encode_value_text(&column, &value),
        Ok(Cow::Borrowed(b"hello"))
    ));
}

#[test]
fn null_has_no_text() {
    let column = ColumnInfo::new(ColumnType::VarString);
    let err = encode_value_text(&column, &Datum::Null).unwrap_err();
    assert!(matches!(err, EncodeError::InvalidType { kind: "null", .. }));
}

#[test]
fn row() -> Result<(), Box<dyn Error>> {
    base::init_logging();
    let columns = [
        ColumnInfo::new(ColumnType::Long),
        ColumnInfo::new(ColumnType::VarString),
        ColumnInfo::new(ColumnType::Double).with_decimal(1),
    ];
    let row = encode_text_row(
        &mut StdAllocator,
        &columns,
        &[Datum::Int64(7), Datum::Null, Datum::Float64(0.26)],
    )?;
    assert_eq!(&row[..], bconcat!(b"\x017" b"\xfb" b"\x030.3"));
    Ok(())
}

#[test]
fn row_mismatch() {
    let columns = [ColumnInfo::new(ColumnType::Long)];
    let err = encode_text_row(&mut StdAllocator, &columns, &[]).unwrap_err();
    assert!(matches!(
        err,
        EncodeError::MalformedPacket {
            columns: 1,
            values: 0,
            ..
        }
    ));
}
