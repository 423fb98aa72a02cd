use std::error::Error;

use bytes::BytesMut;
use chrono::{FixedOffset, NaiveDate};
use pretty_assertions::assert_eq;

use mysql_protocol::common::ColumnType;
use mysql_protocol::model::Time;
use mysql_protocol::temporal::pack_datetime;

fn timestamp(y: i32, m: u32, d: u32, h: u32, min: u32) -> Result<Time, Box<dyn Error>> {
    let naive = NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .ok_or("invalid date")?;
    Ok(Time::from_naive(ColumnType::Timestamp, &naive, 0)?)
}

fn to_utc(time: &Time) -> Result<Vec<u8>, Box<dyn Error>> {
    let utc = FixedOffset::east_opt(0).ok_or("offset out of range")?;
    let mut buf = BytesMut::new();
    pack_datetime(&mut buf, time, Some(&utc))?;
    Ok(buf.to_vec())
}

// Only test in this binary, the local zone is process-wide.
#[test]
fn daylight_saving_transitions() -> Result<(), Box<dyn Error>> {
    std::env::set_var("TZ", "EST5EDT,M3.2.0,M11.1.0");

    // summer time, UTC-4
    assert_eq!(
        to_utc(&timestamp(2021, 6, 15, 12, 0)?)?,
        b"\x0b\xe5\x07\x06\x0f\x10\x00\x00\0\0\0\0"
    );
    // 01:30 happens twice on 2021-11-07, the first one is taken (UTC-4)
    assert_eq!(
        to_utc(&timestamp(2021, 11, 7, 1, 30)?)?,
        b"\x0b\xe5\x07\x0b\x07\x05\x1e\x00\0\0\0\0"
    );
    // 02:30 is skipped on 2021-03-14, read with the winter offset (UTC-5)
    assert_eq!(
        to_utc(&timestamp(2021, 3, 14, 2, 30)?)?,
        b"\x0b\xe5\x07\x03\x0e\x07\x1e\x00\0\0\0\0"
    );
    Ok(())
}
