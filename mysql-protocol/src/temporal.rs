/*!
Binary layout of temporal values.

Both layouts start with a length byte telling how many bytes follow.
Trailing zero components are dropped by choosing a shorter layout:

```text
TIME       0 | 8:  sign days[4] hour minute second | 12: ... micros[4]
DATETIME   0 | 4:  year[2] month day | 7: ... hour minute second | 11: ... micros[4]
```

All multi-byte fields are little-endian.
*/
use bytes::{Buf, BufMut, BytesMut};
use chrono::{DateTime, Days, FixedOffset, Local, LocalResult, NaiveDateTime, TimeDelta, TimeZone};
use snafu::{ensure, OptionExt};

use crate::common::ColumnType;
use crate::encoding::encode_length_encoded_int;
use crate::errors::{self, DecodeError, EncodeError};
use crate::model::{Duration, Time, MAX_FSP};

const MICROS_PER_SECOND: u64 = 1_000_000;
const SECS_PER_DAY: u64 = 86_400;

/// Appends the binary form of a `TIME` value.
pub fn pack_duration(buf: &mut BytesMut, value: &Duration) {
    if value.is_zero() {
        buf.extend_from_slice(&encode_length_encoded_int(0));
        return;
    }
    let abs = value.abs_micros();
    let micros = (abs % MICROS_PER_SECOND) as u32;
    let secs = abs / MICROS_PER_SECOND;
    let days = secs / SECS_PER_DAY;
    let secs = secs % SECS_PER_DAY;

    buf.reserve(13);
    buf.put_u8(if micros == 0 { 8 } else { 12 });
    buf.put_u8(u8::from(value.is_negative()));
    buf.put_u32_le(days as u32);
    buf.put_u8((secs / 3600) as u8);
    buf.put_u8((secs / 60 % 60) as u8);
    buf.put_u8((secs % 60) as u8);
    if micros != 0 {
        buf.put_u32_le(micros);
    }
}

/// Appends the binary form of a `DATE`, `DATETIME` or `TIMESTAMP` value.
///
/// When `target` is given, timestamps are converted from the local time
/// zone of the process into it first. Zero dates are sent as `0001-01-01`.
/// Values typed as anything other than a date or datetime produce no bytes.
pub fn pack_datetime(
    buf: &mut BytesMut,
    value: &Time,
    target: Option<&FixedOffset>,
) -> Result<(), EncodeError> {
    let value = match target {
        Some(zone) if value.tp == ColumnType::Timestamp && !value.is_zero() => {
            convert_zone(value, zone)?
        }
        _ => *value,
    };
    let (year, month, day) = if value.is_zero() {
        (1, 1, 1)
    } else {
        (value.year, value.month, value.day)
    };
    match value.tp {
        ColumnType::Timestamp | ColumnType::Datetime => {
            buf.reserve(12);
            buf.put_u8(11);
            buf.put_u16_le(year);
            buf.put_u8(month);
            buf.put_u8(day);
            buf.put_u8(value.hour);
            buf.put_u8(value.minute);
            buf.put_u8(value.second);
            buf.put_u32_le(value.microsecond);
        }
        ColumnType::Date | ColumnType::NewDate => {
            buf.reserve(5);
            buf.put_u8(4);
            buf.put_u16_le(year);
            buf.put_u8(month);
            buf.put_u8(day);
        }
        tp => {
            log::trace!("no binary datetime layout for {:?}, value {} skipped", tp, value);
        }
    }
    Ok(())
}

fn convert_zone(value: &Time, zone: &FixedOffset) -> Result<Time, EncodeError> {
    let converted = value
        .to_naive()
        .and_then(|naive| resolve_local(&naive))
        .and_then(|local| {
            let naive = local.with_timezone(zone).naive_local();
            Time::from_naive(value.tp, &naive, value.fsp).ok()
        });
    match converted {
        Some(time) => Ok(time),
        None => errors::TimeConversion {
            value: value.to_string(),
        }
        .fail(),
    }
}

/// Interprets `naive` as a wall clock reading in the local time zone.
///
/// A reading repeated by a backward transition resolves to its earlier
/// instant. A reading skipped by a forward transition is taken with the
/// offset in effect before the transition, so it lands past the gap.
fn resolve_local(naive: &NaiveDateTime) -> Option<DateTime<Local>> {
    match Local.from_local_datetime(naive) {
        LocalResult::Single(local) => Some(local),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => {
            let before = naive.checked_sub_days(Days::new(1))?;
            let offset = Local.offset_from_local_datetime(&before).earliest()?;
            let shift = TimeDelta::try_seconds(i64::from(offset.local_minus_utc()))?;
            let utc = naive.checked_sub_signed(shift)?;
            Some(Local.from_utc_datetime(&utc))
        }
    }
}

fn check_length(buf: &[u8], valid: &[u8]) -> Result<usize, DecodeError> {
    ensure!(!buf.is_empty(), errors::Underflow { needed: 1_usize });
    let length = buf[0];
    ensure!(
        valid.contains(&length),
        errors::InvalidTemporalLength { length }
    );
    let total = 1 + length as usize;
    ensure!(
        buf.len() >= total,
        errors::Underflow {
            needed: total - buf.len()
        }
    );
    Ok(total)
}

/// Decodes a binary `TIME` value, returning it with the number of bytes
/// consumed.
pub fn unpack_duration(buf: &[u8]) -> Result<(Duration, usize), DecodeError> {
    let total = check_length(buf, &[0, 8, 12])?;
    if total == 1 {
        return Ok((Duration::ZERO, total));
    }
    let mut data = &buf[1..total];
    let negative = data.get_u8() == 1;
    let days = u64::from(data.get_u32_le());
    let hours = u64::from(data.get_u8());
    let minutes = u64::from(data.get_u8());
    let seconds = u64::from(data.get_u8());
    let micros = if data.has_remaining() {
        data.get_u32_le()
    } else {
        0
    };
    let magnitude = days
        .checked_mul(24)
        .and_then(|h| h.checked_add(hours))
        .and_then(|h| h.checked_mul(60))
        .and_then(|m| m.checked_add(minutes))
        .and_then(|m| m.checked_mul(60))
        .and_then(|s| s.checked_add(seconds))
        .and_then(|s| s.checked_mul(MICROS_PER_SECOND))
        .and_then(|us| us.checked_add(u64::from(micros)))
        .and_then(|us| i64::try_from(us).ok())
        .context(errors::DurationOutOfRange)?;
    let duration = Duration {
        micros: if negative { -magnitude } else { magnitude },
        fsp: if micros != 0 { MAX_FSP } else { 0 },
    };
    Ok((duration, total))
}

/// Decodes a binary date or datetime as a value of column type `tp`,
/// returning it with the number of bytes consumed.
pub fn unpack_datetime(buf: &[u8], tp: ColumnType) -> Result<(Time, usize), DecodeError> {
    let total = check_length(buf, &[0, 4, 7, 11])?;
    if total == 1 {
        return Ok((Time::zero(tp), total));
    }
    let mut data = &buf[1..total];
    let year = data.get_u16_le();
    let month = data.get_u8();
    let day = data.get_u8();
    let mut value = Time::from_ymd(tp, year, month, day)
        .ok()
        .context(errors::InvalidDate)?;
    if data.has_remaining() {
        let hour = data.get_u8();
        let minute = data.get_u8();
        let second = data.get_u8();
        let micros = if data.has_remaining() {
            data.get_u32_le()
        } else {
            0
        };
        value = value
            .and_hms_micro(hour, minute, second, micros)
            .ok()
            .context(errors::InvalidDate)?;
        if micros != 0 {
            value.fsp = MAX_FSP;
        }
    }
    Ok((value, total))
}

#[cfg(test)]
mod test {
    use super::*;

    fn duration(micros: i64) -> Vec<u8> {
        let mut buf = BytesMut::new();
        pack_duration(&mut buf, &Duration::from_micros(micros));
        buf.to_vec()
    }

    #[test]
    fn duration_layouts() {
        assert_eq!(duration(0), b"\x00");
        assert_eq!(duration(3_600_000_000), b"\x08\x00\0\0\0\0\x01\x00\x00");
        assert_eq!(
            duration(-(3_600_000_000 + 1)),
            b"\x0c\x01\0\0\0\0\x01\x00\x00\x01\0\0\0"
        );
        // 2 days 3:04:05.000006
        assert_eq!(
            duration(((2 * 24 + 3) * 3600 + 4 * 60 + 5) * 1_000_000 + 6),
            b"\x0c\x00\x02\0\0\0\x03\x04\x05\x06\0\0\0"
        );
    }

    #[test]
    fn unknown_type_is_skipped() {
        let value = Time::from_ymd(ColumnType::Varchar, 2020, 1, 1).unwrap();
        let mut buf = BytesMut::new();
        pack_datetime(&mut buf, &value, None).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn invalid_lengths() {
        assert!(matches!(
            unpack_duration(b"\x05\0\0\0\0\0"),
            Err(DecodeError::InvalidTemporalLength { length: 5, .. })
        ));
        assert!(matches!(
            unpack_datetime(b"\x0b\xe4\x07", ColumnType::Datetime),
            Err(DecodeError::Underflow { needed: 9, .. })
        ));
        assert!(matches!(
            unpack_datetime(b"\x04\xe4\x07\x0d\x01", ColumnType::Date),
            Err(DecodeError::InvalidDate { .. })
        ));
    }

    #[test]
    fn duration_overflow() {
        assert!(matches!(
            unpack_duration(b"\x08\x00\xff\xff\xff\xff\x00\x00\x00"),
            Err(DecodeError::DurationOutOfRange { .. })
        ));
        assert!(matches!(
            unpack_duration(b"\x0c\x01\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff\xff"),
            Err(DecodeError::DurationOutOfRange { .. })
        ));
        // 65535 days fits
        let (value, _) = unpack_duration(b"\x08\x00\xff\xff\x00\x00\x00\x00\x00").unwrap();
        assert_eq!(value.to_micros(), 0xffff * 86_400 * 1_000_000);
    }
}
