use std::borrow::Cow;
use std::convert::TryFrom;
use std::fmt::{self, Display};

use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};

use crate::common::ColumnType;
use crate::model::{CanonicalText, OutOfRangeError};

/// Maximum fractional seconds precision.
pub const MAX_FSP: u8 = 6;

const MAX_YEAR: u16 = 9999;

const MICROS_PER_SECOND: u64 = 1_000_000;

/// Date or date and time of a `DATE`, `DATETIME` or `TIMESTAMP` column.
///
/// Fields are stored the way the server stores them, so zero dates
/// (`0000-00-00`) and dates with zero parts (`2020-00-00`) are
/// representable. The column type decides both the text form and the
/// binary layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Time {
    pub(crate) year: u16,
    pub(crate) month: u8,
    pub(crate) day: u8,
    pub(crate) hour: u8,
    pub(crate) minute: u8,
    pub(crate) second: u8,
    pub(crate) microsecond: u32,
    pub(crate) tp: ColumnType,
    pub(crate) fsp: u8,
}

/// Value of a `TIME` column: a signed span of time.
///
/// Precision: microseconds. `fsp` is the number of fractional digits the
/// value was rounded to and that the text form shows.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Duration {
    pub(crate) micros: i64,
    pub(crate) fsp: u8,
}

fn write_fraction(f: &mut fmt::Formatter<'_>, micros: u32, fsp: u8) -> fmt::Result {
    if fsp == 0 {
        return Ok(());
    }
    let fsp = fsp.min(MAX_FSP);
    write!(
        f,
        ".{:0width$}",
        micros / 10u32.pow(u32::from(MAX_FSP - fsp)),
        width = fsp as usize
    )
}

impl Time {
    pub fn zero(tp: ColumnType) -> Time {
        Time {
            year: 0,
            month: 0,
            day: 0,
            hour: 0,
            minute: 0,
            second: 0,
            microsecond: 0,
            tp,
            fsp: 0,
        }
    }

    /// Date at midnight. Zero parts are allowed, calendar validity isn't
    /// checked.
    pub fn from_ymd(tp: ColumnType, year: u16, month: u8, day: u8) -> Result<Time, OutOfRangeError> {
        if year > MAX_YEAR || month > 12 || day > 31 {
            return Err(OutOfRangeError);
        }
        Ok(Time {
            year,
            month,
            day,
            ..Time::zero(tp)
        })
    }

    pub fn and_hms_micro(
        self,
        hour: u8,
        minute: u8,
        second: u8,
        microsecond: u32,
    ) -> Result<Time, OutOfRangeError> {
        if hour > 23 || minute > 59 || second > 59 || u64::from(microsecond) >= MICROS_PER_SECOND {
            return Err(OutOfRangeError);
        }
        Ok(Time {
            hour,
            minute,
            second,
            microsecond,
            ..self
        })
    }

    pub fn with_fsp(self, fsp: u8) -> Result<Time, OutOfRangeError> {
        if fsp > MAX_FSP {
            return Err(OutOfRangeError);
        }
        Ok(Time { fsp, ..self })
    }

    /// Fails for years outside of `0..=9999`.
    pub fn from_naive(
        tp: ColumnType,
        value: &NaiveDateTime,
        fsp: u8,
    ) -> Result<Time, OutOfRangeError> {
        let year = u16::try_from(value.year())?;
        if year > MAX_YEAR {
            return Err(OutOfRangeError);
        }
        // leap seconds are reported as nanosecond >= 1e9
        let microsecond = (value.nanosecond() / 1000).min(999_999);
        Ok(Time {
            year,
            month: value.month() as u8,
            day: value.day() as u8,
            hour: value.hour() as u8,
            minute: value.minute() as u8,
            second: value.second() as u8,
            microsecond,
            tp,
            fsp: fsp.min(MAX_FSP),
        })
    }

    /// Returns `None` for zero dates and dates that don't exist in the
    /// calendar.
    pub fn to_naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(i32::from(self.year), u32::from(self.month), u32::from(self.day))?
            .and_hms_micro_opt(
                u32::from(self.hour),
                u32::from(self.minute),
                u32::from(self.second),
                self.microsecond,
            )
    }

    pub fn is_zero(&self) -> bool {
        self.year == 0
            && self.month == 0
            && self.day == 0
            && self.hour == 0
            && self.minute == 0
            && self.second == 0
            && self.microsecond == 0
    }

    pub fn column_type(&self) -> ColumnType {
        self.tp
    }
    pub fn fsp(&self) -> u8 {
        self.fsp
    }
    pub fn year(&self) -> u16 {
        self.year
    }
    pub fn month(&self) -> u8 {
        self.month
    }
    pub fn day(&self) -> u8 {
        self.day
    }
    pub fn hour(&self) -> u8 {
        self.hour
    }
    pub fn minute(&self) -> u8 {
        self.minute
    }
    pub fn second(&self) -> u8 {
        self.second
    }
    pub fn microsecond(&self) -> u32 {
        self.microsecond
    }
}

impl Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if matches!(self.tp, ColumnType::Date | ColumnType::NewDate) {
            return Ok(());
        }
        write!(f, " {:02}:{:02}:{:02}", self.hour, self.minute, self.second)?;
        write_fraction(f, self.microsecond, self.fsp)
    }
}

impl CanonicalText for Time {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

fn round_micros(micros: i64, fsp: u8) -> i64 {
    let unit = 10_i64.pow(u32::from(MAX_FSP - fsp));
    let rem = micros % unit;
    if rem.abs() * 2 >= unit {
        (micros - rem).saturating_add(unit * micros.signum())
    } else {
        micros - rem
    }
}

impl Duration {
    pub const ZERO: Duration = Duration { micros: 0, fsp: 0 };

    /// Rounds `micros` to `fsp` fractional digits, half away from zero.
    pub fn new(micros: i64, fsp: u8) -> Result<Duration, OutOfRangeError> {
        if fsp > MAX_FSP {
            return Err(OutOfRangeError);
        }
        Ok(Duration {
            micros: round_micros(micros, fsp),
            fsp,
        })
    }

    /// Duration with full microsecond precision.
    pub fn from_micros(micros: i64) -> Duration {
        Duration {
            micros,
            fsp: MAX_FSP,
        }
    }

    pub fn from_secs(secs: i64) -> Duration {
        Duration {
            micros: secs.saturating_mul(MICROS_PER_SECOND as i64),
            fsp: 0,
        }
    }

    pub fn to_micros(self) -> i64 {
        self.micros
    }

    pub fn fsp(&self) -> u8 {
        self.fsp
    }

    pub fn is_zero(&self) -> bool {
        self.micros == 0
    }

    // Returns true if self is negative and false if the duration
    // is zero or positive.
    pub fn is_negative(&self) -> bool {
        self.micros.is_negative()
    }

    /// Magnitude in microseconds, valid for `i64::MIN` too.
    pub fn abs_micros(&self) -> u64 {
        self.micros.unsigned_abs()
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_negative() {
            write!(f, "-")?;
        }
        let abs = self.abs_micros();
        let (sec, micros) = (abs / MICROS_PER_SECOND, abs % MICROS_PER_SECOND);
        write!(f, "{:02}:{:02}:{:02}", sec / 3600, sec / 60 % 60, sec % 60)?;
        write_fraction(f, micros as u32, self.fsp)
    }
}

impl CanonicalText for Duration {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

impl TryFrom<std::time::Duration> for Duration {
    type Error = OutOfRangeError;

    fn try_from(value: std::time::Duration) -> Result<Self, Self::Error> {
        let micros = i64::try_from(value.as_micros())?;
        Ok(Duration::from_micros(micros))
    }
}
