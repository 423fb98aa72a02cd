use std::convert::TryFrom;
use std::fmt;

/// Header byte preceding every binary result row.
pub const OK_HEADER: u8 = 0x00;

/// Length-encoded NULL marker, also used for NULL cells of a text row.
pub const NULL_MARKER: u8 = 0xfb;

/// Decimal count meaning "precision not fixed" for a column.
pub const NOT_FIXED_DEC: u8 = 31;

/// Column type tag as sent in column definitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum ColumnType {
    Decimal = 0x00,
    Tiny = 0x01,
    Short = 0x02,
    Long = 0x03,
    Float = 0x04,
    Double = 0x05,
    Null = 0x06,
    Timestamp = 0x07,
    LongLong = 0x08,
    Int24 = 0x09,
    Date = 0x0a,
    Duration = 0x0b,
    Datetime = 0x0c,
    Year = 0x0d,
    NewDate = 0x0e,
    Varchar = 0x0f,
    Bit = 0x10,
    Json = 0xf5,
    NewDecimal = 0xf6,
    Enum = 0xf7,
    Set = 0xf8,
    TinyBlob = 0xf9,
    MediumBlob = 0xfa,
    LongBlob = 0xfb,
    Blob = 0xfc,
    VarString = 0xfd,
    String = 0xfe,
    Geometry = 0xff,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownColumnType(pub u8);

/// How byte strings are framed inside a binary row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StringFraming {
    /// Length-encoded integer prefix followed by the payload.
    #[default]
    LengthEncoded,
    /// Payload followed by a single zero byte (X protocol).
    ZeroTerminated,
}

/// Destination column of a result set, as far as value encoding cares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ColumnInfo {
    pub tp: ColumnType,
    pub decimal: u8,
}

impl ColumnType {
    pub fn is_temporal(self) -> bool {
        use ColumnType::*;
        matches!(self, Timestamp | Datetime | Date | NewDate | Duration)
    }
}

impl From<ColumnType> for u8 {
    fn from(tp: ColumnType) -> u8 {
        tp as u8
    }
}

impl TryFrom<u8> for ColumnType {
    type Error = UnknownColumnType;
    fn try_from(byte: u8) -> Result<ColumnType, UnknownColumnType> {
        use ColumnType::*;
        let tp = match byte {
            0x00 => Decimal,
            0x01 => Tiny,
            0x02 => Short,
            0x03 => Long,
            0x04 => Float,
            0x05 => Double,
            0x06 => Null,
            0x07 => Timestamp,
            0x08 => LongLong,
            0x09 => Int24,
            0x0a => Date,
            0x0b => Duration,
            0x0c => Datetime,
            0x0d => Year,
            0x0e => NewDate,
            0x0f => Varchar,
            0x10 => Bit,
            0xf5 => Json,
            0xf6 => NewDecimal,
            0xf7 => Enum,
            0xf8 => Set,
            0xf9 => TinyBlob,
            0xfa => MediumBlob,
            0xfb => LongBlob,
            0xfc => Blob,
            0xfd => VarString,
            0xfe => String,
            0xff => Geometry,
            _ => return Err(UnknownColumnType(byte)),
        };
        Ok(tp)
    }
}

impl fmt::Display for UnknownColumnType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown column type 0x{:02x}", self.0)
    }
}

impl std::error::Error for UnknownColumnType {}

impl ColumnInfo {
    /// Column with unspecified decimal precision.
    pub fn new(tp: ColumnType) -> ColumnInfo {
        ColumnInfo {
            tp,
            decimal: NOT_FIXED_DEC,
        }
    }
    pub fn with_decimal(mut self, decimal: u8) -> ColumnInfo {
        self.decimal = decimal;
        self
    }
    /// Digits after the decimal point to use when rendering floats, if the
    /// column fixes them.
    pub fn fixed_decimal(&self) -> Option<usize> {
        if self.decimal > 0 && self.decimal != NOT_FIXED_DEC {
            Some(self.decimal as usize)
        } else {
            None
        }
    }
}

impl From<ColumnType> for ColumnInfo {
    fn from(tp: ColumnType) -> ColumnInfo {
        ColumnInfo::new(tp)
    }
}
