/*!
Normalization of native integers.

Values coming from application code or from decoded statement parameters
may be any integer width. Encoders only deal with the 64-bit kinds, so
narrower ones are widened first.
*/
use crate::value::Datum;

#[derive(Clone, Debug, PartialEq)]
pub enum ParamValue {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Uint8(u8),
    Uint16(u16),
    Uint32(u32),
    Uint64(u64),
    Datum(Datum),
}

impl ParamValue {
    /// Widens signed integers to `Int64` and unsigned ones to `Uint64`,
    /// anything else is returned unchanged.
    pub fn uniform(self) -> ParamValue {
        use ParamValue::*;
        match self {
            Int8(v) => Int64(v.into()),
            Int16(v) => Int64(v.into()),
            Int32(v) => Int64(v.into()),
            Uint8(v) => Uint64(v.into()),
            Uint16(v) => Uint64(v.into()),
            Uint32(v) => Uint64(v.into()),
            v @ (Int64(_) | Uint64(_) | Datum(_)) => v,
        }
    }
}

impl From<ParamValue> for Datum {
    fn from(value: ParamValue) -> Datum {
        match value {
            ParamValue::Int8(v) => Datum::Int64(v.into()),
            ParamValue::Int16(v) => Datum::Int64(v.into()),
            ParamValue::Int32(v) => Datum::Int64(v.into()),
            ParamValue::Int64(v) => Datum::Int64(v),
            ParamValue::Uint8(v) => Datum::Uint64(v.into()),
            ParamValue::Uint16(v) => Datum::Uint64(v.into()),
            ParamValue::Uint32(v) => Datum::Uint64(v.into()),
            ParamValue::Uint64(v) => Datum::Uint64(v),
            ParamValue::Datum(d) => d,
        }
    }
}

macro_rules! param_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for ParamValue {
                fn from(v: $ty) -> ParamValue {
                    ParamValue::$variant(v)
                }
            }
        )*
    };
}

param_from! {
    i8 => Int8,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    u8 => Uint8,
    u16 => Uint16,
    u32 => Uint32,
    u64 => Uint64,
    Datum => Datum,
}

macro_rules! datum_from_narrow {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Datum {
                fn from(v: $ty) -> Datum {
                    ParamValue::from(v).into()
                }
            }
        )*
    };
}

datum_from_narrow!(i8, i16, i32, u8, u16, u32);
