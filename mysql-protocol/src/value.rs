use bytes::Bytes;

use crate::model::{BinaryLiteral, Decimal, Duration, EnumValue, Json, SetValue, Time};

/// A single cell of a result row.
#[derive(Clone, Debug, PartialEq)]
pub enum Datum {
    Null,
    Int64(i64),
    Uint64(u64),
    Float32(f32),
    Float64(f64),
    Str(String),
    Bytes(Bytes),
    Decimal(Decimal),
    Time(Time),
    Duration(Duration),
    Enum(EnumValue),
    Set(SetValue),
    Bit(BinaryLiteral),
    BinaryLiteral(BinaryLiteral),
    Json(Json),
}

impl Datum {
    pub fn kind(&self) -> &'static str {
        use Datum::*;
        match self {
            Null => "null",
            Int64(..) => "int64",
            Uint64(..) => "uint64",
            Float32(..) => "float32",
            Float64(..) => "float64",
            Str(..) => "string",
            Bytes(..) => "bytes",
            Decimal(..) => "decimal",
            Time(..) => "time",
            Duration(..) => "duration",
            Enum(..) => "enum",
            Set(..) => "set",
            Bit(..) => "bit",
            BinaryLiteral(..) => "binary_literal",
            Json(..) => "json",
        }
    }
    pub fn is_null(&self) -> bool {
        matches!(self, Datum::Null)
    }
}

impl From<i64> for Datum {
    fn from(v: i64) -> Datum {
        Datum::Int64(v)
    }
}

impl From<u64> for Datum {
    fn from(v: u64) -> Datum {
        Datum::Uint64(v)
    }
}

impl From<f32> for Datum {
    fn from(v: f32) -> Datum {
        Datum::Float32(v)
    }
}

impl From<f64> for Datum {
    fn from(v: f64) -> Datum {
        Datum::Float64(v)
    }
}

impl From<String> for Datum {
    fn from(s: String) -> Datum {
        Datum::Str(s)
    }
}

impl From<&str> for Datum {
    fn from(s: &str) -> Datum {
        Datum::Str(s.to_owned())
    }
}

impl From<Bytes> for Datum {
    fn from(b: Bytes) -> Datum {
        Datum::Bytes(b)
    }
}

impl From<Decimal> for Datum {
    fn from(v: Decimal) -> Datum {
        Datum::Decimal(v)
    }
}

impl From<Time> for Datum {
    fn from(v: Time) -> Datum {
        Datum::Time(v)
    }
}

impl From<Duration> for Datum {
    fn from(v: Duration) -> Datum {
        Datum::Duration(v)
    }
}

impl From<EnumValue> for Datum {
    fn from(v: EnumValue) -> Datum {
        Datum::Enum(v)
    }
}

impl From<SetValue> for Datum {
    fn from(v: SetValue) -> Datum {
        Datum::Set(v)
    }
}

impl From<Json> for Datum {
    fn from(v: Json) -> Datum {
        Datum::Json(v)
    }
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
    fn from(v: Option<T>) -> Datum {
        v.map(Into::into).unwrap_or(Datum::Null)
    }
}
