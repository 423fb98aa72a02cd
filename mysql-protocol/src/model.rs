/*!
Value types carried by [`Datum`](crate::value::Datum).

Types that have no natural binary layout in the protocol (decimals, enums,
sets, bit values, JSON) are sent as their canonical text, see
[`CanonicalText`].
*/
mod bit;
mod decimal;
mod enums;
mod json;
mod time;

pub use self::bit::BinaryLiteral;
pub use self::decimal::{Decimal, ParseDecimalError};
pub use self::enums::{EnumValue, SetValue};
pub use self::json::Json;
pub use self::time::{Duration, Time, MAX_FSP};

use std::borrow::Cow;
use std::fmt;

/// Textual form of a value as the server renders it.
///
/// Used for every value in a text row, and as the string payload of values
/// that the binary row protocol sends as strings.
pub trait CanonicalText {
    fn canonical_text(&self) -> Cow<'_, [u8]>;
}

#[derive(Debug, PartialEq, Eq)]
pub struct OutOfRangeError;

impl std::error::Error for OutOfRangeError {}
impl fmt::Display for OutOfRangeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        "value is out of range".fmt(f)
    }
}

impl From<std::num::TryFromIntError> for OutOfRangeError {
    fn from(_: std::num::TryFromIntError) -> OutOfRangeError {
        OutOfRangeError
    }
}
