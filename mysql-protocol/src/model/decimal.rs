use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use num_bigint::{BigInt, Sign};
use num_traits::Zero;

use crate::model::CanonicalText;

/// Fixed-point decimal number of `DECIMAL` columns.
///
/// Stored as an unscaled integer and the number of digits after the decimal
/// point, so `42.00` keeps its two trailing zeros.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Decimal {
    pub(crate) unscaled: BigInt,
    pub(crate) scale: u32,
}

#[derive(Debug, PartialEq, Eq)]
pub struct ParseDecimalError;

impl Decimal {
    pub fn new(unscaled: BigInt, scale: u32) -> Decimal {
        Decimal { unscaled, scale }
    }
    pub fn unscaled(&self) -> &BigInt {
        &self.unscaled
    }
    pub fn scale(&self) -> u32 {
        self.scale
    }
    pub fn is_zero(&self) -> bool {
        self.unscaled.is_zero()
    }
    pub fn is_negative(&self) -> bool {
        self.unscaled.sign() == Sign::Minus
    }
}

impl From<i64> for Decimal {
    fn from(value: i64) -> Decimal {
        Decimal::new(value.into(), 0)
    }
}

impl FromStr for Decimal {
    type Err = ParseDecimalError;

    fn from_str(input: &str) -> Result<Decimal, ParseDecimalError> {
        let (negative, body) = match input.as_bytes().first() {
            Some(b'-') => (true, &input[1..]),
            Some(b'+') => (false, &input[1..]),
            _ => (false, input),
        };
        let (int_part, frac_part) = match body.split_once('.') {
            Some((int_part, frac_part)) => (int_part, frac_part),
            None => (body, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if int_part.is_empty() && frac_part.is_empty()
            || !all_digits(int_part)
            || !all_digits(frac_part)
        {
            return Err(ParseDecimalError);
        }
        let digits = format!("{}{}", int_part, frac_part);
        let magnitude = BigInt::parse_bytes(digits.as_bytes(), 10).ok_or(ParseDecimalError)?;
        let scale = u32::try_from(frac_part.len()).map_err(|_| ParseDecimalError)?;
        Ok(Decimal {
            unscaled: if negative { -magnitude } else { magnitude },
            scale,
        })
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let digits = self.unscaled.magnitude().to_string();
        if self.is_negative() {
            f.write_str("-")?;
        }
        let scale = self.scale as usize;
        if scale == 0 {
            return f.write_str(&digits);
        }
        if digits.len() > scale {
            let (int_part, frac_part) = digits.split_at(digits.len() - scale);
            write!(f, "{}.{}", int_part, frac_part)
        } else {
            write!(f, "0.{:0>width$}", digits, width = scale)
        }
    }
}

impl CanonicalText for Decimal {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Owned(self.to_string().into_bytes())
    }
}

impl fmt::Display for ParseDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        "invalid decimal literal".fmt(f)
    }
}

impl std::error::Error for ParseDecimalError {}

#[cfg(feature = "with-serde")]
impl serde::Serialize for Decimal {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
