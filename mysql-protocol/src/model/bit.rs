use std::borrow::Cow;
use std::fmt;

use crate::model::{CanonicalText, OutOfRangeError};

/// Raw bytes of a `BIT` value or of a `0x...` / `b'...'` literal.
///
/// The canonical text form is the bytes themselves, they aren't
/// required to be valid UTF-8.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinaryLiteral(Vec<u8>);

impl BinaryLiteral {
    pub fn new(bytes: impl Into<Vec<u8>>) -> BinaryLiteral {
        BinaryLiteral(bytes.into())
    }

    /// Big-endian bytes of `value` truncated to `byte_size` bytes (1 to 8).
    pub fn from_uint(value: u64, byte_size: usize) -> Result<BinaryLiteral, OutOfRangeError> {
        if !(1..=8).contains(&byte_size) {
            return Err(OutOfRangeError);
        }
        Ok(BinaryLiteral(value.to_be_bytes()[8 - byte_size..].to_vec()))
    }

    /// Big-endian bytes of `value` without leading zero bytes, at least one
    /// byte long.
    pub fn from_uint_trimmed(value: u64) -> BinaryLiteral {
        let bytes = value.to_be_bytes();
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(7);
        BinaryLiteral(bytes[start..].to_vec())
    }

    /// Interprets the bytes as a big-endian unsigned integer.
    pub fn to_uint(&self) -> Result<u64, OutOfRangeError> {
        let significant = match self.0.iter().position(|&b| b != 0) {
            Some(start) => &self.0[start..],
            None => return Ok(0),
        };
        if significant.len() > 8 {
            return Err(OutOfRangeError);
        }
        Ok(significant
            .iter()
            .fold(0u64, |acc, &b| acc << 8 | u64::from(b)))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for BinaryLiteral {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("0x")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl CanonicalText for BinaryLiteral {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&self.0)
    }
}
