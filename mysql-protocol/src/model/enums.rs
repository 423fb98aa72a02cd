use std::borrow::Cow;
use std::fmt;

use crate::model::CanonicalText;

/// Member of an `ENUM` column: its name and 1-based index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EnumValue {
    name: String,
    value: u64,
}

/// Value of a `SET` column: comma-separated member names and the bitmask
/// of selected members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SetValue {
    name: String,
    value: u64,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, value: u64) -> EnumValue {
        EnumValue {
            name: name.into(),
            value,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl SetValue {
    pub fn new(name: impl Into<String>, value: u64) -> SetValue {
        SetValue {
            name: name.into(),
            value,
        }
    }
    /// Builds a set value from all member names of the column and the
    /// selection bitmask.
    pub fn from_members<S: AsRef<str>>(members: &[S], value: u64) -> SetValue {
        let name = members
            .iter()
            .enumerate()
            .filter(|(i, _)| *i < 64 && value & (1 << i) != 0)
            .map(|(_, m)| m.as_ref())
            .collect::<Vec<_>>()
            .join(",");
        SetValue { name, value }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn value(&self) -> u64 {
        self.value
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl fmt::Display for SetValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl CanonicalText for EnumValue {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.name.as_bytes())
    }
}

impl CanonicalText for SetValue {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.name.as_bytes())
    }
}
