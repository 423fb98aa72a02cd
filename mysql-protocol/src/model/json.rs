use std::borrow::Cow;
use std::fmt;

use crate::model::CanonicalText;

/// A newtype for JSON documents of `JSON` columns
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Json(String);

impl Json {
    /// Create a JSON value without checking the contents.
    ///
    /// Values produced by the server are trusted to be valid JSON. When
    /// building one from arbitrary data, serializing with serde_json (see
    /// the `with-serde` feature) is recommended.
    pub fn new_unchecked(value: String) -> Json {
        Json(value)
    }
}

impl AsRef<str> for Json {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::ops::Deref for Json {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<Json> for String {
    fn from(val: Json) -> Self {
        val.0
    }
}

impl fmt::Display for Json {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl CanonicalText for Json {
    fn canonical_text(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.0.as_bytes())
    }
}

#[cfg(feature = "with-serde")]
impl From<&serde_json::Value> for Json {
    fn from(value: &serde_json::Value) -> Json {
        Json(value.to_string())
    }
}

#[cfg(feature = "with-serde")]
impl TryFrom<&Json> for serde_json::Value {
    type Error = serde_json::Error;
    fn try_from(value: &Json) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::from_str(&value.0)
    }
}
