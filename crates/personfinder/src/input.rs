//! Raw request input.
//!
//! Request parameters arrive as name/value pairs where a name may repeat and
//! a value may be text, undecoded bytes, or (from non-form callers) an
//! integer or an explicit null. Nothing here validates; it only normalizes
//! encodings so validators always see `&str`.

use std::borrow::Cow;

use crate::error::{Error, Result};

/// A single raw value as received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    /// Already-decoded text.
    Text(String),
    /// Undecoded bytes, UTF-8 or Latin-1.
    Bytes(Vec<u8>),
    /// An integer supplied by a programmatic caller.
    Integer(i64),
    /// An explicit null.
    Null,
}

impl RawValue {
    /// Short name of the value's kind, used in error messages.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Bytes(_) => "bytes",
            Self::Integer(_) => "integer",
            Self::Null => "null",
        }
    }

    /// Borrow the value as text, decoding bytes if necessary.
    ///
    /// Bytes that are valid UTF-8 decode as UTF-8; anything else is taken to
    /// be Latin-1, where every byte is one code point.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotText`] for `Integer` and `Null`.
    pub fn to_text(&self) -> Result<Cow<'_, str>> {
        match self {
            Self::Text(s) => Ok(Cow::Borrowed(s)),
            Self::Bytes(bytes) => Ok(decode_bytes(bytes)),
            Self::Integer(_) | Self::Null => Err(Error::NotText { found: self.kind() }),
        }
    }

    /// Whether the value is empty text (or empty bytes).
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::Bytes(b) => b.is_empty(),
            Self::Integer(_) | Self::Null => false,
        }
    }
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<u8>> for RawValue {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl<T: Into<RawValue>> From<Option<T>> for RawValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

fn decode_bytes(bytes: &[u8]) -> Cow<'_, str> {
    match std::str::from_utf8(bytes) {
        Ok(s) => Cow::Borrowed(s),
        Err(_) => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
    }
}

/// All raw parameters of one request, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawInput {
    entries: Vec<(String, Vec<RawValue>)>,
}

impl RawInput {
    /// Create an empty input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an input from name/value pairs; repeated names accumulate.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<RawValue>,
    {
        let mut input = Self::new();
        for (name, value) in pairs {
            input.append(name, value);
        }
        input
    }

    /// Append a value under `name`.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.entries.push((name, vec![value])),
        }
    }

    /// The first value sent for `name`, if any.
    #[must_use]
    pub fn get_first(&self, name: &str) -> Option<&RawValue> {
        self.get_all(name).first()
    }

    /// Every value sent for `name`, in arrival order.
    #[must_use]
    pub fn get_all(&self, name: &str) -> &[RawValue] {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map_or(&[], |(_, values)| values.as_slice())
    }

    /// Whether any value was sent for `name`.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        !self.get_all(name).is_empty()
    }

    /// Iterate over field names in arrival order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Number of distinct field names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no fields were sent.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
