//! Validators for request parameters.
//!
//! Each validator turns one [`RawValue`] into a canonical value. Most are
//! permissive: malformed end-user input resolves to a safe default instead
//! of failing the request. The exceptions are structural (a validator handed
//! a non-text value) and protocol-level (an unknown schema version or a
//! malformed language tag); those return an [`Error`](crate::Error).
//!
//! The free functions are the library proper. The unit structs implementing
//! [`Validator`] adapt them to the parameter binder, reporting a soft
//! rejection as [`Validation::UseDefault`].
//!
//! # Example
//!
//! ```
//! use personfinder::input::RawValue;
//! use personfinder::validators::{validate_role, Role, Validation, Validator, YesFlag};
//!
//! assert_eq!(validate_role(&RawValue::from("PROVIDE")).unwrap(), Role::Provide);
//!
//! let verdict = YesFlag.validate(&RawValue::from("nope")).unwrap();
//! assert_eq!(verdict, Validation::UseDefault);
//! ```

mod age;
mod text;
mod version;

use serde::Serialize;

pub use age::{fuzzify_age, validate_age, AGE_BUCKET_WIDTH};
pub use text::{
    strip, validate_email, validate_expiry, validate_language_tag, validate_role, validate_yes,
    Role,
};
pub use version::{validate_version, SchemaVersion};

use crate::error::Result;
use crate::input::RawValue;

/// A canonical parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Value {
    /// Text.
    Text(String),
    /// An integer.
    Integer(i64),
    /// A boolean.
    Bool(bool),
    /// A schema version.
    Version(SchemaVersion),
    /// No value.
    Null,
}

impl Value {
    /// The text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// The integer, if this is an integer value.
    #[must_use]
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The boolean, if this is a boolean value.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The schema version, if this is a version value.
    #[must_use]
    pub fn as_version(&self) -> Option<SchemaVersion> {
        match self {
            Self::Version(v) => Some(*v),
            _ => None,
        }
    }

    /// Whether this is [`Value::Null`].
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<SchemaVersion> for Value {
    fn from(value: SchemaVersion) -> Self {
        Self::Version(value)
    }
}

/// Outcome of validating one raw value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    /// The input was acceptable and canonicalized to this value.
    Valid(Value),
    /// The input was absent or unacceptable; use the field's default.
    UseDefault,
}

impl Validation {
    /// Resolve against a default.
    #[must_use]
    pub fn or_default(self, default: &Value) -> Value {
        match self {
            Self::Valid(value) => value,
            Self::UseDefault => default.clone(),
        }
    }

    /// Whether this is a soft rejection.
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self, Self::UseDefault)
    }
}

/// A named, stateless parameter validator.
///
/// Any `Fn(&RawValue) -> Result<Validation>` is also a validator, which is
/// handy for one-off fields.
pub trait Validator: Send + Sync {
    /// Validate one raw value.
    ///
    /// # Errors
    ///
    /// Returns an error only for structural or protocol violations; malformed
    /// user input yields [`Validation::UseDefault`].
    fn validate(&self, raw: &RawValue) -> Result<Validation>;
}

impl<F> Validator for F
where
    F: Fn(&RawValue) -> Result<Validation> + Send + Sync,
{
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        self(raw)
    }
}

fn non_empty_text(text: String) -> Validation {
    if text.is_empty() {
        Validation::UseDefault
    } else {
        Validation::Valid(Value::Text(text))
    }
}

/// Free text with surrounding whitespace stripped.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextField;

impl Validator for TextField {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(non_empty_text(strip(raw)?))
    }
}

/// A `yes` flag.
#[derive(Debug, Clone, Copy, Default)]
pub struct YesFlag;

impl Validator for YesFlag {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(non_empty_text(validate_yes(raw)?.to_string()))
    }
}

/// The seek/provide role.
#[derive(Debug, Clone, Copy, Default)]
pub struct RoleField;

impl Validator for RoleField {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        let role = validate_role(raw)?;
        Ok(Validation::Valid(Value::from(role.as_str())))
    }
}

/// Days until a record expires.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExpiryDays;

impl Validator for ExpiryDays {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(validate_expiry(raw).map_or(Validation::UseDefault, |days| {
            Validation::Valid(Value::Integer(days))
        }))
    }
}

/// An email address, reported as valid or not.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailAddress;

impl Validator for EmailAddress {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(validate_email(raw)?.map_or(Validation::UseDefault, |ok| {
            Validation::Valid(Value::Bool(ok))
        }))
    }
}

/// The interchange schema version, with the default used for empty input.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaVersionField {
    /// Version selected by an empty value.
    pub default: SchemaVersion,
}

impl SchemaVersionField {
    /// Create a version validator with the given default.
    #[must_use]
    pub fn new(default: SchemaVersion) -> Self {
        Self { default }
    }
}

impl Validator for SchemaVersionField {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        let version = validate_version(raw, self.default)?;
        Ok(Validation::Valid(Value::Version(version)))
    }
}

/// An age or age range.
#[derive(Debug, Clone, Copy, Default)]
pub struct AgeField;

impl Validator for AgeField {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(non_empty_text(validate_age(raw)?))
    }
}

/// A language tag.
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageTagField;

impl Validator for LanguageTagField {
    fn validate(&self, raw: &RawValue) -> Result<Validation> {
        Ok(validate_language_tag(raw)?.map_or(Validation::UseDefault, |tag| {
            Validation::Valid(Value::Text(tag))
        }))
    }
}
