//! Validators for free text, flags, roles, expiry and contact fields.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::input::RawValue;

/// Local part, then one or more domain labels of 1-63 characters, then a TLD.
const EMAIL_PATTERN: &str = r"(?i)^[-a-z0-9_.%$+]+@(?:[-a-z0-9]{1,63}\.)+[a-z]{2,63}$";

/// A primary subtag followed by optional alphanumeric subtags.
const LANGUAGE_TAG_PATTERN: &str = r"^[A-Za-z]{1,8}(?:-[A-Za-z0-9]{1,8})*$";

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("email pattern is valid"))
}

fn language_tag_regex() -> &'static Regex {
    static LANGUAGE_TAG: OnceLock<Regex> = OnceLock::new();
    LANGUAGE_TAG
        .get_or_init(|| Regex::new(LANGUAGE_TAG_PATTERN).expect("language tag pattern is valid"))
}

/// Strip leading and trailing whitespace.
///
/// # Errors
///
/// Returns [`Error::NotText`] if the value is not text.
pub fn strip(value: &RawValue) -> Result<String> {
    Ok(value.to_text()?.trim().to_string())
}

/// Canonicalize a yes/no flag: `"yes"` in any case becomes `"yes"`,
/// anything else becomes `""`.
///
/// # Errors
///
/// Returns [`Error::NotText`] if the value is not text.
pub fn validate_yes(value: &RawValue) -> Result<&'static str> {
    let text = value.to_text()?;
    if text.eq_ignore_ascii_case("yes") {
        Ok("yes")
    } else {
        Ok("")
    }
}

/// Which side of a search the user is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Looking for someone.
    #[default]
    Seek,
    /// Providing information about someone.
    Provide,
}

impl Role {
    /// The canonical parameter value.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Seek => "seek",
            Self::Provide => "provide",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonicalize a role. Only an exact, case-insensitive `"provide"` selects
/// [`Role::Provide`]; near-misses such as `"pro"` or `"provider"` fall back to
/// [`Role::Seek`].
///
/// # Errors
///
/// Returns [`Error::NotText`] if the value is not text.
pub fn validate_role(value: &RawValue) -> Result<Role> {
    let text = value.to_text()?;
    if text.eq_ignore_ascii_case("provide") {
        Ok(Role::Provide)
    } else {
        Ok(Role::Seek)
    }
}

/// Accept a non-negative number of days until expiry.
///
/// Negative, non-numeric, null and empty values yield `None`: no expiry.
#[must_use]
pub fn validate_expiry(value: &RawValue) -> Option<i64> {
    let days = match value {
        RawValue::Integer(n) => *n,
        RawValue::Null => return None,
        RawValue::Text(_) | RawValue::Bytes(_) => value.to_text().ok()?.trim().parse().ok()?,
    };
    (days >= 0).then_some(days)
}

/// Check an email address.
///
/// Returns `Some(true)` for a plausible address, `Some(false)` for a non-empty
/// value that is not one, and `None` when there is nothing to check.
///
/// # Errors
///
/// Returns [`Error::NotText`] for an integer value.
pub fn validate_email(value: &RawValue) -> Result<Option<bool>> {
    if matches!(value, RawValue::Null) {
        return Ok(None);
    }
    let text = value.to_text()?;
    if text.is_empty() {
        return Ok(None);
    }
    Ok(Some(email_regex().is_match(&text)))
}

/// Check a language tag such as `en` or `zh-TW`.
///
/// An empty value yields `None` so the caller's default applies.
///
/// # Errors
///
/// Returns [`Error::InvalidLanguageTag`] for a malformed tag and
/// [`Error::NotText`] if the value is not text.
pub fn validate_language_tag(value: &RawValue) -> Result<Option<String>> {
    let text = value.to_text()?;
    let tag = text.trim();
    if tag.is_empty() {
        return Ok(None);
    }
    if language_tag_regex().is_match(tag) {
        Ok(Some(tag.to_string()))
    } else {
        Err(Error::invalid_language_tag(tag))
    }
}
