//! Interchange schema versions.
//!
//! The version parameter picks which serialization format an export or feed
//! uses, so unlike the form validators it is strict: an unknown version is
//! an error, never a silent fallback.

use serde::de::{self, Deserialize, Deserializer, Visitor};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::input::RawValue;

/// A known interchange schema version.
///
/// Serializes as its string form. Deserializes from that string or from a
/// bare number such as `1.2`, which is how environment overrides arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize)]
pub enum SchemaVersion {
    /// Version 1.1.
    #[serde(rename = "1.1")]
    V1_1,
    /// Version 1.2.
    #[serde(rename = "1.2")]
    V1_2,
    /// Version 1.3.
    #[serde(rename = "1.3")]
    V1_3,
    /// Version 1.4.
    #[default]
    #[serde(rename = "1.4")]
    V1_4,
}

impl SchemaVersion {
    /// Every supported version, oldest first.
    pub const ALL: [Self; 4] = [Self::V1_1, Self::V1_2, Self::V1_3, Self::V1_4];

    /// The version string, e.g. `"1.4"`.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1_1 => "1.1",
            Self::V1_2 => "1.2",
            Self::V1_3 => "1.3",
            Self::V1_4 => "1.4",
        }
    }

    /// Numeric code of the version: major times ten plus minor.
    #[must_use]
    pub fn code(&self) -> u16 {
        match self {
            Self::V1_1 => 11,
            Self::V1_2 => 12,
            Self::V1_3 => 13,
            Self::V1_4 => 14,
        }
    }

    /// XML namespace of the version.
    #[must_use]
    pub fn namespace(&self) -> String {
        format!("http://zesty.ca/pfif/{}", self.as_str())
    }

    /// Look up a version by its string form.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.as_str() == name)
    }
}

impl std::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SchemaVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s).ok_or_else(|| Error::unknown_schema_version(s))
    }
}

impl<'de> Deserialize<'de> for SchemaVersion {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(SchemaVersionVisitor)
    }
}

#[derive(Debug)]
struct SchemaVersionVisitor;

impl SchemaVersionVisitor {
    fn lookup<E: de::Error>(name: &str) -> std::result::Result<SchemaVersion, E> {
        SchemaVersion::from_name(name).ok_or_else(|| {
            E::invalid_value(de::Unexpected::Str(name), &"a schema version such as \"1.4\"")
        })
    }
}

impl Visitor<'_> for SchemaVersionVisitor {
    type Value = SchemaVersion;

    fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("a schema version string or number")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<SchemaVersion, E> {
        Self::lookup(v.trim())
    }

    fn visit_f32<E: de::Error>(self, v: f32) -> std::result::Result<SchemaVersion, E> {
        Self::lookup(&v.to_string())
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<SchemaVersion, E> {
        Self::lookup(&v.to_string())
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<SchemaVersion, E> {
        Self::lookup(&v.to_string())
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<SchemaVersion, E> {
        Self::lookup(&v.to_string())
    }
}

/// Resolve the requested schema version.
///
/// An empty value selects `default`.
///
/// # Errors
///
/// Returns [`Error::UnknownSchemaVersion`] for a non-empty unknown version and
/// [`Error::NotText`] if the value is not text.
pub fn validate_version(value: &RawValue, default: SchemaVersion) -> Result<SchemaVersion> {
    let text = value.to_text()?;
    let name = text.trim();
    if name.is_empty() {
        return Ok(default);
    }
    name.parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_version_validates_to_itself() {
        for version in SchemaVersion::ALL {
            let raw = RawValue::from(version.as_str());
            assert_eq!(validate_version(&raw, SchemaVersion::V1_1).unwrap(), version);
        }
    }

    #[test]
    fn test_empty_selects_default() {
        let raw = RawValue::from("");
        let version = validate_version(&raw, SchemaVersion::default()).unwrap();
        assert_eq!(version, SchemaVersion::V1_4);
        assert_eq!(version.code(), 14);

        let version = validate_version(&raw, SchemaVersion::V1_2).unwrap();
        assert_eq!(version.code(), 12);
    }

    #[test]
    fn test_unknown_version_fails() {
        let err = validate_version(&RawValue::from("1.0"), SchemaVersion::default()).unwrap_err();
        assert!(matches!(err, Error::UnknownSchemaVersion { ref version } if version == "1.0"));
        assert!(validate_version(&RawValue::from("2"), SchemaVersion::default()).is_err());
    }

    #[test]
    fn test_non_text_fails() {
        assert!(validate_version(&RawValue::Null, SchemaVersion::default()).is_err());
    }

    #[test]
    fn test_deserialize_string_and_number() {
        let version: SchemaVersion = serde_json::from_str("\"1.3\"").unwrap();
        assert_eq!(version, SchemaVersion::V1_3);
        let version: SchemaVersion = serde_json::from_str("1.2").unwrap();
        assert_eq!(version, SchemaVersion::V1_2);
        assert!(serde_json::from_str::<SchemaVersion>("1.0").is_err());
        assert!(serde_json::from_str::<SchemaVersion>("\"2.0\"").is_err());
        assert!(serde_json::from_str::<SchemaVersion>("2").is_err());
    }

    #[test]
    fn test_serialize_round_trips_string() {
        let json = serde_json::to_string(&SchemaVersion::V1_1).unwrap();
        assert_eq!(json, "\"1.1\"");
        assert_eq!(serde_json::from_str::<SchemaVersion>(&json).unwrap(), SchemaVersion::V1_1);
    }

    #[test]
    fn test_codes_and_namespaces() {
        assert_eq!(SchemaVersion::V1_1.code(), 11);
        assert_eq!(SchemaVersion::V1_3.namespace(), "http://zesty.ca/pfif/1.3");
        assert_eq!(SchemaVersion::V1_2.to_string(), "1.2");
    }

    #[test]
    fn test_serde_uses_version_strings() {
        let json = serde_json::to_string(&SchemaVersion::V1_3).unwrap();
        assert_eq!(json, "\"1.3\"");
        let parsed: SchemaVersion = serde_json::from_str("\"1.1\"").unwrap();
        assert_eq!(parsed, SchemaVersion::V1_1);
    }
}
