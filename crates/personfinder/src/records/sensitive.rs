//! The set of personally identifying fields.

use super::{field_name, is_record_id, RecordOrigin};

/// Fields that are always redacted before a record leaves the trust boundary.
pub const BUILTIN_SENSITIVE_FIELDS: [&str; 3] = ["author_email", "author_phone", "date_of_birth"];

/// Base names of sensitive fields.
///
/// A field matches if its name is a base name, or a base name under either
/// origin prefix as produced by [`field_name`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SensitiveFieldSet {
    base_names: Vec<String>,
}

impl SensitiveFieldSet {
    /// The built-in set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            base_names: BUILTIN_SENSITIVE_FIELDS
                .iter()
                .map(|name| (*name).to_string())
                .collect(),
        }
    }

    /// The built-in set plus `extra` base names.
    ///
    /// Duplicates and record identifiers are skipped; identifiers are never
    /// redacted.
    #[must_use]
    pub fn with_extra<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::builtin();
        for name in extra {
            let name = name.into();
            if !is_record_id(&name) && !set.contains_base(&name) {
                set.base_names.push(name);
            }
        }
        set
    }

    /// Whether `base` is one of the base names.
    #[must_use]
    pub fn contains_base(&self, base: &str) -> bool {
        self.base_names.iter().any(|name| name == base)
    }

    /// Whether a field named `field` holds sensitive data, in any record shape.
    #[must_use]
    pub fn matches(&self, field: &str) -> bool {
        self.base_names.iter().any(|base| {
            base == field
                || RecordOrigin::ALL
                    .iter()
                    .any(|origin| field_name(base, *origin) == field)
        })
    }

    /// The base names.
    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.base_names.iter().map(String::as_str)
    }

    /// Number of base names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.base_names.len()
    }

    /// Whether the set is empty (never true for sets built here).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.base_names.is_empty()
    }
}

impl Default for SensitiveFieldSet {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_matches_bare_names() {
        let set = SensitiveFieldSet::builtin();
        assert!(set.matches("author_email"));
        assert!(set.matches("author_phone"));
        assert!(set.matches("date_of_birth"));
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn test_builtin_matches_prefixed_names() {
        let set = SensitiveFieldSet::builtin();
        assert!(set.matches("person_author_email"));
        assert!(set.matches("person_date_of_birth"));
        assert!(set.matches("note_author_phone"));
        assert!(set.matches("note_author_email"));
    }

    #[test]
    fn test_builtin_ignores_other_fields() {
        let set = SensitiveFieldSet::builtin();
        for field in [
            "person_record_id",
            "note_record_id",
            "full_name",
            "person_full_name",
            "text",
            "note_status",
            "author_name",
            "xperson_author_email",
            "author_email_verified",
        ] {
            assert!(!set.matches(field), "{field}");
        }
    }

    #[test]
    fn test_with_extra() {
        let set = SensitiveFieldSet::with_extra(["home_street", "author_email", "note_record_id"]);
        assert_eq!(set.len(), 4);
        assert!(set.matches("home_street"));
        assert!(set.matches("person_home_street"));
        assert!(!set.matches("note_record_id"));
    }

    #[test]
    fn test_default_is_builtin() {
        assert_eq!(SensitiveFieldSet::default(), SensitiveFieldSet::builtin());
        let set = SensitiveFieldSet::default();
        let names: Vec<_> = set.base_names().collect();
        assert_eq!(names, BUILTIN_SENSITIVE_FIELDS);
    }
}
