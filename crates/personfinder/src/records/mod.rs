//! Person and note records: joining and privacy filtering.
//!
//! A [`Record`] is a plain string map. Whether it describes a person, a note,
//! or a joined person+note pair is only a matter of field-name convention, so
//! both the joiner and the filter work on any shape:
//!
//! - **Joining** flattens a person and an optional note into one record,
//!   prefixing every field with its origin (`person_full_name`,
//!   `note_status`) except the two record identifiers, which keep their
//!   names.
//! - **Filtering** blanks personally identifying fields, whether they appear
//!   bare (`author_email`) or under either prefix (`note_author_email`).
//!
//! # Example
//!
//! ```
//! use personfinder::records::{filter_sensitive_fields, join, Record};
//!
//! let person = Record::from([
//!     ("person_record_id".to_string(), "person.1".to_string()),
//!     ("author_email".to_string(), "taro@example.com".to_string()),
//! ]);
//! let mut joined = [join(&person, None)];
//! filter_sensitive_fields(&mut joined);
//!
//! assert_eq!(joined[0]["person_record_id"], "person.1");
//! assert_eq!(joined[0]["person_author_email"], "");
//! ```

mod filter;
mod join;
mod sensitive;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub use filter::{filter_sensitive_fields, RecordFilter};
pub use join::{field_name, join};
pub use sensitive::{SensitiveFieldSet, BUILTIN_SENSITIVE_FIELDS};

/// A record as a field-name to value map.
pub type Record = BTreeMap<String, String>;

/// Identifier field of a person record.
pub const PERSON_RECORD_ID: &str = "person_record_id";

/// Identifier field of a note record.
pub const NOTE_RECORD_ID: &str = "note_record_id";

/// Which entity a field came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordOrigin {
    /// A person record.
    Person,
    /// A note record.
    Note,
}

impl RecordOrigin {
    /// Both origins.
    pub const ALL: [Self; 2] = [Self::Person, Self::Note];

    /// Prefix used for this origin's fields in a joined record.
    #[must_use]
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Person => "person",
            Self::Note => "note",
        }
    }

    /// Identifier field of this origin's records.
    #[must_use]
    pub fn record_id_field(&self) -> &'static str {
        match self {
            Self::Person => PERSON_RECORD_ID,
            Self::Note => NOTE_RECORD_ID,
        }
    }
}

impl std::fmt::Display for RecordOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

/// Whether `name` is one of the two record identifiers.
#[must_use]
pub fn is_record_id(name: &str) -> bool {
    name == PERSON_RECORD_ID || name == NOTE_RECORD_ID
}
