//! Flattening a person and a note into one record.

use tracing::warn;

use super::{is_record_id, Record, RecordOrigin, PERSON_RECORD_ID};

/// Name of field `base` of an `origin` record once joined.
///
/// Record identifiers keep their names whatever the origin; every other
/// field becomes `<origin>_<base>`.
#[must_use]
pub fn field_name(base: &str, origin: RecordOrigin) -> String {
    if is_record_id(base) {
        base.to_string()
    } else {
        format!("{}_{base}", origin.prefix())
    }
}

/// Whether field `name` of `source` would be renamed onto an identifier
/// that `source` also carries, e.g. a person's `record_id` field landing on
/// `person_record_id`.
fn shadows_record_id(source: &Record, name: &str, joined_name: &str) -> bool {
    name != joined_name && is_record_id(joined_name) && source.contains_key(joined_name)
}

/// Join a person record with an optional note about that person.
///
/// Without a note the result holds only person-derived fields. A note's
/// `person_record_id` never replaces the person's own, and a plain field
/// whose prefixed name collides with an identifier (`record_id` on either
/// record) is dropped in favour of the identifier.
#[must_use]
pub fn join(person: &Record, note: Option<&Record>) -> Record {
    let mut joined = Record::new();
    for (name, value) in person {
        let joined_name = field_name(name, RecordOrigin::Person);
        if shadows_record_id(person, name, &joined_name) {
            warn!(field = %name, "Dropping person field that collides with its identifier");
            continue;
        }
        joined.insert(joined_name, value.clone());
    }

    let Some(note) = note else {
        return joined;
    };

    for (name, value) in note {
        let joined_name = field_name(name, RecordOrigin::Note);
        if shadows_record_id(note, name, &joined_name) {
            warn!(field = %name, "Dropping note field that collides with its identifier");
            continue;
        }
        if joined_name == PERSON_RECORD_ID {
            if let Some(existing) = joined.get(PERSON_RECORD_ID) {
                if existing != value {
                    warn!("Note refers to a different person than the one it is joined with");
                }
                continue;
            }
        }
        joined.insert(joined_name, value.clone());
    }

    joined
}
