//! Property tests for validators and record handling.

use personfinder::records::{field_name, BUILTIN_SENSITIVE_FIELDS};
use personfinder::validators::validate_yes;
use personfinder::{filter_sensitive_fields, fuzzify_age, join, RawValue, Record, RecordOrigin};
use proptest::prelude::*;

// Strategy: field names, sometimes sensitive, sometimes identifiers
fn arb_field_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("author_email".to_string()),
        Just("author_phone".to_string()),
        Just("date_of_birth".to_string()),
        Just("person_record_id".to_string()),
        Just("note_record_id".to_string()),
        prop::string::string_regex("[a-z_]{1,16}").unwrap(),
    ]
}

fn arb_record() -> impl Strategy<Value = Record> {
    prop::collection::btree_map(arb_field_name(), "[ -~]{0,12}", 0..8)
}

proptest! {
    /// Any casing of "yes" is a set flag; everything else is not.
    #[test]
    fn proptest_yes_flag(s in "[a-zA-Z ]{0,6}") {
        let result = validate_yes(&RawValue::from(s.as_str())).unwrap();
        if s.eq_ignore_ascii_case("yes") {
            prop_assert_eq!(result, "yes");
        } else {
            prop_assert_eq!(result, "");
        }
    }

    /// Casing variants of "yes" always validate.
    #[test]
    fn proptest_yes_flag_casing(mask in 0u8..8) {
        let s: String = "yes"
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << i) == 0 { c } else { c.to_ascii_uppercase() })
            .collect();
        prop_assert_eq!(validate_yes(&RawValue::from(s.as_str())).unwrap(), "yes");
    }

    /// A range inside one bucket fuzzifies to that five-year bucket.
    #[test]
    fn proptest_fuzzify_within_bucket(bucket in 0u32..30, lo in 0u32..5, span in 0u32..5) {
        let a = bucket * 5 + lo;
        let b = (a + span).min(bucket * 5 + 4);
        let fuzzy = fuzzify_age(Some(&format!("{a}-{b}"))).unwrap();
        prop_assert_eq!(fuzzy, format!("{}-{}", bucket * 5, bucket * 5 + 5));
    }

    /// The bucket always starts at or below the stated lower bound, on a
    /// multiple of five, and is at least five years wide.
    #[test]
    fn proptest_fuzzify_bounds(a in 0u32..120, extra in 0u32..20) {
        let b = a + extra;
        let fuzzy = fuzzify_age(Some(&format!("{a}-{b}"))).unwrap();
        let (start, end) = fuzzy.split_once('-').unwrap();
        let start: u32 = start.parse().unwrap();
        let end: u32 = end.parse().unwrap();
        prop_assert!(start <= a);
        prop_assert_eq!(start % 5, 0);
        prop_assert!(end >= b);
        prop_assert!(end - start >= 5);
    }

    /// Filtering twice leaves records as filtering once did.
    #[test]
    fn proptest_filter_idempotent(records in prop::collection::vec(arb_record(), 0..4)) {
        let mut once = records.clone();
        filter_sensitive_fields(&mut once);
        let mut twice = once.clone();
        filter_sensitive_fields(&mut twice);
        prop_assert_eq!(once, twice);
    }

    /// Filtering never adds or removes keys.
    #[test]
    fn proptest_filter_preserves_keys(record in arb_record()) {
        let mut filtered = [record.clone()];
        filter_sensitive_fields(&mut filtered);
        prop_assert!(filtered[0].keys().eq(record.keys()));
    }

    /// Joining then filtering equals filtering then joining.
    #[test]
    fn proptest_join_filter_commute(person in arb_record(), note in arb_record()) {
        let mut joined = [join(&person, Some(&note))];
        filter_sensitive_fields(&mut joined);

        let mut parts = [person, note];
        filter_sensitive_fields(&mut parts);
        let expected = join(&parts[0], Some(&parts[1]));

        prop_assert_eq!(&joined[0], &expected);
        for base in BUILTIN_SENSITIVE_FIELDS {
            for origin in RecordOrigin::ALL {
                if let Some(value) = joined[0].get(&field_name(base, origin)) {
                    prop_assert_eq!(value, "");
                }
            }
        }
    }

    /// Without a note, nothing in the joined record looks note-derived.
    #[test]
    fn proptest_join_without_note(person in arb_record()) {
        let joined = join(&person, None);
        for key in joined.keys() {
            prop_assert!(!key.starts_with("note_") || key == "note_record_id");
        }
    }
}
