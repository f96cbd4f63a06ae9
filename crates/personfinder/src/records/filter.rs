//! Privacy filter for outgoing records.
//!
//! Records are redacted in place just before they are rendered or exported.
//! A sensitive field keeps its key but loses its value; fields a record does
//! not have are never added.

use tracing::{debug, trace};

use super::{Record, SensitiveFieldSet};
use crate::config::PrivacyConfig;

/// Redacts sensitive fields from records of any shape.
#[derive(Debug, Clone, Default)]
pub struct RecordFilter {
    fields: SensitiveFieldSet,
}

impl RecordFilter {
    /// Create a filter for the built-in sensitive fields.
    #[must_use]
    pub fn new() -> Self {
        Self::with_fields(SensitiveFieldSet::builtin())
    }

    /// Create a filter for a custom field set.
    #[must_use]
    pub fn with_fields(fields: SensitiveFieldSet) -> Self {
        Self { fields }
    }

    /// Create a filter from privacy configuration.
    #[must_use]
    pub fn from_config(config: &PrivacyConfig) -> Self {
        Self::with_fields(SensitiveFieldSet::with_extra(
            config.extra_sensitive_fields.iter().cloned(),
        ))
    }

    /// The field set this filter redacts.
    #[must_use]
    pub fn fields(&self) -> &SensitiveFieldSet {
        &self.fields
    }

    /// Blank every sensitive field of one record.
    ///
    /// Returns how many fields held a value that was removed.
    pub fn filter_record(&self, record: &mut Record) -> usize {
        let mut redacted = 0;
        for (name, value) in record.iter_mut() {
            if self.fields.matches(name) && !value.is_empty() {
                value.clear();
                redacted += 1;
                trace!(field = %name, "Field redacted");
            }
        }
        redacted
    }

    /// Blank every sensitive field of every record.
    ///
    /// Returns the total number of values removed; running the filter again
    /// over the same records returns zero.
    pub fn filter(&self, records: &mut [Record]) -> usize {
        let redacted: usize = records
            .iter_mut()
            .map(|record| self.filter_record(record))
            .sum();
        debug!(records = records.len(), redacted, "Records filtered");
        redacted
    }
}

/// Blank the built-in sensitive fields of every record, in place.
pub fn filter_sensitive_fields(records: &mut [Record]) {
    RecordFilter::new().filter(records);
}
