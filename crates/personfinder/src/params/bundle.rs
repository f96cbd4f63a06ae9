//! Bound request parameters.

use chrono::{DateTime, Duration, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::clock::Clock;
use crate::validators::{SchemaVersion, Value};

/// The typed parameters of one request.
///
/// Holds exactly one value per declared parameter, in declaration order.
/// There is no way to change a value once bound.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParameterBundle {
    values: Vec<(String, Value)>,
}

impl ParameterBundle {
    pub(crate) fn new(values: Vec<(String, Value)>) -> Self {
        Self { values }
    }

    /// The value bound to `name`, if `name` was declared.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// The text bound to `name`, or `""` if it is not a text parameter.
    #[must_use]
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(Value::as_text).unwrap_or("")
    }

    /// The integer bound to `name`.
    #[must_use]
    pub fn integer(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_integer)
    }

    /// Whether `name` holds a set flag (`"yes"` or `true`).
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        match self.get(name) {
            Some(Value::Text(s)) => s == "yes",
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }

    /// The schema version bound to `name`.
    #[must_use]
    pub fn version(&self, name: &str) -> Option<SchemaVersion> {
        self.get(name).and_then(Value::as_version)
    }

    /// When a record created with these parameters expires, from the integer
    /// number of days bound to `name`.
    #[must_use]
    pub fn expiry_date(&self, name: &str, clock: &dyn Clock) -> Option<DateTime<Utc>> {
        expiry_date(self.integer(name), clock)
    }

    /// Iterate over `(name, value)` in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.values.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Serialize for ParameterBundle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.values.len()))?;
        for (name, value) in &self.values {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Expiry timestamp `days` days after the clock's current time.
///
/// `None` days (no expiry requested) or an out-of-range count yield `None`.
#[must_use]
pub fn expiry_date(days: Option<i64>, clock: &dyn Clock) -> Option<DateTime<Utc>> {
    let days = Duration::try_days(days?)?;
    clock.now().checked_add_signed(days)
}
