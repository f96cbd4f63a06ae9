//! Binding raw request input against a schema.

use tracing::{debug, warn};

use super::{ParameterBundle, ParameterSchema};
use crate::config::ParamsConfig;
use crate::error::Result;
use crate::input::{RawInput, RawValue};
use crate::validators::{Validation, Value};

/// Parameter name whose value must appear in the referrer allow-list.
pub const REFERRER_PARAM: &str = "referrer";

/// Per-request rules applied after validation.
///
/// An allow-list restricts a text parameter to known values; anything else
/// binds as the parameter's default. The lists are request configuration,
/// not a property of the value's shape, which is why they live here rather
/// than in a validator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPolicy {
    allow_lists: Vec<(String, Vec<String>)>,
}

impl RequestPolicy {
    /// A policy with no restrictions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The policy configured for a repository: the referrer allow-list.
    #[must_use]
    pub fn from_config(config: &ParamsConfig) -> Self {
        Self::new().allow(REFERRER_PARAM, config.referrer_allow_list.iter().cloned())
    }

    /// Restrict `name` to `allowed` values.
    #[must_use]
    pub fn allow<I, S>(mut self, name: impl Into<String>, allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
        match self.allow_lists.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = allowed,
            None => self.allow_lists.push((name, allowed)),
        }
        self
    }

    /// The allow-list for `name`, if restricted.
    #[must_use]
    pub fn allowed(&self, name: &str) -> Option<&[String]> {
        self.allow_lists
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, allowed)| allowed.as_slice())
    }

    /// Apply the policy to one validated value.
    #[must_use]
    pub fn apply(&self, name: &str, value: Value, default: &Value) -> Value {
        let Some(allowed) = self.allowed(name) else {
            return value;
        };
        match value.as_text() {
            Some(text) if !text.is_empty() && !allowed.iter().any(|a| a == text) => {
                debug!(field = %name, "Value not in allow-list, using default");
                default.clone()
            }
            _ => value,
        }
    }
}

/// A schema and policy ready to bind requests.
#[derive(Debug, Default)]
pub struct ParameterBinder {
    schema: ParameterSchema,
    policy: RequestPolicy,
}

impl ParameterBinder {
    /// Create a binder.
    #[must_use]
    pub fn new(schema: ParameterSchema, policy: RequestPolicy) -> Self {
        Self { schema, policy }
    }

    /// The standard schema and policy for a repository configuration.
    #[must_use]
    pub fn standard(config: &ParamsConfig) -> Self {
        Self::new(
            ParameterSchema::standard(config),
            RequestPolicy::from_config(config),
        )
    }

    /// The schema.
    #[must_use]
    pub fn schema(&self) -> &ParameterSchema {
        &self.schema
    }

    /// The policy.
    #[must_use]
    pub fn policy(&self) -> &RequestPolicy {
        &self.policy
    }

    /// Bind one request's input.
    ///
    /// # Errors
    ///
    /// See [`bind`].
    pub fn bind(&self, input: &RawInput) -> Result<ParameterBundle> {
        bind(input, &self.schema, &self.policy)
    }
}

/// Bind `input` against `schema`, then apply `policy`.
///
/// Every declared parameter gets exactly one value. A parameter missing from
/// the input is validated as empty text; a multi-valued parameter uses its
/// first value. A rejected value falls back to the parameter default without
/// affecting any other parameter.
///
/// # Errors
///
/// Returns the validator's error when a value is structurally wrong or names
/// an unknown protocol version; the request cannot proceed and the caller
/// should answer with a client error.
pub fn bind(
    input: &RawInput,
    schema: &ParameterSchema,
    policy: &RequestPolicy,
) -> Result<ParameterBundle> {
    let empty = RawValue::Text(String::new());
    let mut values = Vec::with_capacity(schema.len());

    for field in schema.fields() {
        let raw = input.get_first(field.name()).unwrap_or(&empty);
        let validation = match field.validator().validate(raw) {
            Ok(validation) => validation,
            Err(err) => {
                warn!(field = %field.name(), error = %err, "Parameter rejected");
                return Err(err);
            }
        };
        let value = match validation {
            Validation::Valid(value) => value,
            Validation::UseDefault => {
                if !raw.is_empty_text() {
                    debug!(field = %field.name(), "Invalid parameter, using default");
                }
                field.default().clone()
            }
        };
        let value = policy.apply(field.name(), value, field.default());
        values.push((field.name().to_string(), value));
    }

    debug!(fields = values.len(), "Parameters bound");
    Ok(ParameterBundle::new(values))
}
