//! Declared request parameters.

use crate::config::ParamsConfig;
use crate::validators::{
    AgeField, ExpiryDays, LanguageTagField, RoleField, SchemaVersionField, TextField, Validator,
    Value, YesFlag,
};

/// One declared parameter: its name, validator and default.
pub struct FieldSpec {
    name: String,
    validator: Box<dyn Validator>,
    default: Value,
}

impl FieldSpec {
    /// The parameter name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The validator applied to the raw value.
    #[must_use]
    pub fn validator(&self) -> &dyn Validator {
        self.validator.as_ref()
    }

    /// The value bound when the raw value is absent or rejected.
    #[must_use]
    pub fn default(&self) -> &Value {
        &self.default
    }
}

impl std::fmt::Debug for FieldSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FieldSpec")
            .field("name", &self.name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

/// An ordered, immutable set of parameter declarations.
#[derive(Debug, Default)]
pub struct ParameterSchema {
    fields: Vec<FieldSpec>,
}

impl ParameterSchema {
    /// Start declaring a schema.
    #[must_use]
    pub fn builder() -> ParameterSchemaBuilder {
        ParameterSchemaBuilder::default()
    }

    /// The parameters every page binds.
    ///
    /// Names and free text are stripped; flags, role, expiry, version, age
    /// and language are canonicalized. The schema version default comes from
    /// `config`.
    #[must_use]
    pub fn standard(config: &ParamsConfig) -> Self {
        let mut builder = Self::builder();
        for name in [
            "given_name",
            "family_name",
            "full_name",
            "alternate_names",
            "author_name",
            "author_email",
            "author_phone",
            "home_city",
            "home_state",
            "home_country",
            "last_known_location",
            "description",
            "text",
            "query",
            "referrer",
        ] {
            builder = builder.field(name, TextField, "");
        }
        for name in ["author_made_contact", "add_note", "clone", "confirm", "small"] {
            builder = builder.field(name, YesFlag, "");
        }
        builder
            .field("role", RoleField, "seek")
            .field("expiry_option", ExpiryDays, Value::Null)
            .field(
                "version",
                SchemaVersionField::new(config.default_schema_version),
                config.default_schema_version,
            )
            .field("age", AgeField, "")
            .field("lang", LanguageTagField, "")
            .build()
    }

    /// The declarations in order.
    #[must_use]
    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// The declaration for `name`, if any.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Number of declared parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing is declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Builder for [`ParameterSchema`].
#[derive(Debug, Default)]
pub struct ParameterSchemaBuilder {
    fields: Vec<FieldSpec>,
}

impl ParameterSchemaBuilder {
    /// Declare a parameter. Redeclaring a name replaces the earlier
    /// declaration but keeps its position.
    #[must_use]
    pub fn field(
        mut self,
        name: impl Into<String>,
        validator: impl Validator + 'static,
        default: impl Into<Value>,
    ) -> Self {
        let spec = FieldSpec {
            name: name.into(),
            validator: Box::new(validator),
            default: default.into(),
        };
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    /// Finish the schema.
    #[must_use]
    pub fn build(self) -> ParameterSchema {
        ParameterSchema {
            fields: self.fields,
        }
    }
}
