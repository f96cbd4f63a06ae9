//! Typed request parameters.
//!
//! A [`ParameterSchema`] declares, once per page, which parameters it reads,
//! how each is validated and what it falls back to. Binding a request's
//! [`RawInput`](crate::input::RawInput) against the schema yields a
//! [`ParameterBundle`] with exactly one value per declared parameter.
//! Malformed values degrade to defaults; only structural or protocol errors
//! fail the bind.
//!
//! # Example
//!
//! ```
//! use personfinder::config::ParamsConfig;
//! use personfinder::input::RawInput;
//! use personfinder::params::ParameterBinder;
//!
//! let binder = ParameterBinder::standard(&ParamsConfig::default());
//! let input = RawInput::from_pairs([
//!     ("given_name", "  John  "),
//!     ("author_made_contact", "YES"),
//!     ("role", "PROVIDE"),
//!     ("age", "forty"),
//! ]);
//! let params = binder.bind(&input).unwrap();
//!
//! assert_eq!(params.text("given_name"), "John");
//! assert!(params.flag("author_made_contact"));
//! assert_eq!(params.text("role"), "provide");
//! assert_eq!(params.text("age"), "");
//! ```

mod binder;
mod bundle;
mod schema;

pub use binder::{bind, ParameterBinder, RequestPolicy, REFERRER_PARAM};
pub use bundle::{expiry_date, ParameterBundle};
pub use schema::{FieldSpec, ParameterSchema, ParameterSchemaBuilder};
