//! `personfinder` - request validation and record privacy for a person finder
//!
//! This library holds the logic a disaster-response person finder must get
//! exactly right: turning untrusted request parameters into typed values,
//! and making sure personally identifying fields never leave the trust
//! boundary, whatever shape the outgoing record has.
//!
//! - [`validators`]: coerce raw input into canonical values
//! - [`params`]: bind a request against a declared schema
//! - [`records`]: join person and note records, redact sensitive fields
//! - [`clock`]: injectable time source

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod clock;
pub mod config;
pub mod error;
pub mod escape;
pub mod input;
pub mod logging;
pub mod params;
pub mod records;
pub mod validators;

pub use clock::{Clock, FixedClock, OverridableClock, SystemClock};
pub use config::Config;
pub use error::{Error, Result};
pub use input::{RawInput, RawValue};
pub use logging::init_logging;
pub use params::{bind, ParameterBinder, ParameterBundle, ParameterSchema, RequestPolicy};
pub use records::{field_name, filter_sensitive_fields, join, Record, RecordFilter, RecordOrigin};
pub use validators::{fuzzify_age, SchemaVersion, Validation, Validator, Value};
