//! Core types for the signup-form crate.
//!
//! This crate provides the foundational types for defining forms:
//! - `FieldDescriptor` and `Rule` - One field's presentation and validation rules
//! - `ValidationSchema` - The whole-form rule set and its pure `validate` function
//! - `FormValues`, `TouchedFlags` and `FieldErrors` - Form state keyed by `FieldName`
//! - `Form`, `SignUpService` and `ResultSink` traits - Seams for forms, remotes and backends

mod field_name;
pub use field_name::{FieldName, GENERAL_KEY};

mod field_value;
pub use field_value::FieldValue;

mod form_values;
pub use form_values::{FormValues, ValueError};

mod touched;
pub use touched::TouchedFlags;

mod field_errors;
pub use field_errors::FieldErrors;

mod descriptor;
pub use descriptor::{CustomTest, FieldDescriptor, FieldKind, Rule, RulePriority, is_valid_email};

mod schema;
pub use schema::ValidationSchema;

mod error;
pub use error::RemoteError;

mod traits;
pub use traits::{Form, ResultSink, SignUpService};
