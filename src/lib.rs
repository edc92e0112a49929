//! Request and response schemas for the user and authentication endpoints.
//!
//! Input payloads implement [`Schema`] and are parsed with
//! [`schema::parse_str`], [`schema::parse_value`] or the [`ValidatedJson`]
//! extractor. Public projections never carry a password.

pub mod config;
pub mod domain;
pub mod error;
pub mod extensions;
pub mod schema;
pub mod validation;

pub use config::{ConfigError, SchemaConfig};
pub use error::{Error, FieldError, FieldErrors};
pub use extensions::ValidatedJson;
pub use schema::Schema;
