use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tap::TapFallible;
use validator::Validate;

use crate::config::SchemaConfig;
use crate::error::Error;

/// An input payload that can be parsed and validated in one step.
///
/// Parsing runs, in order: deserialization, [`Schema::check_invariants`],
/// the field rules derived with `validator`, then [`Schema::normalize`].
/// The first step that fails rejects the whole payload.
pub trait Schema: DeserializeOwned + Validate + Sized {
    /// Cross-field rules over the deserialized payload.
    fn check_invariants(&self) -> Result<(), Error> {
        Ok(())
    }

    /// Rewrites fields into canonical form. Only called on valid payloads.
    fn normalize(self, _config: &SchemaConfig) -> Result<Self, Error> {
        Ok(self)
    }
}

pub fn parse_value<T: Schema>(value: Value, config: &SchemaConfig) -> Result<T, Error> {
    debug!("Validating {} payload", schema_name::<T>());
    serde_json::from_value::<T>(value)
        .map_err(Error::from)
        .and_then(|schema| run_checks(schema, config))
        .tap_err(|e| warn!("Rejected {} payload: {}", schema_name::<T>(), e))
}

pub fn parse_str<T: Schema>(body: &str, config: &SchemaConfig) -> Result<T, Error> {
    let value: Value = serde_json::from_str(body)
        .tap_err(|e| warn!("Rejected malformed {} payload: {}", schema_name::<T>(), e))?;
    parse_value(value, config)
}

fn run_checks<T: Schema>(schema: T, config: &SchemaConfig) -> Result<T, Error> {
    schema.check_invariants()?;
    schema.validate()?;
    schema.normalize(config)
}

fn schema_name<T>() -> &'static str {
    let full = std::any::type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
