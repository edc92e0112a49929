use std::env;

use log::info;
use thiserror::Error;

pub const DEFAULT_COUNTRY_CODE_VAR: &str = "PHONE_DEFAULT_COUNTRY_CODE";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a 1-3 digit country calling code, got {value:?}")]
    InvalidCountryCode { var: &'static str, value: String },
}

/// Settings the schemas need beyond the payload itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaConfig {
    /// Calling code prepended to phone numbers given without one, e.g. `380`.
    pub default_country_code: Option<String>,
}

impl SchemaConfig {
    pub fn with_default_country_code(code: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            default_country_code: Some(parse_country_code(code)?),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let default_country_code = match lookup(DEFAULT_COUNTRY_CODE_VAR) {
            Some(raw) if !raw.trim().is_empty() => Some(parse_country_code(&raw)?),
            _ => None,
        };
        info!(
            "schema config loaded, default country code: {:?}",
            default_country_code
        );
        Ok(Self {
            default_country_code,
        })
    }
}

fn parse_country_code(raw: &str) -> Result<String, ConfigError> {
    let code = raw.trim();
    let code = code.strip_prefix('+').unwrap_or(code);
    let valid = (1..=3).contains(&code.len())
        && code.chars().all(|c| c.is_ascii_digit())
        && !code.starts_with('0');
    if valid {
        Ok(code.to_string())
    } else {
        Err(ConfigError::InvalidCountryCode {
            var: DEFAULT_COUNTRY_CODE_VAR,
            value: raw.to_string(),
        })
    }
}
