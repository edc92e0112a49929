use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

/// E.164 bounds, counted without the leading `+`.
pub const MIN_DIGITS: usize = 8;
pub const MAX_DIGITS: usize = 15;

lazy_static! {
    static ref PHONE_CHARSET_REGEX: Regex =
        Regex::new(r"^\+?[0-9 ().\-]+$").expect("valid phone charset regex");
}

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneError {
    #[error("Phone number contains invalid characters")]
    InvalidCharacters,
    #[error("Phone number must have between 8 and 15 digits")]
    InvalidLength,
    #[error("Phone number must include a country code")]
    MissingCountryCode,
    #[error("Phone number country code cannot start with 0")]
    InvalidCountryCode,
}

/// Rewrites a phone number into E.164 form (`+380999999999`).
///
/// Accepts `+` or `00` as the international prefix and ignores spaces,
/// dashes, dots and parentheses. A number with neither prefix is treated as
/// national: one leading trunk `0` is dropped and `default_country_code` is
/// prepended. Without a default such numbers are rejected.
pub fn normalize(raw: &str, default_country_code: Option<&str>) -> Result<String, PhoneError> {
    let trimmed = raw.trim();
    if !PHONE_CHARSET_REGEX.is_match(trimmed) {
        return Err(PhoneError::InvalidCharacters);
    }
    let digits: String = trimmed.chars().filter(char::is_ascii_digit).collect();

    let international = if trimmed.starts_with('+') {
        digits
    } else if let Some(rest) = digits.strip_prefix("00") {
        rest.to_string()
    } else {
        let code = default_country_code.ok_or(PhoneError::MissingCountryCode)?;
        let national = digits.strip_prefix('0').unwrap_or(&digits);
        format!("{code}{national}")
    };

    if international.starts_with('0') {
        return Err(PhoneError::InvalidCountryCode);
    }
    if !(MIN_DIGITS..=MAX_DIGITS).contains(&international.len()) {
        return Err(PhoneError::InvalidLength);
    }
    Ok(format!("+{international}"))
}

/// Everything [`normalize`] checks that does not depend on configuration.
pub fn check(raw: &str) -> Result<(), PhoneError> {
    match normalize(raw, None) {
        Ok(_) | Err(PhoneError::MissingCountryCode) => Ok(()),
        Err(e) => Err(e),
    }
}
