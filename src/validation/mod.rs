use std::borrow::Cow;

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

pub mod phone;

pub const USERNAME_MESSAGE: &str =
    "Username is invalid. It cannot contain special characters and cannot be ended with: ., _";
pub const PASSWORD_MESSAGE: &str =
    "Password is invalid. It must contain at least: one lowercase letter, one upper case letter, one digit, one special character. Length: 8-64";
pub const PASSWORD_SPECIAL_CHARACTERS: &str = "@$!%*?&";

lazy_static! {
    static ref USERNAME_REGEX: Regex =
        Regex::new(r"^[a-zA-Z][a-zA-Z0-9]*(?:[._]?[a-zA-Z0-9]+)*$").expect("valid username regex");
    // `regex` has no lookahead, so each required class is its own pattern
    static ref PASSWORD_CHARSET_REGEX: Regex =
        Regex::new(r"^[A-Za-z\d@$!%*?&]{8,64}$").expect("valid password charset regex");
    static ref PASSWORD_CLASS_REGEXES: [Regex; 4] = [
        Regex::new(r"[a-z]").expect("valid lowercase regex"),
        Regex::new(r"[A-Z]").expect("valid uppercase regex"),
        Regex::new(r"\d").expect("valid digit regex"),
        Regex::new(r"[@$!%*?&]").expect("valid special character regex"),
    ];
}

/// Starts with a letter, then letters and digits optionally split by single
/// `.` or `_` separators. Cannot end with a separator.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME_REGEX.is_match(username)
}

pub fn is_strong_password(password: &str) -> bool {
    PASSWORD_CHARSET_REGEX.is_match(password)
        && PASSWORD_CLASS_REGEXES
            .iter()
            .all(|class| class.is_match(password))
}

pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(invalid("username", USERNAME_MESSAGE))
    }
}

pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    if is_strong_password(password) {
        Ok(())
    } else {
        Err(invalid("password", PASSWORD_MESSAGE))
    }
}

/// Structural check only; the canonical form is produced by
/// [`phone::normalize`] once the whole payload has validated.
pub fn validate_phone_number(phone_number: &str) -> Result<(), ValidationError> {
    phone::check(phone_number).map_err(|e| invalid("phone_number", e.to_string()))
}

fn invalid(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}
