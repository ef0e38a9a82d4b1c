//! Stateless field validators.
//!
//! The same predicates gate creation (hard failure) and partial updates
//! (silent skip of the offending field).

/// Maximum accepted length of a first or last name, in characters.
pub const MAX_NAME_CHARS: usize = 15;
/// Passwords must be strictly longer than this to be accepted by an update.
pub const MIN_PASSWORD_CHARS_EXCLUSIVE: usize = 7;

/// Returns whether `name` is a usable first or last name.
///
/// Rejects missing, blank and over-long values; otherwise the first
/// character must be uppercase.
pub fn is_valid_name(name: Option<&str>) -> bool {
    let Some(name) = name else {
        return false;
    };
    if name.trim().is_empty() || name.chars().count() > MAX_NAME_CHARS {
        return false;
    }
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Returns whether `value` is present and not blank after trimming.
pub fn is_valid_field(value: Option<&str>) -> bool {
    value.is_some_and(|value| !value.trim().is_empty())
}

/// Returns whether `password` may replace an existing password.
pub fn is_valid_password(password: Option<&str>) -> bool {
    is_valid_field(password)
        && password.is_some_and(|value| value.chars().count() > MIN_PASSWORD_CHARS_EXCLUSIVE)
}
