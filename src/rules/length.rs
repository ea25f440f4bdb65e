//! Length rule - checks password minimum length.

use secrecy::{ExposeSecret, SecretString};

use super::RuleResult;

/// Checks if the password has at least `min_length` characters.
///
/// Length is counted in chars, so multi-byte characters count once.
pub fn length_rule(password: &SecretString, min_length: usize) -> RuleResult {
    if password.expose_secret().chars().count() < min_length {
        return Some(format!(
            "Password should be at least {} characters long.",
            min_length
        ));
    }
    None
}
