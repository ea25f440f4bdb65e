//! Character variety rules - lowercase, uppercase, digit and special characters.

use secrecy::{ExposeSecret, SecretString};

use super::RuleResult;

/// Characters accepted by the special character rule.
pub const SPECIAL_CHARACTERS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', ',', '.', '?', '"', ':', '{', '}', '|',
    '<', '>',
];

fn require(password: &SecretString, matches: impl Fn(char) -> bool, what: &str) -> RuleResult {
    if password.expose_secret().chars().any(matches) {
        return None;
    }
    Some(format!("Password should contain at least one {}.", what))
}

/// Requires at least one `[a-z]` character.
pub fn lowercase_rule(password: &SecretString) -> RuleResult {
    require(password, |c| c.is_ascii_lowercase(), "lowercase letter")
}

/// Requires at least one `[A-Z]` character.
pub fn uppercase_rule(password: &SecretString) -> RuleResult {
    require(password, |c| c.is_ascii_uppercase(), "uppercase letter")
}

/// Requires at least one `[0-9]` character.
pub fn digit_rule(password: &SecretString) -> RuleResult {
    require(password, |c| c.is_ascii_digit(), "digit")
}

/// Requires at least one character from [`SPECIAL_CHARACTERS`].
pub fn special_rule(password: &SecretString) -> RuleResult {
    require(
        password,
        |c| SPECIAL_CHARACTERS.contains(&c),
        "special character",
    )
}
