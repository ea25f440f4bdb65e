//! Password validator - runs the rules, matches passwords and computes digests.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};
use thiserror::Error;

use crate::rules::{
    RuleResult, digit_rule, length_rule, lowercase_rule, special_rule, uppercase_rule,
};

/// Environment variable overriding the minimum password length.
pub const MIN_LENGTH_ENV: &str = "SECURE_KIT_PWD_MIN_LENGTH";

/// Minimum password length when none is configured.
pub const DEFAULT_MIN_LENGTH: usize = 8;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for SECURE_KIT_PWD_MIN_LENGTH: {0:?}")]
    InvalidMinLength(String),
}

/// Identifier of a validation rule, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rule {
    Length,
    Lowercase,
    Uppercase,
    Digit,
    Special,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Length,
        Rule::Lowercase,
        Rule::Uppercase,
        Rule::Digit,
        Rule::Special,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rule::Length => "length",
            Rule::Lowercase => "lowercase",
            Rule::Uppercase => "uppercase",
            Rule::Digit => "digit",
            Rule::Special => "special",
        }
    }
}

/// Caller-supplied overrides. Unset fields fall back to the defaults of
/// [`PasswordPolicy`] when resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub struct PasswordOptions {
    pub length: Option<usize>,
    pub lowercase: Option<bool>,
    pub uppercase: Option<bool>,
    pub digit: Option<bool>,
    pub special: Option<bool>,
}

impl PasswordOptions {
    /// Reads overrides from the environment.
    ///
    /// Only `SECURE_KIT_PWD_MIN_LENGTH` is recognised; when it is unset the
    /// returned options are all defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidMinLength`] if the variable is set but is
    /// not a non-negative integer.
    pub fn from_env() -> Result<Self, ConfigError> {
        let length = match std::env::var(MIN_LENGTH_ENV) {
            Ok(raw) => Some(
                raw.trim()
                    .parse::<usize>()
                    .map_err(|_| ConfigError::InvalidMinLength(raw.clone()))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            length,
            ..Self::default()
        })
    }

    /// Merges the overrides with the defaults.
    pub fn resolve(&self) -> PasswordPolicy {
        let defaults = PasswordPolicy::default();
        PasswordPolicy {
            min_length: self.length.unwrap_or(defaults.min_length),
            lowercase: self.lowercase.unwrap_or(defaults.lowercase),
            uppercase: self.uppercase.unwrap_or(defaults.uppercase),
            digit: self.digit.unwrap_or(defaults.digit),
            special: self.special.unwrap_or(defaults.special),
        }
    }
}

/// Fully resolved set of requirements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    pub lowercase: bool,
    pub uppercase: bool,
    pub digit: bool,
    pub special: bool,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self {
            min_length: DEFAULT_MIN_LENGTH,
            lowercase: true,
            uppercase: true,
            digit: true,
            special: true,
        }
    }
}

impl PasswordPolicy {
    pub fn is_enabled(&self, rule: Rule) -> bool {
        match rule {
            Rule::Length => true,
            Rule::Lowercase => self.lowercase,
            Rule::Uppercase => self.uppercase,
            Rule::Digit => self.digit,
            Rule::Special => self.special,
        }
    }

    fn check(&self, rule: Rule, password: &SecretString) -> RuleResult {
        match rule {
            Rule::Length => length_rule(password, self.min_length),
            Rule::Lowercase => lowercase_rule(password),
            Rule::Uppercase => uppercase_rule(password),
            Rule::Digit => digit_rule(password),
            Rule::Special => special_rule(password),
        }
    }
}

/// Outcome of [`validation`]. Serializes as
/// `{"isValid":false,"length":"...","reasons":["length"]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationResult {
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lowercase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uppercase: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub digit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub special: Option<String>,
    pub reasons: Vec<Rule>,
}

impl ValidationResult {
    /// Message recorded for `rule`, if it failed.
    pub fn message(&self, rule: Rule) -> Option<&str> {
        self.slot(rule).as_deref()
    }

    fn slot(&self, rule: Rule) -> &Option<String> {
        match rule {
            Rule::Length => &self.length,
            Rule::Lowercase => &self.lowercase,
            Rule::Uppercase => &self.uppercase,
            Rule::Digit => &self.digit,
            Rule::Special => &self.special,
        }
    }

    fn record(&mut self, rule: Rule, message: String) {
        let slot = match rule {
            Rule::Length => &mut self.length,
            Rule::Lowercase => &mut self.lowercase,
            Rule::Uppercase => &mut self.uppercase,
            Rule::Digit => &mut self.digit,
            Rule::Special => &mut self.special,
        };
        *slot = Some(message);
        self.reasons.push(rule);
    }
}

/// Validates a password against the default policy.
pub fn validation(password: &SecretString) -> ValidationResult {
    validation_with(password, &PasswordOptions::default())
}

/// Validates a password against `options`.
///
/// Every enabled rule runs; failures accumulate in rule order.
pub fn validation_with(password: &SecretString, options: &PasswordOptions) -> ValidationResult {
    let policy = options.resolve();
    let mut result = ValidationResult::default();

    for rule in Rule::ALL {
        if !policy.is_enabled(rule) {
            continue;
        }
        if let Some(message) = policy.check(rule, password) {
            result.record(rule, message);
        }
    }

    result.is_valid = result.reasons.is_empty();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        "Password validation finished: valid={}, failed={:?}",
        result.is_valid,
        result.reasons.iter().map(Rule::as_str).collect::<Vec<_>>()
    );

    result
}

/// Returns `true` only if both passwords pass validation and are identical.
pub fn is_match(first: &SecretString, second: &SecretString) -> bool {
    validation(first).is_valid
        && validation(second).is_valid
        && first.expose_secret() == second.expose_secret()
}

/// SHA-1 hex digest of the password.
///
/// Unsalted and fast: suitable for fingerprints and comparisons, not for
/// storing user credentials.
pub fn encrypt(value: &SecretString) -> String {
    hex::encode(Sha1::digest(value.expose_secret().as_bytes()))
}
