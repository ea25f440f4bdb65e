//! Password validation rules
//!
//! Each rule checks one requirement and reports a message when it fails.

mod length;
mod variety;

pub use length::length_rule;
pub use variety::{SPECIAL_CHARACTERS, digit_rule, lowercase_rule, special_rule, uppercase_rule};

/// Result type for rule functions.
/// - `Some(message)` - Rule failed with message
/// - `None` - Rule passed
pub type RuleResult = Option<String>;
