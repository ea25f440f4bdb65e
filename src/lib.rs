//! Small security helpers for application code
//!
//! This library groups independent, stateless utilities:
//!
//! - [`base64`](crate::base64): JSON-aware base64 encoding and decoding
//! - [`input`]: type/emptiness inspection and HTML escaping
//! - [`password`]: rule-based validation, matching and SHA-1 digests
//! - [`csp`]: Content-Security-Policy header values
//! - [`mask`]: partial redaction of emails, phone numbers and text
//!
//! # Features
//!
//! - `tracing`: Enables logging via tracing crate
//!
//! # Environment Variables
//!
//! - `SECURE_KIT_PWD_MIN_LENGTH`: Minimum password length read by
//!   [`PasswordOptions::from_env`] (default: 8)
//!
//! # Example
//!
//! ```rust
//! use secure_kit::{mask, password};
//! use secrecy::SecretString;
//!
//! let pwd = SecretString::new("MyP@ssw0rd!".to_string().into());
//! let result = password::validation(&pwd);
//! assert!(result.is_valid);
//!
//! assert_eq!(mask::phone("1234567890"), "xxxxx67890");
//! ```

pub mod base64;
pub mod csp;
pub mod input;
pub mod mask;
pub mod password;
pub mod rules;

// Public API
pub use self::base64::CodecError;
pub use csp::{CspConfig, CspDirective, CspError};
pub use input::{EmptinessPolicy, Inspector, Kind};
pub use mask::MaskError;
pub use password::{
    ConfigError, PasswordOptions, PasswordPolicy, Rule, ValidationResult,
};
