//! JSON-aware base64 codec.
//!
//! Values that were encoded from a JSON object or array come back parsed;
//! plain strings come back as strings. Callers can therefore keep one call
//! site for a field that holds either shape.

use ::base64::alphabet;
use ::base64::engine::general_purpose::STANDARD;
use ::base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use ::base64::Engine;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

/// Decoder that never rejects input once it has been filtered down to the
/// standard alphabet.
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_allow_trailing_bits(true)
        .with_decode_padding_mode(DecodePaddingMode::RequireNone),
);

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("Failed to serialize value as JSON: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Decoded payload is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),
    #[error("Decoded payload is not the expected JSON: {0}")]
    Parse(#[source] serde_json::Error),
}

/// Returns `true` if `text` is a complete JSON document of any type.
///
/// Never panics; anything that does not parse is simply `false`.
pub fn is_json(text: &str) -> bool {
    parse_json(text).is_some()
}

fn parse_json(text: &str) -> Option<Value> {
    serde_json::from_str(text).ok()
}

/// Decodes a base64 value.
///
/// # Returns
/// - `Value::String("")` if `value` is not a string
/// - the parsed JSON value if the decoded text is JSON
/// - the decoded text otherwise
pub fn decode(value: &Value) -> Value {
    match value {
        Value::String(encoded) => decode_str(encoded),
        _ => Value::String(String::new()),
    }
}

/// Decodes a base64 string. See [`decode`].
pub fn decode_str(encoded: &str) -> Value {
    let text = String::from_utf8_lossy(&lenient_bytes(encoded)).into_owned();

    match parse_json(&text) {
        Some(parsed) => {
            #[cfg(feature = "tracing")]
            tracing::debug!("base64 payload decoded as JSON ({} bytes)", text.len());
            parsed
        }
        None => Value::String(text),
    }
}

/// Encodes a value as base64.
///
/// Objects and arrays are serialized to compact JSON first, strings are
/// encoded as-is. Every other value yields `None`.
pub fn encode(value: &Value) -> Option<String> {
    match value {
        Value::Object(_) | Value::Array(_) => match serde_json::to_string(value) {
            Ok(json) => Some(STANDARD.encode(json)),
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Failed to serialize value for base64 encoding: {}", _e);
                None
            }
        },
        Value::String(text) => Some(STANDARD.encode(text)),
        _ => None,
    }
}

/// Serializes any `Serialize` type to JSON and base64-encodes it.
///
/// Unlike [`encode`], strings are JSON-quoted before encoding.
pub fn encode_serializable<T: Serialize + ?Sized>(value: &T) -> Result<String, CodecError> {
    let json = serde_json::to_string(value).map_err(CodecError::Serialize)?;
    Ok(STANDARD.encode(json))
}

/// Decodes base64 and deserializes the JSON payload into `T`.
pub fn decode_as<T: DeserializeOwned>(encoded: &str) -> Result<T, CodecError> {
    let text = String::from_utf8(lenient_bytes(encoded))?;
    serde_json::from_str(&text).map_err(CodecError::Parse)
}

/// Filters `encoded` down to decodable sextets the way Node's `Buffer` does:
/// unknown characters are skipped, URL-safe characters are accepted, input
/// ends at the first `=` and a dangling single sextet is dropped.
fn lenient_bytes(encoded: &str) -> Vec<u8> {
    let mut sextets: String = encoded
        .chars()
        .take_while(|&c| c != '=')
        .filter_map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '+' | '/' => Some(c),
            '-' => Some('+'),
            '_' => Some('/'),
            _ => None,
        })
        .collect();

    if sextets.len() % 4 == 1 {
        sextets.pop();
    }

    LENIENT.decode(sextets).unwrap_or_default()
}
