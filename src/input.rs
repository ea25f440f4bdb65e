//! Input type inspection and HTML escaping.

use std::str::FromStr;

use serde_json::Value;

/// Escapes the five HTML-significant characters.
///
/// `&` is replaced first so entities produced by the later replacements are
/// not escaped twice.
pub fn sanitize(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Kind a value can be tested against with [`Inspector::is`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    String,
    Number,
    Empty,
}

impl FromStr for Kind {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Kind::String),
            "number" => Ok(Kind::Number),
            "empty" => Ok(Kind::Empty),
            _ => Err(()),
        }
    }
}

/// How an object decides whether it is empty.
///
/// Strings and arrays are empty when they have length zero regardless of
/// the policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EmptinessPolicy {
    /// No keys, or at least one property holding a falsy value
    /// (`null`, `false`, `0`, `""`).
    #[default]
    Loose,
    /// No keys at all.
    NoKeys,
}

/// Type and emptiness checks over a borrowed value.
#[derive(Debug, Clone, Copy)]
pub struct Inspector<'a> {
    value: &'a Value,
    policy: EmptinessPolicy,
}

/// Starts an inspection of `value` using the default emptiness policy.
pub fn validate(value: &Value) -> Inspector<'_> {
    Inspector {
        value,
        policy: EmptinessPolicy::default(),
    }
}

impl Inspector<'_> {
    pub fn with_policy(self, policy: EmptinessPolicy) -> Self {
        Self { policy, ..self }
    }

    pub fn is(&self, kind: Kind) -> bool {
        match kind {
            Kind::String => self.value.is_string(),
            Kind::Number => self.value.is_number(),
            Kind::Empty => self.is_empty(),
        }
    }

    /// Same as [`Inspector::is`] with the kind given by name.
    /// Unknown names never match.
    pub fn is_kind(&self, kind: &str) -> bool {
        kind.parse::<Kind>().map(|k| self.is(k)).unwrap_or(false)
    }

    fn is_empty(&self) -> bool {
        match self.value {
            Value::String(s) => s.is_empty(),
            Value::Array(items) => items.is_empty(),
            Value::Object(map) => match self.policy {
                EmptinessPolicy::NoKeys => map.is_empty(),
                EmptinessPolicy::Loose => map.is_empty() || map.values().any(is_falsy),
            },
            _ => false,
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
