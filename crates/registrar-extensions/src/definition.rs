//! Extension definitions as they appear in package configuration.
//!
//! A definition is either a bare type identifier:
//!
//! ```text
//! orm: App\OrmExtension
//! ```
//!
//! or a call expression carrying positional attributes, stored as a
//! `{ "value": ..., "attributes": [...] }` object and rendered as:
//!
//! ```text
//! orm: App\OrmExtension(%debugMode%, %tempDir%)
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One extension registration: a unique key, the type backing it, and the
/// payload to write back out.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtensionDefinition {
    /// Registration slot name (e.g. `orm`).
    pub key: String,
    /// Identifier of the implementation backing this extension.
    pub type_id: String,
    /// The definition exactly as supplied; re-encoded by the serializer.
    pub payload: Value,
}

impl ExtensionDefinition {
    /// Build a definition from a `key -> payload` configuration entry.
    ///
    /// The type identifier is the payload itself when it is a string, or its
    /// `value` field when it is an object.
    pub fn from_entry(key: impl Into<String>, payload: Value) -> Result<Self> {
        let type_id = match &payload {
            Value::String(type_id) => type_id.clone(),
            Value::Object(map) => match map.get("value") {
                Some(Value::String(type_id)) => type_id.clone(),
                _ => return Err(Error::malformed(&payload)),
            },
            _ => return Err(Error::malformed(&payload)),
        };

        Ok(Self {
            key: key.into(),
            type_id,
            payload,
        })
    }

    /// Build definitions from an ordered JSON object, keeping its key order.
    pub fn from_map(map: &serde_json::Map<String, Value>) -> Result<Vec<Self>> {
        map.iter()
            .map(|(key, payload)| Self::from_entry(key.clone(), payload.clone()))
            .collect()
    }
}

/// A structured definition rendered as `value(arg1, arg2, ...)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallExpression {
    pub value: String,
    #[serde(default)]
    pub attributes: Vec<String>,
}

impl CallExpression {
    pub fn new(value: impl Into<String>, attributes: Vec<String>) -> Self {
        Self {
            value: value.into(),
            attributes,
        }
    }

    /// Read a call expression from a `{value, attributes}` payload.
    ///
    /// Attributes must be scalars; strings are taken verbatim, other scalars
    /// use their literal spelling.
    pub fn from_value(payload: &Value) -> Result<Self> {
        let map = payload.as_object().ok_or_else(|| Error::malformed(payload))?;
        let value = match map.get("value") {
            Some(Value::String(value)) => value.clone(),
            _ => return Err(Error::malformed(payload)),
        };
        let attributes = match map.get("attributes") {
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| scalar_literal(item).ok_or_else(|| Error::malformed(payload)))
                .collect::<Result<Vec<_>>>()?,
            _ => return Err(Error::malformed(payload)),
        };

        Ok(Self { value, attributes })
    }

    /// The `{value, attributes}` object form.
    pub fn to_value(&self) -> Value {
        serde_json::json!({
            "value": self.value,
            "attributes": self.attributes,
        })
    }
}

impl fmt::Display for CallExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.value, self.attributes.join(", "))
    }
}

impl FromStr for CallExpression {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidCallExpression {
            input: input.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = input.trim();
        let open = trimmed.find('(').ok_or_else(|| invalid("missing '('"))?;
        let inner = trimmed[open + 1..]
            .strip_suffix(')')
            .ok_or_else(|| invalid("missing closing ')'"))?;
        let value = trimmed[..open].trim();
        if value.is_empty() {
            return Err(invalid("empty value before '('"));
        }

        Ok(Self {
            value: value.to_string(),
            attributes: split_arguments(inner).map_err(|reason| invalid(reason))?,
        })
    }
}

fn scalar_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

/// Split an argument list on top-level commas.
fn split_arguments(inner: &str) -> std::result::Result<Vec<String>, &'static str> {
    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut arguments = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut current = String::new();

    for c in inner.chars() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '(' | '[' | '{') => depth += 1,
            (None, ')' | ']' | '}') => {
                depth = depth.checked_sub(1).ok_or("unbalanced brackets")?;
            }
            (None, ',') if depth == 0 => {
                arguments.push(current.trim().to_string());
                current.clear();
                continue;
            }
            (None, _) => {}
        }
        current.push(c);
    }

    if depth != 0 || quote.is_some() {
        return Err("unbalanced brackets or quotes");
    }
    arguments.push(current.trim().to_string());

    Ok(arguments)
}
