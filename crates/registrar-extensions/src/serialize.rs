//! Serializer for the `extensions:` configuration block.

use serde_json::Value;

use crate::candidate::Candidate;
use crate::definition::CallExpression;
use crate::error::{Error, Result};

/// Header line of the rendered block.
pub const EXTENSIONS_HEADER: &str = "extensions:";

/// Render ordered extensions as:
///
/// ```text
/// extensions:
/// 	orm: App\OrmExtension
/// 	cache: App\CacheExtension(%tempDir%)
/// ```
///
/// Each item line is tab-indented and newline-terminated.
pub fn serialize_extensions(ordering: &[Candidate]) -> Result<String> {
    let mut out = String::from(EXTENSIONS_HEADER);
    out.push('\n');
    for item in ordering {
        out.push('\t');
        out.push_str(&item.key);
        out.push_str(": ");
        out.push_str(&encode_payload(&item.payload)?);
        out.push('\n');
    }
    Ok(out)
}

/// Encode one definition payload.
///
/// Strings are written as-is; `{value, attributes}` objects become
/// `value(arg1, arg2)`. Anything else is [`Error::MalformedPayload`].
pub fn encode_payload(payload: &Value) -> Result<String> {
    match payload {
        Value::String(literal) => Ok(literal.clone()),
        Value::Object(_) => Ok(CallExpression::from_value(payload)?.to_string()),
        _ => Err(Error::malformed(payload)),
    }
}
