// Verdict type and strict parsing of the model's JSON reply

use crate::error::{Result, VerdictError};
use serde::{Deserialize, Serialize};

/// Whether the image contains a cat, plus the model's message
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Verdict {
    #[serde(rename = "hazCat")]
    pub contains_cat: bool,
    pub message: String,
}

impl Verdict {
    pub fn new(contains_cat: bool, message: impl Into<String>) -> Self {
        Self {
            contains_cat,
            message: message.into(),
        }
    }
}

/// Parse model text into a `Verdict`.
///
/// The text must be a JSON object with exactly two keys: `hazCat` (bool)
/// and `message` (string). Anything that is not JSON is `InvalidJson`;
/// JSON of any other shape is `SchemaMismatch`.
pub fn parse_verdict(raw: &str) -> Result<Verdict> {
    let value: serde_json::Value = serde_json::from_str(raw).map_err(VerdictError::InvalidJson)?;

    if !value.is_object() {
        return Err(VerdictError::SchemaMismatch(format!(
            "expected a JSON object, got {}",
            kind_of(&value)
        )));
    }

    serde_json::from_value(value).map_err(|e| VerdictError::SchemaMismatch(e.to_string()))
}

fn kind_of(value: &serde_json::Value) -> &str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
