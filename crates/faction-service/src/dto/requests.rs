//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::{de, Deserialize, Deserializer};
use serde_json::Value;
use validator::Validate;

/// Analyze request
///
/// Both fields are trimmed on the way in. Absent, `null`, and blank values all
/// become the empty string and fail validation with the same message.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AnalyzeRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Missing faction_id or api_key"))]
    pub faction_id: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "Missing faction_id or api_key"))]
    pub api_key: String,
}

/// Accept a string or a bare number, trimmed; `null` is empty
fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s.trim().to_string()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::invalid_type(
            de::Unexpected::Other(json_kind(&other)),
            &"a string",
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Bool(_) => "boolean",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
        _ => "value",
    }
}
