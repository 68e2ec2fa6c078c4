//! Domain errors - error types for the domain layer

use serde_json::Value;
use thiserror::Error;

/// Message used when the upstream reports an error without describing it
const UNKNOWN_UPSTREAM_MESSAGE: &str = "Unknown";

/// Faults raised while talking to the upstream statistics API
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The upstream answered with an `{"error": {...}}` body
    #[error("Torn API error: {message}")]
    Api { code: Option<i64>, message: String },

    /// Non-2xx HTTP status. `payload` holds the body when it was JSON.
    #[error("Upstream returned HTTP {status}: {message}")]
    Status {
        status: u16,
        message: String,
        payload: Option<Value>,
    },

    #[error("Upstream request timed out")]
    Timeout,

    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Upstream returned an unreadable body: {0}")]
    Decode(String),
}

impl UpstreamError {
    /// Inspect an upstream body for an error indicator.
    ///
    /// The upstream reports failures as `{"error": {"code": 2, "error": "Incorrect key"}}`,
    /// usually with a 2xx status. A bare string under `error` is accepted too.
    pub fn from_error_body(body: &Value) -> Option<Self> {
        let error = body.get("error")?;

        let (code, message) = match error {
            Value::Object(details) => (
                details.get("code").and_then(Value::as_i64),
                details.get("error").and_then(Value::as_str),
            ),
            Value::String(message) => (None, Some(message.as_str())),
            _ => (None, None),
        };

        Some(Self::Api {
            code,
            message: message.unwrap_or(UNKNOWN_UPSTREAM_MESSAGE).to_string(),
        })
    }

    /// Error payload surfaced by the upstream, if any
    pub fn payload(&self) -> Option<&Value> {
        match self {
            Self::Status { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }

    /// Get an error code string for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Api { .. } => "UPSTREAM_API_ERROR",
            Self::Status { .. } => "UPSTREAM_HTTP_ERROR",
            Self::Timeout => "UPSTREAM_TIMEOUT",
            Self::Transport(_) => "UPSTREAM_TRANSPORT_ERROR",
            Self::Decode(_) => "UPSTREAM_DECODE_ERROR",
        }
    }
}

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    /// Missing or unusable caller input
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Upstream data with an unexpected shape
    #[error("Malformed upstream data: {0}")]
    MalformedData(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a malformed data error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Upstream(e) => e.code(),
            Self::MalformedData(_) => "MALFORMED_UPSTREAM_DATA",
        }
    }

    /// Check if this is a caller input error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
