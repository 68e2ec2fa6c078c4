//! Caller-supplied identifiers: the faction to analyze and the API key used upstream

use serde::{Serialize, Serializer};
use std::fmt;

use crate::error::DomainError;

/// Faction identifier, passed through to the upstream and echoed in the result
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FactionId(String);

impl FactionId {
    /// Parse a faction id from caller input.
    ///
    /// Surrounding whitespace is trimmed. The id ends up in an upstream URL path,
    /// so only ASCII letters and digits are accepted.
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Missing faction_id"));
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(DomainError::validation(format!("Invalid faction_id: {trimmed}")));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for FactionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Upstream API key. Never logged: `Debug` is redacted and there is no `Display`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DomainError::validation("Missing api_key"));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Raw key, for building upstream requests only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}
