//! Roster entities - faction members as listed by the upstream membership endpoint

use serde::Serialize;
use serde_json::{Map, Value};

use super::json_kind;
use crate::error::DomainError;

/// Name used when the upstream record carries none
pub const UNKNOWN_MEMBER_NAME: &str = "Unknown";

/// One faction member
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterMember {
    pub id: i64,
    pub name: String,
    pub level: i64,
}

impl RosterMember {
    /// Build a member from an upstream record, with `id` resolved by the caller
    pub fn from_record(id: i64, record: &Value) -> Result<Self, DomainError> {
        let Value::Object(fields) = record else {
            return Err(DomainError::malformed(format!(
                "member {id} record is a {}, expected an object",
                json_kind(record)
            )));
        };

        let name = fields
            .get("name")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_MEMBER_NAME)
            .to_string();

        // Levels sometimes arrive as numeric strings; anything unreadable is 0
        let level = fields.get("level").and_then(as_integer).unwrap_or(0);

        Ok(Self { id, name, level })
    }
}

/// Membership collection as delivered by the upstream
#[derive(Debug, Clone, Copy)]
pub enum MembershipPayload<'a> {
    /// `{"members": {"123": {...}, ...}}`
    ById(&'a Map<String, Value>),
    /// `{"members": [{"id": 123, ...}, ...]}`
    List(&'a [Value]),
}

impl<'a> MembershipPayload<'a> {
    /// Locate the member collection in a roster response.
    ///
    /// Returns `None` when `members` is missing or has any other shape.
    pub fn from_response(body: &'a Value) -> Option<Self> {
        match body.get("members")? {
            Value::Object(by_id) => Some(Self::ById(by_id)),
            Value::Array(list) => Some(Self::List(list)),
            _ => None,
        }
    }

    /// Normalize into roster members, preserving upstream order
    pub fn into_roster(self) -> Result<Vec<RosterMember>, DomainError> {
        match self {
            Self::ById(by_id) => by_id
                .iter()
                .map(|(id, record)| {
                    let id = id.trim().parse::<i64>().map_err(|_| {
                        DomainError::malformed(format!("member id {id:?} is not an integer"))
                    })?;
                    RosterMember::from_record(id, record)
                })
                .collect(),
            Self::List(list) => list
                .iter()
                .map(|record| {
                    let id = record
                        .get("id")
                        .ok_or_else(|| DomainError::malformed("member record without an id"))
                        .and_then(parse_member_id)?;
                    RosterMember::from_record(id, record)
                })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::ById(by_id) => by_id.len(),
            Self::List(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Integers and numeric strings
fn as_integer(raw: &Value) -> Option<i64> {
    match raw {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn parse_member_id(raw: &Value) -> Result<i64, DomainError> {
    as_integer(raw)
        .ok_or_else(|| DomainError::malformed(format!("member id {raw} is not an integer")))
}
