//! Domain entities - roster members, statistic snapshots, and analysis results

mod analysis;
mod field_set;
mod member;
mod roster;
mod snapshot;

pub use analysis::AnalysisResult;
pub use field_set::{FieldSet, StatWindow, CURRENT_STAT_FIELDS, HISTORICAL_STAT_FIELDS};
pub use member::{CurrentStats, EnrichedMember, MemberWindows, ProfileFields};
pub use roster::{MembershipPayload, RosterMember, UNKNOWN_MEMBER_NAME};
pub use snapshot::{StatSnapshot, ZERO_CURRENT_SNAPSHOT, ZERO_HISTORICAL_SNAPSHOT};

use serde_json::Value;

/// Short JSON type name for error messages
pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
