//! Test fixtures and data generators
//!
//! Provides reusable upstream payloads and request bodies for integration tests.

use faction_core::StatWindow;
use serde::Serialize;
use serde_json::{json, Map, Value};

/// API key the test client sends
pub const TEST_API_KEY: &str = "test-key";

/// Analyze request body
#[derive(Debug, Serialize)]
pub struct AnalyzeBody {
    pub faction_id: String,
    pub api_key: String,
}

impl AnalyzeBody {
    pub fn new(faction_id: &str) -> Self {
        Self {
            faction_id: faction_id.to_string(),
            api_key: TEST_API_KEY.to_string(),
        }
    }
}

/// Roster response keyed by member id, in the given order.
/// Members are named "Member {id}" with level = id.
pub fn roster_by_id(ids: &[i64]) -> Value {
    let members: Map<String, Value> = ids
        .iter()
        .map(|id| (id.to_string(), member_record(*id)))
        .collect();
    json!({ "members": members })
}

/// The same roster as a list of records
pub fn roster_list(ids: &[i64]) -> Value {
    let members: Vec<Value> = ids
        .iter()
        .map(|id| {
            let mut record = member_record(*id);
            record["id"] = json!(id);
            record
        })
        .collect();
    json!({ "members": members })
}

fn member_record(id: i64) -> Value {
    json!({"name": format!("Member {id}"), "level": id})
}

/// Upstream roster error body
pub fn upstream_error(message: &str) -> Value {
    json!({"error": {"code": 2, "error": message}})
}

/// Deterministic user response: attackswon is id * 10 now, id * 7 a week ago,
/// and id * 3 a month ago. The current response carries profile data.
pub fn member_stats(id: i64, window: StatWindow) -> Value {
    match window {
        StatWindow::Current => json!({
            "personalstats": {"attackswon": id * 10, "xantaken": id, "refills": 1},
            "age": 100 + id,
            "faction": {"faction_id": 4242}
        }),
        StatWindow::Weekly => json!({"personalstats": {"attackswon": id * 7}}),
        StatWindow::Monthly => json!({"personalstats": {"attackswon": id * 3}}),
    }
}
