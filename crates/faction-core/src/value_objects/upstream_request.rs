//! Upstream request descriptor
//!
//! The HTTP client joins `path` and `query` onto its configured base URL.
//! Requests are only built through the named endpoint constructors below.

use chrono::{DateTime, Utc};
use std::fmt;

use super::{ApiKey, FactionId};
use crate::entities::StatWindow;

const KEY_PARAM: &str = "key";

/// One read against the upstream statistics API
#[derive(Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl UpstreamRequest {
    /// `GET /v2/faction/{faction_id}/members?key=...`
    pub fn faction_members(faction_id: &FactionId, key: &ApiKey) -> Self {
        Self {
            path: format!("/v2/faction/{faction_id}/members"),
            query: vec![(KEY_PARAM, key.expose().to_string())],
        }
    }

    /// `GET /user/{member_id}?selections=...&stat=...&key=...[&timestamp=...]`
    ///
    /// `include_profile` only applies to the current window; historical queries
    /// always request `personalstats` alone.
    pub fn user_stats(
        member_id: i64,
        window: StatWindow,
        include_profile: bool,
        key: &ApiKey,
        now: DateTime<Utc>,
    ) -> Self {
        let selections = if include_profile && window == StatWindow::Current {
            "personalstats,profile"
        } else {
            "personalstats"
        };

        let mut query = vec![
            ("selections", selections.to_string()),
            ("stat", window.field_set().query_value()),
            (KEY_PARAM, key.expose().to_string()),
        ];
        if let Some(timestamp) = window.timestamp_at(now) {
            query.push(("timestamp", timestamp.to_string()));
        }

        Self {
            path: format!("/user/{member_id}"),
            query,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }

    /// Look up a single query parameter
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(param, _)| *param == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for UpstreamRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (param, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            if *param == KEY_PARAM {
                write!(f, "{sep}{param}=***")?;
            } else {
                write!(f, "{sep}{param}={value}")?;
            }
        }
        Ok(())
    }
}
