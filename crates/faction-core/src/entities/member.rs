//! Enriched member - roster data merged with the three statistic windows

use serde::Serialize;
use serde_json::Value;

use super::{FieldSet, RosterMember, StatSnapshot};
use crate::error::DomainError;

/// Profile-derived fields returned alongside the current snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProfileFields {
    pub age: i64,
    /// Faction the member currently belongs to, per their profile
    pub faction_id: i64,
}

impl ProfileFields {
    /// Read profile fields from a user response.
    ///
    /// Looks in a nested `profile` object when present, otherwise at the top level.
    /// `faction_id` may also sit under `faction.faction_id`. Missing values are zero.
    pub fn from_response(body: &Value) -> Self {
        let profile = body.get("profile").filter(|p| p.is_object()).unwrap_or(body);

        let age = profile.get("age").and_then(Value::as_i64).unwrap_or(0);
        let faction_id = profile
            .get("faction_id")
            .or_else(|| profile.get("faction").and_then(|f| f.get("faction_id")))
            .and_then(Value::as_i64)
            .unwrap_or(0);

        Self { age, faction_id }
    }
}

/// Outcome of a successful current-window query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentStats {
    pub stats: StatSnapshot,
    pub profile: Option<ProfileFields>,
}

/// Per-window fetch outcomes for one member, before defaults are applied
#[derive(Debug)]
pub struct MemberWindows {
    pub current: Result<CurrentStats, DomainError>,
    pub weekly: Result<StatSnapshot, DomainError>,
    pub monthly: Result<StatSnapshot, DomainError>,
    /// Whether the current query asked for profile data
    pub include_profile: bool,
}

/// Roster member with statistic snapshots attached
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnrichedMember {
    #[serde(flatten)]
    pub member: RosterMember,
    #[serde(flatten)]
    pub profile: Option<ProfileFields>,
    pub current: StatSnapshot,
    pub weekly: StatSnapshot,
    pub monthly: StatSnapshot,
}

impl EnrichedMember {
    /// Merge window outcomes onto a roster member.
    ///
    /// Each failed window is replaced by the zero snapshot of its own field set;
    /// the other windows keep their data. A failed current window also zeroes the
    /// profile fields when profile data was requested.
    pub fn assemble(member: RosterMember, windows: MemberWindows) -> Self {
        let (current, profile) = match windows.current {
            Ok(CurrentStats { stats, profile }) => (stats, profile.unwrap_or_default()),
            Err(_) => (FieldSet::Current.zero_snapshot(), ProfileFields::default()),
        };

        Self {
            member,
            profile: windows.include_profile.then_some(profile),
            current,
            weekly: windows
                .weekly
                .unwrap_or_else(|_| FieldSet::Historical.zero_snapshot()),
            monthly: windows
                .monthly
                .unwrap_or_else(|_| FieldSet::Historical.zero_snapshot()),
        }
    }

    pub fn id(&self) -> i64 {
        self.member.id
    }
}
