//! Statistic field sets and the time windows they are queried for

use chrono::{DateTime, Duration, Utc};

use super::snapshot::{StatSnapshot, ZERO_CURRENT_SNAPSHOT, ZERO_HISTORICAL_SNAPSHOT};

/// Fields requested for the "now" snapshot
pub const CURRENT_STAT_FIELDS: &[&str] = &[
    "attackswon",
    "attackslost",
    "defendswon",
    "defendslost",
    "rankedwarhits",
    "xantaken",
    "boostersused",
    "energydrinkused",
    "statenhancersused",
    "useractivity",
    "refills",
    "nerverefills",
    "activestreak",
    "organisedcrimes",
    "criminaloffenses",
];

/// Fields requested for the weekly and monthly snapshots.
///
/// The upstream only serves point-in-time values for this narrower set, so
/// refills, nerverefills, activestreak and organisedcrimes are current-only.
pub const HISTORICAL_STAT_FIELDS: &[&str] = &[
    "attackswon",
    "attackslost",
    "defendswon",
    "defendslost",
    "rankedwarhits",
    "xantaken",
    "boostersused",
    "energydrinkused",
    "statenhancersused",
    "useractivity",
    "criminaloffenses",
];

/// Named field set used for one upstream query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSet {
    Current,
    Historical,
}

impl FieldSet {
    /// Ordered field names
    #[inline]
    pub const fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Current => CURRENT_STAT_FIELDS,
            Self::Historical => HISTORICAL_STAT_FIELDS,
        }
    }

    #[inline]
    pub const fn len(self) -> usize {
        self.fields().len()
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.fields().is_empty()
    }

    /// Index of a field within the set
    pub fn position(self, name: &str) -> Option<usize> {
        self.fields().iter().position(|field| *field == name)
    }

    /// Comma-joined value for the upstream `stat` parameter
    pub fn query_value(self) -> String {
        self.fields().join(",")
    }

    /// Zero-filled snapshot over this field set
    pub fn zero_snapshot(self) -> StatSnapshot {
        match self {
            Self::Current => ZERO_CURRENT_SNAPSHOT.clone(),
            Self::Historical => ZERO_HISTORICAL_SNAPSHOT.clone(),
        }
    }
}

/// Point in time a snapshot describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatWindow {
    Current,
    Weekly,
    Monthly,
}

impl StatWindow {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
        }
    }

    pub const fn field_set(self) -> FieldSet {
        match self {
            Self::Current => FieldSet::Current,
            Self::Weekly | Self::Monthly => FieldSet::Historical,
        }
    }

    /// How far back the window is pinned; `None` means "now"
    pub fn lookback(self) -> Option<Duration> {
        match self {
            Self::Current => None,
            Self::Weekly => Some(Duration::days(7)),
            Self::Monthly => Some(Duration::days(30)),
        }
    }

    /// Unix timestamp (seconds) to pin the query at, relative to `now`
    pub fn timestamp_at(self, now: DateTime<Utc>) -> Option<i64> {
        self.lookback().map(|lookback| (now - lookback).timestamp())
    }
}
