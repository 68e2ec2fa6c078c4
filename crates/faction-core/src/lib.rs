//! # faction-core
//!
//! Domain layer containing the roster and statistic entities, value objects,
//! upstream ports, and domain errors.
//! This crate has zero dependencies on infrastructure (HTTP client, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    AnalysisResult, CurrentStats, EnrichedMember, FieldSet, MemberWindows, MembershipPayload,
    ProfileFields, RosterMember, StatSnapshot, StatWindow, CURRENT_STAT_FIELDS,
    HISTORICAL_STAT_FIELDS, UNKNOWN_MEMBER_NAME, ZERO_CURRENT_SNAPSHOT, ZERO_HISTORICAL_SNAPSHOT,
};
pub use error::{DomainError, UpstreamError};
pub use traits::{Clock, PacingStrategy, UpstreamClient, UpstreamResult};
pub use value_objects::{ApiKey, FactionId, UpstreamRequest};
