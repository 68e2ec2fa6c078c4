//! Upstream, pacing, and clock ports
//!
//! The service layer depends only on these traits. Infrastructure crates
//! provide the HTTP implementation; tests substitute stubs.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::error::UpstreamError;
use crate::value_objects::UpstreamRequest;

/// Result type for upstream reads
pub type UpstreamResult<T> = Result<T, UpstreamError>;

// ============================================================================
// Upstream
// ============================================================================

/// Single point of contact with the upstream statistics API
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Perform one read and return the decoded JSON body.
    ///
    /// Non-2xx statuses, transport faults, and timeouts are errors. A 2xx body
    /// carrying an upstream error indicator is returned as-is for the caller to inspect.
    async fn fetch(&self, request: &UpstreamRequest) -> UpstreamResult<Value>;
}

// ============================================================================
// Pacing
// ============================================================================

/// Delay inserted between per-member call groups
pub trait PacingStrategy: Send + Sync {
    /// Pause to take after the member at `member_index` (0-based) has been processed
    fn delay_after(&self, member_index: usize) -> Duration;
}

// ============================================================================
// Clock
// ============================================================================

/// Source of "now" for pinning historical queries
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}
