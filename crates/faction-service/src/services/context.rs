//! Service context - dependency container for services
//!
//! Holds the upstream client, the pacing strategy, the clock, and the
//! aggregation settings shared by every service.

use std::sync::Arc;

use faction_common::AggregationConfig;
use faction_core::{Clock, PacingStrategy, UpstreamClient};

use super::error::{ServiceError, ServiceResult};
use super::pacing::{FixedInterval, NoPacing, SystemClock};

/// Service context containing all dependencies
///
/// Cheap to clone; every dependency sits behind an `Arc`.
#[derive(Clone)]
pub struct ServiceContext {
    upstream: Arc<dyn UpstreamClient>,
    pacing: Arc<dyn PacingStrategy>,
    clock: Arc<dyn Clock>,

    /// Add the `profile` selection to current-window queries
    include_profile: bool,
}

impl ServiceContext {
    pub fn new(
        upstream: Arc<dyn UpstreamClient>,
        pacing: Arc<dyn PacingStrategy>,
        clock: Arc<dyn Clock>,
        include_profile: bool,
    ) -> Self {
        Self {
            upstream,
            pacing,
            clock,
            include_profile,
        }
    }

    /// Create a context from aggregation settings, using the wall clock.
    ///
    /// A pacing interval of zero disables pacing.
    pub fn from_config(upstream: Arc<dyn UpstreamClient>, config: &AggregationConfig) -> Self {
        let pacing: Arc<dyn PacingStrategy> = if config.pacing_interval_ms == 0 {
            Arc::new(NoPacing)
        } else {
            Arc::new(FixedInterval::new(config.pacing_interval()))
        };

        Self::new(upstream, pacing, Arc::new(SystemClock), config.include_profile)
    }

    /// Get the upstream client
    pub fn upstream(&self) -> &dyn UpstreamClient {
        self.upstream.as_ref()
    }

    /// Get the pacing strategy
    pub fn pacing(&self) -> &dyn PacingStrategy {
        self.pacing.as_ref()
    }

    /// Get the clock
    pub fn clock(&self) -> &dyn Clock {
        self.clock.as_ref()
    }

    pub fn include_profile(&self) -> bool {
        self.include_profile
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("upstream", &"UpstreamClient")
            .field("pacing", &"PacingStrategy")
            .field("clock", &"Clock")
            .field("include_profile", &self.include_profile)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
///
/// Only the upstream client is required. Pacing defaults to the 700 ms
/// interval, the clock to the wall clock, and profile data to enabled.
pub struct ServiceContextBuilder {
    upstream: Option<Arc<dyn UpstreamClient>>,
    pacing: Option<Arc<dyn PacingStrategy>>,
    clock: Option<Arc<dyn Clock>>,
    include_profile: bool,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self {
            upstream: None,
            pacing: None,
            clock: None,
            include_profile: true,
        }
    }

    pub fn upstream(mut self, upstream: Arc<dyn UpstreamClient>) -> Self {
        self.upstream = Some(upstream);
        self
    }

    pub fn pacing(mut self, pacing: Arc<dyn PacingStrategy>) -> Self {
        self.pacing = Some(pacing);
        self
    }

    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    pub fn include_profile(mut self, include_profile: bool) -> Self {
        self.include_profile = include_profile;
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Internal` if the upstream client is missing
    pub fn build(self) -> ServiceResult<ServiceContext> {
        Ok(ServiceContext::new(
            self.upstream
                .ok_or_else(|| ServiceError::internal("upstream client is required"))?,
            self.pacing
                .unwrap_or_else(|| Arc::new(FixedInterval::default())),
            self.clock.unwrap_or_else(|| Arc::new(SystemClock)),
            self.include_profile,
        ))
    }
}

impl Default for ServiceContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}
