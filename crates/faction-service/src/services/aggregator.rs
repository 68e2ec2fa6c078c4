//! Stat aggregator
//!
//! Enriches every roster member with a current, a weekly-ago, and a
//! monthly-ago statistic snapshot. Members are processed strictly in order,
//! one at a time, with the pacing delay after each member's call group.
//!
//! A failed window never fails the request: it is logged and replaced by the
//! zero snapshot of its field set. Only a roster failure is returned.

use chrono::{DateTime, Utc};
use faction_core::{
    AnalysisResult, ApiKey, CurrentStats, DomainError, EnrichedMember, FactionId, FieldSet,
    MemberWindows, ProfileFields, RosterMember, StatSnapshot, StatWindow, UpstreamError,
    UpstreamRequest,
};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use crate::dto::AnalyzeRequest;

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::lister::MemberLister;

/// Stat aggregator
pub struct StatAggregator<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> StatAggregator<'a> {
    /// Create a new StatAggregator
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Parse a validated request and aggregate it
    pub async fn analyze(&self, request: AnalyzeRequest) -> ServiceResult<AnalysisResult> {
        let faction_id = FactionId::parse(&request.faction_id)?;
        let key = ApiKey::parse(&request.api_key)?;

        self.aggregate(&faction_id, &key).await
    }

    /// Build the enriched roster for a faction
    #[instrument(skip(self, key))]
    pub async fn aggregate(
        &self,
        faction_id: &FactionId,
        key: &ApiKey,
    ) -> ServiceResult<AnalysisResult> {
        let roster = MemberLister::new(self.ctx).list_members(faction_id, key).await?;
        info!(member_count = roster.len(), "Aggregating member stats");

        let mut members = Vec::with_capacity(roster.len());
        for (index, member) in roster.into_iter().enumerate() {
            members.push(self.enrich(member, key).await);

            let delay = self.ctx.pacing().delay_after(index);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }

        info!(member_count = members.len(), "Aggregation complete");
        Ok(AnalysisResult::new(faction_id.clone(), members))
    }

    /// Fetch all three windows for one member and merge them
    async fn enrich(&self, member: RosterMember, key: &ApiKey) -> EnrichedMember {
        let member_id = member.id;
        let now = self.ctx.clock().now();
        debug!(member_id, "Fetching member stats");

        let windows = MemberWindows {
            current: self
                .fetch_current(member_id, key, now)
                .await
                .inspect_err(|e| log_window_failure(member_id, StatWindow::Current, e)),
            weekly: self
                .fetch_historical(member_id, StatWindow::Weekly, key, now)
                .await
                .inspect_err(|e| log_window_failure(member_id, StatWindow::Weekly, e)),
            monthly: self
                .fetch_historical(member_id, StatWindow::Monthly, key, now)
                .await
                .inspect_err(|e| log_window_failure(member_id, StatWindow::Monthly, e)),
            include_profile: self.ctx.include_profile(),
        };

        EnrichedMember::assemble(member, windows)
    }

    async fn fetch_current(
        &self,
        member_id: i64,
        key: &ApiKey,
        now: DateTime<Utc>,
    ) -> Result<CurrentStats, DomainError> {
        let include_profile = self.ctx.include_profile();
        let request =
            UpstreamRequest::user_stats(member_id, StatWindow::Current, include_profile, key, now);
        let body = self.fetch_user(&request).await?;

        Ok(CurrentStats {
            stats: personal_stats(&body, FieldSet::Current)?,
            profile: include_profile.then(|| ProfileFields::from_response(&body)),
        })
    }

    async fn fetch_historical(
        &self,
        member_id: i64,
        window: StatWindow,
        key: &ApiKey,
        now: DateTime<Utc>,
    ) -> Result<StatSnapshot, DomainError> {
        let request = UpstreamRequest::user_stats(member_id, window, false, key, now);
        let body = self.fetch_user(&request).await?;

        personal_stats(&body, window.field_set())
    }

    /// One per-member read; an error body counts as a failure
    async fn fetch_user(&self, request: &UpstreamRequest) -> Result<Value, DomainError> {
        let body = self.ctx.upstream().fetch(request).await?;

        match UpstreamError::from_error_body(&body) {
            Some(err) => Err(err.into()),
            None => Ok(body),
        }
    }
}

fn personal_stats(body: &Value, field_set: FieldSet) -> Result<StatSnapshot, DomainError> {
    let stats = body
        .get("personalstats")
        .ok_or_else(|| DomainError::malformed("response has no personalstats"))?;

    StatSnapshot::from_personalstats(field_set, stats)
}

fn log_window_failure(member_id: i64, window: StatWindow, err: &DomainError) {
    warn!(
        member_id,
        window = window.name(),
        error = %err,
        "Member stats unavailable, using zero snapshot"
    );
}
