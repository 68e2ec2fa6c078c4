//! Member lister
//!
//! Resolves a faction's current roster with a single upstream read.

use faction_core::{
    ApiKey, FactionId, MembershipPayload, RosterMember, UpstreamError, UpstreamRequest,
};
use tracing::{debug, info, instrument, warn};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Member lister
pub struct MemberLister<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> MemberLister<'a> {
    /// Create a new MemberLister
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the members of a faction in upstream order.
    ///
    /// An upstream error body fails the call. A response without a recognizable
    /// member collection yields an empty roster.
    #[instrument(skip(self, key))]
    pub async fn list_members(
        &self,
        faction_id: &FactionId,
        key: &ApiKey,
    ) -> ServiceResult<Vec<RosterMember>> {
        let request = UpstreamRequest::faction_members(faction_id, key);
        let body = self.ctx.upstream().fetch(&request).await?;

        if let Some(err) = UpstreamError::from_error_body(&body) {
            warn!(error = %err, "Upstream rejected roster request");
            return Err(err.into());
        }

        let Some(payload) = MembershipPayload::from_response(&body) else {
            debug!("Roster response has no member collection");
            return Ok(Vec::new());
        };

        let members = payload.into_roster()?;
        info!(member_count = members.len(), "Roster resolved");

        Ok(members)
    }
}
