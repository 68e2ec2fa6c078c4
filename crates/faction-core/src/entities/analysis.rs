//! Analysis result returned for one faction

use serde::Serialize;

use super::EnrichedMember;
use crate::value_objects::FactionId;

/// Aggregated statistics for a faction, members in roster order
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub faction_id: FactionId,
    pub members: Vec<EnrichedMember>,
}

impl AnalysisResult {
    pub fn new(faction_id: FactionId, members: Vec<EnrichedMember>) -> Self {
        Self { faction_id, members }
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }
}
