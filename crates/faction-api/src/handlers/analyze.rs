//! Faction analysis handlers

use axum::{extract::State, Json};
use faction_core::AnalysisResult;
use faction_service::dto::AnalyzeRequest;
use faction_service::StatAggregator;

use crate::extractors::ValidatedJson;
use crate::response::ApiResult;
use crate::state::AppState;

/// Aggregate member statistics for a faction
///
/// POST /api/analyze
///
/// Runs for roughly one pacing interval per member; large factions take minutes.
pub async fn analyze(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<AnalyzeRequest>,
) -> ApiResult<Json<AnalysisResult>> {
    let aggregator = StatAggregator::new(state.service_context());
    let result = aggregator.analyze(request).await?;
    Ok(Json(result))
}
