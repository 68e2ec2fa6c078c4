//! Route definitions

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::services::ServeDir;

use crate::handlers::{analyze, health};
use crate::state::AppState;

/// Path of the analyze operation
pub const ANALYZE_PATH: &str = "/api/analyze";

/// Create the main router. Unmatched paths go to `static_dir` when one is set.
pub fn create_router(static_dir: Option<&str>) -> Router<AppState> {
    let router = Router::new()
        .merge(api_routes())
        .merge(health_routes());

    match static_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    }
}

/// Health check routes
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// Analysis routes. OPTIONS is answered by the middleware stack.
fn api_routes() -> Router<AppState> {
    Router::new().route(ANALYZE_PATH, post(analyze::analyze))
}
