//! Middleware stack for the API server
//!
//! Provides request ids, request tracing, the whole-request timeout, and CORS.

use std::time::Duration;

use axum::{
    body::Body,
    http::{header, HeaderValue, Method, Request, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use faction_common::CorsConfig;
use faction_service::dto::StatusResponse;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use crate::response::ApiError;
use crate::routes::ANALYZE_PATH;
use crate::state::AppState;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Apply the middleware stack to the router
///
/// Request -> Preflight body -> CORS -> RequestID -> Trace -> Deadline -> Handler.
/// CORS sits outside the deadline so timeouts and errors still carry the allow-origin header.
pub fn apply_middleware(
    router: Router<AppState>,
    cors_config: &CorsConfig,
    request_timeout: Duration,
) -> Router<AppState> {
    router
        // Whole-request deadline (503 with a JSON error body)
        .layer(middleware::from_fn(move |request: Request<Body>, next: Next| {
            enforce_deadline(request_timeout, request, next)
        }))
        // Tracing
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = request
                        .headers()
                        .get(REQUEST_ID_HEADER)
                        .and_then(|v| v.to_str().ok())
                        .unwrap_or("unknown");

                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                        request_id = %request_id,
                    )
                })
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Request ID propagation
        .layer(PropagateRequestIdLayer::new(header::HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        // Request ID generation
        .layer(SetRequestIdLayer::new(
            header::HeaderName::from_static(REQUEST_ID_HEADER),
            MakeRequestUuid,
        ))
        // CORS
        .layer(create_cors_layer(cors_config))
        // Pre-flight acknowledgement body (outermost)
        .layer(middleware::from_fn(preflight_status))
}

/// Cut the request off once `limit` has passed.
///
/// The handler future is dropped, which cancels any upstream call in flight.
async fn enforce_deadline(limit: Duration, request: Request<Body>, next: Next) -> Response {
    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => ApiError::Timeout.into_response(),
    }
}

/// Give analyze pre-flight replies a `{"status": "ok"}` body.
///
/// The CORS layer answers every OPTIONS request itself, with an empty body and
/// without reaching the router. The CORS headers it set are kept.
async fn preflight_status(request: Request<Body>, next: Next) -> Response {
    let is_preflight =
        request.method() == Method::OPTIONS && request.uri().path() == ANALYZE_PATH;
    let response = next.run(request).await;

    if !is_preflight || response.status() != StatusCode::OK {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    (parts, Json(StatusResponse::ok())).into_response()
}

/// Create the CORS layer. No configured origins means any origin.
fn create_cors_layer(config: &CorsConfig) -> CorsLayer {
    let base_layer = CorsLayer::new()
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .expose_headers([header::HeaderName::from_static(REQUEST_ID_HEADER)]);

    if config.allowed_origins.is_empty() {
        return base_layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    tracing::info!("CORS: Allowing {} configured origins", origins.len());
    base_layer.allow_origin(AllowOrigin::list(origins))
}
