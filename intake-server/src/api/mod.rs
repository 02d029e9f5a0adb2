//! HTTP API
//!
//! `/health` is public; everything under `/api` requires the extension key.

use std::time::Duration;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue, StatusCode};
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::auth::{EXTENSION_KEY_HEADER, require_extension_key};
use crate::core::ServerState;
use crate::middleware;

pub mod health;
pub mod orders;
pub mod sync;

const REQUEST_ID_HEADER: &str = "x-request-id";
const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Routes that require `X-Extension-Key`
fn api_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(orders::router())
        .merge(sync::router())
        .route_layer(axum_middleware::from_fn_with_state(
            state.clone(),
            require_extension_key,
        ))
}

/// All routes, without the outer middleware stack
pub fn build_router(state: &ServerState) -> Router<ServerState> {
    Router::new()
        .merge(api_router(state))
        .merge(health::router())
}

/// Fully configured application
///
/// Used by the HTTP server and by in-process tests.
pub fn build_app(state: &ServerState) -> Router<ServerState> {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    with_request_timeout(
        build_router(state).layer(DefaultBodyLimit::max(MAX_BODY_BYTES)),
        state.config.request_timeout(),
    )
    .layer(cors_layer())
    .layer(axum_middleware::from_fn(middleware::logging_middleware))
    .layer(TraceLayer::new_for_http())
    .layer(PropagateRequestIdLayer::new(request_id.clone()))
    .layer(SetRequestIdLayer::new(request_id, XRequestId))
}

/// Abort requests running longer than `timeout` with a 408 error body
fn with_request_timeout<S>(router: Router<S>, timeout: Duration) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            timeout,
        ))
        .layer(axum_middleware::map_response(middleware::render_timeout))
}

/// CORS for calls from the browser extension
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([http::Method::GET, http::Method::POST, http::Method::OPTIONS])
        .allow_headers([
            http::header::CONTENT_TYPE,
            HeaderName::from_static(EXTENSION_KEY_HEADER),
        ])
        .max_age(Duration::from_secs(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_slow_request_times_out_with_error_body() {
        let router = Router::new()
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    "late"
                }),
            )
            .route("/fast", get(|| async { "quick" }));
        let app = with_request_timeout(router, Duration::from_millis(20));

        let response = app
            .clone()
            .oneshot(http::Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], 9003);

        let response = app
            .oneshot(http::Request::get("/fast").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
