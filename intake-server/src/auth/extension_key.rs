//! Shared-secret check for the browser extension
//!
//! Every `/api` request must carry `X-Extension-Key` equal to the configured
//! secret. Anything else is answered with 401 before a handler runs.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use shared::error::AppError;

use crate::core::ServerState;

pub const EXTENSION_KEY_HEADER: &str = "x-extension-key";

pub async fn require_extension_key(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let provided = request
        .headers()
        .get(EXTENSION_KEY_HEADER)
        .and_then(|v| v.to_str().ok());
    let header_present = provided.is_some();

    if provided == Some(state.config.extension_key.as_str()) {
        return next.run(request).await;
    }

    crate::security_log!(
        WARN,
        "extension_key_rejected",
        method = %request.method(),
        path = %request.uri().path(),
        header_present,
        "Rejected request with missing or invalid extension key"
    );
    AppError::unauthorized().into_response()
}
