//! Timeout response rendering

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use shared::error::AppError;

/// Replace the bare 408 produced by the timeout layer with the error body
pub async fn render_timeout(response: Response) -> Response {
    if response.status() == StatusCode::REQUEST_TIMEOUT {
        return AppError::timeout().into_response();
    }
    response
}
