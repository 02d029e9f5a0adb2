//! Sync status
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/walmart/sync-status | GET | X-Extension-Key |

use axum::{Json, Router, extract::State, routing::get};
use shared::models::SyncStatusResponse;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/walmart/sync-status", get(sync_status))
}

async fn sync_status(State(state): State<ServerState>) -> Json<SyncStatusResponse> {
    Json(state.tracker().snapshot().into())
}
