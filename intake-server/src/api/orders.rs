//! Order intake routes
//!
//! | Path | Method | Validation | Auth |
//! |------|--------|------------|------|
//! | /api/walmart/orders | POST | strict | X-Extension-Key |
//! | /api/walmart/orders/batch | POST | lenient, per order | X-Extension-Key |
//!
//! A rejected single order is a 400. A batch is answered with 200 whenever it
//! could be decoded and was non-empty, whatever happened to its orders.

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    routing::post,
};
use shared::error::{AppError, AppResult, ErrorCode};
use shared::models::{BatchOrdersRequest, BatchOrdersResponse, Order, OrderResponse};

use crate::core::ServerState;
use crate::intake::Acknowledgement;
use crate::telemetry::{OrderSource, TelemetryEvent};

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/walmart/orders", post(receive_order))
        .route("/api/walmart/orders/batch", post(receive_batch))
}

/// POST /api/walmart/orders
async fn receive_order(
    State(state): State<ServerState>,
    payload: Result<Json<Order>, JsonRejection>,
) -> AppResult<Json<OrderResponse>> {
    let Json(order) = payload.map_err(|e| malformed(&state, OrderSource::Single, e))?;

    match state.processor.process(&order) {
        Ok(ack) => {
            tracing::info!(
                order_number = %ack.order_number,
                total = ?ack.total_amount,
                items = ack.item_count,
                processing_id = %ack.processing_id,
                "Received order"
            );
            state.telemetry.capture(TelemetryEvent::accepted(
                OrderSource::Single,
                &order,
                ack.processing_id.as_str(),
            ));
            Ok(Json(order_response(ack)))
        }
        Err(violation) => {
            tracing::warn!(
                order_number = %order.order_number,
                reason = %violation,
                "Order rejected"
            );
            state.telemetry.capture(TelemetryEvent::rejected(
                OrderSource::Single,
                &order,
                violation.to_string(),
            ));
            Err(violation.into())
        }
    }
}

/// POST /api/walmart/orders/batch
async fn receive_batch(
    State(state): State<ServerState>,
    payload: Result<Json<BatchOrdersRequest>, JsonRejection>,
) -> AppResult<Json<BatchOrdersResponse>> {
    let Json(request) = payload.map_err(|e| malformed(&state, OrderSource::Batch, e))?;

    if request.orders.is_empty() {
        return Err(AppError::new(ErrorCode::BatchEmpty));
    }

    let summary = state.batch.process_batch(&request.orders);

    for (order, result) in request.orders.iter().zip(&summary.results) {
        let event = match (&result.processing_id, &result.error) {
            (Some(processing_id), _) if result.success => {
                TelemetryEvent::accepted(OrderSource::Batch, order, processing_id.as_str())
            }
            (_, error) => TelemetryEvent::rejected(
                OrderSource::Batch,
                order,
                error.clone().unwrap_or_default(),
            ),
        };
        state.telemetry.capture(event);
    }

    Ok(Json(summary))
}

fn order_response(ack: Acknowledgement) -> OrderResponse {
    OrderResponse {
        status: "success".into(),
        message: Some("Order received successfully".into()),
        order_id: ack.order_number,
        processing_id: ack.processing_id,
        item_count: ack.item_count,
        total_amount: ack.total_amount,
        timestamp: ack.received_at,
    }
}

/// Body could not be decoded into the expected shape
fn malformed(state: &ServerState, source: OrderSource, rejection: JsonRejection) -> AppError {
    let detail = rejection.body_text();
    tracing::warn!(source = source.tag(), error = %detail, "Malformed order payload");
    state.telemetry.capture(TelemetryEvent::MalformedPayload {
        source,
        error: detail.clone(),
    });
    AppError::invalid_format(detail)
}
