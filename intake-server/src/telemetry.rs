//! Order telemetry
//!
//! Structured events about accepted, rejected and undecodable submissions,
//! handed to a [`TelemetrySink`]. Capturing is fire-and-forget: sinks cannot
//! report failure and nothing they do changes a request's outcome. Request
//! headers and raw bodies are never part of an event.

use rust_decimal::Decimal;
use shared::models::Order;

/// Which endpoint an order arrived through
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderSource {
    Single,
    Batch,
}

impl OrderSource {
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Single => "walmart",
            Self::Batch => "walmart.batch",
        }
    }
}

/// Order fields attached to every order-level event
#[derive(Debug, Clone, PartialEq)]
pub struct OrderContext {
    pub source: OrderSource,
    pub order_number: String,
    pub item_count: usize,
    pub processing_id: Option<String>,
    pub total: Option<Decimal>,
    pub tax: Option<Decimal>,
    pub delivery_charges: Option<Decimal>,
    pub tip: Option<Decimal>,
}

impl OrderContext {
    pub fn new(source: OrderSource, order: &Order) -> Self {
        Self {
            source,
            order_number: order.order_number.clone(),
            item_count: order.item_count(),
            processing_id: None,
            total: order.order_total,
            tax: order.tax,
            delivery_charges: order.delivery_charges,
            tip: order.tip,
        }
    }

    pub fn with_processing_id(mut self, processing_id: impl Into<String>) -> Self {
        self.processing_id = Some(processing_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TelemetryEvent {
    OrderAccepted(OrderContext),
    OrderRejected { context: OrderContext, reason: String },
    MalformedPayload { source: OrderSource, error: String },
}

impl TelemetryEvent {
    pub fn accepted(source: OrderSource, order: &Order, processing_id: impl Into<String>) -> Self {
        Self::OrderAccepted(OrderContext::new(source, order).with_processing_id(processing_id))
    }

    pub fn rejected(source: OrderSource, order: &Order, reason: impl Into<String>) -> Self {
        Self::OrderRejected {
            context: OrderContext::new(source, order),
            reason: reason.into(),
        }
    }
}

/// Destination for telemetry events
pub trait TelemetrySink: Send + Sync {
    fn capture(&self, event: TelemetryEvent);
}

/// Emits events as `tracing` records under the `telemetry` target
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingTelemetry;

impl TelemetrySink for TracingTelemetry {
    fn capture(&self, event: TelemetryEvent) {
        match event {
            TelemetryEvent::OrderAccepted(ctx) => {
                tracing::info!(
                    target: "telemetry",
                    source = ctx.source.tag(),
                    order_number = %ctx.order_number,
                    items_count = ctx.item_count,
                    processing_id = ?ctx.processing_id,
                    total = ?ctx.total,
                    tax = ?ctx.tax,
                    delivery_charges = ?ctx.delivery_charges,
                    tip = ?ctx.tip,
                    "Order received successfully"
                );
            }
            TelemetryEvent::OrderRejected { context: ctx, reason } => {
                tracing::warn!(
                    target: "telemetry",
                    source = ctx.source.tag(),
                    order_number = %ctx.order_number,
                    items_count = ctx.item_count,
                    total = ?ctx.total,
                    tax = ?ctx.tax,
                    delivery_charges = ?ctx.delivery_charges,
                    tip = ?ctx.tip,
                    reason = %reason,
                    "Order rejected by validation"
                );
            }
            TelemetryEvent::MalformedPayload { source, error } => {
                tracing::warn!(
                    target: "telemetry",
                    source = source.tag(),
                    error = %error,
                    "Invalid order JSON received"
                );
            }
        }
    }
}

/// Drops every event
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledTelemetry;

impl TelemetrySink for DisabledTelemetry {
    fn capture(&self, _event: TelemetryEvent) {}
}
