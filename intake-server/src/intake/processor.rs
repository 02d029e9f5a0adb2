//! Single-order processing
//!
//! Validates an order, derives its processing id and item count, and counts
//! it in the [`SyncTracker`]. The tracker is touched exactly once per accepted
//! order and never for a rejected one.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use shared::models::Order;

use super::tracker::SyncTracker;
use super::validator::{self, ValidationMode, Violation};

/// Normalized acknowledgement of an accepted order
#[derive(Debug, Clone, PartialEq)]
pub struct Acknowledgement {
    pub order_number: String,
    pub processing_id: String,
    pub item_count: usize,
    /// Echoed from the order as submitted
    pub total_amount: Option<Decimal>,
    pub received_at: DateTime<Utc>,
}

/// Either an acknowledgement or the first rule the order broke
pub type ProcessingOutcome = Result<Acknowledgement, Violation>;

/// Processing id for an order received at `at`
///
/// Second granularity: the same order number submitted twice within one
/// second yields the same id. Ids are correlation tokens, not keys, and are
/// not deduplicated.
pub fn processing_id(order_number: &str, at: DateTime<Utc>) -> String {
    format!("proc_{}_{}", order_number, at.timestamp())
}

#[derive(Debug, Clone)]
pub struct OrderProcessor {
    tracker: SyncTracker,
}

impl OrderProcessor {
    pub fn new(tracker: SyncTracker) -> Self {
        Self { tracker }
    }

    pub fn tracker(&self) -> &SyncTracker {
        &self.tracker
    }

    /// Process a single submission under strict validation
    pub fn process(&self, order: &Order) -> ProcessingOutcome {
        self.process_with(order, ValidationMode::Strict)
    }

    /// Process an order under the given validation mode
    pub fn process_with(&self, order: &Order, mode: ValidationMode) -> ProcessingOutcome {
        validator::validate(order, mode)?;

        let now = self.tracker.now();
        let received_at = now.with_timezone(&Utc);
        let ack = Acknowledgement {
            order_number: order.order_number.clone(),
            processing_id: processing_id(&order.order_number, received_at),
            item_count: order.item_count(),
            total_amount: order.order_total,
            received_at,
        };

        self.tracker.record_success_at(now);
        Ok(ack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::clock::ManualClock;
    use rust_decimal_macros::dec;
    use shared::models::OrderItem;
    use std::sync::Arc;

    fn milk() -> OrderItem {
        OrderItem {
            name: "Great Value Milk".into(),
            price: dec!(3.99),
            quantity: 1,
            product_url: None,
            category: None,
        }
    }

    fn fixed_processor() -> OrderProcessor {
        let start = DateTime::parse_from_rfc3339("2024-01-15T10:00:00+00:00").unwrap();
        let clock = Arc::new(ManualClock::new(start));
        OrderProcessor::new(SyncTracker::with_clock(clock))
    }

    #[test]
    fn test_processing_id_format() {
        let at = DateTime::parse_from_rfc3339("2024-01-15T10:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(processing_id("123456789", at), "proc_123456789_1705312800");
    }

    #[test]
    fn test_strict_order_is_acknowledged() {
        let processor = fixed_processor();
        let order = Order {
            order_number: "123456789".into(),
            order_date: "2024-01-15".into(),
            order_total: Some(dec!(150.00)),
            items: Some(vec![milk()]),
            ..Default::default()
        };

        let ack = processor.process(&order).unwrap();
        assert_eq!(ack.order_number, "123456789");
        assert_eq!(ack.item_count, 1);
        assert_eq!(ack.total_amount, Some(dec!(150.00)));
        assert_eq!(ack.processing_id, "proc_123456789_1705312800");

        let snapshot = processor.tracker().snapshot();
        assert_eq!(snapshot.orders_processed_total, 1);
        assert_eq!(snapshot.last_sync_timestamp, Some(ack.received_at));
    }

    #[test]
    fn test_rejected_order_leaves_tracker_untouched() {
        let processor = fixed_processor();
        let order = Order {
            order_number: "123456789".into(),
            order_date: "2024-01-15".into(),
            order_total: Some(dec!(-50.00)),
            items: Some(vec![milk()]),
            ..Default::default()
        };

        assert_eq!(processor.process(&order), Err(Violation::NonPositiveTotal));
        let snapshot = processor.tracker().snapshot();
        assert_eq!(snapshot.orders_processed_total, 0);
        assert!(snapshot.last_sync_timestamp.is_none());
    }

    #[test]
    fn test_lenient_mode_accepts_bare_order() {
        let processor = fixed_processor();
        let order = Order {
            order_number: "456".into(),
            order_date: "2024-01-16".into(),
            ..Default::default()
        };

        assert_eq!(processor.process(&order), Err(Violation::NonPositiveTotal));

        let ack = processor
            .process_with(&order, ValidationMode::Lenient)
            .unwrap();
        assert_eq!(ack.item_count, 0);
        assert!(ack.total_amount.is_none());
        assert_eq!(processor.tracker().snapshot().orders_processed_total, 1);
    }
}
