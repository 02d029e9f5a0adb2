//! Batch aggregation
//!
//! Runs every order of a batch through the [`OrderProcessor`] under lenient
//! validation, one after another in submission order, and summarizes the
//! outcomes. A failed order never aborts its siblings, and orders already
//! counted stay counted when a later one fails.

use chrono::Utc;
use shared::models::{BatchOrderResult, BatchOrdersResponse, Order};

use super::processor::OrderProcessor;
use super::validator::ValidationMode;

#[derive(Debug, Clone)]
pub struct BatchAggregator {
    processor: OrderProcessor,
}

impl BatchAggregator {
    pub fn new(processor: OrderProcessor) -> Self {
        Self { processor }
    }

    /// Process a non-empty batch
    ///
    /// Empty batches are rejected at the request boundary before reaching
    /// here.
    pub fn process_batch(&self, orders: &[Order]) -> BatchOrdersResponse {
        debug_assert!(!orders.is_empty(), "empty batch reached the aggregator");

        let mut results = Vec::with_capacity(orders.len());
        let mut processed_count = 0;
        let mut failed_count = 0;

        for order in orders {
            match self.processor.process_with(order, ValidationMode::Lenient) {
                Ok(ack) => {
                    processed_count += 1;
                    results.push(BatchOrderResult::accepted(
                        ack.order_number,
                        ack.processing_id,
                    ));
                }
                Err(violation) => {
                    failed_count += 1;
                    results.push(BatchOrderResult::rejected(
                        order.order_number.clone(),
                        violation.to_string(),
                    ));
                }
            }
        }

        tracing::info!(
            processed = processed_count,
            failed = failed_count,
            total = orders.len(),
            "Batch processed"
        );

        BatchOrdersResponse {
            success: batch_succeeded(processed_count, failed_count),
            processed_count,
            failed_count,
            results,
            timestamp: Utc::now(),
        }
    }
}

/// A batch fails outright only when nothing in it was accepted
fn batch_succeeded(processed_count: usize, failed_count: usize) -> bool {
    processed_count > 0 || failed_count == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intake::tracker::SyncTracker;
    use rust_decimal_macros::dec;
    use shared::models::OrderItem;

    fn aggregator() -> (BatchAggregator, SyncTracker) {
        let tracker = SyncTracker::new();
        let aggregator = BatchAggregator::new(OrderProcessor::new(tracker.clone()));
        (aggregator, tracker)
    }

    fn order(number: &str, date: &str) -> Order {
        Order {
            order_number: number.into(),
            order_date: date.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_all_valid_batch() {
        let (aggregator, tracker) = aggregator();
        let mut first = order("123", "2024-01-15");
        first.order_total = Some(dec!(50.00));
        first.items = Some(vec![OrderItem {
            name: "Item 1".into(),
            price: dec!(25.00),
            quantity: 2,
            product_url: None,
            category: None,
        }]);
        let mut second = order("456", "2024-01-16");
        second.order_total = Some(dec!(75.50));

        let summary = aggregator.process_batch(&[first, second]);
        assert!(summary.success);
        assert_eq!(summary.processed_count, 2);
        assert_eq!(summary.failed_count, 0);
        assert_eq!(summary.results.len(), 2);
        assert_eq!(summary.results[0].order_number, "123");
        assert!(summary.results[0].processing_id.as_deref().unwrap().starts_with("proc_123_"));
        assert!(summary.results[0].error.is_none());
        assert_eq!(summary.results[1].order_number, "456");
        assert!(summary.results[1].success);

        assert_eq!(tracker.snapshot().orders_processed_total, 2);
    }

    #[test]
    fn test_partial_failure_keeps_order_and_counts() {
        let (aggregator, tracker) = aggregator();

        let mut a = order("123", "2024-01-15");
        a.order_total = Some(dec!(50.00));
        let b = order("456", "");
        let mut c = order("789", "2024-01-17");
        c.items = Some(vec![OrderItem {
            name: "Invalid Item".into(),
            price: dec!(-10.00),
            quantity: 1,
            product_url: None,
            category: None,
        }]);

        let summary = aggregator.process_batch(&[a, b, c]);
        assert!(summary.success);
        assert_eq!(summary.processed_count, 1);
        assert_eq!(summary.failed_count, 2);

        let numbers: Vec<_> = summary.results.iter().map(|r| r.order_number.as_str()).collect();
        assert_eq!(numbers, ["123", "456", "789"]);

        assert!(summary.results[0].success);
        assert!(summary.results[0].error.is_none());
        assert!(!summary.results[1].success);
        assert_eq!(summary.results[1].error.as_deref(), Some("missing order date"));
        assert!(summary.results[1].processing_id.is_none());
        assert!(!summary.results[2].success);
        assert!(summary.results[2].error.as_deref().unwrap().contains("price"));

        assert_eq!(tracker.snapshot().orders_processed_total, 1);
    }

    #[test]
    fn test_all_failed_batch_is_failure() {
        let (aggregator, tracker) = aggregator();
        let summary = aggregator.process_batch(&[order("", "2024-01-15"), order("2", "")]);
        assert!(!summary.success);
        assert_eq!(summary.processed_count, 0);
        assert_eq!(summary.failed_count, 2);
        assert_eq!(summary.results[0].error.as_deref(), Some("missing order number"));
        assert_eq!(tracker.snapshot().orders_processed_total, 0);
    }

    #[test]
    fn test_earlier_successes_survive_later_failures() {
        let (aggregator, tracker) = aggregator();
        let summary = aggregator.process_batch(&[
            order("1", "2024-01-15"),
            order("2", "2024-01-15"),
            order("3", ""),
        ]);
        assert_eq!(summary.processed_count, 2);
        assert_eq!(tracker.snapshot().orders_processed_total, 2);
        assert_eq!(tracker.snapshot().orders_processed_today, 2);
    }

    #[test]
    fn test_counts_always_cover_every_order() {
        let (aggregator, _) = aggregator();
        let orders: Vec<Order> = (0..25)
            .map(|i| {
                if i % 3 == 0 {
                    order(&i.to_string(), "")
                } else {
                    order(&i.to_string(), "2024-02-01")
                }
            })
            .collect();

        let summary = aggregator.process_batch(&orders);
        assert_eq!(summary.processed_count + summary.failed_count, orders.len());
        assert_eq!(summary.failed_count, 9);
        for (result, order) in summary.results.iter().zip(&orders) {
            assert_eq!(result.order_number, order.order_number);
        }
    }

    #[test]
    fn test_batch_success_rule() {
        assert!(batch_succeeded(1, 0));
        assert!(batch_succeeded(1, 5));
        assert!(batch_succeeded(0, 0));
        assert!(!batch_succeeded(0, 1));
    }
}
