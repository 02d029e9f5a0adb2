//! Order Model
//!
//! Orders as captured by the browser extension from the retailer's
//! order-history pages. Field names follow the extension's camelCase JSON.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Line item within an order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub name: String,
    /// Unit price in currency unit
    #[serde(default, with = "crate::models::amount::required")]
    pub price: Decimal,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Order submitted by the extension
///
/// `order_number` and `order_date` decode as empty strings when absent so that
/// a missing key is reported by validation for that order instead of failing
/// the whole request body.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(default)]
    pub order_number: String,
    /// Caller-supplied date string, not parsed
    #[serde(default)]
    pub order_date: String,
    #[serde(
        default,
        with = "crate::models::amount::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub order_total: Option<Decimal>,
    #[serde(
        default,
        with = "crate::models::amount::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub tax: Option<Decimal>,
    #[serde(
        default,
        with = "crate::models::amount::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub delivery_charges: Option<Decimal>,
    #[serde(
        default,
        with = "crate::models::amount::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub tip: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<OrderItem>>,
}

impl Order {
    /// Line items, empty when the extension sent none
    pub fn items(&self) -> &[OrderItem] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Number of line items (0 when absent)
    pub fn item_count(&self) -> usize {
        self.items().len()
    }
}

/// Acknowledgement for a single accepted order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    /// Always `"success"`
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub order_id: String,
    pub processing_id: String,
    pub item_count: usize,
    #[serde(
        default,
        with = "crate::models::amount::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub total_amount: Option<Decimal>,
    pub timestamp: DateTime<Utc>,
}

/// Batch submission body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchOrdersRequest {
    pub orders: Vec<Order>,
}

/// Per-order outcome inside a batch response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrderResult {
    pub order_number: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchOrderResult {
    pub fn accepted(order_number: impl Into<String>, processing_id: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            success: true,
            processing_id: Some(processing_id.into()),
            error: None,
        }
    }

    pub fn rejected(order_number: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            order_number: order_number.into(),
            success: false,
            processing_id: None,
            error: Some(reason.into()),
        }
    }
}

/// Batch summary returned for every non-empty batch
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchOrdersResponse {
    pub success: bool,
    pub processed_count: usize,
    pub failed_count: usize,
    /// One entry per submitted order, in submission order
    pub results: Vec<BatchOrderResult>,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_order_deserialize_all_fields() {
        let json = r#"{
            "orderNumber": "123456",
            "orderDate": "2024-01-15",
            "orderTotal": 150.50,
            "tax": 12.50,
            "deliveryCharges": 5.99,
            "tip": 10.00,
            "items": [
                {
                    "name": "Great Value Milk",
                    "price": 3.99,
                    "quantity": 2,
                    "productUrl": "https://walmart.com/product/123",
                    "category": "Groceries"
                }
            ]
        }"#;

        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.order_number, "123456");
        assert_eq!(order.order_date, "2024-01-15");
        assert_eq!(order.order_total, Some(dec!(150.50)));
        assert_eq!(order.tax, Some(dec!(12.50)));
        assert_eq!(order.delivery_charges, Some(dec!(5.99)));
        assert_eq!(order.tip, Some(dec!(10)));
        assert_eq!(order.item_count(), 1);

        let item = &order.items()[0];
        assert_eq!(item.name, "Great Value Milk");
        assert_eq!(item.price, dec!(3.99));
        assert_eq!(item.quantity, 2);
        assert_eq!(
            item.product_url.as_deref(),
            Some("https://walmart.com/product/123")
        );
        assert_eq!(item.category.as_deref(), Some("Groceries"));
    }

    #[test]
    fn test_order_deserialize_minimal() {
        let order: Order =
            serde_json::from_str(r#"{"orderNumber":"123456","orderDate":"2024-01-15"}"#).unwrap();
        assert_eq!(order.order_number, "123456");
        assert!(order.order_total.is_none());
        assert!(order.tax.is_none());
        assert!(order.delivery_charges.is_none());
        assert!(order.tip.is_none());
        assert!(order.items.is_none());
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn test_missing_required_keys_decode_as_empty() {
        let order: Order = serde_json::from_str(r#"{"orderNumber":"456"}"#).unwrap();
        assert_eq!(order.order_number, "456");
        assert!(order.order_date.is_empty());
    }

    #[test]
    fn test_out_of_range_amounts_decode_per_order() {
        let batch: BatchOrdersRequest = serde_json::from_str(
            r#"{"orders":[
                {"orderNumber":"1","orderDate":"2024-01-15","orderTotal":25.5},
                {"orderNumber":"2","orderDate":"2024-01-15","orderTotal":1e30},
                {"orderNumber":"3","orderDate":"2024-01-15","items":[{"price":-1e30,"quantity":1}]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(batch.orders.len(), 3);
        assert_eq!(batch.orders[0].order_total, Some(dec!(25.5)));
        assert_eq!(batch.orders[1].order_total, Some(Decimal::MAX));
        assert_eq!(batch.orders[2].items()[0].price, Decimal::MIN);
    }

    #[test]
    fn test_order_serialize_omits_absent_fields() {
        let order = Order {
            order_number: "1".into(),
            order_date: "2024-01-15".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["orderNumber"], "1");
        assert!(json.get("orderTotal").is_none());
        assert!(json.get("items").is_none());
    }

    #[test]
    fn test_batch_result_serialization() {
        let ok = serde_json::to_value(BatchOrderResult::accepted("123", "proc_123_1")).unwrap();
        assert_eq!(ok["orderNumber"], "123");
        assert_eq!(ok["success"], true);
        assert_eq!(ok["processingId"], "proc_123_1");
        assert!(ok.get("error").is_none());

        let failed =
            serde_json::to_value(BatchOrderResult::rejected("456", "missing order date")).unwrap();
        assert_eq!(failed["success"], false);
        assert_eq!(failed["error"], "missing order date");
        assert!(failed.get("processingId").is_none());
    }

    #[test]
    fn test_batch_request_requires_orders_key() {
        assert!(serde_json::from_str::<BatchOrdersRequest>("{}").is_err());
        let empty: BatchOrdersRequest = serde_json::from_str(r#"{"orders":[]}"#).unwrap();
        assert!(empty.orders.is_empty());
    }

    #[test]
    fn test_order_response_amount_is_numeric() {
        let response = OrderResponse {
            status: "success".into(),
            message: Some("Order received successfully".into()),
            order_id: "123456789".into(),
            processing_id: "proc_123456789_1700000000".into(),
            item_count: 1,
            total_amount: Some(dec!(150.00)),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["totalAmount"], 150.0);
        assert_eq!(json["orderId"], "123456789");
        assert_eq!(json["itemCount"], 1);
    }
}
