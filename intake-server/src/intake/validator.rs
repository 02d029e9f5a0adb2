//! Order validation
//!
//! One rule set, two strictness levels. The single-order endpoint runs
//! [`ValidationMode::Strict`]; batch submissions run [`ValidationMode::Lenient`]
//! because historical orders scraped in bulk often lack totals or items.
//!
//! Rules are evaluated in a fixed order and the first failure wins:
//!
//! | # | Rule | Mode |
//! |---|------|------|
//! | 1 | order number non-empty | both |
//! | 2 | order date non-empty | both |
//! | 3 | order total present and > 0 | strict |
//! | 4 | at least one item | strict |
//! | 5 | per item: price >= 0, then quantity > 0 | both |

use rust_decimal::Decimal;
use shared::error::{AppError, ErrorCode};
use shared::models::Order;
use thiserror::Error;

/// Which rule set to apply
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Single-order submissions: total and items are required
    Strict,
    /// Batch submissions: total and items are optional
    Lenient,
}

/// First rule an order broke
///
/// Item indices are 1-based, matching what the extension shows the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Violation {
    #[error("missing order number")]
    MissingOrderNumber,

    #[error("missing order date")]
    MissingOrderDate,

    #[error("invalid order total: must be positive")]
    NonPositiveTotal,

    #[error("order must contain at least one item")]
    NoItems,

    #[error("invalid price for item {index}: must be non-negative")]
    NegativeItemPrice { index: usize },

    #[error("invalid quantity for item {index}: must be positive")]
    NonPositiveQuantity { index: usize },
}

impl Violation {
    /// Error code reported when this violation rejects a whole request
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::MissingOrderNumber => ErrorCode::OrderNumberMissing,
            Self::MissingOrderDate => ErrorCode::OrderDateMissing,
            Self::NonPositiveTotal => ErrorCode::OrderTotalInvalid,
            Self::NoItems => ErrorCode::OrderEmpty,
            Self::NegativeItemPrice { .. } => ErrorCode::ItemPriceInvalid,
            Self::NonPositiveQuantity { .. } => ErrorCode::ItemQuantityInvalid,
        }
    }

    /// 1-based index of the offending item, if the violation is item-level
    pub fn item_index(&self) -> Option<usize> {
        match self {
            Self::NegativeItemPrice { index } | Self::NonPositiveQuantity { index } => Some(*index),
            _ => None,
        }
    }
}

impl From<Violation> for AppError {
    fn from(violation: Violation) -> Self {
        let err = AppError::with_message(violation.code(), violation.to_string());
        match violation.item_index() {
            Some(index) => err.with_detail("item_index", index),
            None => err,
        }
    }
}

/// Check an order against the rules of `mode`
pub fn validate(order: &Order, mode: ValidationMode) -> Result<(), Violation> {
    if order.order_number.is_empty() {
        return Err(Violation::MissingOrderNumber);
    }
    if order.order_date.is_empty() {
        return Err(Violation::MissingOrderDate);
    }

    if mode == ValidationMode::Strict {
        match order.order_total {
            Some(total) if total > Decimal::ZERO => {}
            _ => return Err(Violation::NonPositiveTotal),
        }
        if order.items().is_empty() {
            return Err(Violation::NoItems);
        }
    }

    for (i, item) in order.items().iter().enumerate() {
        let index = i + 1;
        if item.price < Decimal::ZERO {
            return Err(Violation::NegativeItemPrice { index });
        }
        if item.quantity <= 0 {
            return Err(Violation::NonPositiveQuantity { index });
        }
    }

    Ok(())
}
