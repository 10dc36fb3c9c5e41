//! Order domain type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kitzz_core::{Email, OrderId, OrderStatus, Price, ProductId};

/// A completed sale of one product.
///
/// Orders are immutable sales records. They outlive the product they
/// reference, so `product_id` may point at a product that no longer exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub product_id: ProductId,
    pub buyer_email: Email,
    /// Amount charged.
    pub amount: Price,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}
