use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use crate::lifecycle::OrderStatus;

use super::ContactCard;

/// A buyer's order for a single product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub buyer_id: String,
    pub seller_id: String,
    pub product_id: String,
    pub total_amount: f64,
    pub delivery_address: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new order. Orders always start `pending`.
#[derive(Debug, Clone)]
pub struct OrderCreate {
    pub buyer_id: String,
    pub seller_id: String,
    pub product_id: String,
    pub total_amount: f64,
    pub delivery_address: String,
}

/// An order joined with its product and the other party's contact card.
///
/// On the seller dashboard `counterpart` is the buyer; in a buyer's order
/// history it is the seller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub product_title: Option<String>,
    pub product_price: Option<f64>,
    pub counterpart: Option<ContactCard>,
}
