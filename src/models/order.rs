use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use super::status::OrderStatus;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    pub price: f64,
    pub qty: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    // None for guest checkout; never changes after creation
    #[serde(default)]
    pub user_id: Option<ObjectId>,
    pub items: Vec<OrderItem>,
    pub total_price: f64,
    pub status: OrderStatus,
    pub created_at: i64,
    pub updated_at: i64,
}
