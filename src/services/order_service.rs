use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument};

use crate::{
    models::{CurrentUser, Order, OrderItem, OrderStatus},
    AppState,
};

#[derive(Debug, Clone, PartialEq)]
pub enum OrderError {
    NotFound,
    Forbidden,
    // requested status is not the immediate successor of `from`;
    // the caller should refetch and recompute, never blindly retry
    IllegalTransition {
        from: OrderStatus,
        requested: OrderStatus,
    },
    // an order must carry at least one line item
    NoItems,
    // transient store failure; no partial state change, safe to retry
    Store(String),
}

impl std::fmt::Display for OrderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderError::NotFound => write!(f, "order not found"),
            OrderError::Forbidden => write!(f, "operator authority required"),
            OrderError::IllegalTransition { from, requested } => {
                write!(f, "illegal transition: {from} -> {requested}")
            }
            OrderError::NoItems => write!(f, "no order items"),
            OrderError::Store(e) => write!(f, "store unavailable: {e}"),
        }
    }
}

fn orders(state: &AppState) -> mongodb::Collection<Order> {
    state.db.collection::<Order>("orders")
}

/// The transition guard: only the immediate successor is legal. Pure, so the
/// rejection cases are testable without a store.
pub fn check_transition(current: OrderStatus, requested: OrderStatus) -> Result<(), OrderError> {
    if current.can_transition_to(requested) {
        return Ok(());
    }
    Err(OrderError::IllegalTransition {
        from: current,
        requested,
    })
}

/// The authoritative mutation path. Authority first (no store access for a
/// non-operator), then existence, then transition legality, then one atomic
/// single-field update returning the post-update record, then broadcast.
pub async fn update_status(
    state: &AppState,
    order_id: ObjectId,
    requested: OrderStatus,
    actor: &CurrentUser,
) -> Result<Order, OrderError> {
    if !actor.is_admin {
        tracing::warn!(
            actor = %actor.id,
            order = %order_id,
            "non-operator attempted status mutation"
        );
        return Err(OrderError::Forbidden);
    }

    let col = orders(state);

    let order = col
        .find_one(doc! { "_id": order_id }, None)
        .await
        .map_err(|e| OrderError::Store(e.to_string()))?
        .ok_or(OrderError::NotFound)?;

    check_transition(order.status, requested)?;

    let now = Utc::now().timestamp();
    let opts = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let updated = col
        .find_one_and_update(
            doc! { "_id": order_id },
            doc! { "$set": { "status": requested.as_str(), "updated_at": now } },
            opts,
        )
        .await
        .map_err(|e| {
            tracing::error!(order = %order_id, "status update failed: {e}");
            OrderError::Store(e.to_string())
        })?
        .ok_or(OrderError::NotFound)?;

    tracing::info!(order = %order_id, status = %updated.status, "order status updated");

    // ack goes back to the caller; everyone else hears about it here
    state.events.publish_status_updated(&updated);

    Ok(updated)
}

pub struct NewOrderItem {
    pub product_id: ObjectId,
    pub name: String,
    pub image: Option<String>,
    pub price: f64,
    pub qty: i64,
}

/// Checkout entry point. Orders always start at `pending`; the total is
/// computed server-side from the priced line items.
pub async fn create_order(
    state: &AppState,
    items: Vec<NewOrderItem>,
    actor: Option<&CurrentUser>,
) -> Result<Order, OrderError> {
    if items.is_empty() {
        return Err(OrderError::NoItems);
    }

    let now = Utc::now().timestamp();
    let items: Vec<OrderItem> = items
        .into_iter()
        .map(|i| OrderItem {
            product_id: i.product_id,
            name: i.name,
            image: i.image,
            price: i.price,
            qty: i.qty,
        })
        .collect();

    let total_price = items.iter().map(|i| i.price * i.qty as f64).sum();

    let order = Order {
        id: ObjectId::new(),
        user_id: actor.map(|u| u.id),
        items,
        total_price,
        status: OrderStatus::Pending,
        created_at: now,
        updated_at: now,
    };

    orders(state)
        .insert_one(&order, None)
        .await
        .map_err(|e| OrderError::Store(e.to_string()))?;

    tracing::info!(order = %order.id, total = order.total_price, "order created");

    state.events.publish_new_order(&order);

    Ok(order)
}

async fn find_sorted(
    state: &AppState,
    filter: mongodb::bson::Document,
) -> Result<Vec<Order>, OrderError> {
    let opts = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

    let cursor = orders(state)
        .find(filter, opts)
        .await
        .map_err(|e| OrderError::Store(e.to_string()))?;

    cursor
        .try_collect()
        .await
        .map_err(|e| OrderError::Store(e.to_string()))
}

/// Operator snapshot: every order, newest first.
pub async fn list_all(state: &AppState) -> Result<Vec<Order>, OrderError> {
    find_sorted(state, doc! {}).await
}

/// Customer snapshot: only orders owned by `user_id`, newest first.
pub async fn list_for_user(state: &AppState, user_id: ObjectId) -> Result<Vec<Order>, OrderError> {
    find_sorted(state, doc! { "user_id": user_id }).await
}

pub async fn get_order(state: &AppState, order_id: ObjectId) -> Result<Order, OrderError> {
    orders(state)
        .find_one(doc! { "_id": order_id }, None)
        .await
        .map_err(|e| OrderError::Store(e.to_string()))?
        .ok_or(OrderError::NotFound)
}
