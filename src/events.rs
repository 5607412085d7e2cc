//! Typed pub/sub for order lifecycle events.
//!
//! One `OrderEvents` registry lives in `AppState`. Every live WebSocket
//! connection registers a subscription on connect and drops it on disconnect.
//! Fan-out is scoped: operators see everything, a customer only sees updates
//! for orders they own. Delivery is fire-and-forget over unbounded mpsc
//! channels, so a slow or dead subscriber never blocks a publish.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use mongodb::bson::oid::ObjectId;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::models::Order;

pub const EVENT_NEW_ORDER: &str = "new-order";
pub const EVENT_ORDER_STATUS_UPDATED: &str = "order-status-updated";

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum OrderEvent {
    #[serde(rename = "new-order")]
    NewOrder(Order),
    #[serde(rename = "order-status-updated")]
    StatusUpdated(Order),
}

impl OrderEvent {
    pub fn name(&self) -> &'static str {
        match self {
            OrderEvent::NewOrder(_) => EVENT_NEW_ORDER,
            OrderEvent::StatusUpdated(_) => EVENT_ORDER_STATUS_UPDATED,
        }
    }
}

/// Opaque handle to one live connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriberRole {
    Operator,
    // owning customer id; scoped to their own orders
    Customer(ObjectId),
}

#[derive(Default)]
struct Registry {
    operators: HashMap<u64, mpsc::UnboundedSender<OrderEvent>>,
    // customer id -> that customer's live connections (they may have several tabs)
    customers: HashMap<ObjectId, HashMap<u64, mpsc::UnboundedSender<OrderEvent>>>,
}

/// Connection registry plus scoped fan-out.
///
/// Publishes for a given order are serialized under the registry lock and
/// each subscriber channel is FIFO, so any one subscriber observes status
/// updates for one order in publish order.
pub struct OrderEvents {
    next_id: AtomicU64,
    registry: Mutex<Registry>,
}

impl OrderEvents {
    pub fn new() -> Self {
        OrderEvents {
            next_id: AtomicU64::new(1),
            registry: Mutex::new(Registry::default()),
        }
    }

    /// Register a live connection. Must happen before the subscriber fetches
    /// its snapshot, otherwise an update can slip between fetch and subscribe.
    pub fn subscribe(&self, role: SubscriberRole) -> (ConnectionId, mpsc::UnboundedReceiver<OrderEvent>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (tx, rx) = mpsc::unbounded_channel();

        let mut reg = self.registry.lock().unwrap();
        match role {
            SubscriberRole::Operator => {
                reg.operators.insert(id, tx);
            }
            SubscriberRole::Customer(owner) => {
                reg.customers.entry(owner).or_default().insert(id, tx);
            }
        }

        (ConnectionId(id), rx)
    }

    pub fn unsubscribe(&self, conn: ConnectionId) {
        let mut reg = self.registry.lock().unwrap();
        if reg.operators.remove(&conn.0).is_some() {
            return;
        }
        let mut empty_owner = None;
        for (owner, conns) in reg.customers.iter_mut() {
            if conns.remove(&conn.0).is_some() {
                if conns.is_empty() {
                    empty_owner = Some(*owner);
                }
                break;
            }
        }
        if let Some(owner) = empty_owner {
            reg.customers.remove(&owner);
        }
    }

    /// New orders are an operator-console concern only.
    pub fn publish_new_order(&self, order: &Order) {
        let reg = self.registry.lock().unwrap();
        for tx in reg.operators.values() {
            let _ = tx.send(OrderEvent::NewOrder(order.clone()));
        }
    }

    /// Delivered to every operator and to the owning customer's connections.
    /// Unrelated customers never see it. Guest orders have no owner to scope
    /// to, so only operators are notified.
    pub fn publish_status_updated(&self, order: &Order) {
        let reg = self.registry.lock().unwrap();
        for tx in reg.operators.values() {
            let _ = tx.send(OrderEvent::StatusUpdated(order.clone()));
        }
        if let Some(owner) = order.user_id {
            if let Some(conns) = reg.customers.get(&owner) {
                for tx in conns.values() {
                    let _ = tx.send(OrderEvent::StatusUpdated(order.clone()));
                }
            }
        }
    }

    pub fn operator_count(&self) -> usize {
        self.registry.lock().unwrap().operators.len()
    }
}

impl Default for OrderEvents {
    fn default() -> Self {
        Self::new()
    }
}
