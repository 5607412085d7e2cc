//! Client-side reconciliation of the order list.
//!
//! A connected client sees the same order record arrive on up to three paths:
//! the initial snapshot fetch, the synchronous ack of its own mutation, and
//! the broadcast stream. `OrderList` merges all of them into one view by id,
//! with no duplicates and no regression to a status the client already moved
//! past. The merge is deliberately a pure function so it can be tested
//! without a store or a socket.

use mongodb::bson::oid::ObjectId;

use crate::models::Order;

/// Merge one incoming record into the locally held one.
///
/// The server only ever moves status forward, so under correct behavior
/// `incoming` matches or is ahead of `local`. A record that is *behind* is a
/// duplicate or out-of-order delivery and is ignored. Applying the same
/// record twice is therefore a no-op.
pub fn merge_order(local: &Order, incoming: Order) -> Order {
    if incoming.status < local.status {
        return local.clone();
    }
    incoming
}

/// Ordered view of orders, newest first, keyed by id.
#[derive(Debug, Default)]
pub struct OrderList {
    orders: Vec<Order>,
}

impl OrderList {
    pub fn new() -> Self {
        OrderList { orders: Vec::new() }
    }

    /// Snapshot fetch replaces everything. Fetched strictly after
    /// subscribing, it is at least as fresh as anything not yet seen on the
    /// broadcast stream, so it is the authoritative baseline.
    pub fn replace_all(&mut self, snapshot: Vec<Order>) {
        self.orders = snapshot;
        // defensive: a snapshot should never carry duplicate ids
        let mut seen = Vec::with_capacity(self.orders.len());
        self.orders.retain(|o| {
            if seen.contains(&o.id) {
                return false;
            }
            seen.push(o.id);
            true
        });
    }

    /// A "new order" event prepends (operator view is newest first). If the
    /// id is already known this degrades to a merge, so a raced snapshot and
    /// broadcast cannot duplicate an entry.
    pub fn apply_new_order(&mut self, order: Order) {
        if self.orders.iter().any(|o| o.id == order.id) {
            self.apply_update(order);
            return;
        }
        self.orders.insert(0, order);
    }

    /// A "status updated" event (or a mutation ack) upserts by id. Unknown
    /// ids are ignored: a customer can receive updates only for orders the
    /// snapshot already gave them.
    pub fn apply_update(&mut self, order: Order) {
        if let Some(local) = self.orders.iter_mut().find(|o| o.id == order.id) {
            *local = merge_order(local, order);
        }
    }

    pub fn get(&self, id: ObjectId) -> Option<&Order> {
        self.orders.iter().find(|o| o.id == id)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }
}
