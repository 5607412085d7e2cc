use serde::{Deserialize, Serialize};

/// Fulfillment lifecycle of an order. Moves only forward, one step at a time.
///
/// Derives `Ord` so the sequence position can be compared — the client-side
/// merge logic relies on it to refuse stale records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Packed,
    Shipped,
    Delivered,
}

impl OrderStatus {
    /// The single legal successor, or `None` once delivered.
    pub fn next(self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Approved),
            OrderStatus::Approved => Some(OrderStatus::Packed),
            OrderStatus::Packed => Some(OrderStatus::Shipped),
            OrderStatus::Shipped => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// True iff `requested` is the immediate successor of `self`.
    /// No no-ops, no backward moves, no skipping a step.
    pub fn can_transition_to(self, requested: OrderStatus) -> bool {
        self.next() == Some(requested)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
