use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// Lifecycle of a purchase. Transitions only ever move forward:
/// `new` fans out to `completed`, `not_valid` or `canceled`, and only
/// `completed` orders can be `returned`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    New,
    Completed,
    NotValid,
    Canceled,
    Returned,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::New => "new",
            OrderStatus::Completed => "completed",
            OrderStatus::NotValid => "not_valid",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Returned => "returned",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "new" => Some(OrderStatus::New),
            "completed" => Some(OrderStatus::Completed),
            "not_valid" => Some(OrderStatus::NotValid),
            "canceled" => Some(OrderStatus::Canceled),
            "returned" => Some(OrderStatus::Returned),
            _ => None,
        }
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::New, OrderStatus::Completed)
                | (OrderStatus::New, OrderStatus::NotValid)
                | (OrderStatus::New, OrderStatus::Canceled)
                | (OrderStatus::Completed, OrderStatus::Returned)
        )
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
