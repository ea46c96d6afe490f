//! Group order model matching the frontend GroupOrder interface.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a group order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Open,
    Filling,
    Closed,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Filling => "filling",
            OrderStatus::Closed => "closed",
            OrderStatus::Completed => "completed",
        }
    }

    /// Case-insensitive parse of the wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "open" => Some(OrderStatus::Open),
            "filling" => Some(OrderStatus::Filling),
            "closed" => Some(OrderStatus::Closed),
            "completed" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

/// A bulk-purchase listing that multiple vendors join to reach a volume discount.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GroupOrder {
    pub id: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub organizer: String,
    pub organizer_rating: f64,
    pub current_participants: i64,
    pub max_participants: i64,
    /// Smallest quantity a single participant may contribute
    pub min_order: i64,
    pub current_total: i64,
    pub target_amount: i64,
    /// Discount percentage
    pub savings: i64,
    pub deadline: String,
    pub delivery_date: String,
    pub location: String,
    pub status: OrderStatus,
    pub image: String,
    pub products: Vec<String>,
    pub price_per_unit: f64,
    pub unit: String,
    /// Internal version for optimistic concurrency control
    #[serde(default)]
    pub version: i64,
}

impl GroupOrder {
    pub fn is_full(&self) -> bool {
        self.current_participants >= self.max_participants
    }
}

/// Query parameters for listing group orders.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupOrderQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
}

/// Filtered group orders with their count.
#[derive(Debug, Clone, Serialize)]
pub struct GroupOrderList {
    pub items: Vec<GroupOrder>,
    pub total: usize,
}

/// Request body for joining a group order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinGroupOrderRequest {
    #[serde(default)]
    pub quantity: Option<i64>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// Result of a successful join.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinOutcome {
    pub group_order: GroupOrder,
    pub participation: Participation,
}

/// Request body for creating a group order.
///
/// Every field is optional at the wire level so that a missing field reports
/// the workflow's own validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGroupOrderRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub target_quantity: Option<i64>,
    #[serde(default)]
    pub deadline: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub products: Option<Vec<String>>,
    #[serde(default)]
    pub price_per_unit: Option<f64>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// A vendor's recorded contribution to a group order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub group_order_id: String,
    pub user_email: String,
    pub quantity: i64,
    pub joined_at: String,
}
