//! Supplier directory model.

use serde::{Deserialize, Serialize};

/// A local supplier listed in the directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub location: String,
    /// Human-readable distance such as "2.3 km"
    pub distance: String,
    pub rating: f64,
    pub reviews: i64,
    pub delivery_time: String,
    /// Human-readable minimum order value such as "₹500"
    pub min_order: String,
    pub verified: bool,
    pub image: String,
    pub specialties: Vec<String>,
    pub contact: String,
    pub description: String,
    pub products: Vec<String>,
}

impl Supplier {
    /// Numeric prefix of the distance text, used for nearest-first sorting.
    pub fn distance_km(&self) -> Option<f64> {
        let numeric: String = self
            .distance
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        numeric.parse().ok()
    }
}

/// Query parameters for listing suppliers.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierQuery {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub search: Option<String>,
    #[serde(default)]
    pub sort_by: Option<String>,
}

/// Filtered suppliers with their count.
#[derive(Debug, Clone, Serialize)]
pub struct SupplierList {
    pub suppliers: Vec<Supplier>,
    pub total: usize,
}

/// Request body for contacting a supplier.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSupplierRequest {
    /// Accepts either a JSON number or a numeric string
    #[serde(default)]
    pub supplier_id: Option<serde_json::Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

/// A stored contact request addressed to a supplier.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierContact {
    pub id: String,
    pub supplier_id: i64,
    pub user_email: String,
    pub message: String,
    pub created_at: String,
}
