//! Query filters for the group order listing and the supplier directory.
//!
//! Filters operate on records already loaded in store order; no ranking is applied
//! beyond the explicit supplier sort keys.

use std::cmp::Ordering;

use crate::models::{GroupOrder, GroupOrderQuery, Supplier, SupplierQuery};

/// Sentinel the frontend sends for "no category/status restriction".
const ALL: &str = "all";

/// Normalize an optional query value: blank and `All` mean "no filter".
fn active_term(value: Option<&str>) -> Option<String> {
    let value = value?.trim();
    if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
        None
    } else {
        Some(value.to_lowercase())
    }
}

/// Compiled predicate over group orders.
#[derive(Debug, Clone, Default)]
pub struct GroupOrderFilter {
    category: Option<String>,
    status: Option<String>,
    search: Option<String>,
}

impl GroupOrderFilter {
    pub fn from_query(query: &GroupOrderQuery) -> Self {
        Self {
            category: active_term(query.category.as_deref()),
            status: active_term(query.status.as_deref()),
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
        }
    }

    pub fn matches(&self, order: &GroupOrder) -> bool {
        if let Some(category) = &self.category {
            if order.category.to_lowercase() != *category {
                return false;
            }
        }

        if let Some(status) = &self.status {
            if order.status.as_str() != status.as_str() {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let hit = order.title.to_lowercase().contains(term)
                || order.category.to_lowercase().contains(term)
                || order.organizer.to_lowercase().contains(term);
            if !hit {
                return false;
            }
        }

        true
    }

    /// Keep matching orders, preserving their order.
    pub fn apply(&self, orders: Vec<GroupOrder>) -> Vec<GroupOrder> {
        orders.into_iter().filter(|o| self.matches(o)).collect()
    }
}

/// Supported supplier sort keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupplierSort {
    /// Highest rating first
    Rating,
    /// Most reviews first
    Reviews,
    /// Nearest first
    Distance,
}

impl SupplierSort {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Some(SupplierSort::Rating),
            "reviews" => Some(SupplierSort::Reviews),
            "distance" => Some(SupplierSort::Distance),
            _ => None,
        }
    }
}

/// Compiled predicate and ordering over suppliers.
#[derive(Debug, Clone, Default)]
pub struct SupplierFilter {
    category: Option<String>,
    search: Option<String>,
    sort: Option<SupplierSort>,
}

impl SupplierFilter {
    pub fn from_query(query: &SupplierQuery) -> Self {
        Self {
            category: active_term(query.category.as_deref()),
            search: query
                .search
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_lowercase),
            sort: query.sort_by.as_deref().and_then(SupplierSort::parse),
        }
    }

    pub fn matches(&self, supplier: &Supplier) -> bool {
        if let Some(category) = &self.category {
            if supplier.category.to_lowercase() != *category {
                return false;
            }
        }

        if let Some(term) = &self.search {
            let hit = supplier.name.to_lowercase().contains(term)
                || supplier.category.to_lowercase().contains(term)
                || supplier
                    .products
                    .iter()
                    .any(|p| p.to_lowercase().contains(term));
            if !hit {
                return false;
            }
        }

        true
    }

    /// Keep matching suppliers and apply the requested sort. Sorting is stable.
    pub fn apply(&self, suppliers: Vec<Supplier>) -> Vec<Supplier> {
        let mut filtered: Vec<Supplier> =
            suppliers.into_iter().filter(|s| self.matches(s)).collect();

        match self.sort {
            Some(SupplierSort::Rating) => filtered.sort_by(|a, b| {
                b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal)
            }),
            Some(SupplierSort::Reviews) => filtered.sort_by(|a, b| b.reviews.cmp(&a.reviews)),
            Some(SupplierSort::Distance) => filtered.sort_by(|a, b| {
                // Unparseable distances sort last
                let da = a.distance_km().unwrap_or(f64::MAX);
                let db = b.distance_km().unwrap_or(f64::MAX);
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            }),
            None => {}
        }

        filtered
    }
}
