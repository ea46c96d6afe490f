//! Supplier directory API endpoints.

use axum::extract::{Path, Query, State};

use super::{success, ApiResponse, ApiResult, AppJson};
use crate::errors::AppError;
use crate::filter::SupplierFilter;
use crate::models::{ContactSupplierRequest, Supplier, SupplierContact, SupplierList, SupplierQuery};
use crate::AppState;

/// GET /api/suppliers - List suppliers, optionally filtered and sorted.
pub async fn list_suppliers(
    State(state): State<AppState>,
    Query(query): Query<SupplierQuery>,
) -> ApiResult<SupplierList> {
    let filter = SupplierFilter::from_query(&query);
    let suppliers = state.repo.list_suppliers(&filter).await?;
    let total = suppliers.len();

    success(SupplierList { suppliers, total })
}

/// GET /api/suppliers/:id - Get a single supplier.
pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Supplier> {
    let not_found = || AppError::NotFound(format!("Supplier {} not found", id));

    let Ok(numeric_id) = id.trim().parse::<i64>() else {
        return Err(not_found());
    };

    match state.repo.get_supplier(numeric_id).await? {
        Some(supplier) => success(supplier),
        None => Err(not_found()),
    }
}

/// Accept a supplier id sent either as a JSON number or a numeric string.
fn supplier_id_from(value: &serde_json::Value) -> Option<i64> {
    match value {
        serde_json::Value::Number(n) => n.as_i64(),
        serde_json::Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// POST /api/suppliers/contact - Send a message to a supplier.
pub async fn contact_supplier(
    State(state): State<AppState>,
    AppJson(request): AppJson<ContactSupplierRequest>,
) -> ApiResult<SupplierContact> {
    let message = request
        .message
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());
    let user_email = request
        .user_email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());

    let (Some(raw_id), Some(message), Some(user_email)) =
        (request.supplier_id.as_ref(), message, user_email)
    else {
        return Err(AppError::Validation(
            "Supplier ID, message, and user email are required".to_string(),
        ));
    };

    let supplier = match supplier_id_from(raw_id) {
        Some(id) => state.repo.get_supplier(id).await?,
        None => None,
    }
    .ok_or_else(|| AppError::NotFound("Supplier not found".to_string()))?;

    let contact = state
        .repo
        .create_supplier_contact(supplier.id, user_email, message)
        .await?;

    tracing::info!("{} contacted supplier {}", user_email, supplier.id);

    Ok(ApiResponse::new(contact).with_message(format!(
        "Your message has been sent to {}. They will contact you soon!",
        supplier.name
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_supplier_id_accepts_number_and_string() {
        assert_eq!(supplier_id_from(&json!(3)), Some(3));
        assert_eq!(supplier_id_from(&json!(" 4 ")), Some(4));
        assert_eq!(supplier_id_from(&json!("four")), None);
        assert_eq!(supplier_id_from(&json!(null)), None);
    }
}
