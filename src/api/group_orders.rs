//! Group order API endpoints.

use axum::extract::{Path, Query, State};
use chrono::Utc;

use super::{success, ApiResponse, ApiResult, AppJson};
use crate::errors::AppError;
use crate::filter::GroupOrderFilter;
use crate::models::{
    CreateGroupOrderRequest, GroupOrder, GroupOrderList, GroupOrderQuery, JoinGroupOrderRequest,
    JoinOutcome, Participation,
};
use crate::workflow::{build_group_order, join_message, JoinRequest, CREATED_MESSAGE};
use crate::AppState;

/// GET /api/group-orders - List group orders, optionally filtered.
pub async fn list_group_orders(
    State(state): State<AppState>,
    Query(query): Query<GroupOrderQuery>,
) -> ApiResult<GroupOrderList> {
    let filter = GroupOrderFilter::from_query(&query);
    let items = state.repo.list_group_orders(&filter).await?;
    let total = items.len();

    success(GroupOrderList { items, total })
}

/// GET /api/group-orders/:id - Get a single group order.
pub async fn get_group_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<GroupOrder> {
    match state.repo.get_group_order(&id).await? {
        Some(order) => success(order),
        None => Err(AppError::NotFound(format!("Group order {} not found", id))),
    }
}

/// GET /api/group-orders/:id/participants - List who has joined.
pub async fn list_group_order_participants(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Vec<Participation>> {
    if state.repo.get_group_order(&id).await?.is_none() {
        return Err(AppError::NotFound(format!("Group order {} not found", id)));
    }

    success(state.repo.list_participants(&id).await?)
}

/// POST /api/group-orders/:id/join - Join a group order.
pub async fn join_group_order(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(body): AppJson<JoinGroupOrderRequest>,
) -> ApiResult<JoinOutcome> {
    let request = JoinRequest::from_body(body)?;

    let outcome = match state.repo.join_group_order(&id, &request).await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::info!("Join of {} by {} refused: {}", id, request.user_email, e);
            return Err(e);
        }
    };

    tracing::info!(
        "{} joined {} with quantity {}",
        request.user_email,
        id,
        request.quantity
    );

    let message = join_message(&outcome.group_order, request.quantity);
    Ok(ApiResponse::new(outcome).with_message(message))
}

/// POST /api/group-orders - Create a new group order.
pub async fn create_group_order(
    State(state): State<AppState>,
    AppJson(request): AppJson<CreateGroupOrderRequest>,
) -> ApiResult<GroupOrder> {
    let order = build_group_order(request, Utc::now().date_naive())?;
    let stored = state.repo.upsert_group_order(&order).await?;

    tracing::info!("Group order {} created by {}", stored.id, stored.organizer);

    Ok(ApiResponse::new(stored).with_message(CREATED_MESSAGE))
}
