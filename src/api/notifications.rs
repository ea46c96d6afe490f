//! Notification inbox API endpoints.

use axum::extract::{Path, State};

use super::{success, ApiResult};
use crate::errors::AppError;
use crate::models::{Notification, NotificationList};
use crate::AppState;

/// GET /api/notifications - List the inbox.
pub async fn list_notifications(State(state): State<AppState>) -> ApiResult<NotificationList> {
    let notifications = state.repo.list_notifications().await?;
    success(NotificationList::new(notifications))
}

/// PUT /api/notifications/:id/read - Mark one notification read.
pub async fn mark_notification_read(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Notification> {
    match state.repo.mark_notification_read(&id).await? {
        Some(notification) => success(notification),
        None => Err(AppError::NotFound("Notification not found".to_string())),
    }
}

/// PUT /api/notifications/mark-all-read - Mark every notification read.
pub async fn mark_all_notifications_read(
    State(state): State<AppState>,
) -> ApiResult<NotificationList> {
    let notifications = state.repo.mark_all_notifications_read().await?;
    success(NotificationList::new(notifications))
}
