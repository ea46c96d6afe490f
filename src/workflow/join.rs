//! Join workflow: capacity, minimum quantity and status rules.

use serde_json::json;

use crate::errors::AppError;
use crate::models::{GroupOrder, JoinGroupOrderRequest, OrderStatus};

/// Validated join input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JoinRequest {
    pub quantity: i64,
    pub user_email: String,
}

impl JoinRequest {
    /// Check that quantity and requester are present before touching the store.
    pub fn from_body(body: JoinGroupOrderRequest) -> Result<Self, AppError> {
        let user_email = body
            .user_email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        match (body.quantity, user_email) {
            (Some(quantity), Some(user_email)) if quantity > 0 => Ok(Self {
                quantity,
                user_email,
            }),
            _ => Err(AppError::Validation(
                "Group order ID, quantity, and user email are required".to_string(),
            )),
        }
    }
}

/// Reasons a well-formed join is refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JoinRejection {
    NotOpen,
    BelowMinimum { min_order: i64, unit: String },
    Full,
    AlreadyJoined,
    /// The running total cannot absorb the requested quantity
    QuantityTooLarge,
}

impl std::fmt::Display for JoinRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            JoinRejection::NotOpen => {
                write!(f, "This group order is no longer accepting participants")
            }
            JoinRejection::BelowMinimum { min_order, unit } => {
                write!(f, "Minimum order is {} {}", min_order, unit)
            }
            JoinRejection::Full => write!(f, "This group order is full"),
            JoinRejection::AlreadyJoined => write!(f, "You have already joined this group order"),
            JoinRejection::QuantityTooLarge => write!(f, "Requested quantity is too large"),
        }
    }
}

impl From<JoinRejection> for AppError {
    fn from(rejection: JoinRejection) -> Self {
        let details = match &rejection {
            JoinRejection::BelowMinimum { min_order, unit } => {
                Some(json!({ "minOrder": min_order, "unit": unit }))
            }
            _ => None,
        };

        AppError::Rejected {
            message: rejection.to_string(),
            details,
        }
    }
}

/// Apply the join rules in order: status, minimum quantity, capacity, duplicate,
/// then check that the running total can absorb the quantity.
///
/// Returns the updated record with the participant counted, the quantity added to
/// the running total and the status closed once the last slot is taken.
pub fn apply_join(
    order: &GroupOrder,
    request: &JoinRequest,
    already_joined: bool,
) -> Result<GroupOrder, JoinRejection> {
    if order.status != OrderStatus::Open {
        return Err(JoinRejection::NotOpen);
    }

    if request.quantity < order.min_order {
        return Err(JoinRejection::BelowMinimum {
            min_order: order.min_order,
            unit: order.unit.clone(),
        });
    }

    if order.is_full() {
        return Err(JoinRejection::Full);
    }

    if already_joined {
        return Err(JoinRejection::AlreadyJoined);
    }

    let current_total = order
        .current_total
        .checked_add(request.quantity)
        .ok_or(JoinRejection::QuantityTooLarge)?;

    let mut updated = order.clone();
    updated.current_participants += 1;
    updated.current_total = current_total;
    if updated.is_full() {
        updated.status = OrderStatus::Closed;
    }

    Ok(updated)
}

/// Confirmation shown to the vendor after a successful join.
pub fn join_message(order: &GroupOrder, quantity: i64) -> String {
    format!(
        "Successfully joined \"{}\" with quantity: {} {}",
        order.title, quantity, order.unit
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::seed;

    fn order(id: &str) -> GroupOrder {
        seed::group_orders()
            .into_iter()
            .find(|o| o.id == id)
            .unwrap()
    }

    fn request(quantity: i64) -> JoinRequest {
        JoinRequest {
            quantity,
            user_email: "vendor@example.com".to_string(),
        }
    }

    #[test]
    fn test_below_minimum_is_rejected_with_unit() {
        let err = apply_join(&order("GRP-001"), &request(5), false).unwrap_err();
        assert_eq!(err.to_string(), "Minimum order is 10 kg");
    }

    #[test]
    fn test_below_minimum_rejected_for_every_open_order() {
        for order in seed::group_orders()
            .into_iter()
            .filter(|o| o.status == OrderStatus::Open)
        {
            let err = apply_join(&order, &request(order.min_order - 1), false).unwrap_err();
            assert!(matches!(err, JoinRejection::BelowMinimum { .. }), "{}", order.id);
        }
    }

    #[test]
    fn test_successful_join_updates_counters() {
        let before = order("GRP-001");
        let after = apply_join(&before, &request(15), false).unwrap();

        assert_eq!(after.current_participants, before.current_participants + 1);
        assert_eq!(after.current_total, before.current_total + 15);
        assert_eq!(after.status, OrderStatus::Open);
        assert!(join_message(&after, 15).contains("Successfully joined"));
    }

    #[test]
    fn test_closed_order_rejects_any_quantity() {
        let closed = order("GRP-003");
        for quantity in [1, 100, 10_000] {
            let err = apply_join(&closed, &request(quantity), false).unwrap_err();
            assert_eq!(err, JoinRejection::NotOpen);
            assert!(err.to_string().contains("no longer accepting participants"));
        }
    }

    #[test]
    fn test_filling_order_is_not_open() {
        let err = apply_join(&order("GRP-002"), &request(50), false).unwrap_err();
        assert_eq!(err, JoinRejection::NotOpen);
    }

    #[test]
    fn test_status_checked_before_minimum() {
        let err = apply_join(&order("GRP-003"), &request(1), false).unwrap_err();
        assert_eq!(err, JoinRejection::NotOpen);
    }

    #[test]
    fn test_full_open_order_is_rejected() {
        let mut full = order("GRP-004");
        full.current_participants = full.max_participants;
        let err = apply_join(&full, &request(50), false).unwrap_err();
        assert_eq!(err, JoinRejection::Full);
    }

    #[test]
    fn test_last_slot_closes_order() {
        let mut almost = order("GRP-004");
        almost.current_participants = almost.max_participants - 1;
        let after = apply_join(&almost, &request(20), false).unwrap();
        assert_eq!(after.current_participants, after.max_participants);
        assert_eq!(after.status, OrderStatus::Closed);
    }

    #[test]
    fn test_total_overflow_is_rejected() {
        let before = order("GRP-001");
        let err = apply_join(&before, &request(i64::MAX), false).unwrap_err();
        assert_eq!(err, JoinRejection::QuantityTooLarge);

        let err: AppError = err.into();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_participant_rejected() {
        let err = apply_join(&order("GRP-001"), &request(15), true).unwrap_err();
        assert_eq!(err, JoinRejection::AlreadyJoined);
    }

    #[test]
    fn test_request_requires_quantity_and_email() {
        let missing_email = JoinGroupOrderRequest {
            quantity: Some(10),
            user_email: Some("   ".to_string()),
        };
        assert!(matches!(
            JoinRequest::from_body(missing_email),
            Err(AppError::Validation(_))
        ));

        let zero = JoinGroupOrderRequest {
            quantity: Some(0),
            user_email: Some("a@b.c".to_string()),
        };
        assert!(JoinRequest::from_body(zero).is_err());

        let ok = JoinGroupOrderRequest {
            quantity: Some(12),
            user_email: Some(" a@b.c ".to_string()),
        };
        assert_eq!(JoinRequest::from_body(ok).unwrap().user_email, "a@b.c");
    }

    #[test]
    fn test_rejection_converts_to_app_error() {
        let err: AppError = JoinRejection::BelowMinimum {
            min_order: 10,
            unit: "kg".to_string(),
        }
        .into();
        match err {
            AppError::Rejected { message, details } => {
                assert_eq!(message, "Minimum order is 10 kg");
                assert_eq!(details.unwrap()["minOrder"], 10);
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
