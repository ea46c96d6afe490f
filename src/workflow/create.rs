//! Create workflow: synthesize a new group order from submitted fields.

use chrono::{Duration, NaiveDate};

use crate::errors::AppError;
use crate::models::{CreateGroupOrderRequest, GroupOrder, OrderStatus};

pub const DEFAULT_MAX_PARTICIPANTS: i64 = 20;
pub const DEFAULT_SAVINGS_PERCENT: i64 = 15;
pub const DEFAULT_ORGANIZER_RATING: f64 = 4.5;
pub const DEFAULT_LOCATION: &str = "Mumbai";
pub const DEFAULT_PRICE_PER_UNIT: f64 = 50.0;
pub const DEFAULT_UNIT: &str = "unit";
pub const DEFAULT_PRODUCT: &str = "Mixed Items";
pub const DEFAULT_IMAGE: &str =
    "https://images.unsplash.com/photo-1542838132-92c53300491e?w=300&h=200&fit=crop";
/// Days between creation and delivery.
pub const DELIVERY_LEAD_DAYS: i64 = 7;

pub const CREATED_MESSAGE: &str =
    "Group order created successfully! We will help you find participants.";

fn required(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn new_group_order_id() -> String {
    let raw = uuid::Uuid::new_v4().simple().to_string();
    format!("GRP-{}", raw[..9].to_uppercase())
}

/// Build a new open group order. `today` anchors the delivery date.
pub fn build_group_order(
    request: CreateGroupOrderRequest,
    today: NaiveDate,
) -> Result<GroupOrder, AppError> {
    let title = required(request.title);
    let description = required(request.description);
    let category = required(request.category);
    let deadline = required(request.deadline);
    let organizer = required(request.user_email);
    let target = request.target_quantity.filter(|q| *q > 0);

    let (Some(title), Some(description), Some(category), Some(target), Some(deadline), Some(organizer)) =
        (title, description, category, target, deadline, organizer)
    else {
        return Err(AppError::rejected("All fields are required"));
    };

    let deadline = NaiveDate::parse_from_str(&deadline, "%Y-%m-%d").map_err(|_| {
        AppError::Validation("Deadline must be a date in YYYY-MM-DD format".to_string())
    })?;

    let delivery_date = today + Duration::days(DELIVERY_LEAD_DAYS);

    let products = request
        .products
        .map(|p| {
            p.into_iter()
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .collect::<Vec<_>>()
        })
        .filter(|p| !p.is_empty())
        .unwrap_or_else(|| vec![DEFAULT_PRODUCT.to_string()]);

    Ok(GroupOrder {
        id: new_group_order_id(),
        title,
        description,
        category,
        organizer,
        organizer_rating: DEFAULT_ORGANIZER_RATING,
        // The organizer occupies the first slot
        current_participants: 1,
        max_participants: DEFAULT_MAX_PARTICIPANTS,
        min_order: target / DEFAULT_MAX_PARTICIPANTS,
        current_total: 0,
        target_amount: target,
        savings: DEFAULT_SAVINGS_PERCENT,
        deadline: deadline.format("%Y-%m-%d").to_string(),
        delivery_date: delivery_date.format("%Y-%m-%d").to_string(),
        location: required(request.location).unwrap_or_else(|| DEFAULT_LOCATION.to_string()),
        status: OrderStatus::Open,
        image: required(request.image).unwrap_or_else(|| DEFAULT_IMAGE.to_string()),
        products,
        price_per_unit: request
            .price_per_unit
            .filter(|p| p.is_finite() && *p > 0.0)
            .unwrap_or(DEFAULT_PRICE_PER_UNIT),
        unit: required(request.unit).unwrap_or_else(|| DEFAULT_UNIT.to_string()),
        version: 1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn complete() -> CreateGroupOrderRequest {
        CreateGroupOrderRequest {
            title: Some("Bulk Rice".to_string()),
            description: Some("Basmati rice for biryani stalls".to_string()),
            category: Some("Grains".to_string()),
            target_quantity: Some(500),
            deadline: Some("2024-02-01".to_string()),
            user_email: Some("organizer@example.com".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_builds_record_with_defaults() {
        let order = build_group_order(complete(), today()).unwrap();

        assert!(order.id.starts_with("GRP-"));
        assert_eq!(order.id.len(), 13);
        assert_eq!(order.organizer, "organizer@example.com");
        assert_eq!(order.max_participants, 20);
        assert_eq!(order.current_participants, 1);
        assert_eq!(order.current_total, 0);
        assert_eq!(order.min_order, 25);
        assert_eq!(order.target_amount, 500);
        assert_eq!(order.savings, 15);
        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.delivery_date, "2024-01-27");
        assert_eq!(order.location, "Mumbai");
        assert_eq!(order.products, vec!["Mixed Items".to_string()]);
        assert_eq!(order.unit, "unit");
    }

    #[test]
    fn test_min_order_uses_integer_division() {
        let mut request = complete();
        request.target_quantity = Some(39);
        let order = build_group_order(request, today()).unwrap();
        assert_eq!(order.min_order, 1);
    }

    #[test]
    fn test_optional_fields_override_defaults() {
        let mut request = complete();
        request.location = Some("Dadar, Mumbai".to_string());
        request.products = Some(vec!["Basmati".to_string(), " ".to_string()]);
        request.unit = Some("kg".to_string());
        request.price_per_unit = Some(72.5);

        let order = build_group_order(request, today()).unwrap();
        assert_eq!(order.location, "Dadar, Mumbai");
        assert_eq!(order.products, vec!["Basmati".to_string()]);
        assert_eq!(order.unit, "kg");
        assert_eq!(order.price_per_unit, 72.5);
    }

    #[test]
    fn test_any_missing_field_is_rejected() {
        let strip: [fn(&mut CreateGroupOrderRequest); 6] = [
            |r| r.title = None,
            |r| r.description = Some("  ".to_string()),
            |r| r.category = None,
            |r| r.target_quantity = Some(0),
            |r| r.deadline = None,
            |r| r.user_email = Some(String::new()),
        ];

        for remove in strip {
            let mut request = complete();
            remove(&mut request);
            let err = build_group_order(request, today()).unwrap_err();
            assert_eq!(err.message(), "All fields are required");
        }
    }

    #[test]
    fn test_malformed_deadline_is_a_validation_error() {
        let mut request = complete();
        request.deadline = Some("next friday".to_string());
        assert!(matches!(
            build_group_order(request, today()),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_ids_are_unique() {
        let a = build_group_order(complete(), today()).unwrap();
        let b = build_group_order(complete(), today()).unwrap();
        assert_ne!(a.id, b.id);
    }
}
