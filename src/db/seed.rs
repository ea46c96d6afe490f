//! Demo catalog inserted into an empty database.

use chrono::{DateTime, Duration, Utc};

use crate::models::{
    GroupOrder, Notification, NotificationKind, OrderStatus, Supplier, User, UserType,
};

/// Password shared by the demo accounts.
pub const DEMO_PASSWORD: &str = "demo123";

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// Demo group orders in display order.
pub fn group_orders() -> Vec<GroupOrder> {
    vec![
        GroupOrder {
            id: "GRP-001".to_string(),
            title: "Bulk Fresh Vegetables Order".to_string(),
            description: "High-quality fresh vegetables for restaurants and food vendors. Sourced directly from farms.".to_string(),
            category: "Vegetables".to_string(),
            organizer: "Fresh Veggie Hub".to_string(),
            organizer_rating: 4.8,
            current_participants: 8,
            max_participants: 15,
            min_order: 10,
            current_total: 180,
            target_amount: 300,
            savings: 25,
            deadline: "2024-01-25".to_string(),
            delivery_date: "2024-01-27".to_string(),
            location: "Andheri West, Mumbai".to_string(),
            status: OrderStatus::Open,
            image: "https://images.unsplash.com/photo-1542838132-92c53300491e?w=300&h=200&fit=crop".to_string(),
            products: strings(&["Tomatoes", "Onions", "Potatoes", "Carrots", "Leafy Greens"]),
            price_per_unit: 15.0,
            unit: "kg".to_string(),
            version: 1,
        },
        GroupOrder {
            id: "GRP-002".to_string(),
            title: "Premium Spice Mix Collection".to_string(),
            description: "Authentic Indian spice mixes for commercial kitchens. Premium quality guaranteed.".to_string(),
            category: "Spices".to_string(),
            organizer: "Spice Masters".to_string(),
            organizer_rating: 4.9,
            current_participants: 12,
            max_participants: 20,
            min_order: 5,
            current_total: 85,
            target_amount: 100,
            savings: 20,
            deadline: "2024-01-22".to_string(),
            delivery_date: "2024-01-24".to_string(),
            location: "Bandra East, Mumbai".to_string(),
            status: OrderStatus::Filling,
            image: "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?w=300&h=200&fit=crop".to_string(),
            products: strings(&["Garam Masala", "Turmeric", "Red Chili", "Cumin", "Coriander"]),
            price_per_unit: 120.0,
            unit: "pack".to_string(),
            version: 1,
        },
        GroupOrder {
            id: "GRP-003".to_string(),
            title: "Eco-Friendly Packaging Supplies".to_string(),
            description: "Sustainable packaging solutions for food vendors. Biodegradable and eco-friendly options.".to_string(),
            category: "Packaging".to_string(),
            organizer: "Packaging Pro".to_string(),
            organizer_rating: 4.6,
            current_participants: 15,
            max_participants: 15,
            min_order: 100,
            current_total: 1500,
            target_amount: 1500,
            savings: 30,
            deadline: "2024-01-20".to_string(),
            delivery_date: "2024-01-22".to_string(),
            location: "Malad West, Mumbai".to_string(),
            status: OrderStatus::Closed,
            image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=300&h=200&fit=crop".to_string(),
            products: strings(&["Food Containers", "Paper Bags", "Labels", "Wrapping Paper"]),
            price_per_unit: 8.0,
            unit: "pieces".to_string(),
            version: 1,
        },
        GroupOrder {
            id: "GRP-004".to_string(),
            title: "Cooking Oil Bulk Purchase".to_string(),
            description: "High-quality cooking oils for commercial use. Various types available.".to_string(),
            category: "Oil".to_string(),
            organizer: "Oil Express".to_string(),
            organizer_rating: 4.7,
            current_participants: 6,
            max_participants: 12,
            min_order: 20,
            current_total: 140,
            target_amount: 240,
            savings: 18,
            deadline: "2024-01-28".to_string(),
            delivery_date: "2024-01-30".to_string(),
            location: "Kandivali East, Mumbai".to_string(),
            status: OrderStatus::Open,
            image: "https://images.unsplash.com/photo-1474979266404-7eaacbcd87c5?w=300&h=200&fit=crop".to_string(),
            products: strings(&["Sunflower Oil", "Mustard Oil", "Coconut Oil", "Sesame Oil"]),
            price_per_unit: 180.0,
            unit: "liter".to_string(),
            version: 1,
        },
    ]
}

/// Demo supplier directory.
pub fn suppliers() -> Vec<Supplier> {
    vec![
        Supplier {
            id: 1,
            name: "Fresh Veggie Hub".to_string(),
            category: "Vegetables".to_string(),
            location: "Andheri West, Mumbai".to_string(),
            distance: "2.3 km".to_string(),
            rating: 4.8,
            reviews: 156,
            delivery_time: "2-4 hours".to_string(),
            min_order: "₹500".to_string(),
            verified: true,
            image: "https://images.unsplash.com/photo-1542838132-92c53300491e?w=150&h=150&fit=crop".to_string(),
            specialties: strings(&["Organic", "Fresh Daily", "Bulk Orders"]),
            contact: "+91 98765 43210".to_string(),
            description: "Premium fresh vegetables supplier specializing in organic produce for restaurants and food vendors.".to_string(),
            products: strings(&["Tomatoes", "Onions", "Potatoes", "Leafy Greens", "Bell Peppers"]),
        },
        Supplier {
            id: 2,
            name: "Spice Masters".to_string(),
            category: "Spices".to_string(),
            location: "Bandra East, Mumbai".to_string(),
            distance: "3.1 km".to_string(),
            rating: 4.9,
            reviews: 203,
            delivery_time: "1-3 hours".to_string(),
            min_order: "₹300".to_string(),
            verified: true,
            image: "https://images.unsplash.com/photo-1596040033229-a9821ebd058d?w=150&h=150&fit=crop".to_string(),
            specialties: strings(&["Premium Quality", "Wholesale", "Custom Blends"]),
            contact: "+91 98765 43211".to_string(),
            description: "Your one-stop destination for authentic spices and custom spice blends.".to_string(),
            products: strings(&["Turmeric", "Red Chili", "Garam Masala", "Cumin", "Coriander"]),
        },
        Supplier {
            id: 3,
            name: "Packaging Pro".to_string(),
            category: "Packaging".to_string(),
            location: "Malad West, Mumbai".to_string(),
            distance: "4.2 km".to_string(),
            rating: 4.6,
            reviews: 89,
            delivery_time: "4-6 hours".to_string(),
            min_order: "₹1000".to_string(),
            verified: true,
            image: "https://images.unsplash.com/photo-1553062407-98eeb64c6a62?w=150&h=150&fit=crop".to_string(),
            specialties: strings(&["Eco-Friendly", "Custom Sizes", "Bulk Discount"]),
            contact: "+91 98765 43212".to_string(),
            description: "Eco-friendly packaging solutions for food vendors and small businesses.".to_string(),
            products: strings(&["Food Containers", "Paper Bags", "Plastic Boxes", "Labels", "Wrapping Paper"]),
        },
        Supplier {
            id: 4,
            name: "Oil Express".to_string(),
            category: "Cooking Oil".to_string(),
            location: "Kandivali East, Mumbai".to_string(),
            distance: "5.8 km".to_string(),
            rating: 4.7,
            reviews: 124,
            delivery_time: "2-5 hours".to_string(),
            min_order: "₹800".to_string(),
            verified: true,
            image: "https://images.unsplash.com/photo-1474979266404-7eaacbcd87c5?w=150&h=150&fit=crop".to_string(),
            specialties: strings(&["Pure Quality", "Fast Delivery", "Competitive Prices"]),
            contact: "+91 98765 43213".to_string(),
            description: "High-quality cooking oils for commercial kitchens and food preparation.".to_string(),
            products: strings(&["Sunflower Oil", "Mustard Oil", "Coconut Oil", "Olive Oil", "Sesame Oil"]),
        },
    ]
}

/// Demo inbox, timestamped relative to `now`.
pub fn notifications(now: DateTime<Utc>) -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            title: "New Supplier Available".to_string(),
            message: "Fresh produce supplier added in your area".to_string(),
            timestamp: now.to_rfc3339(),
            read: false,
            kind: NotificationKind::Info,
        },
        Notification {
            id: "2".to_string(),
            title: "Group Order Complete".to_string(),
            message: "Your recent group order has been fulfilled".to_string(),
            timestamp: (now - Duration::hours(1)).to_rfc3339(),
            read: false,
            kind: NotificationKind::Success,
        },
        Notification {
            id: "3".to_string(),
            title: "Payment Reminder".to_string(),
            message: "Payment due for order #12345".to_string(),
            timestamp: (now - Duration::hours(2)).to_rfc3339(),
            read: true,
            kind: NotificationKind::Warning,
        },
    ]
}

/// Demo accounts. All use [`DEMO_PASSWORD`].
pub fn users() -> Vec<User> {
    vec![
        User {
            id: "1".to_string(),
            email: "client@demo.com".to_string(),
            name: "John Client".to_string(),
            user_type: UserType::Client,
            avatar: Some("https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=150&h=150&fit=crop&crop=face".to_string()),
        },
        User {
            id: "2".to_string(),
            email: "supplier@demo.com".to_string(),
            name: "Sarah Supplier".to_string(),
            user_type: UserType::Supplier,
            avatar: Some("https://images.unsplash.com/photo-1494790108755-2616b612b786?w=150&h=150&fit=crop&crop=face".to_string()),
        },
        User {
            id: "3".to_string(),
            email: "vendor@demo.com".to_string(),
            name: "Mike Vendor".to_string(),
            user_type: UserType::Supplier,
            avatar: Some("https://images.unsplash.com/photo-1507003211169-0a1dd7228f2d?w=150&h=150&fit=crop&crop=face".to_string()),
        },
    ]
}
