//! Database repository for marketplace data.
//!
//! Uses prepared statements and transactions for data integrity.

use chrono::Utc;
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};

use super::seed;
use crate::auth::hash_password;
use crate::errors::AppError;
use crate::filter::{GroupOrderFilter, SupplierFilter};
use crate::models::{
    GroupOrder, JoinOutcome, Notification, NotificationKind, OrderStatus, Participation, Supplier,
    SupplierContact, User, UserCredentials, UserType,
};
use crate::workflow::{apply_join, JoinRequest};

const GROUP_ORDER_COLUMNS: &str = "id, title, description, category, organizer, organizer_rating, \
     current_participants, max_participants, min_order, current_total, target_amount, savings, \
     deadline, delivery_date, location, status, image, products, price_per_unit, unit, version";

const SUPPLIER_COLUMNS: &str = "id, name, category, location, distance, rating, reviews, \
     delivery_time, min_order, verified, image, specialties, contact, description, products";

/// Database repository for all data operations.
#[derive(Clone)]
pub struct Repository {
    pool: SqlitePool,
}

impl Repository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert the demo catalog into every table that is still empty.
    pub async fn seed_demo_data(&self) -> Result<(), AppError> {
        if self.count("group_orders").await? == 0 {
            for order in seed::group_orders() {
                self.upsert_group_order(&order).await?;
            }
            tracing::info!("Seeded demo group orders");
        }

        if self.count("suppliers").await? == 0 {
            for supplier in seed::suppliers() {
                self.insert_supplier(&supplier).await?;
            }
            tracing::info!("Seeded demo suppliers");
        }

        if self.count("notifications").await? == 0 {
            for notification in seed::notifications(Utc::now()) {
                self.insert_notification(&notification).await?;
            }
            tracing::info!("Seeded demo notifications");
        }

        if self.count("users").await? == 0 {
            for user in seed::users() {
                self.insert_user(&user, seed::DEMO_PASSWORD).await?;
            }
            tracing::info!("Seeded demo users");
        }

        Ok(())
    }

    async fn count(&self, table: &'static str) -> Result<i64, AppError> {
        let sql = format!("SELECT COUNT(*) AS n FROM {}", table);
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.get("n"))
    }

    // ==================== GROUP ORDER OPERATIONS ====================

    /// List group orders in store order, keeping those that match the filter.
    pub async fn list_group_orders(
        &self,
        filter: &GroupOrderFilter,
    ) -> Result<Vec<GroupOrder>, AppError> {
        let sql = format!(
            "SELECT {} FROM group_orders ORDER BY rowid",
            GROUP_ORDER_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let orders = rows.iter().map(group_order_from_row).collect();
        Ok(filter.apply(orders))
    }

    /// Get a group order by ID.
    pub async fn get_group_order(&self, id: &str) -> Result<Option<GroupOrder>, AppError> {
        let sql = format!("SELECT {} FROM group_orders WHERE id = ?", GROUP_ORDER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(group_order_from_row))
    }

    /// Insert a group order, or replace every field of an existing one.
    pub async fn upsert_group_order(&self, order: &GroupOrder) -> Result<GroupOrder, AppError> {
        let products_json = serde_json::to_string(&order.products)?;

        sqlx::query(
            r#"INSERT INTO group_orders (
                id, title, description, category, organizer, organizer_rating,
                current_participants, max_participants, min_order, current_total,
                target_amount, savings, deadline, delivery_date, location, status,
                image, products, price_per_unit, unit, version
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                title = excluded.title,
                description = excluded.description,
                category = excluded.category,
                organizer = excluded.organizer,
                organizer_rating = excluded.organizer_rating,
                current_participants = excluded.current_participants,
                max_participants = excluded.max_participants,
                min_order = excluded.min_order,
                current_total = excluded.current_total,
                target_amount = excluded.target_amount,
                savings = excluded.savings,
                deadline = excluded.deadline,
                delivery_date = excluded.delivery_date,
                location = excluded.location,
                status = excluded.status,
                image = excluded.image,
                products = excluded.products,
                price_per_unit = excluded.price_per_unit,
                unit = excluded.unit,
                version = group_orders.version + 1"#,
        )
        .bind(&order.id)
        .bind(&order.title)
        .bind(&order.description)
        .bind(&order.category)
        .bind(&order.organizer)
        .bind(order.organizer_rating)
        .bind(order.current_participants)
        .bind(order.max_participants)
        .bind(order.min_order)
        .bind(order.current_total)
        .bind(order.target_amount)
        .bind(order.savings)
        .bind(&order.deadline)
        .bind(&order.delivery_date)
        .bind(&order.location)
        .bind(order.status.as_str())
        .bind(&order.image)
        .bind(&products_json)
        .bind(order.price_per_unit)
        .bind(&order.unit)
        .bind(order.version.max(1))
        .execute(&self.pool)
        .await?;

        self.get_group_order(&order.id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("Group order {} vanished", order.id)))
    }

    /// Join a group order atomically.
    ///
    /// The join rules run against the row as it stands inside the transaction, the
    /// participation is recorded, and the updated counters are written with a
    /// version check.
    pub async fn join_group_order(
        &self,
        id: &str,
        request: &JoinRequest,
    ) -> Result<JoinOutcome, AppError> {
        let mut tx = self.pool.begin().await?;

        // Take the write lock up front so the read below cannot go stale
        let locked = sqlx::query("UPDATE group_orders SET version = version WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if locked.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Group order {} not found", id)));
        }

        let sql = format!("SELECT {} FROM group_orders WHERE id = ?", GROUP_ORDER_COLUMNS);
        let row = sqlx::query(&sql).bind(id).fetch_one(&mut *tx).await?;
        let existing = group_order_from_row(&row);

        let already_joined = sqlx::query(
            "SELECT 1 FROM group_order_participants WHERE group_order_id = ? AND user_email = ?",
        )
        .bind(id)
        .bind(&request.user_email)
        .fetch_optional(&mut *tx)
        .await?
        .is_some();

        let mut updated = apply_join(&existing, request, already_joined)?;
        updated.version = existing.version + 1;

        let joined_at = Utc::now().to_rfc3339();
        sqlx::query(
            "INSERT INTO group_order_participants (group_order_id, user_email, quantity, joined_at) VALUES (?, ?, ?, ?)",
        )
        .bind(id)
        .bind(&request.user_email)
        .bind(request.quantity)
        .bind(&joined_at)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query(
            "UPDATE group_orders SET current_participants = ?, current_total = ?, status = ?, version = ? WHERE id = ? AND version = ?",
        )
        .bind(updated.current_participants)
        .bind(updated.current_total)
        .bind(updated.status.as_str())
        .bind(updated.version)
        .bind(id)
        .bind(existing.version)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::Conflict {
                message: "Concurrent modification detected".to_string(),
                current_version: existing.version,
            });
        }

        tx.commit().await?;

        if updated.status == OrderStatus::Closed {
            tracing::info!("Group order {} reached capacity and closed", id);
        }

        Ok(JoinOutcome {
            group_order: updated,
            participation: Participation {
                group_order_id: id.to_string(),
                user_email: request.user_email.clone(),
                quantity: request.quantity,
                joined_at,
            },
        })
    }

    /// List the recorded participations of a group order, oldest first.
    pub async fn list_participants(&self, id: &str) -> Result<Vec<Participation>, AppError> {
        let rows = sqlx::query(
            "SELECT group_order_id, user_email, quantity, joined_at FROM group_order_participants WHERE group_order_id = ? ORDER BY joined_at, rowid",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .iter()
            .map(|row| Participation {
                group_order_id: row.get("group_order_id"),
                user_email: row.get("user_email"),
                quantity: row.get("quantity"),
                joined_at: row.get("joined_at"),
            })
            .collect())
    }

    // ==================== SUPPLIER OPERATIONS ====================

    /// List suppliers matching the filter, in the filter's order.
    pub async fn list_suppliers(&self, filter: &SupplierFilter) -> Result<Vec<Supplier>, AppError> {
        let sql = format!("SELECT {} FROM suppliers ORDER BY id", SUPPLIER_COLUMNS);
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        let suppliers = rows.iter().map(supplier_from_row).collect();
        Ok(filter.apply(suppliers))
    }

    /// Get a supplier by ID.
    pub async fn get_supplier(&self, id: i64) -> Result<Option<Supplier>, AppError> {
        let sql = format!("SELECT {} FROM suppliers WHERE id = ?", SUPPLIER_COLUMNS);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(supplier_from_row))
    }

    async fn insert_supplier(&self, supplier: &Supplier) -> Result<(), AppError> {
        let specialties_json = serde_json::to_string(&supplier.specialties)?;
        let products_json = serde_json::to_string(&supplier.products)?;

        sqlx::query(
            r#"INSERT INTO suppliers (
                id, name, category, location, distance, rating, reviews, delivery_time,
                min_order, verified, image, specialties, contact, description, products
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(supplier.id)
        .bind(&supplier.name)
        .bind(&supplier.category)
        .bind(&supplier.location)
        .bind(&supplier.distance)
        .bind(supplier.rating)
        .bind(supplier.reviews)
        .bind(&supplier.delivery_time)
        .bind(&supplier.min_order)
        .bind(supplier.verified as i32)
        .bind(&supplier.image)
        .bind(&specialties_json)
        .bind(&supplier.contact)
        .bind(&supplier.description)
        .bind(&products_json)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record a vendor's message to a supplier.
    pub async fn create_supplier_contact(
        &self,
        supplier_id: i64,
        user_email: &str,
        message: &str,
    ) -> Result<SupplierContact, AppError> {
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();

        sqlx::query(
            "INSERT INTO supplier_contacts (id, supplier_id, user_email, message, created_at) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(supplier_id)
        .bind(user_email)
        .bind(message)
        .bind(&now)
        .execute(&self.pool)
        .await?;

        Ok(SupplierContact {
            id,
            supplier_id,
            user_email: user_email.to_string(),
            message: message.to_string(),
            created_at: now,
        })
    }

    // ==================== NOTIFICATION OPERATIONS ====================

    /// List notifications, newest first.
    pub async fn list_notifications(&self) -> Result<Vec<Notification>, AppError> {
        let rows = sqlx::query(
            "SELECT id, title, message, timestamp, read, kind FROM notifications ORDER BY timestamp DESC, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(notification_from_row).collect())
    }

    /// Mark one notification read. Returns `None` for an unknown id.
    pub async fn mark_notification_read(&self, id: &str) -> Result<Option<Notification>, AppError> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        let row = sqlx::query(
            "SELECT id, title, message, timestamp, read, kind FROM notifications WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(notification_from_row))
    }

    /// Mark every notification read and return the inbox.
    pub async fn mark_all_notifications_read(&self) -> Result<Vec<Notification>, AppError> {
        let result = sqlx::query("UPDATE notifications SET read = 1 WHERE read = 0")
            .execute(&self.pool)
            .await?;
        tracing::debug!("Marked {} notifications read", result.rows_affected());

        self.list_notifications().await
    }

    async fn insert_notification(&self, notification: &Notification) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO notifications (id, title, message, timestamp, read, kind) VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&notification.id)
        .bind(&notification.title)
        .bind(&notification.message)
        .bind(&notification.timestamp)
        .bind(notification.read as i32)
        .bind(notification.kind.as_str())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // ==================== USER OPERATIONS ====================

    /// Look up an account and its credentials by email (case-insensitive).
    pub async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> Result<Option<UserCredentials>, AppError> {
        let row = sqlx::query(
            "SELECT id, email, name, user_type, avatar, password_salt, password_hash FROM users WHERE lower(email) = lower(?)",
        )
        .bind(email.trim())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(|row| UserCredentials {
            user: user_from_row(row),
            password_salt: row.get("password_salt"),
            password_hash: row.get("password_hash"),
        }))
    }

    /// Get an account by ID.
    pub async fn get_user(&self, id: &str) -> Result<Option<User>, AppError> {
        let row = sqlx::query("SELECT id, email, name, user_type, avatar FROM users WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    /// Store an account with a freshly salted password hash.
    pub async fn insert_user(&self, user: &User, password: &str) -> Result<(), AppError> {
        let salt = uuid::Uuid::new_v4().simple().to_string();
        let hash = hash_password(&salt, password);

        sqlx::query(
            "INSERT INTO users (id, email, name, user_type, avatar, password_salt, password_hash) VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.name)
        .bind(user.user_type.as_str())
        .bind(&user.avatar)
        .bind(&salt)
        .bind(&hash)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

// Helper functions for row conversion

fn group_order_from_row(row: &SqliteRow) -> GroupOrder {
    let status: String = row.get("status");
    let products: String = row.get("products");
    GroupOrder {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        category: row.get("category"),
        organizer: row.get("organizer"),
        organizer_rating: row.get("organizer_rating"),
        current_participants: row.get("current_participants"),
        max_participants: row.get("max_participants"),
        min_order: row.get("min_order"),
        current_total: row.get("current_total"),
        target_amount: row.get("target_amount"),
        savings: row.get("savings"),
        deadline: row.get("deadline"),
        delivery_date: row.get("delivery_date"),
        location: row.get("location"),
        // An unrecognized status must never accept joins
        status: OrderStatus::parse(&status).unwrap_or(OrderStatus::Closed),
        image: row.get("image"),
        products: parse_json_array(&products),
        price_per_unit: row.get("price_per_unit"),
        unit: row.get("unit"),
        version: row.get("version"),
    }
}

fn supplier_from_row(row: &SqliteRow) -> Supplier {
    let verified: i32 = row.get("verified");
    let specialties: String = row.get("specialties");
    let products: String = row.get("products");
    Supplier {
        id: row.get("id"),
        name: row.get("name"),
        category: row.get("category"),
        location: row.get("location"),
        distance: row.get("distance"),
        rating: row.get("rating"),
        reviews: row.get("reviews"),
        delivery_time: row.get("delivery_time"),
        min_order: row.get("min_order"),
        verified: verified != 0,
        image: row.get("image"),
        specialties: parse_json_array(&specialties),
        contact: row.get("contact"),
        description: row.get("description"),
        products: parse_json_array(&products),
    }
}

fn notification_from_row(row: &SqliteRow) -> Notification {
    let read: i32 = row.get("read");
    let kind: String = row.get("kind");
    Notification {
        id: row.get("id"),
        title: row.get("title"),
        message: row.get("message"),
        timestamp: row.get("timestamp"),
        read: read != 0,
        kind: NotificationKind::parse(&kind).unwrap_or(NotificationKind::Info),
    }
}

fn user_from_row(row: &SqliteRow) -> User {
    let user_type: String = row.get("user_type");
    User {
        id: row.get("id"),
        email: row.get("email"),
        name: row.get("name"),
        user_type: UserType::parse(&user_type).unwrap_or(UserType::Client),
        avatar: row.get("avatar"),
    }
}

fn parse_json_array(s: &str) -> Vec<String> {
    serde_json::from_str(s).unwrap_or_default()
}
