//! Database module for SQLite persistence.
//!
//! SQLite is the source of truth for listings, suppliers, notifications and accounts.

mod repository;
pub mod seed;

pub use repository::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::str::FromStr;

/// Initialize the database connection pool and run migrations.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool, sqlx::Error> {
    // Ensure the parent directory exists
    if let Some(parent) = db_path.parent() {
        tokio::fs::create_dir_all(parent).await.ok();
    }

    let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

    let options = SqliteConnectOptions::from_str(&db_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    // Run embedded migrations
    run_migrations(&pool).await?;

    Ok(pool)
}

/// Run database migrations.
async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_orders (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            description TEXT NOT NULL,
            category TEXT NOT NULL,
            organizer TEXT NOT NULL,
            organizer_rating REAL NOT NULL,
            current_participants INTEGER NOT NULL,
            max_participants INTEGER NOT NULL,
            min_order INTEGER NOT NULL,
            current_total INTEGER NOT NULL,
            target_amount INTEGER NOT NULL,
            savings INTEGER NOT NULL,
            deadline TEXT NOT NULL,
            delivery_date TEXT NOT NULL,
            location TEXT NOT NULL,
            status TEXT NOT NULL,
            image TEXT NOT NULL,
            products TEXT NOT NULL,
            price_per_unit REAL NOT NULL,
            unit TEXT NOT NULL,
            version INTEGER NOT NULL DEFAULT 1,
            CHECK (current_participants <= max_participants)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS group_order_participants (
            group_order_id TEXT NOT NULL REFERENCES group_orders(id) ON DELETE CASCADE,
            user_email TEXT NOT NULL,
            quantity INTEGER NOT NULL,
            joined_at TEXT NOT NULL,
            PRIMARY KEY (group_order_id, user_email)
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS suppliers (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL,
            location TEXT NOT NULL,
            distance TEXT NOT NULL,
            rating REAL NOT NULL,
            reviews INTEGER NOT NULL,
            delivery_time TEXT NOT NULL,
            min_order TEXT NOT NULL,
            verified INTEGER NOT NULL DEFAULT 0,
            image TEXT NOT NULL,
            specialties TEXT NOT NULL,
            contact TEXT NOT NULL,
            description TEXT NOT NULL,
            products TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS supplier_contacts (
            id TEXT PRIMARY KEY,
            supplier_id INTEGER NOT NULL REFERENCES suppliers(id) ON DELETE CASCADE,
            user_email TEXT NOT NULL,
            message TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS notifications (
            id TEXT PRIMARY KEY,
            title TEXT NOT NULL,
            message TEXT NOT NULL,
            timestamp TEXT NOT NULL,
            read INTEGER NOT NULL DEFAULT 0,
            kind TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id TEXT PRIMARY KEY,
            email TEXT NOT NULL UNIQUE,
            name TEXT NOT NULL,
            user_type TEXT NOT NULL,
            avatar TEXT,
            password_salt TEXT NOT NULL,
            password_hash TEXT NOT NULL
        );
        "#,
    )
    .execute(pool)
    .await?;

    // Create indexes for common queries
    sqlx::query(
        r#"
        CREATE INDEX IF NOT EXISTS idx_group_orders_category ON group_orders(category);
        CREATE INDEX IF NOT EXISTS idx_group_orders_status ON group_orders(status);
        CREATE INDEX IF NOT EXISTS idx_suppliers_category ON suppliers(category);
        CREATE INDEX IF NOT EXISTS idx_notifications_timestamp ON notifications(timestamp);
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}
