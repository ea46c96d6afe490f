//! VendorLink Backend
//!
//! REST backend for a marketplace connecting street-food vendors with local suppliers,
//! with SQLite persistence and signed access tokens.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod filter;
mod models;
mod workflow;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use auth::JwtService;
use config::Config;
use db::Repository;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub jwt: JwtService,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    tracing::info!("Starting VendorLink Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Token issuer: {}", config.jwt_issuer);

    let secret = match &config.jwt_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!(
                "No token secret configured (VENDORLINK_JWT_SECRET). Using a random secret; tokens will not survive a restart!"
            );
            format!(
                "{}{}",
                uuid::Uuid::new_v4().simple(),
                uuid::Uuid::new_v4().simple()
            )
        }
    };
    let jwt = JwtService::new(&secret, config.jwt_issuer.clone(), config.token_ttl_hours);

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    if config.seed_demo_data {
        repo.seed_demo_data().await?;
    }

    // Create application state
    let state = AppState {
        repo,
        jwt,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone the token service for the auth layer
    let jwt = state.jwt.clone();

    // Routes that require a bearer token
    let protected_routes = Router::new()
        .route("/auth/profile", get(api::profile))
        .layer(middleware::from_fn(move |req, next| {
            auth::bearer_auth_layer(jwt.clone(), req, next)
        }));

    // API routes
    let api_routes = Router::new()
        .route("/ping", get(api::ping))
        // Group orders
        .route(
            "/group-orders",
            get(api::list_group_orders).post(api::create_group_order),
        )
        .route("/group-orders/{id}", get(api::get_group_order))
        .route(
            "/group-orders/{id}/participants",
            get(api::list_group_order_participants),
        )
        .route("/group-orders/{id}/join", post(api::join_group_order))
        // Suppliers
        .route("/suppliers", get(api::list_suppliers))
        .route("/suppliers/contact", post(api::contact_supplier))
        .route("/suppliers/{id}", get(api::get_supplier))
        // Notifications
        .route("/notifications", get(api::list_notifications))
        .route(
            "/notifications/mark-all-read",
            put(api::mark_all_notifications_read),
        )
        .route("/notifications/{id}/read", put(api::mark_notification_read))
        // Authentication
        .route("/auth/login", post(api::login))
        .route("/auth/logout", post(api::logout))
        .merge(protected_routes);

    // Health check
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
