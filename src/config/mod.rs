//! Configuration module for the VendorLink backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use chrono::{Duration, Utc};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text
    pub log_json: bool,
    /// HMAC secret for signing access tokens. `None` means a random secret is generated per process.
    pub jwt_secret: Option<String>,
    /// Issuer claim written into and required from access tokens
    pub jwt_issuer: String,
    /// Access token lifetime in hours
    pub token_ttl_hours: i64,
    /// Seed the demo catalog, suppliers, notifications and users into an empty database
    pub seed_demo_data: bool,
    /// Message returned by `/api/ping`
    pub ping_message: String,
}

/// Error raised when an environment variable holds a malformed value.
#[derive(Debug)]
pub struct ConfigError {
    pub key: &'static str,
    pub message: String,
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.key, self.message)
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let db_path = env::var("VENDORLINK_DB_PATH")
            .unwrap_or_else(|_| "./data/vendorlink.sqlite".to_string())
            .into();

        let bind_addr = env::var("VENDORLINK_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError {
                key: "VENDORLINK_BIND_ADDR",
                message: e.to_string(),
            })?;

        let log_level = env::var("VENDORLINK_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let log_json = parse_bool("VENDORLINK_LOG_JSON", false)?;

        let jwt_secret = env::var("VENDORLINK_JWT_SECRET")
            .ok()
            .filter(|s| !s.trim().is_empty());
        let jwt_issuer =
            env::var("VENDORLINK_JWT_ISSUER").unwrap_or_else(|_| "vendorlink".to_string());

        let token_ttl_hours = match env::var("VENDORLINK_TOKEN_TTL_HOURS") {
            Ok(raw) => parse_ttl_hours(&raw)?,
            Err(_) => 24,
        };

        let seed_demo_data = parse_bool("VENDORLINK_SEED_DEMO_DATA", true)?;
        let ping_message = env::var("PING_MESSAGE").unwrap_or_else(|_| "ping".to_string());

        Ok(Self {
            db_path,
            bind_addr,
            log_level,
            log_json,
            jwt_secret,
            jwt_issuer,
            token_ttl_hours,
            seed_demo_data,
            ping_message,
        })
    }
}

/// Token lifetime must be positive and keep `now + ttl` within chrono's range.
fn parse_ttl_hours(raw: &str) -> Result<i64, ConfigError> {
    let invalid = || ConfigError {
        key: "VENDORLINK_TOKEN_TTL_HOURS",
        message: format!("expected a positive number of hours, got {:?}", raw),
    };

    let hours = raw.trim().parse::<i64>().map_err(|_| invalid())?;
    if hours <= 0 {
        return Err(invalid());
    }

    let ttl = Duration::try_hours(hours).ok_or_else(|| ConfigError {
        key: "VENDORLINK_TOKEN_TTL_HOURS",
        message: format!("{} hours is out of range", hours),
    })?;
    if Utc::now().checked_add_signed(ttl).is_none() {
        return Err(ConfigError {
            key: "VENDORLINK_TOKEN_TTL_HOURS",
            message: format!("{} hours is out of range", hours),
        });
    }

    Ok(hours)
}

fn parse_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    let Ok(raw) = env::var(key) else {
        return Ok(default);
    };

    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError {
            key,
            message: format!("expected a boolean, got {:?}", other),
        }),
    }
}
