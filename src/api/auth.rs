//! Authentication API endpoints.

use axum::{extract::State, Extension};

use super::{success, ApiResponse, ApiResult, AppJson};
use crate::auth::{verify_password, Claims};
use crate::errors::AppError;
use crate::models::{LoginRequest, LoginResponse, User};
use crate::AppState;

/// POST /api/auth/login - Exchange email and password for an access token.
pub async fn login(
    State(state): State<AppState>,
    AppJson(request): AppJson<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let email = request
        .email
        .as_deref()
        .map(str::trim)
        .filter(|e| !e.is_empty());
    let password = request.password.as_deref().filter(|p| !p.is_empty());

    let (Some(email), Some(password)) = (email, password) else {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    };

    let invalid = || AppError::Unauthorized("Invalid email or password".to_string());

    let Some(credentials) = state.repo.find_credentials_by_email(email).await? else {
        tracing::info!("Login failed for unknown account");
        return Err(invalid());
    };

    if !verify_password(
        &credentials.password_salt,
        password,
        &credentials.password_hash,
    ) {
        tracing::info!("Login failed for user {}", credentials.user.id);
        return Err(invalid());
    }

    let token = state.jwt.issue(&credentials.user)?;
    tracing::info!("User {} logged in", credentials.user.id);

    Ok(ApiResponse::new(LoginResponse {
        user: credentials.user,
        token,
    })
    .with_message("Login successful"))
}

/// GET /api/auth/profile - Return the account behind the bearer token.
pub async fn profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<User> {
    match state.repo.get_user(&claims.sub).await? {
        Some(user) => success(user),
        // Token outlived its account
        None => Err(AppError::Unauthorized("Invalid token".to_string())),
    }
}

/// POST /api/auth/logout - Tokens are stateless; the client discards its copy.
pub async fn logout() -> ApiResult<()> {
    Ok(ApiResponse::new(()).with_message("Logged out successfully"))
}
