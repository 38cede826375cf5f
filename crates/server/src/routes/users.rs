//! Account route handlers: register, login, profile.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use bookstall_core::UserId;

use super::SuccessResponse;
use crate::db::UserRepository;
use crate::error::{AppError, Result};
use crate::models::UserProfile;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub mobile: String,
    pub nationality: String,
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Profile fetch request body.
#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub id: i64,
}

/// `{success:true, user}` response for login and profile.
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: UserProfile,
}

/// Create an account.
///
/// POST /api/register
///
/// All five fields are required and must be non-empty after trimming; the
/// email must be structurally valid. Any insert error, including a duplicate
/// email rejected by the store's UNIQUE constraint, surfaces as a 500.
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<SuccessResponse>)> {
    require_non_empty(&[
        ("name", &req.name),
        ("email", &req.email),
        ("password", &req.password),
        ("mobile", &req.mobile),
        ("nationality", &req.nationality),
    ])?;

    let auth = AuthService::new(state.pool());
    auth.register(
        req.name.trim(),
        req.email.trim(),
        &req.password,
        req.mobile.trim(),
        req.nationality.trim(),
    )
    .await
    .map_err(|e| match e {
        AuthError::InvalidEmail(err) => AppError::Validation(format!("Invalid email: {err}")),
        other => AppError::operation("Registration failed.", &other),
    })?;

    Ok((StatusCode::CREATED, Json(SuccessResponse::OK)))
}

/// Email/password login.
///
/// POST /api/login
///
/// Returns the restricted user projection on success; the caller persists
/// the returned `ID` client-side. No server-side session is issued.
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<UserResponse>> {
    let auth = AuthService::new(state.pool());
    let user = auth
        .login(req.email.trim(), &req.password)
        .await
        .map_err(|e| match e {
            AuthError::InvalidCredentials => AppError::InvalidCredentials,
            other => AppError::operation_opaque("Login failed", &other),
        })?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Fetch the restricted user projection by id.
///
/// POST /api/profile
///
/// The projection never includes the password hash. An unknown id is a 404.
pub async fn profile(
    State(state): State<AppState>,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<UserResponse>> {
    let users = UserRepository::new(state.pool());
    let user = users
        .get_profile(UserId::new(req.id))
        .await
        .map_err(|e| AppError::operation_opaque("Profile lookup failed", &e))?
        .ok_or(AppError::UserNotFound)?;

    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// Reject the request with a field-specific 400 if any value is empty after
/// trimming.
fn require_non_empty(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("Missing field: {name}")));
        }
    }
    Ok(())
}
