//! Authentication routes for signup and login.

use axum::{Json, Router, extract::State, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::json;
use tracing::{error, info};

use crate::AppState;
use crate::extractors::ApiJson;
use finboard_core::auth::{email_is_valid, hash_password, password_meets_policy, verify_password};
use finboard_db::{UserRepository, repositories::UserError};
use finboard_shared::auth::{LoginRequest, LoginResponse, SignupRequest};

/// Creates the auth router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
}

/// POST /auth/signup - Register a new account.
async fn signup(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> impl IntoResponse {
    let email = payload.email.trim();

    if !email_is_valid(email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_email",
                "message": "A valid email address is required"
            })),
        )
            .into_response();
    }

    if !password_meets_policy(&payload.password) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_password",
                "message": "Password must be at least 6 characters"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    // Check if email already exists
    match user_repo.find_by_email(email).await {
        Ok(Some(_)) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Ok(None) => {}
        Err(e) => {
            error!(error = %e, "Database error checking email");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during signup"
                })),
            )
                .into_response();
        }
    }

    // Hash password on the blocking pool; argon2 is CPU-bound
    let params = state.hashing;
    let password = payload.password.clone();
    let password_hash =
        match tokio::task::spawn_blocking(move || hash_password(&password, params)).await {
            Ok(Ok(h)) => h,
            Ok(Err(e)) => {
                error!(error = %e, "Failed to hash password");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred during signup"
                    })),
                )
                    .into_response();
            }
            Err(e) => {
                error!(error = %e, "Hashing task failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred during signup"
                    })),
                )
                    .into_response();
            }
        };

    // Create user; a unique-violation here means a signup raced the
    // pre-check above, so it maps to the same conflict response
    let user = match user_repo.create(email, &password_hash).await {
        Ok(u) => u,
        Err(UserError::EmailTaken) => {
            return (
                StatusCode::CONFLICT,
                Json(json!({
                    "error": "email_exists",
                    "message": "An account with this email already exists"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Failed to create user");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during signup"
                })),
            )
                .into_response();
        }
    };

    info!(user_id = %user.id, email = %user.email, "New user registered");

    (
        StatusCode::CREATED,
        Json(json!({
            "message": "Account created successfully"
        })),
    )
        .into_response()
}

/// POST /auth/login - Authenticate and return a bearer token.
async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> impl IntoResponse {
    let email = payload.email.trim();

    if !email_is_valid(email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_email",
                "message": "A valid email address is required"
            })),
        )
            .into_response();
    }

    if payload.password.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "invalid_password",
                "message": "Password is required"
            })),
        )
            .into_response();
    }

    let user_repo = UserRepository::new((*state.db).clone());

    // Find user by email
    let user = match user_repo.find_by_email(email).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            info!(email = %email, "Login attempt for non-existent user");
            return (
                StatusCode::UNAUTHORIZED,
                Json(json!({
                    "error": "invalid_credentials",
                    "message": "Invalid email or password"
                })),
            )
                .into_response();
        }
        Err(e) => {
            error!(error = %e, "Database error during login");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    // Verify password on the blocking pool
    let password = payload.password.clone();
    let stored_hash = user.password_hash.clone();
    let verified =
        match tokio::task::spawn_blocking(move || verify_password(&password, &stored_hash)).await {
            Ok(v) => v,
            Err(e) => {
                error!(error = %e, "Verification task failed");
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "internal_error",
                        "message": "An error occurred during login"
                    })),
                )
                    .into_response();
            }
        };

    // Same body as the unknown-email branch: responses never reveal
    // whether the account exists
    if !verified {
        info!(user_id = %user.id, "Failed login attempt - invalid password");
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "error": "invalid_credentials",
                "message": "Invalid email or password"
            })),
        )
            .into_response();
    }

    let token = match state.jwt_service.issue(user.id, &user.email) {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "Failed to issue token");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({
                    "error": "internal_error",
                    "message": "An error occurred during login"
                })),
            )
                .into_response();
        }
    };

    info!(user_id = %user.id, "User logged in successfully");

    (StatusCode::OK, Json(LoginResponse { token })).into_response()
}
