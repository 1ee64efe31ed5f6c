use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::Duration;
use sea_orm::*;
use tracing::instrument;

use crate::entity::{movie, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::mail::Email;
use crate::models::auth::{
    ForgotPasswordRequest, LoginRequest, LoginResponse, MeResponse, ResetPasswordRequest,
    SignupRequest, SignupResponse, validate_login_request, validate_reset_password_request,
    validate_signup_request,
};
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Login sessions last a week.
const LOGIN_TOKEN_TTL_DAYS: i64 = 7;
/// Password-reset grants are much shorter-lived.
const RESET_TOKEN_TTL_HOURS: i64 = 24;

#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = "Auth",
    operation_id = "signup",
    summary = "Create a new user account",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User created", body = SignupResponse),
        (status = 400, description = "Invalid body or email already registered", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn signup(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignupRequest>,
) -> Result<Json<SignupResponse>, AppError> {
    validate_signup_request(&payload)?;

    let email = payload.email.trim().to_string();

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let new_user = user::ActiveModel {
        email: Set(email),
        password: Set(hash),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let user = new_user.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::EmailAlreadyExists,
        _ => AppError::from(e),
    })?;

    Ok(Json(SignupResponse { id: user.id }))
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    operation_id = "login",
    summary = "Authenticate and receive a bearer token",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Authenticated", body = LoginResponse),
        (status = 401, description = "Unknown email or wrong password", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    validate_login_request(&payload)?;

    let email = payload.email.trim();

    // Unknown email and wrong password are deliberately indistinguishable.
    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let is_valid = hash::verify_password(&payload.password, &user.password)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;

    if !is_valid {
        return Err(AppError::Unauthorized);
    }

    let token = jwt::sign(
        user.id,
        &state.config.auth.jwt_secret,
        Duration::days(LOGIN_TOKEN_TTL_DAYS),
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    Ok(Json(LoginResponse { token }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Return the current authenticated user's profile",
    responses(
        (status = 200, description = "Current user", body = MeResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn me(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<MeResponse>, AppError> {
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    Ok(Json(MeResponse {
        id: user.id,
        email: user.email,
    }))
}

#[utoipa::path(
    delete,
    path = "/api/auth/me",
    tag = "Auth",
    operation_id = "deleteAccount",
    summary = "Delete the current user and every movie it owns",
    responses(
        (status = 200, description = "Account deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(user_id = auth_user.user_id))]
pub async fn delete_account(
    auth_user: AuthUser,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let txn = state.db.begin().await?;

    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&txn)
        .await?
        .ok_or(AppError::Unauthorized)?;

    // Owner deletion cascades to the owned movies.
    movie::Entity::delete_many()
        .filter(movie::Column::AddedBy.eq(user.id))
        .exec(&txn)
        .await?;
    user::Entity::delete_by_id(user.id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/auth/forgot",
    tag = "Auth",
    operation_id = "forgotPassword",
    summary = "Request a password-reset email",
    description = "Sends a reset link to the given address. The response does not reveal whether delivery succeeded.",
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset email dispatched"),
        (status = 400, description = "Missing email or no such user", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(email = %payload.email))]
pub async fn forgot_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ForgotPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = payload.email.trim();
    if email.is_empty() {
        return Err(AppError::SchemaValidation);
    }

    let user = user::Entity::find()
        .filter(user::Column::Email.eq(email))
        .one(&state.db)
        .await?
        .ok_or(AppError::EmailDoesNotExist)?;

    let reset_token = jwt::sign(
        user.id,
        &state.config.auth.jwt_secret,
        Duration::hours(RESET_TOKEN_TTL_HOURS),
    )
    .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    let reset_url = format!(
        "{}/reset/{}",
        state.config.server.public_url.trim_end_matches('/'),
        reset_token
    );

    state.mailer.send(Email {
        subject: "[Movie Bag] Reset Your Password".to_string(),
        recipient: user.email.clone(),
        text_body: format!(
            "To reset your password, visit the following link:\n\n{reset_url}\n\n\
             If you did not request a password reset, you can safely ignore this email."
        ),
        html_body: format!(
            "<p>To reset your password, click <a href=\"{reset_url}\">here</a>.</p>\
             <p>If you did not request a password reset, you can safely ignore this email.</p>"
        ),
    });

    Ok(StatusCode::OK)
}

#[utoipa::path(
    post,
    path = "/api/auth/reset",
    tag = "Auth",
    operation_id = "resetPassword",
    summary = "Set a new password using a reset token",
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password replaced, confirmation email dispatched"),
        (status = 400, description = "Missing fields", body = ErrorBody),
        (status = 401, description = "Reset token expired", body = ErrorBody),
        (status = 403, description = "Reset token invalid", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload))]
pub async fn reset_password(
    State(state): State<AppState>,
    AppJson(payload): AppJson<ResetPasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_reset_password_request(&payload)?;

    let claims = jwt::verify(&payload.reset_token, &state.config.auth.jwt_secret).map_err(|e| {
        match e {
            jwt::TokenError::Expired => AppError::TokenExpired,
            jwt::TokenError::Invalid => AppError::BadToken,
        }
    })?;

    let user = user::Entity::find_by_id(claims.uid)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Reset token for missing user {}", claims.uid)))?;

    let hash = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;

    let mut active: user::ActiveModel = user.clone().into();
    active.password = Set(hash);
    active.update(&state.db).await?;

    state.mailer.send(Email {
        subject: "[Movie Bag] Password reset successful".to_string(),
        recipient: user.email,
        text_body: "Password reset was successful".to_string(),
        html_body: "<p>Password reset was successful</p>".to_string(),
    });

    Ok(StatusCode::OK)
}
