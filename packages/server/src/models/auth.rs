use crate::error::AppError;
use serde::{Deserialize, Serialize};

/// Minimum pre-hash password length.
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Request body for user signup.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignupRequest {
    /// Unique email address of the new account.
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Password (at least 6 characters).
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_signup_request(payload: &SignupRequest) -> Result<(), AppError> {
    if !email_address::EmailAddress::is_valid(payload.email.trim()) {
        return Err(AppError::SchemaValidation);
    }
    if payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::SchemaValidation);
    }
    Ok(())
}

/// Request body for login.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct LoginRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "s3cure_P@ss!")]
    pub password: String,
}

pub fn validate_login_request(payload: &LoginRequest) -> Result<(), AppError> {
    if payload.email.trim().is_empty() || payload.password.is_empty() {
        return Err(AppError::SchemaValidation);
    }
    Ok(())
}

/// Request body for requesting a password-reset email.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ForgotPasswordRequest {
    #[schema(example = "alice@example.com")]
    pub email: String,
}

/// Request body for completing a password reset.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct ResetPasswordRequest {
    /// Token from the reset email.
    pub reset_token: String,
    /// New password (at least 6 characters).
    pub password: String,
}

pub fn validate_reset_password_request(payload: &ResetPasswordRequest) -> Result<(), AppError> {
    if payload.reset_token.is_empty() || payload.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::SchemaValidation);
    }
    Ok(())
}

/// Successful signup response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SignupResponse {
    /// ID of the newly created user.
    #[schema(example = 42)]
    pub id: i32,
}

/// Successful login response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    /// JWT bearer token valid for 7 days.
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
}

/// Current authenticated user's profile.
#[derive(Serialize, utoipa::ToSchema)]
pub struct MeResponse {
    #[schema(example = 42)]
    pub id: i32,
    #[schema(example = "alice@example.com")]
    pub email: String,
}
