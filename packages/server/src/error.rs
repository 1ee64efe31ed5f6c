use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

/// Structured error response returned by all endpoints on failure.
///
/// The `status` field always matches the HTTP status code of the response.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Human-readable error description.
    #[schema(example = "Movie with given name already exists")]
    pub message: String,
    /// HTTP status of the response, repeated in the body.
    #[schema(example = 400)]
    pub status: u16,
}

/// Application-level error type.
///
/// This is the closed taxonomy of failures the API exposes; anything not
/// classified below must be coerced to `Internal` before it reaches the
/// client.
#[derive(Debug)]
pub enum AppError {
    SchemaValidation,
    MovieAlreadyExists,
    MovieNotExists,
    UpdatingMovie,
    DeletingMovie,
    EmailAlreadyExists,
    EmailDoesNotExist,
    Unauthorized,
    BadToken,
    TokenExpired,
    Internal(String),
}

impl AppError {
    fn status_and_message(&self) -> (StatusCode, &'static str) {
        match self {
            AppError::SchemaValidation => {
                (StatusCode::BAD_REQUEST, "Request is missing required fields")
            }
            AppError::MovieAlreadyExists => {
                (StatusCode::BAD_REQUEST, "Movie with given name already exists")
            }
            AppError::MovieNotExists => {
                (StatusCode::BAD_REQUEST, "Movie with given id doesn't exist")
            }
            AppError::UpdatingMovie => (
                StatusCode::FORBIDDEN,
                "Updating movie added by other is forbidden",
            ),
            AppError::DeletingMovie => (
                StatusCode::FORBIDDEN,
                "Deleting movie added by other is forbidden",
            ),
            AppError::EmailAlreadyExists => (
                StatusCode::BAD_REQUEST,
                "User with given email address already exists",
            ),
            AppError::EmailDoesNotExist => (
                StatusCode::BAD_REQUEST,
                "Couldn't find the user with given email address",
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "Invalid email or password"),
            AppError::BadToken => (StatusCode::FORBIDDEN, "Invalid token"),
            AppError::TokenExpired => (StatusCode::UNAUTHORIZED, "Token expired"),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = self.status_and_message();
        let body = ErrorBody {
            message: message.to_string(),
            status: status.as_u16(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}
