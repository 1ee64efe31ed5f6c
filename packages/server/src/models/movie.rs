use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateMovieRequest {
    pub name: String,
    /// Cast members. May be empty, but must be present.
    pub casts: Vec<String>,
    /// Genres. May be empty, but must be present.
    pub genres: Vec<String>,
}

#[derive(Deserialize, Default, PartialEq, utoipa::ToSchema)]
pub struct UpdateMovieRequest {
    pub name: Option<String>,
    pub casts: Option<Vec<String>>,
    pub genres: Option<Vec<String>>,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct MovieResponse {
    pub id: i32,
    pub name: String,
    pub casts: Vec<String>,
    pub genres: Vec<String>,
    /// ID of the owning user.
    pub added_by: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// Response carrying the id of a newly created record.
#[derive(Serialize, utoipa::ToSchema)]
pub struct CreatedResponse {
    #[schema(example = 7)]
    pub id: i32,
}

impl From<crate::entity::movie::Model> for MovieResponse {
    fn from(m: crate::entity::movie::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            casts: string_list(m.casts),
            genres: string_list(m.genres),
            added_by: m.added_by,
            created_at: m.created_at,
        }
    }
}

/// Decode a JSON column holding an array of strings.
fn string_list(value: serde_json::Value) -> Vec<String> {
    serde_json::from_value(value).unwrap_or_default()
}

fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() || name.chars().count() > 256 {
        return Err(AppError::SchemaValidation);
    }
    Ok(())
}

pub fn validate_create_movie(req: &CreateMovieRequest) -> Result<(), AppError> {
    validate_name(&req.name)
}

pub fn validate_update_movie(req: &UpdateMovieRequest) -> Result<(), AppError> {
    if let Some(ref name) = req.name {
        validate_name(name)?;
    }
    Ok(())
}
