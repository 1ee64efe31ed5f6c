use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use sea_orm::*;
use tracing::instrument;

use crate::entity::{movie, user};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AuthUser;
use crate::extractors::json::AppJson;
use crate::models::movie::{
    CreateMovieRequest, CreatedResponse, MovieResponse, UpdateMovieRequest, validate_create_movie,
    validate_update_movie,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/movies",
    tag = "Movies",
    operation_id = "listMovies",
    summary = "List all movies",
    responses(
        (status = 200, description = "All movies", body = Vec<MovieResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_movies(
    State(state): State<AppState>,
) -> Result<Json<Vec<MovieResponse>>, AppError> {
    let movies = movie::Entity::find()
        .order_by_asc(movie::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(movies.into_iter().map(MovieResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    tag = "Movies",
    operation_id = "getMovie",
    summary = "Get a movie by ID",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie details", body = MovieResponse),
        (status = 400, description = "No movie with that id", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_movie(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<MovieResponse>, AppError> {
    let model = movie::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or(AppError::MovieNotExists)?;

    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/api/movies",
    tag = "Movies",
    operation_id = "createMovie",
    summary = "Add a new movie",
    request_body = CreateMovieRequest,
    responses(
        (status = 200, description = "Movie created", body = CreatedResponse),
        (status = 400, description = "Invalid body or duplicate name", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(name = %payload.name))]
pub async fn create_movie(
    auth_user: AuthUser,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateMovieRequest>,
) -> Result<Json<CreatedResponse>, AppError> {
    validate_create_movie(&payload)?;

    // The token may outlive its account; reject before touching the table.
    let user = user::Entity::find_by_id(auth_user.user_id)
        .one(&state.db)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let new_movie = movie::ActiveModel {
        name: Set(payload.name.trim().to_string()),
        casts: Set(serde_json::json!(payload.casts)),
        genres: Set(serde_json::json!(payload.genres)),
        added_by: Set(Some(user.id)),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_movie.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::MovieAlreadyExists,
        _ => AppError::from(e),
    })?;

    Ok(Json(CreatedResponse { id: model.id }))
}

#[utoipa::path(
    put,
    path = "/api/movies/{id}",
    tag = "Movies",
    operation_id = "updateMovie",
    summary = "Update a movie you added",
    description = "Partial update: only provided fields are modified. Fails unless the movie exists and is owned by the caller.",
    params(("id" = i32, Path, description = "Movie ID")),
    request_body = UpdateMovieRequest,
    responses(
        (status = 200, description = "Movie updated"),
        (status = 400, description = "Invalid body", body = ErrorBody),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the owner, or no such movie", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user, payload), fields(id))]
pub async fn update_movie(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    AppJson(payload): AppJson<UpdateMovieRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_update_movie(&payload)?;

    let txn = state.db.begin().await?;

    // A missing movie and somebody else's movie are the same failure here.
    let existing = movie::Entity::find_by_id(id)
        .filter(movie::Column::AddedBy.eq(auth_user.user_id))
        .one(&txn)
        .await?
        .ok_or(AppError::UpdatingMovie)?;

    if payload == UpdateMovieRequest::default() {
        return Ok(StatusCode::OK);
    }

    let mut active: movie::ActiveModel = existing.into();
    if let Some(ref name) = payload.name {
        active.name = Set(name.trim().to_string());
    }
    if let Some(casts) = payload.casts {
        active.casts = Set(serde_json::json!(casts));
    }
    if let Some(genres) = payload.genres {
        active.genres = Set(serde_json::json!(genres));
    }

    active.update(&txn).await?;
    txn.commit().await?;

    Ok(StatusCode::OK)
}

#[utoipa::path(
    delete,
    path = "/api/movies/{id}",
    tag = "Movies",
    operation_id = "deleteMovie",
    summary = "Delete a movie you added",
    params(("id" = i32, Path, description = "Movie ID")),
    responses(
        (status = 200, description = "Movie deleted"),
        (status = 401, description = "Missing or invalid token", body = ErrorBody),
        (status = 403, description = "Not the owner, or no such movie", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(state, auth_user), fields(id))]
pub async fn delete_movie(
    auth_user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let result = movie::Entity::delete_many()
        .filter(movie::Column::Id.eq(id))
        .filter(movie::Column::AddedBy.eq(auth_user.user_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::DeletingMovie);
    }

    Ok(StatusCode::OK)
}
