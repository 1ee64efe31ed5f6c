use axum::{
    Router,
    routing::{get, post},
};

use crate::handlers;
use crate::state::AppState;

pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/movies", movie_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(handlers::auth::signup))
        .route("/login", post(handlers::auth::login))
        .route("/forgot", post(handlers::auth::forgot_password))
        .route("/reset", post(handlers::auth::reset_password))
        .route(
            "/me",
            get(handlers::auth::me).delete(handlers::auth::delete_account),
        )
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::movie::list_movies).post(handlers::movie::create_movie),
        )
        .route(
            "/{id}",
            get(handlers::movie::get_movie)
                .put(handlers::movie::update_movie)
                .delete(handlers::movie::delete_movie),
        )
}
