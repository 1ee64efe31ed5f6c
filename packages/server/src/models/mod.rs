pub mod auth;
pub mod movie;
