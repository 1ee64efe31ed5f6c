
mod movie;
