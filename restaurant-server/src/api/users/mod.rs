//! User API
//!
//! Signup, login and refresh are public; listing needs a token.

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/users", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/signup", post(handler::signup))
        .route("/login", post(handler::login))
        .route("/refresh", post(handler::refresh))
        .route("/{user_id}", get(handler::get_by_id))
}
