//! Food API
//!
//! Reads need a token; writes need the MANAGER capability.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/foods", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // GET reads it as a food id, POST as the acting manager's id
        .route("/{user_id}", get(handler::get_by_id).post(handler::create))
        .route(
            "/{user_id}/{food_id}",
            patch(handler::update).delete(handler::delete),
        )
}
