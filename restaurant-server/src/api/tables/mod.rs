//! Dining Table API

pub(crate) mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/tables", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // GET reads it as a table id, POST as the acting manager's id
        .route("/{user_id}", get(handler::get_by_id).post(handler::create))
        .route(
            "/{user_id}/{table_id}",
            patch(handler::update).delete(handler::delete),
        )
}
