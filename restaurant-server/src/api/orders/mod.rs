//! Order API
//!
//! `GET /orders/{order_id}` answers with the order's billing summary.

mod handler;

use axum::{
    Router,
    routing::{get, patch},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/orders", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        // GET reads it as an order id, POST as the acting manager's id
        .route("/{user_id}", get(handler::summary).post(handler::create))
        .route(
            "/{user_id}/{order_id}",
            patch(handler::update).delete(handler::delete),
        )
}
