//! Order Item API
//!
//! `POST /order-items` submits a whole order: the order is created
//! implicitly and the items are stored under it.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/order-items", get(handler::list).post(handler::create))
        .route(
            "/order-items/{order_item_id}",
            get(handler::get_by_id).patch(handler::update),
        )
        .route("/order-items-order/{order_id}", get(handler::by_order))
}
