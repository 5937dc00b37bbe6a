//! Invoice API
//!
//! `GET /invoices/{invoice_id}` answers with the assembled payment view.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/invoices", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list).post(handler::create))
        .route(
            "/{invoice_id}",
            get(handler::view).patch(handler::update).delete(handler::delete),
        )
}
