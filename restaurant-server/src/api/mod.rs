//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness
//! - [`users`] - signup, login, refresh and user listing
//! - [`foods`] - food items
//! - [`menus`] - menus and their active window
//! - [`tables`] - dining tables
//! - [`orders`] - orders and their billing summary
//! - [`order_items`] - order items and order submission
//! - [`invoices`] - invoices and payment views
//!
//! Every route except `/health`, `/users/signup`, `/users/login` and
//! `/users/refresh` requires an access token. Routes carrying `{user_id}`
//! are MANAGER-only.

pub mod foods;
pub mod health;
pub mod invoices;
pub mod menus;
pub mod order_items;
pub mod orders;
pub mod tables;
pub mod users;

use std::time::Duration;

use axum::{Router, middleware};
use http::Method;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Browsers may cache a preflight for this long
const CORS_MAX_AGE: Duration = Duration::from_secs(12 * 60 * 60);

/// Build the Axum router (without state)
pub fn build_router() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(users::router())
        .merge(foods::router())
        .merge(menus::router())
        .merge(tables::router())
        .merge(orders::router())
        .merge(order_items::router())
        .merge(invoices::router())
}

/// Build the fully configured application: routes, authentication, tracing and CORS
pub fn build_app(state: ServerState) -> Router {
    build_router()
        // require_auth skips the public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::HEAD,
        ])
        .allow_headers(Any)
        .expose_headers(Any)
        .max_age(CORS_MAX_AGE)
}
