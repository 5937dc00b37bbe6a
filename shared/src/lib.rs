//! Shared types for the restaurant backend
//!
//! Error system, entity models and request payloads used by the server
//! and by any client that speaks its API.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use http;
pub use serde::{Deserialize, Serialize};
