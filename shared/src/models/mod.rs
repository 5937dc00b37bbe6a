//! Data models
//!
//! Shared between restaurant-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! Every entity is addressed by a public `id` string; the store's internal
//! row id never leaves the database layer.

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod pagination;
pub mod table;
pub mod user;

// Re-exports
pub use food::*;
pub use invoice::*;
pub use menu::*;
pub use order::*;
pub use order_item::*;
pub use pagination::*;
pub use table::*;
pub use user::*;
