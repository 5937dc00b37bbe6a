//! Restaurant Server - restaurant management backend
//!
//! # Overview
//!
//! - **Auth** (`auth`): JWT access/refresh tokens, argon2 passwords, MANAGER capability
//! - **Storage** (`db`): SQLite repositories with a per-operation time budget
//! - **Orders** (`orders`): order aggregation into billing summaries
//! - **Invoices** (`invoices`): payment views over aggregated orders
//! - **Pricing** (`pricing`): 2-decimal, half-away-from-zero money rounding
//! - **HTTP API** (`api`): REST routes
//!
//! # Layout
//!
//! ```text
//! restaurant-server/src/
//! ├── core/          # config, state, server, fatal errors
//! ├── auth/          # tokens, passwords, middleware, capability
//! ├── db/            # pool and repositories
//! ├── orders/        # aggregation engine
//! ├── invoices/      # invoice assembler
//! ├── pricing/       # money rounding
//! ├── api/           # routes and handlers
//! └── utils/         # logger, error re-exports
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod invoices;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use orders::OrderAggregator;
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ApiResponse, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
