//! Repository Module
//!
//! One repository object per entity, constructed once and bundled into
//! [`Repositories`]. Every call runs through [`DbService::bounded`].

pub mod food;
pub mod invoice;
pub mod menu;
pub mod order;
pub mod order_item;
pub mod table;
pub mod user;

pub use food::FoodRepository;
pub use invoice::InvoiceRepository;
pub use menu::MenuRepository;
pub use order::OrderRepository;
pub use order_item::OrderItemRepository;
pub use table::TableRepository;
pub use user::UserRepository;

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

use super::DbService;
use crate::pricing::PricingError;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Timed out: {0}")]
    Timeout(String),
}

impl From<sqlx::Error> for RepoError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                return RepoError::Duplicate(db_err.message().to_string());
            }
            if db_err.is_foreign_key_violation() {
                return RepoError::Validation(
                    "Record references a missing record or is still referenced".to_string(),
                );
            }
        }
        RepoError::Database(err.to_string())
    }
}

impl From<PricingError> for RepoError {
    fn from(err: PricingError) -> Self {
        RepoError::Validation(err.to_string())
    }
}

impl RepoError {
    /// Convert into an [`AppError`], reporting a missing record with `not_found`
    pub fn into_app(self, not_found: ErrorCode) -> AppError {
        match self {
            RepoError::NotFound(msg) => AppError::with_message(not_found, msg),
            RepoError::Duplicate(detail) => {
                // Constraint text names tables and columns; keep it in the log only
                tracing::debug!(detail = %detail, "Unique constraint rejected a write");
                AppError::conflict("Record already exists")
            }
            RepoError::Validation(msg) => AppError::validation(msg),
            RepoError::Timeout(op) => {
                AppError::timeout("Store operation timed out").with_detail("operation", op)
            }
            RepoError::Database(msg) => {
                // Logged here, reported generically
                tracing::error!(error = %msg, "Store operation failed");
                AppError::database("Database error")
            }
        }
    }
}

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        err.into_app(ErrorCode::NotFound)
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// All repositories, built once at startup and shared through `ServerState`
#[derive(Clone, Debug)]
pub struct Repositories {
    pub users: UserRepository,
    pub menus: MenuRepository,
    pub foods: FoodRepository,
    pub tables: TableRepository,
    pub orders: OrderRepository,
    pub order_items: OrderItemRepository,
    pub invoices: InvoiceRepository,
}

impl Repositories {
    pub fn new(db: DbService) -> Self {
        Self {
            users: UserRepository::new(db.clone()),
            menus: MenuRepository::new(db.clone()),
            foods: FoodRepository::new(db.clone()),
            tables: TableRepository::new(db.clone()),
            orders: OrderRepository::new(db.clone()),
            order_items: OrderItemRepository::new(db.clone()),
            invoices: InvoiceRepository::new(db),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http::StatusCode;

    #[test]
    fn test_into_app_codes() {
        let err = RepoError::NotFound("Food f1 not found".into()).into_app(ErrorCode::FoodNotFound);
        assert_eq!(err.code, ErrorCode::FoodNotFound);
        assert_eq!(err.message, "Food f1 not found");

        let err: AppError = RepoError::Duplicate("users.email".into()).into();
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.code, ErrorCode::AlreadyExists);

        let err: AppError = RepoError::Timeout("foods.find_by_id".into()).into();
        assert_eq!(err.code, ErrorCode::TimeoutError);
        assert_eq!(err.http_status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_database_error_is_not_leaked() {
        let err: AppError = RepoError::Database("no such table: secret_stuff".into()).into();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");
    }

    #[test]
    fn test_duplicate_hides_constraint_text() {
        let err: AppError =
            RepoError::Duplicate("UNIQUE constraint failed: users.email".into()).into();
        assert_eq!(err.message, "Record already exists");
        assert!(!err.message.contains("users"));
        assert!(err.details.is_none());
    }

    #[test]
    fn test_pricing_error_is_a_validation_failure() {
        let err: RepoError = PricingError::OutOfRange(1e30).into();
        assert!(matches!(err, RepoError::Validation(_)));
    }
}
