//! Menu Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Menu entity. `start_date`/`end_date` bound the active window (Unix millis).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Menu {
    pub id: String,
    pub name: String,
    pub category: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create menu payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct MenuCreate {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(length(min = 1, max = 100))]
    pub category: String,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

/// Update menu payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct MenuUpdate {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100))]
    pub category: Option<String>,
    pub start_date: Option<i64>,
    pub end_date: Option<i64>,
}

impl MenuUpdate {
    /// Whether this update touches the active window
    pub fn touches_window(&self) -> bool {
        self.start_date.is_some() || self.end_date.is_some()
    }
}
