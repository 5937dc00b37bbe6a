//! Food Model

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Highest price a food or order item may carry
pub const MAX_PRICE: f64 = 1_000_000_000.0;

/// Food entity. `price` always carries at most 2 fractional digits once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Food {
    pub id: String,
    pub name: String,
    pub price: f64,
    pub food_image: String,
    pub menu_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create food payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct FoodCreate {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub price: f64,
    #[validate(length(min = 1, max = 2048))]
    pub food_image: String,
    #[validate(length(min = 1))]
    pub menu_id: String,
}

/// Update food payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct FoodUpdate {
    #[validate(length(min = 2, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub price: Option<f64>,
    #[validate(length(min = 1, max = 2048))]
    pub food_image: Option<String>,
    #[validate(length(min = 1))]
    pub menu_id: Option<String>,
}

/// Paginated food listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodPage {
    pub total_count: i64,
    pub food_items: Vec<Food>,
}
