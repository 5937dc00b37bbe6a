//! Order Item Model

use serde::{Deserialize, Serialize};
use validator::Validate;

use super::food::MAX_PRICE;

/// Order item entity. `unit_price` always carries at most 2 fractional digits once stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: String,
    pub order_id: String,
    pub food_id: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// One requested line inside an [`OrderItemPack`]
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemEntry {
    #[validate(length(min = 1))]
    pub food_id: String,
    #[validate(range(min = 1))]
    pub quantity: i64,
    /// Defaults to the food's price
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub unit_price: Option<f64>,
}

/// Order item submission: creates the order and its items in one request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemPack {
    pub table_id: Option<String>,
    #[validate(length(min = 1), nested)]
    pub order_items: Vec<OrderItemEntry>,
}

/// Result of an [`OrderItemPack`] submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemPackResult {
    pub order_id: String,
    pub order_items: Vec<OrderItem>,
}

/// Update order item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct OrderItemUpdate {
    #[validate(range(min = 1))]
    pub quantity: Option<i64>,
    #[validate(range(min = 0.0, max = MAX_PRICE))]
    pub unit_price: Option<f64>,
    #[validate(length(min = 1))]
    pub food_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pack_requires_at_least_one_item() {
        let pack = OrderItemPack {
            table_id: None,
            order_items: vec![],
        };
        assert!(pack.validate().is_err());
    }

    #[test]
    fn pack_validates_nested_quantity() {
        let pack: OrderItemPack = serde_json::from_str(
            r#"{"table_id":null,"order_items":[{"food_id":"f1","quantity":0}]}"#,
        )
        .unwrap();
        assert!(pack.validate().is_err());

        let pack: OrderItemPack =
            serde_json::from_str(r#"{"order_items":[{"food_id":"f1","quantity":2}]}"#).unwrap();
        assert!(pack.validate().is_ok());
        assert!(pack.order_items[0].unit_price.is_none());
    }

    #[test]
    fn unit_price_is_bounded() {
        let pack: OrderItemPack = serde_json::from_str(
            r#"{"order_items":[{"food_id":"f1","quantity":1,"unit_price":1e30}]}"#,
        )
        .unwrap();
        assert!(pack.validate().is_err());

        let update = OrderItemUpdate {
            unit_price: Some(MAX_PRICE + 1.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }
}
