//! Order Item API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{
    Food, OrderCreate, OrderItem, OrderItemPack, OrderItemPackResult, OrderItemUpdate,
    OrderSummary,
};
use validator::Validate;

use crate::api::tables::handler::ensure_table;
use crate::core::ServerState;
use crate::db::repository::order_item::NewOrderItem;
use crate::orders::OrderAggregator;
use crate::pricing::check_price;
use crate::utils::{AppError, AppResult};

/// GET /order-items
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<OrderItem>>> {
    let items = state.repos.order_items.find_all().await?;
    Ok(Json(items))
}

/// GET /order-items/{order_item_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(order_item_id): Path<String>,
) -> AppResult<Json<OrderItem>> {
    let item = state
        .repos
        .order_items
        .find_by_id(&order_item_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(
                ErrorCode::OrderItemNotFound,
                format!("Order item {} not found", order_item_id),
            )
        })?;
    Ok(Json(item))
}

/// GET /order-items-order/{order_id} - billing summary of one order
pub async fn by_order(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let aggregator = OrderAggregator::new(state.repos.order_items.clone());
    Ok(Json(aggregator.items_by_order(&order_id).await?))
}

/// POST /order-items - submit an order with its items
///
/// Every referenced food and the table are checked before anything is
/// written. The order and its items are then stored in separate steps.
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<OrderItemPack>,
) -> AppResult<Json<OrderItemPackResult>> {
    for price in payload.order_items.iter().filter_map(|e| e.unit_price) {
        check_price(price)?;
    }
    payload.validate()?;
    if let Some(table_id) = &payload.table_id {
        ensure_table(&state, table_id).await?;
    }

    let mut items = Vec::with_capacity(payload.order_items.len());
    for entry in payload.order_items {
        let food = find_food(&state, &entry.food_id).await?;
        items.push(NewOrderItem {
            food_id: entry.food_id,
            quantity: entry.quantity,
            unit_price: entry.unit_price.unwrap_or(food.price),
        });
    }

    let order = state
        .repos
        .orders
        .create(OrderCreate {
            table_id: payload.table_id,
            order_date: None,
        })
        .await?;
    let order_items = state
        .repos
        .order_items
        .create_many(&order.id, items)
        .await
        .inspect_err(|e| {
            tracing::error!(
                order_id = %order.id,
                error = %e,
                "Order stored without all of its items"
            );
        })?;

    tracing::info!(order_id = %order.id, items = order_items.len(), "Order submitted");
    Ok(Json(OrderItemPackResult {
        order_id: order.id,
        order_items,
    }))
}

/// PATCH /order-items/{order_item_id}
pub async fn update(
    State(state): State<ServerState>,
    Path(order_item_id): Path<String>,
    Json(payload): Json<OrderItemUpdate>,
) -> AppResult<Json<OrderItem>> {
    if let Some(price) = payload.unit_price {
        check_price(price)?;
    }
    payload.validate()?;
    if let Some(food_id) = &payload.food_id {
        find_food(&state, food_id).await?;
    }

    let item = state
        .repos
        .order_items
        .update(&order_item_id, payload)
        .await
        .map_err(|e| e.into_app(ErrorCode::OrderItemNotFound))?;
    Ok(Json(item))
}

async fn find_food(state: &ServerState, food_id: &str) -> AppResult<Food> {
    state.repos.foods.find_by_id(food_id).await?.ok_or_else(|| {
        AppError::with_message(ErrorCode::FoodNotFound, format!("Food {} not found", food_id))
            .with_detail("food_id", food_id)
    })
}
