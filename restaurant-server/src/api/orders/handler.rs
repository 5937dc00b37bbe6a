//! Order API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{Order, OrderCreate, OrderSummary, OrderUpdate};

use crate::api::tables::handler::ensure_table;
use crate::auth::ManagerCapability;
use crate::core::ServerState;
use crate::orders::OrderAggregator;
use crate::utils::{AppError, AppResult};

/// GET /orders
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = state.repos.orders.find_all().await?;
    Ok(Json(orders))
}

/// GET /orders/{order_id} - billing summary, empty when the order has no items
pub async fn summary(
    State(state): State<ServerState>,
    Path(order_id): Path<String>,
) -> AppResult<Json<Vec<OrderSummary>>> {
    let aggregator = OrderAggregator::new(state.repos.order_items.clone());
    let summaries = aggregator.items_by_order(&order_id).await?;
    Ok(Json(summaries))
}

/// POST /orders/{user_id}
pub async fn create(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Json(payload): Json<OrderCreate>,
) -> AppResult<Json<Order>> {
    if let Some(table_id) = &payload.table_id {
        ensure_table(&state, table_id).await?;
    }
    let order = state.repos.orders.create(payload).await?;
    tracing::info!(order_id = %order.id, "Order created");
    Ok(Json(order))
}

/// PATCH /orders/{user_id}/{order_id} - move the order to another table
pub async fn update(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, order_id)): Path<(String, String)>,
    Json(payload): Json<OrderUpdate>,
) -> AppResult<Json<Order>> {
    if let Some(table_id) = &payload.table_id {
        ensure_table(&state, table_id).await?;
    }
    let order = state
        .repos
        .orders
        .update(&order_id, payload)
        .await
        .map_err(|e| e.into_app(ErrorCode::OrderNotFound))?;
    Ok(Json(order))
}

/// DELETE /orders/{user_id}/{order_id} - also removes its items and invoices
pub async fn delete(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, order_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    if !state.repos.orders.delete(&order_id).await? {
        return Err(AppError::with_message(
            ErrorCode::OrderNotFound,
            format!("Order {} not found", order_id),
        ));
    }
    Ok(Json(true))
}
