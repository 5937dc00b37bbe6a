//! Food API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::ErrorCode;
use shared::models::{Food, FoodCreate, FoodPage, FoodUpdate, PageQuery};
use validator::Validate;

use crate::auth::ManagerCapability;
use crate::core::ServerState;
use crate::pricing::check_price;
use crate::utils::{AppError, AppResult};

/// GET /foods?page&record_per_page - one page of foods
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<FoodPage>> {
    let (total_count, food_items) = state
        .repos
        .foods
        .find_page(query.offset(), query.record_per_page())
        .await?;
    Ok(Json(FoodPage {
        total_count,
        food_items,
    }))
}

/// GET /foods/{food_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(food_id): Path<String>,
) -> AppResult<Json<Food>> {
    let food = state
        .repos
        .foods
        .find_by_id(&food_id)
        .await?
        .ok_or_else(|| food_not_found(&food_id))?;
    Ok(Json(food))
}

/// POST /foods/{user_id} - create a food on an existing menu
pub async fn create(
    State(state): State<ServerState>,
    manager: ManagerCapability,
    Json(payload): Json<FoodCreate>,
) -> AppResult<Json<Food>> {
    check_price(payload.price)?;
    payload.validate()?;
    ensure_menu(&state, &payload.menu_id).await?;

    let food = state.repos.foods.create(payload).await?;
    tracing::info!(food_id = %food.id, price = food.price, by = %manager.user.id, "Food created");
    Ok(Json(food))
}

/// PATCH /foods/{user_id}/{food_id}
pub async fn update(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, food_id)): Path<(String, String)>,
    Json(payload): Json<FoodUpdate>,
) -> AppResult<Json<Food>> {
    if let Some(price) = payload.price {
        check_price(price)?;
    }
    payload.validate()?;
    if let Some(menu_id) = &payload.menu_id {
        ensure_menu(&state, menu_id).await?;
    }

    let food = state
        .repos
        .foods
        .update(&food_id, payload)
        .await
        .map_err(|e| e.into_app(ErrorCode::FoodNotFound))?;
    Ok(Json(food))
}

/// DELETE /foods/{user_id}/{food_id}
pub async fn delete(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, food_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    if !state.repos.foods.delete(&food_id).await? {
        return Err(food_not_found(&food_id));
    }
    Ok(Json(true))
}

async fn ensure_menu(state: &ServerState, menu_id: &str) -> AppResult<()> {
    if state.repos.menus.find_by_id(menu_id).await?.is_none() {
        return Err(
            AppError::with_message(ErrorCode::MenuNotFound, format!("Menu {} not found", menu_id))
                .with_detail("menu_id", menu_id),
        );
    }
    Ok(())
}

fn food_not_found(food_id: &str) -> AppError {
    AppError::with_message(ErrorCode::FoodNotFound, format!("Food {} not found", food_id))
}
