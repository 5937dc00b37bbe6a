//! Dining Table API Handlers

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use validator::Validate;

use crate::auth::ManagerCapability;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /tables - all tables
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<DiningTable>>> {
    let tables = state.repos.tables.find_all().await?;
    Ok(Json(tables))
}

/// GET /tables/{table_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(table_id): Path<String>,
) -> AppResult<Json<DiningTable>> {
    let table = state
        .repos
        .tables
        .find_by_id(&table_id)
        .await?
        .ok_or_else(|| table_not_found(&table_id))?;
    Ok(Json(table))
}

/// POST /tables/{user_id}
pub async fn create(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Json(payload): Json<DiningTableCreate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = state.repos.tables.create(payload).await?;
    tracing::info!(table_id = %table.id, table_number = table.table_number, "Table created");
    Ok(Json(table))
}

/// PATCH /tables/{user_id}/{table_id}
pub async fn update(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, table_id)): Path<(String, String)>,
    Json(payload): Json<DiningTableUpdate>,
) -> AppResult<Json<DiningTable>> {
    payload.validate()?;
    let table = state
        .repos
        .tables
        .update(&table_id, payload)
        .await
        .map_err(|e| e.into_app(ErrorCode::TableNotFound))?;
    Ok(Json(table))
}

/// DELETE /tables/{user_id}/{table_id} - orders at this table keep no table
pub async fn delete(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, table_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    if !state.repos.tables.delete(&table_id).await? {
        return Err(table_not_found(&table_id));
    }
    Ok(Json(true))
}

pub(crate) fn table_not_found(table_id: &str) -> AppError {
    AppError::with_message(ErrorCode::TableNotFound, format!("Table {} not found", table_id))
        .with_detail("table_id", table_id)
}

/// Reject a table reference that matches no table
pub(crate) async fn ensure_table(state: &ServerState, table_id: &str) -> AppResult<()> {
    if state.repos.tables.find_by_id(table_id).await?.is_none() {
        return Err(table_not_found(table_id));
    }
    Ok(())
}
