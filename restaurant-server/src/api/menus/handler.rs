//! Menu API Handlers
//!
//! A menu's active window is `[start_date, end_date]` in Unix millis. An
//! update touching either bound is checked against the merged window and
//! rejected whole when it fails.

use axum::{
    Json,
    extract::{Path, State},
};
use shared::error::ErrorCode;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::util::now_millis;
use validator::Validate;

use crate::auth::ManagerCapability;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// GET /menus
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Menu>>> {
    let menus = state.repos.menus.find_all().await?;
    Ok(Json(menus))
}

/// GET /menus/{menu_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(menu_id): Path<String>,
) -> AppResult<Json<Menu>> {
    let menu = state
        .repos
        .menus
        .find_by_id(&menu_id)
        .await?
        .ok_or_else(|| menu_not_found(&menu_id))?;
    Ok(Json(menu))
}

/// POST /menus/{user_id}
pub async fn create(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Json(payload): Json<MenuCreate>,
) -> AppResult<Json<Menu>> {
    payload.validate()?;
    if let (Some(start), Some(end)) = (payload.start_date, payload.end_date) {
        if end <= start {
            return Err(invalid_window("end_date must be after start_date"));
        }
    }

    let menu = state.repos.menus.create(payload).await?;
    tracing::info!(menu_id = %menu.id, "Menu created");
    Ok(Json(menu))
}

/// PATCH /menus/{user_id}/{menu_id}
pub async fn update(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, menu_id)): Path<(String, String)>,
    Json(payload): Json<MenuUpdate>,
) -> AppResult<Json<Menu>> {
    payload.validate()?;

    if payload.touches_window() {
        let current = state
            .repos
            .menus
            .find_by_id(&menu_id)
            .await?
            .ok_or_else(|| menu_not_found(&menu_id))?;
        check_window(
            payload.start_date.or(current.start_date),
            payload.end_date.or(current.end_date),
            now_millis(),
        )?;
    }

    let menu = state
        .repos
        .menus
        .update(&menu_id, payload)
        .await
        .map_err(|e| e.into_app(ErrorCode::MenuNotFound))?;
    Ok(Json(menu))
}

/// DELETE /menus/{user_id}/{menu_id}
///
/// A menu still referenced by foods cannot be deleted.
pub async fn delete(
    State(state): State<ServerState>,
    _manager: ManagerCapability,
    Path((_, menu_id)): Path<(String, String)>,
) -> AppResult<Json<bool>> {
    if !state.repos.menus.delete(&menu_id).await? {
        return Err(menu_not_found(&menu_id));
    }
    Ok(Json(true))
}

/// The candidate window must start in the future and end after it starts
fn check_window(start: Option<i64>, end: Option<i64>, now: i64) -> AppResult<()> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(invalid_window("start_date and end_date are both required"));
    };
    if start <= now {
        return Err(invalid_window("start_date must be in the future"));
    }
    if end <= start {
        return Err(invalid_window("end_date must be after start_date"));
    }
    Ok(())
}

fn invalid_window(reason: &str) -> AppError {
    AppError::new(ErrorCode::MenuInvalidWindow).with_detail("reason", reason)
}

fn menu_not_found(menu_id: &str) -> AppError {
    AppError::with_message(ErrorCode::MenuNotFound, format!("Menu {} not found", menu_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 60 * 60 * 1000;
    const NOW: i64 = 1_700_000_000_000;

    #[test]
    fn test_future_window_passes() {
        assert!(check_window(Some(NOW + HOUR), Some(NOW + 2 * HOUR), NOW).is_ok());
    }

    #[test]
    fn test_past_start_is_rejected() {
        let err = check_window(Some(NOW - HOUR), Some(NOW + 2 * HOUR), NOW).unwrap_err();
        assert_eq!(err.code, ErrorCode::MenuInvalidWindow);
    }

    #[test]
    fn test_end_not_after_start_is_rejected() {
        assert!(check_window(Some(NOW + HOUR), Some(NOW + HOUR), NOW).is_err());
        assert!(check_window(Some(NOW + 2 * HOUR), Some(NOW + HOUR), NOW).is_err());
    }

    #[test]
    fn test_missing_bound_is_rejected() {
        assert!(check_window(Some(NOW + HOUR), None, NOW).is_err());
        assert!(check_window(None, Some(NOW + HOUR), NOW).is_err());
    }
}
