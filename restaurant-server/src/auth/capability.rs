//! MANAGER capability
//!
//! Foods, menus, tables and orders may only be changed by a MANAGER. Those
//! routes carry the acting user's id as `{user_id}`; the [`ManagerCapability`]
//! extractor is the single place that checks it.

use std::collections::HashMap;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use shared::error::ErrorCode;
use shared::models::User;

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;

/// Proof that the caller is a MANAGER acting as themselves
#[derive(Debug, Clone)]
pub struct ManagerCapability {
    pub user: User,
}

/// The capability predicate: `user_id` names the caller and that user is a MANAGER
pub fn check_manager(
    caller: &CurrentUser,
    path_user_id: &str,
    user: Option<User>,
) -> Result<User, AppError> {
    if caller.id != path_user_id {
        return Err(AppError::forbidden(
            "user_id does not match the authenticated user",
        ));
    }
    let user = user.ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;
    if !user.role.is_manager() {
        return Err(AppError::role_required());
    }
    Ok(user)
}

impl FromRequestParts<ServerState> for ManagerCapability {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        let caller = CurrentUser::from_request_parts(parts, state).await?;

        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| AppError::invalid_request(e.body_text()))?;
        let path_user_id = params
            .get("user_id")
            .ok_or_else(|| AppError::invalid_request("Missing user_id path segment"))?;

        let user = state
            .repos
            .users
            .find_by_id(path_user_id)
            .await
            .map_err(|e| e.into_app(ErrorCode::UserNotFound))?;

        match check_manager(&caller, path_user_id, user) {
            Ok(user) => Ok(Self { user }),
            Err(err) => {
                security_log!(
                    "WARN",
                    "manager_required",
                    user_id = caller.id.clone(),
                    path_user_id = path_user_id.clone(),
                    uri = format!("{:?}", parts.uri)
                );
                Err(err)
            }
        }
    }
}
