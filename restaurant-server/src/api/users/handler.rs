//! User API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use shared::error::ErrorCode;
use shared::models::{
    AuthResponse, LoginRequest, Page, PageQuery, RefreshRequest, SignupRequest, User,
};
use shared::util::{new_public_id, now_millis};
use validator::Validate;

use crate::auth::{self, hash_password, issue_and_persist, issue_for, verify_password};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{AppError, AppResult};

/// POST /users/signup - register a user and issue its first token pair
pub async fn signup(
    State(state): State<ServerState>,
    Json(payload): Json<SignupRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;
    let repo = &state.repos.users;

    if repo.email_exists(&payload.email).await? {
        return Err(AppError::new(ErrorCode::EmailExists).with_detail("email", payload.email));
    }
    if repo.phone_exists(&payload.phone).await? {
        return Err(AppError::new(ErrorCode::PhoneExists).with_detail("phone", payload.phone));
    }

    let password_hash = hash_password(&payload.password).map_err(|e| {
        tracing::error!(error = %e, "Password hashing failed");
        AppError::internal("Password hashing failed")
    })?;

    let now = now_millis();
    let mut user = User {
        id: new_public_id(),
        first_name: payload.first_name,
        last_name: payload.last_name,
        email: payload.email,
        phone: payload.phone,
        avatar: payload.avatar,
        role: payload.role,
        password_hash,
        token: None,
        refresh_token: None,
        created_at: now,
        updated_at: now,
    };
    let tokens = issue_for(&state.jwt_service, &user)?;
    user.token = Some(tokens.token.clone());
    user.refresh_token = Some(tokens.refresh_token.clone());

    let user = repo.create(user).await?;
    tracing::info!(user_id = %user.id, role = ?user.role, "User signed up");

    Ok(Json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user,
    }))
}

/// POST /users/login - verify credentials, issue and record a token pair
pub async fn login(
    State(state): State<ServerState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let user = state.repos.users.find_by_email(&payload.email).await?;
    // Unknown email and wrong password answer the same
    let Some(user) = user.filter(|u| verify_password(&payload.password, &u.password_hash))
    else {
        security_log!("WARN", "login_failed", email = payload.email.clone());
        return Err(AppError::invalid_credentials());
    };

    let tokens = issue_and_persist(&state.jwt_service, &state.repos.users, &user).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user,
    }))
}

/// POST /users/refresh - exchange a refresh token for a new pair
pub async fn refresh(
    State(state): State<ServerState>,
    Json(payload): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (user, tokens) =
        auth::refresh(&state.jwt_service, &state.repos.users, &payload.refresh_token).await?;
    Ok(Json(AuthResponse {
        token: tokens.token,
        refresh_token: tokens.refresh_token,
        user,
    }))
}

/// GET /users?page&record_per_page - paginated users
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<Page<User>>> {
    let (total_count, items) = state
        .repos
        .users
        .find_page(query.offset(), query.record_per_page())
        .await?;
    Ok(Json(Page { total_count, items }))
}

/// GET /users/{user_id}
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(user_id): Path<String>,
) -> AppResult<Json<User>> {
    let user = state
        .repos
        .users
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| {
            AppError::with_message(ErrorCode::UserNotFound, format!("User {} not found", user_id))
        })?;
    Ok(Json(user))
}
