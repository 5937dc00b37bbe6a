//! Token persistence and refresh

use shared::error::ErrorCode;
use shared::models::User;

use crate::AppError;
use crate::auth::{JwtError, JwtService, TokenPair};
use crate::db::repository::{RepoResult, UserRepository};
use crate::security_log;

/// Where issued token pairs are recorded against their user
#[allow(async_fn_in_trait)]
pub trait TokenStore {
    /// Record `tokens` on the user with public id `user_id`.
    /// A user that does not exist is an error; nothing is inserted.
    async fn persist(&self, tokens: &TokenPair, user_id: &str) -> RepoResult<()>;
}

impl TokenStore for UserRepository {
    async fn persist(&self, tokens: &TokenPair, user_id: &str) -> RepoResult<()> {
        self.update_tokens(user_id, &tokens.token, &tokens.refresh_token)
            .await
    }
}

/// Issue a pair for `user` and record it
pub async fn issue_and_persist<S: TokenStore>(
    jwt: &JwtService,
    store: &S,
    user: &User,
) -> Result<TokenPair, AppError> {
    let tokens = issue_for(jwt, user)?;
    store
        .persist(&tokens, &user.id)
        .await
        .map_err(|e| e.into_app(ErrorCode::UserNotFound))?;
    Ok(tokens)
}

/// Issue a pair for `user` without recording it
pub fn issue_for(jwt: &JwtService, user: &User) -> Result<TokenPair, AppError> {
    jwt.issue(&user.email, &user.first_name, &user.last_name, &user.id)
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Token issuance failed");
            AppError::internal("Token issuance failed")
        })
}

/// Exchange a refresh token for a new pair
///
/// The refresh token must verify, be unexpired and be of refresh type. The
/// user it names is reloaded so the new access token carries current claims.
pub async fn refresh(
    jwt: &JwtService,
    users: &UserRepository,
    refresh_token: &str,
) -> Result<(User, TokenPair), AppError> {
    let claims = jwt.validate_refresh(refresh_token).map_err(|e| {
        security_log!("WARN", "refresh_failed", error = format!("{}", e));
        match e {
            JwtError::Expired => AppError::token_expired(),
            other => AppError::invalid_token(other.to_string()),
        }
    })?;

    let user = users
        .find_by_id(&claims.uid)
        .await
        .map_err(|e| e.into_app(ErrorCode::UserNotFound))?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let tokens = issue_and_persist(jwt, users, &user).await?;
    tracing::info!(user_id = %user.id, "Token pair refreshed");
    Ok((user, tokens))
}
