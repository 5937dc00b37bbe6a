//! User Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use shared::models::User;
use shared::util::now_millis;

const USER_COLUMNS: &str = "id, first_name, last_name, email, phone, avatar, role, password_hash, token, refresh_token, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct UserRepository {
    db: DbService,
}

impl UserRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<User>> {
        self.db
            .bounded("users.find_by_id", async {
                let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");
                let user = sqlx::query_as::<_, User>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(user)
            })
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> RepoResult<Option<User>> {
        self.db
            .bounded("users.find_by_email", async {
                let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = ? LIMIT 1");
                let user = sqlx::query_as::<_, User>(&sql)
                    .bind(email)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(user)
            })
            .await
    }

    pub async fn email_exists(&self, email: &str) -> RepoResult<bool> {
        self.db
            .bounded("users.email_exists", async {
                let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = ?")
                    .bind(email)
                    .fetch_one(&self.db.pool)
                    .await?;
                Ok(count > 0)
            })
            .await
    }

    pub async fn phone_exists(&self, phone: &str) -> RepoResult<bool> {
        self.db
            .bounded("users.phone_exists", async {
                let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE phone = ?")
                    .bind(phone)
                    .fetch_one(&self.db.pool)
                    .await?;
                Ok(count > 0)
            })
            .await
    }

    /// One page of users in creation order, plus the total count
    pub async fn find_page(&self, offset: i64, limit: i64) -> RepoResult<(i64, Vec<User>)> {
        self.db
            .bounded("users.find_page", async {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
                    .fetch_one(&self.db.pool)
                    .await?;
                let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY pk LIMIT ? OFFSET ?");
                let users = sqlx::query_as::<_, User>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok((total, users))
            })
            .await
    }

    /// Insert a fully built user (public id, password hash and tokens already set)
    pub async fn create(&self, user: User) -> RepoResult<User> {
        self.db
            .bounded("users.create", async {
                sqlx::query(
                    "INSERT INTO users (id, first_name, last_name, email, phone, avatar, role, password_hash, token, refresh_token, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&user.id)
                .bind(&user.first_name)
                .bind(&user.last_name)
                .bind(&user.email)
                .bind(&user.phone)
                .bind(&user.avatar)
                .bind(user.role)
                .bind(&user.password_hash)
                .bind(&user.token)
                .bind(&user.refresh_token)
                .bind(user.created_at)
                .bind(user.updated_at)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&user.id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create user".into()))
    }

    /// Store a freshly issued token pair on an existing user.
    ///
    /// Never inserts: a user id that matches nothing is [`RepoError::NotFound`].
    pub async fn update_tokens(
        &self,
        user_id: &str,
        token: &str,
        refresh_token: &str,
    ) -> RepoResult<()> {
        if self.find_by_id(user_id).await?.is_none() {
            return Err(RepoError::NotFound(format!("User {user_id} not found")));
        }
        self.db
            .bounded("users.update_tokens", async {
                let rows = sqlx::query(
                    "UPDATE users SET token = ?, refresh_token = ?, updated_at = ? WHERE id = ?",
                )
                .bind(token)
                .bind(refresh_token)
                .bind(now_millis())
                .bind(user_id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("User {user_id} not found")));
                }
                Ok(())
            })
            .await
    }
}
