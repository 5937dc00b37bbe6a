//! Food Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use crate::pricing::{normalize_opt, normalize_price};
use shared::models::{Food, FoodCreate, FoodUpdate};
use shared::util::{new_public_id, now_millis};

const FOOD_COLUMNS: &str = "id, name, price, food_image, menu_id, created_at, updated_at";

/// Food storage. Prices are normalized here so no write path can skip it.
#[derive(Clone, Debug)]
pub struct FoodRepository {
    db: DbService,
}

impl FoodRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Food>> {
        self.db
            .bounded("foods.find_by_id", async {
                let sql = format!("SELECT {FOOD_COLUMNS} FROM foods WHERE id = ?");
                let food = sqlx::query_as::<_, Food>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(food)
            })
            .await
    }

    /// One page of foods in creation order, plus the total count
    pub async fn find_page(&self, offset: i64, limit: i64) -> RepoResult<(i64, Vec<Food>)> {
        self.db
            .bounded("foods.find_page", async {
                let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM foods")
                    .fetch_one(&self.db.pool)
                    .await?;
                let sql = format!("SELECT {FOOD_COLUMNS} FROM foods ORDER BY pk LIMIT ? OFFSET ?");
                let foods = sqlx::query_as::<_, Food>(&sql)
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok((total, foods))
            })
            .await
    }

    pub async fn create(&self, data: FoodCreate) -> RepoResult<Food> {
        let id = new_public_id();
        let now = now_millis();
        let price = normalize_price(data.price)?;
        self.db
            .bounded("foods.create", async {
                sqlx::query(
                    "INSERT INTO foods (id, name, price, food_image, menu_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&id)
                .bind(&data.name)
                .bind(price)
                .bind(&data.food_image)
                .bind(&data.menu_id)
                .bind(now)
                .bind(now)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create food".into()))
    }

    pub async fn update(&self, id: &str, data: FoodUpdate) -> RepoResult<Food> {
        let price = normalize_opt(data.price)?;
        self.db
            .bounded("foods.update", async {
                let rows = sqlx::query(
                    "UPDATE foods SET name = COALESCE(?1, name), price = COALESCE(?2, price), food_image = COALESCE(?3, food_image), menu_id = COALESCE(?4, menu_id), updated_at = ?5 WHERE id = ?6",
                )
                .bind(&data.name)
                .bind(price)
                .bind(&data.food_image)
                .bind(&data.menu_id)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Food {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Food {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.db
            .bounded("foods.delete", async {
                let rows = sqlx::query("DELETE FROM foods WHERE id = ?")
                    .bind(id)
                    .execute(&self.db.pool)
                    .await?;
                Ok(rows.rows_affected() > 0)
            })
            .await
    }
}
