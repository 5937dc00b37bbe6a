//! Menu Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use shared::models::{Menu, MenuCreate, MenuUpdate};
use shared::util::{new_public_id, now_millis};

const MENU_COLUMNS: &str = "id, name, category, start_date, end_date, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct MenuRepository {
    db: DbService,
}

impl MenuRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Menu>> {
        self.db
            .bounded("menus.find_all", async {
                let sql = format!("SELECT {MENU_COLUMNS} FROM menus ORDER BY pk");
                let menus = sqlx::query_as::<_, Menu>(&sql)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(menus)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Menu>> {
        self.db
            .bounded("menus.find_by_id", async {
                let sql = format!("SELECT {MENU_COLUMNS} FROM menus WHERE id = ?");
                let menu = sqlx::query_as::<_, Menu>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(menu)
            })
            .await
    }

    pub async fn create(&self, data: MenuCreate) -> RepoResult<Menu> {
        let id = new_public_id();
        let now = now_millis();
        self.db
            .bounded("menus.create", async {
                sqlx::query(
                    "INSERT INTO menus (id, name, category, start_date, end_date, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&id)
                .bind(&data.name)
                .bind(&data.category)
                .bind(data.start_date)
                .bind(data.end_date)
                .bind(now)
                .bind(now)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create menu".into()))
    }

    /// Apply a partial update in one statement; absent fields keep their value
    pub async fn update(&self, id: &str, data: MenuUpdate) -> RepoResult<Menu> {
        self.db
            .bounded("menus.update", async {
                let rows = sqlx::query(
                    "UPDATE menus SET name = COALESCE(?1, name), category = COALESCE(?2, category), start_date = COALESCE(?3, start_date), end_date = COALESCE(?4, end_date), updated_at = ?5 WHERE id = ?6",
                )
                .bind(&data.name)
                .bind(&data.category)
                .bind(data.start_date)
                .bind(data.end_date)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Menu {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.db
            .bounded("menus.delete", async {
                let rows = sqlx::query("DELETE FROM menus WHERE id = ?")
                    .bind(id)
                    .execute(&self.db.pool)
                    .await?;
                Ok(rows.rows_affected() > 0)
            })
            .await
    }
}
