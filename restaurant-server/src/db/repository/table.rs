//! Dining Table Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use shared::models::{DiningTable, DiningTableCreate, DiningTableUpdate};
use shared::util::{new_public_id, now_millis};

const TABLE_COLUMNS: &str = "id, number_of_guests, table_number, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct TableRepository {
    db: DbService,
}

impl TableRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<DiningTable>> {
        self.db
            .bounded("tables.find_all", async {
                let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables ORDER BY pk");
                let tables = sqlx::query_as::<_, DiningTable>(&sql)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(tables)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<DiningTable>> {
        self.db
            .bounded("tables.find_by_id", async {
                let sql = format!("SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?");
                let table = sqlx::query_as::<_, DiningTable>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(table)
            })
            .await
    }

    pub async fn create(&self, data: DiningTableCreate) -> RepoResult<DiningTable> {
        let id = new_public_id();
        let now = now_millis();
        self.db
            .bounded("tables.create", async {
                sqlx::query(
                    "INSERT INTO dining_tables (id, number_of_guests, table_number, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&id)
                .bind(data.number_of_guests)
                .bind(data.table_number)
                .bind(now)
                .bind(now)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create dining table".into()))
    }

    pub async fn update(&self, id: &str, data: DiningTableUpdate) -> RepoResult<DiningTable> {
        self.db
            .bounded("tables.update", async {
                let rows = sqlx::query(
                    "UPDATE dining_tables SET number_of_guests = COALESCE(?1, number_of_guests), table_number = COALESCE(?2, table_number), updated_at = ?3 WHERE id = ?4",
                )
                .bind(data.number_of_guests)
                .bind(data.table_number)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Table {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Table {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.db
            .bounded("tables.delete", async {
                let rows = sqlx::query("DELETE FROM dining_tables WHERE id = ?")
                    .bind(id)
                    .execute(&self.db.pool)
                    .await?;
                Ok(rows.rows_affected() > 0)
            })
            .await
    }
}
