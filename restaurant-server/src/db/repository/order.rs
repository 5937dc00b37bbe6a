//! Order Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use shared::models::{Order, OrderCreate, OrderUpdate};
use shared::util::{new_public_id, now_millis};

const ORDER_COLUMNS: &str = "id, order_date, table_id, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct OrderRepository {
    db: DbService,
}

impl OrderRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Order>> {
        self.db
            .bounded("orders.find_all", async {
                let sql = format!("SELECT {ORDER_COLUMNS} FROM orders ORDER BY pk");
                let orders = sqlx::query_as::<_, Order>(&sql)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(orders)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Order>> {
        self.db
            .bounded("orders.find_by_id", async {
                let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?");
                let order = sqlx::query_as::<_, Order>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(order)
            })
            .await
    }

    pub async fn create(&self, data: OrderCreate) -> RepoResult<Order> {
        let id = new_public_id();
        let now = now_millis();
        let order_date = data.order_date.unwrap_or(now);
        self.db
            .bounded("orders.create", async {
                sqlx::query(
                    "INSERT INTO orders (id, order_date, table_id, created_at, updated_at) VALUES (?, ?, ?, ?, ?)",
                )
                .bind(&id)
                .bind(order_date)
                .bind(&data.table_id)
                .bind(now)
                .bind(now)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create order".into()))
    }

    pub async fn update(&self, id: &str, data: OrderUpdate) -> RepoResult<Order> {
        self.db
            .bounded("orders.update", async {
                let rows = sqlx::query(
                    "UPDATE orders SET table_id = COALESCE(?1, table_id), updated_at = ?2 WHERE id = ?3",
                )
                .bind(&data.table_id)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Order {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order {id} not found")))
    }

    /// Delete an order; its items and invoices go with it
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.db
            .bounded("orders.delete", async {
                let rows = sqlx::query("DELETE FROM orders WHERE id = ?")
                    .bind(id)
                    .execute(&self.db.pool)
                    .await?;
                Ok(rows.rows_affected() > 0)
            })
            .await
    }
}
