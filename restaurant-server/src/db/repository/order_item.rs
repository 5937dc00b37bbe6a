//! Order Item Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use crate::pricing::{normalize_opt, normalize_price};
use shared::models::{OrderItem, OrderItemUpdate, OrderLine};
use shared::util::{new_public_id, now_millis};

const ORDER_ITEM_COLUMNS: &str = "id, order_id, food_id, quantity, unit_price, created_at, updated_at";

/// Filter, join and flatten the items of one order. Each lookup is a LEFT
/// JOIN, so an item whose food, order or table is gone still yields a row
/// with those columns NULL.
const JOINED_LINES_SQL: &str = "\
SELECT f.price       AS amount,
       f.name        AS food_name,
       f.food_image  AS food_image,
       t.table_number AS table_number,
       t.id          AS table_id,
       o.id          AS order_id,
       f.price       AS price,
       oi.quantity   AS quantity
FROM order_items oi
LEFT JOIN foods f ON f.id = oi.food_id
LEFT JOIN orders o ON o.id = oi.order_id
LEFT JOIN dining_tables t ON t.id = o.table_id
WHERE oi.order_id = ?
ORDER BY oi.pk";

/// A line to insert for an order
#[derive(Debug, Clone)]
pub struct NewOrderItem {
    pub food_id: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Order item storage. Unit prices are normalized here so no write path can skip it.
#[derive(Clone, Debug)]
pub struct OrderItemRepository {
    db: DbService,
}

impl OrderItemRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<OrderItem>> {
        self.db
            .bounded("order_items.find_all", async {
                let sql = format!("SELECT {ORDER_ITEM_COLUMNS} FROM order_items ORDER BY pk");
                let items = sqlx::query_as::<_, OrderItem>(&sql)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(items)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<OrderItem>> {
        self.db
            .bounded("order_items.find_by_id", async {
                let sql = format!("SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE id = ?");
                let item = sqlx::query_as::<_, OrderItem>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(item)
            })
            .await
    }

    /// Joined lines of one order, in insertion order
    pub async fn joined_lines(&self, order_id: &str) -> RepoResult<Vec<OrderLine>> {
        self.db
            .bounded("order_items.joined_lines", async {
                let lines = sqlx::query_as::<_, OrderLine>(JOINED_LINES_SQL)
                    .bind(order_id)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(lines)
            })
            .await
    }

    /// Insert items for an existing order, one statement per item.
    ///
    /// Not atomic: a failure part way leaves the earlier items stored.
    pub async fn create_many(
        &self,
        order_id: &str,
        items: Vec<NewOrderItem>,
    ) -> RepoResult<Vec<OrderItem>> {
        let mut created = Vec::with_capacity(items.len());
        for item in items {
            let id = new_public_id();
            let now = now_millis();
            let unit_price = normalize_price(item.unit_price)?;
            self.db
                .bounded("order_items.create", async {
                    sqlx::query(
                        "INSERT INTO order_items (id, order_id, food_id, quantity, unit_price, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                    )
                    .bind(&id)
                    .bind(order_id)
                    .bind(&item.food_id)
                    .bind(item.quantity)
                    .bind(unit_price)
                    .bind(now)
                    .bind(now)
                    .execute(&self.db.pool)
                    .await?;
                    Ok(())
                })
                .await?;
            created.push(OrderItem {
                id,
                order_id: order_id.to_string(),
                food_id: item.food_id,
                quantity: item.quantity,
                unit_price,
                created_at: now,
                updated_at: now,
            });
        }
        Ok(created)
    }

    pub async fn update(&self, id: &str, data: OrderItemUpdate) -> RepoResult<OrderItem> {
        let unit_price = normalize_opt(data.unit_price)?;
        self.db
            .bounded("order_items.update", async {
                let rows = sqlx::query(
                    "UPDATE order_items SET quantity = COALESCE(?1, quantity), unit_price = COALESCE(?2, unit_price), food_id = COALESCE(?3, food_id), updated_at = ?4 WHERE id = ?5",
                )
                .bind(data.quantity)
                .bind(unit_price)
                .bind(&data.food_id)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Order item {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Order item {id} not found")))
    }
}
