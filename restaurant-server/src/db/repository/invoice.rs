//! Invoice Repository

use super::{RepoError, RepoResult};
use crate::db::DbService;
use shared::models::{Invoice, PaymentMethod, PaymentStatus};
use shared::util::{DAY_MILLIS, new_public_id, now_millis};

const INVOICE_COLUMNS: &str =
    "id, order_id, payment_method, payment_status, payment_due_date, created_at, updated_at";

/// Parsed invoice creation data
#[derive(Debug, Clone)]
pub struct NewInvoice {
    pub order_id: String,
    pub payment_method: Option<PaymentMethod>,
    pub payment_status: PaymentStatus,
}

#[derive(Clone, Debug)]
pub struct InvoiceRepository {
    db: DbService,
}

impl InvoiceRepository {
    pub fn new(db: DbService) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> RepoResult<Vec<Invoice>> {
        self.db
            .bounded("invoices.find_all", async {
                let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices ORDER BY pk");
                let invoices = sqlx::query_as::<_, Invoice>(&sql)
                    .fetch_all(&self.db.pool)
                    .await?;
                Ok(invoices)
            })
            .await
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Invoice>> {
        self.db
            .bounded("invoices.find_by_id", async {
                let sql = format!("SELECT {INVOICE_COLUMNS} FROM invoices WHERE id = ?");
                let invoice = sqlx::query_as::<_, Invoice>(&sql)
                    .bind(id)
                    .fetch_optional(&self.db.pool)
                    .await?;
                Ok(invoice)
            })
            .await
    }

    /// Create an invoice due one day after creation
    pub async fn create(&self, data: NewInvoice) -> RepoResult<Invoice> {
        let id = new_public_id();
        let now = now_millis();
        self.db
            .bounded("invoices.create", async {
                sqlx::query(
                    "INSERT INTO invoices (id, order_id, payment_method, payment_status, payment_due_date, created_at, updated_at) VALUES (?, ?, ?, ?, ?, ?, ?)",
                )
                .bind(&id)
                .bind(&data.order_id)
                .bind(data.payment_method)
                .bind(data.payment_status)
                .bind(now + DAY_MILLIS)
                .bind(now)
                .bind(now)
                .execute(&self.db.pool)
                .await?;
                Ok(())
            })
            .await?;
        self.find_by_id(&id)
            .await?
            .ok_or_else(|| RepoError::Database("Failed to create invoice".into()))
    }

    pub async fn update(
        &self,
        id: &str,
        payment_method: Option<PaymentMethod>,
        payment_status: Option<PaymentStatus>,
    ) -> RepoResult<Invoice> {
        self.db
            .bounded("invoices.update", async {
                let rows = sqlx::query(
                    "UPDATE invoices SET payment_method = COALESCE(?1, payment_method), payment_status = COALESCE(?2, payment_status), updated_at = ?3 WHERE id = ?4",
                )
                .bind(payment_method)
                .bind(payment_status)
                .bind(now_millis())
                .bind(id)
                .execute(&self.db.pool)
                .await?;
                if rows.rows_affected() == 0 {
                    return Err(RepoError::NotFound(format!("Invoice {id} not found")));
                }
                Ok(())
            })
            .await?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Invoice {id} not found")))
    }

    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        self.db
            .bounded("invoices.delete", async {
                let rows = sqlx::query("DELETE FROM invoices WHERE id = ?")
                    .bind(id)
                    .execute(&self.db.pool)
                    .await?;
                Ok(rows.rows_affected() > 0)
            })
            .await
    }
}
