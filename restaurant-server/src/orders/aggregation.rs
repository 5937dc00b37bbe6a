//! Order aggregation engine
//!
//! Turns the joined lines of an order (item, food, order and table flattened
//! by [`OrderItemRepository::joined_lines`]) into billing summaries.
//!
//! Lines are grouped by `(order_id, table_id, table_number)`. Each group
//! reports the sum of its amounts, the number of lines and the lines
//! themselves. A line whose food is gone has no amount and adds nothing to
//! the total, but still counts as a line. A total outside the decimal range
//! fails the whole request rather than the process.

use shared::error::AppResult;
use shared::models::{OrderLine, OrderSummary};

use crate::db::repository::OrderItemRepository;
use crate::pricing::{PricingError, sum_prices};

type GroupKey = (Option<String>, Option<String>, Option<i64>);

/// Group joined lines into summaries, keeping first-seen group order
pub fn group_rows(rows: Vec<OrderLine>) -> Result<Vec<OrderSummary>, PricingError> {
    let mut keys: Vec<GroupKey> = Vec::new();
    let mut groups: Vec<Vec<OrderLine>> = Vec::new();

    for row in rows {
        let key = (row.order_id.clone(), row.table_id.clone(), row.table_number);
        match keys.iter().position(|k| *k == key) {
            Some(idx) => groups[idx].push(row),
            None => {
                keys.push(key);
                groups.push(vec![row]);
            }
        }
    }

    keys.into_iter()
        .zip(groups)
        .map(|((_, _, table_number), lines)| {
            Ok(OrderSummary {
                payment_due: sum_prices(lines.iter().filter_map(|l| l.amount))?,
                total_count: lines.len() as i64,
                table_number,
                order_items: lines,
            })
        })
        .collect()
}

/// Order summaries backed by the order item store
#[derive(Clone, Debug)]
pub struct OrderAggregator {
    items: OrderItemRepository,
}

impl OrderAggregator {
    pub fn new(items: OrderItemRepository) -> Self {
        Self { items }
    }

    /// Summaries for one order; empty when the order has no items or does not exist
    pub async fn items_by_order(&self, order_id: &str) -> AppResult<Vec<OrderSummary>> {
        let rows = self.items.joined_lines(order_id).await?;
        let summaries = group_rows(rows)?;
        tracing::debug!(order_id = %order_id, groups = summaries.len(), "Order aggregated");
        Ok(summaries)
    }
}
