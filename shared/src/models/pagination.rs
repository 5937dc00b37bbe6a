//! Pagination query and page wrapper

use serde::{Deserialize, Serialize};

pub const DEFAULT_RECORD_PER_PAGE: i64 = 10;

/// `?page=&record_per_page=` query; missing or non-positive values fall back to defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub page: Option<i64>,
    pub record_per_page: Option<i64>,
}

impl PageQuery {
    pub fn page(&self) -> i64 {
        self.page.filter(|p| *p >= 1).unwrap_or(1)
    }

    pub fn record_per_page(&self) -> i64 {
        self.record_per_page
            .filter(|r| *r >= 1)
            .unwrap_or(DEFAULT_RECORD_PER_PAGE)
    }

    /// Row offset of the first record on the requested page
    pub fn offset(&self) -> i64 {
        (self.page() - 1).saturating_mul(self.record_per_page())
    }
}

/// One page of a listing together with the total record count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub total_count: i64,
    pub items: Vec<T>,
}
