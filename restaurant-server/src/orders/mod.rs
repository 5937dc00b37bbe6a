//! Order aggregation

pub mod aggregation;

pub use aggregation::{OrderAggregator, group_rows};
