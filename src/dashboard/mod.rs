//! Dashboard module
//!
//! Provides a store's overview page with revenue cards and charts, and the
//! same metrics as JSON. The metrics come from the order aggregation in
//! [aggregation], which folds normalized orders into totals and rollups.

mod aggregation;
mod cards;
mod charts;
mod handlers;

pub use aggregation::RevenuePolicy;
pub use handlers::{get_dashboard_page, get_summary_json};
