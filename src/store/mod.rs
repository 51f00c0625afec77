//! Stores are the tenants of the dashboard, every other record belongs to exactly one store.

mod db;
mod domain;
mod list;

pub use db::{create_store, create_store_table, get_all_stores, get_store};
pub use domain::{Store, StoreName};
pub use list::{create_store_endpoint, get_stores_page};
