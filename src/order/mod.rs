//! Orders placed through the storefront: storage, normalization, the orders
//! table and the endpoints that change them.

mod api;
mod checkout;
mod db;
mod domain;
mod list;
mod normalize;
mod status;

pub use api::{delete_order_endpoint, patch_order_endpoint};
pub use checkout::checkout_endpoint;
pub use db::{
    create_order_table, delete_order, get_raw_order, get_raw_orders, insert_order, update_order,
};
pub use domain::{
    LineItem, Order, OrderStatus, OrderUpdate, PaymentStatus, RawLineItem, RawOrder,
};
pub use list::get_orders_page;
pub use normalize::normalize_order;
pub use status::update_order_status_endpoint;
