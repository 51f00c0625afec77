//! Products sold by a store, along with the JSON listing used by the storefront.

mod api;
mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use api::get_products_json;
pub use create::{create_product_endpoint, get_new_product_page};
pub use db::{
    count_available_products, create_product, create_product_table, get_all_products,
    get_product, update_product,
};
pub use delete::delete_product_endpoint;
pub use domain::{ImageRef, Product, ProductFields, ProductName};
pub use edit::{get_edit_product_page, update_product_endpoint};
pub use list::get_products_page;
