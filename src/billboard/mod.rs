//! Billboards are the promotional banners shown at the top of a category page.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod form;
mod list;

pub use create::{create_billboard_endpoint, get_new_billboard_page};
pub use db::{
    create_billboard, create_billboard_table, get_all_billboards, get_billboard, update_billboard,
};
pub use delete::delete_billboard_endpoint;
pub use domain::{Billboard, BillboardLabel, ImageUrl};
pub use edit::{get_edit_billboard_page, update_billboard_endpoint};
pub use list::get_billboards_page;
