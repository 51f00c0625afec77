//! The JSON product listing read by storefront clients.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    product::{
        ImageRef, Product,
        db::{AvailableProductsFilter, get_available_products},
    },
    store::get_store,
};

/// The state needed for the product listing API.
#[derive(Debug, Clone)]
pub struct ProductsApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductsApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Query parameters for filtering the product listing.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub category: Option<String>,
    pub is_featured: Option<bool>,
}

/// A product as storefront clients see it.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductJson {
    pub id: DatabaseId,
    pub store_id: DatabaseId,
    pub name: String,
    pub price: f64,
    pub category: String,
    pub images: Vec<ImageRef>,
    pub is_featured: bool,
    pub created_at: String,
}

impl ProductJson {
    fn from_product(product: Product) -> Self {
        Self {
            id: product.id,
            store_id: product.store_id,
            name: product.name.to_string(),
            price: product.price,
            category: product.category.to_string(),
            images: product
                .images
                .into_iter()
                .map(|url| ImageRef { url })
                .collect(),
            is_featured: product.is_featured,
            created_at: product.created_at.format(&Rfc3339).unwrap_or_default(),
        }
    }
}

/// List a store's non-archived products, optionally filtered by category
/// name and whether they are featured.
pub async fn get_products_json(
    Path(store_id): Path<DatabaseId>,
    Query(query): Query<ProductQuery>,
    State(state): State<ProductsApiState>,
) -> Result<Json<Vec<ProductJson>>, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_store(store_id, &connection)?;

    let filter = AvailableProductsFilter {
        category: query.category.as_deref(),
        is_featured: query.is_featured,
    };
    let products = get_available_products(store_id, filter, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve products: {error}"))?;

    Ok(Json(
        products.into_iter().map(ProductJson::from_product).collect(),
    ))
}
