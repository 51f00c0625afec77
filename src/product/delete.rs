//! Product deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{AppState, Error, alert::Alert, database_id::DatabaseId, product::db::delete_product};

/// The state needed for deleting a product.
#[derive(Debug, Clone)]
pub struct DeleteProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle product deletion. Returns success alert or error.
pub async fn delete_product_endpoint(
    Path((store_id, product_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<DeleteProductState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_product(store_id, product_id, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: "Product deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingProduct) => Error::DeleteMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}
