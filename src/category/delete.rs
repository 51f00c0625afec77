//! Category deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::Alert, category::db::delete_category, database_id::DatabaseId,
};

/// The state needed for deleting a category.
#[derive(Debug, Clone)]
pub struct DeleteCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle category deletion. Returns success alert or error.
pub async fn delete_category_endpoint(
    Path((store_id, category_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<DeleteCategoryState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_category(store_id, category_id, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: "Category deleted successfully".to_owned(),
        }
        .into_response(),
        Err(Error::DeleteMissingCategory) => Error::DeleteMissingCategory.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_category_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };

    use crate::{
        billboard::{BillboardLabel, ImageUrl, create_billboard},
        category::{CategoryName, create_category, delete_category_endpoint, get_all_categories},
        test_utils::{create_test_store, get_test_connection},
    };

    use super::DeleteCategoryState;

    #[tokio::test]
    async fn delete_category_endpoint_succeeds() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let billboard = create_billboard(
            store.id,
            BillboardLabel::new_unchecked("Summer Sale"),
            ImageUrl::new_unchecked("https://example.com/summer.png"),
            &connection,
        )
        .unwrap();
        let category = create_category(
            store.id,
            CategoryName::new_unchecked("Drinks"),
            billboard.id,
            &connection,
        )
        .unwrap();
        let state = DeleteCategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_category_endpoint(Path((store.id, category.id)), State(state.clone()))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            get_all_categories(store.id, &state.db_connection.lock().unwrap()),
            Ok(vec![])
        );
    }

    #[tokio::test]
    async fn delete_category_endpoint_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let state = DeleteCategoryState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_category_endpoint(Path((store.id, 999)), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
