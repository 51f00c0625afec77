//! Billboard deletion endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use rusqlite::Connection;

use crate::{
    AppState, Error, alert::Alert, billboard::db::delete_billboard, database_id::DatabaseId,
};

/// The state needed for deleting a billboard.
#[derive(Debug, Clone)]
pub struct DeleteBillboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for DeleteBillboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Handle billboard deletion. Returns success alert or error.
pub async fn delete_billboard_endpoint(
    Path((store_id, billboard_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<DeleteBillboardState>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match delete_billboard(store_id, billboard_id, &connection) {
        Ok(_) => Alert::SuccessSimple {
            message: "Billboard deleted successfully".to_owned(),
        }
        .into_response(),
        Err(error @ (Error::DeleteMissingBillboard | Error::BillboardInUse)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while deleting billboard {billboard_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod delete_billboard_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use rusqlite::Connection;

    use crate::{
        billboard::{BillboardLabel, ImageUrl, create_billboard, delete_billboard_endpoint},
        category::{CategoryName, create_category},
        database_id::DatabaseId,
        test_utils::{
            assert_valid_html, create_test_store, get_header, get_test_connection,
            parse_html_fragment,
        },
    };

    use super::DeleteBillboardState;

    fn create_test_billboard(connection: &Connection) -> (DatabaseId, DatabaseId) {
        let store = create_test_store(connection);
        let billboard = create_billboard(
            store.id,
            BillboardLabel::new_unchecked("Summer Sale"),
            ImageUrl::new_unchecked("https://example.com/summer.png"),
            connection,
        )
        .expect("Could not create test billboard");

        (store.id, billboard.id)
    }

    #[tokio::test]
    async fn delete_billboard_endpoint_succeeds() {
        let connection = get_test_connection();
        let ids = create_test_billboard(&connection);
        let state = DeleteBillboardState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_billboard_endpoint(Path(ids), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn delete_billboard_endpoint_with_invalid_id_returns_not_found() {
        let connection = get_test_connection();
        let (store_id, _) = create_test_billboard(&connection);
        let state = DeleteBillboardState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_billboard_endpoint(Path((store_id, 999)), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            get_header(&response, "content-type"),
            "text/html; charset=utf-8"
        );
        let html = parse_html_fragment(response).await;
        assert_valid_html(&html);
    }

    #[tokio::test]
    async fn delete_billboard_in_use_returns_conflict() {
        let connection = get_test_connection();
        let (store_id, billboard_id) = create_test_billboard(&connection);
        create_category(
            store_id,
            CategoryName::new_unchecked("Drinks"),
            billboard_id,
            &connection,
        )
        .expect("Could not create test category");
        let state = DeleteBillboardState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = delete_billboard_endpoint(Path((store_id, billboard_id)), State(state))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }
}
