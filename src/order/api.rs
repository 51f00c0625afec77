//! The JSON endpoints for changing and deleting orders.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRequest;
use rusqlite::Connection;
use serde_json::json;

use crate::{
    AppState, Error,
    alert::Alert,
    database_id::{DatabaseId, OrderId},
    order::{OrderUpdate, delete_order, get_raw_order, update_order},
};

/// The state needed for the order API.
#[derive(Debug, Clone)]
pub struct OrderApiState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OrderApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

fn json_error(status_code: StatusCode, message: &str) -> Response {
    (status_code, Json(json!({ "error": message }))).into_response()
}

/// Change an order's payment status, delivery status, or both.
///
/// Responds with the updated order document.
pub async fn patch_order_endpoint(
    Path((store_id, order_id)): Path<(DatabaseId, OrderId)>,
    State(state): State<OrderApiState>,
    Json(update): Json<OrderUpdate>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error");
        }
    };

    let result = update_order(store_id, &order_id, update, &connection)
        .and_then(|_| get_raw_order(store_id, &order_id, &connection));

    match result {
        Ok(order) => Json(order).into_response(),
        Err(Error::EmptyOrderUpdate) => json_error(
            StatusCode::BAD_REQUEST,
            "Either order status or payment status is required",
        ),
        Err(Error::UpdateMissingOrder | Error::NotFound) => {
            json_error(StatusCode::NOT_FOUND, "Order Not Found")
        }
        Err(error) => {
            tracing::error!("[ORDER_PATCH] could not update order {order_id}: {error}");
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
        }
    }
}

/// Delete an order.
///
/// htmx requests from the orders table get an alert, other clients get JSON.
pub async fn delete_order_endpoint(
    Path((store_id, order_id)): Path<(DatabaseId, OrderId)>,
    State(state): State<OrderApiState>,
    HxRequest(is_htmx_request): HxRequest,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return if is_htmx_request {
                Error::DatabaseLockError.into_alert_response()
            } else {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            };
        }
    };

    match (delete_order(store_id, &order_id, &connection), is_htmx_request) {
        (Ok(_), true) => Alert::SuccessSimple {
            message: "Order deleted successfully".to_owned(),
        }
        .into_response(),
        (Ok(_), false) => Json(json!({ "msg": "Order Deleted" })).into_response(),
        (Err(Error::DeleteMissingOrder), true) => Error::DeleteMissingOrder.into_alert_response(),
        (Err(Error::DeleteMissingOrder), false) => {
            json_error(StatusCode::NOT_FOUND, "Order Not Found")
        }
        (Err(error), is_htmx_request) => {
            tracing::error!("[ORDER_DELETE] could not delete order {order_id}: {error}");
            if is_htmx_request {
                error.into_alert_response()
            } else {
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }
}
