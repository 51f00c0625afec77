//! The checkout endpoint storefront clients use to place orders.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    AppState, Error,
    database_id::{DatabaseId, OrderId},
    order::{OrderStatus, RawLineItem, RawOrder, insert_order, normalize_order},
    store::get_store,
};

/// The state needed for checkout.
#[derive(Debug, Clone)]
pub struct CheckoutState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CheckoutState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The cart a storefront client submits.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub products: Vec<RawLineItem>,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// The body of a successful checkout.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    pub order_id: OrderId,
    pub message: &'static str,
    pub order_details: RawOrder,
}

fn checkout_error(status_code: StatusCode, message: &str) -> Response {
    (
        status_code,
        Json(json!({ "success": false, "error": message })),
    )
        .into_response()
}

/// Create an unpaid order in the Processing state from the submitted cart.
pub async fn checkout_endpoint(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CheckoutState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::error!("[ORDER_ERROR] invalid checkout request: {rejection}");
            return checkout_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.");
        }
    };

    if request.products.is_empty() {
        return checkout_error(StatusCode::BAD_REQUEST, &Error::EmptyOrder.to_string());
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return checkout_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.");
        }
    };

    match place_order(store_id, request, &connection) {
        Ok(order) => (
            StatusCode::CREATED,
            Json(CheckoutResponse {
                success: true,
                order_id: order.id.clone(),
                message: "Order created successfully",
                order_details: order,
            }),
        )
            .into_response(),
        Err(Error::NotFound) => checkout_error(StatusCode::NOT_FOUND, "Store not found."),
        Err(error) => {
            tracing::error!("[ORDER_ERROR] could not create order: {error}");
            checkout_error(StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
        }
    }
}

fn place_order(
    store_id: DatabaseId,
    request: CheckoutRequest,
    connection: &Connection,
) -> Result<RawOrder, Error> {
    get_store(store_id, connection)?;

    let now = OffsetDateTime::now_utc();
    let mut order = RawOrder {
        id: Uuid::new_v4().to_string(),
        order_items: request.products,
        is_paid: false,
        order_status: OrderStatus::Processing,
        phone: request.phone,
        address: request.address,
        user_id: request.user_id,
        total_amount: 0.0,
        created_at: Some(now),
        updated_at: Some(now),
    };
    order.total_amount = normalize_order(&order).total();

    insert_order(store_id, &order, connection)?;
    tracing::info!("Created order {} for store {store_id}", order.id);

    Ok(order)
}
