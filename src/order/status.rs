//! The form endpoint used by the orders table to change an order's status.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    database_id::{DatabaseId, OrderId},
    endpoints::{self, format_endpoint},
    order::{OrderStatus, OrderUpdate, update_order},
};

/// The state needed for updating an order's status.
#[derive(Debug, Clone)]
pub struct OrderStatusState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OrderStatusState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The status form submitted from a row of the orders table.
#[derive(Debug, Deserialize)]
pub struct OrderStatusFormData {
    pub order_status: Option<OrderStatus>,
    pub is_paid: Option<bool>,
}

/// Handle the order status form and redirect back to the orders page.
pub async fn update_order_status_endpoint(
    Path((store_id, order_id)): Path<(DatabaseId, OrderId)>,
    State(state): State<OrderStatusState>,
    Form(form): Form<OrderStatusFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let update = OrderUpdate {
        is_paid: form.is_paid,
        order_status: form.order_status,
    };

    match update_order(store_id, &order_id, update, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::ORDERS_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::EmptyOrderUpdate | Error::UpdateMissingOrder)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating order {order_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod order_status_endpoint_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
        response::IntoResponse,
    };
    use axum_extra::extract::Form;

    use crate::{
        database_id::DatabaseId,
        order::{
            OrderStatus, RawLineItem, RawOrder, get_raw_order, insert_order,
            update_order_status_endpoint,
        },
        test_utils::{assert_hx_redirect, create_test_store, get_test_connection},
    };

    use super::{OrderStatusFormData, OrderStatusState};

    fn get_state() -> (OrderStatusState, DatabaseId) {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let order = RawOrder {
            id: "order-1".to_owned(),
            order_items: vec![RawLineItem {
                price: Some(10.0),
                ..Default::default()
            }],
            is_paid: false,
            order_status: OrderStatus::Processing,
            phone: String::new(),
            address: String::new(),
            user_id: String::new(),
            total_amount: 10.0,
            created_at: None,
            updated_at: None,
        };
        insert_order(store.id, &order, &connection).unwrap();

        (
            OrderStatusState {
                db_connection: Arc::new(Mutex::new(connection)),
            },
            store.id,
        )
    }

    #[tokio::test]
    async fn updates_status_and_payment() {
        let (state, store_id) = get_state();
        let form = OrderStatusFormData {
            order_status: Some(OrderStatus::Delivered),
            is_paid: Some(true),
        };

        let response = update_order_status_endpoint(
            Path((store_id, "order-1".to_owned())),
            State(state.clone()),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, &format!("/stores/{store_id}/orders"));

        let order = get_raw_order(store_id, "order-1", &state.db_connection.lock().unwrap())
            .unwrap();
        assert!(order.is_paid);
        assert_eq!(order.order_status, OrderStatus::Delivered);
    }

    #[test]
    fn decodes_form_body() {
        let form: OrderStatusFormData =
            serde_html_form::from_str("order_status=Canceled&is_paid=false").unwrap();

        assert_eq!(form.order_status, Some(OrderStatus::Canceled));
        assert_eq!(form.is_paid, Some(false));
    }

    #[tokio::test]
    async fn empty_form_returns_bad_request() {
        let (state, store_id) = get_state();
        let form = OrderStatusFormData {
            order_status: None,
            is_paid: None,
        };

        let response = update_order_status_endpoint(
            Path((store_id, "order-1".to_owned())),
            State(state),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_order_returns_not_found() {
        let (state, store_id) = get_state();
        let form = OrderStatusFormData {
            order_status: Some(OrderStatus::Delivered),
            is_paid: None,
        };

        let response = update_order_status_endpoint(
            Path((store_id, "nope".to_owned())),
            State(state),
            Form(form),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
