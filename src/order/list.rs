//! Orders listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, BUTTON_DELETE_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, base, format_created_at,
        format_currency,
    },
    navigation::NavBar,
    order::{Order, OrderStatus, PaymentStatus, RawOrder, get_raw_orders, normalize_order},
    store::{Store, get_store},
};

/// The state needed for the orders listing page.
#[derive(Debug, Clone)]
pub struct OrdersPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for OrdersPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the orders listing page.
pub async fn get_orders_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<OrdersPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let orders = get_raw_orders(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve orders: {error}"))?;

    Ok(orders_view(&store, &orders).into_response())
}

/// An order row: the stored document plus its normalized form.
struct OrderRow<'a> {
    raw: &'a RawOrder,
    order: Order,
}

fn order_status_style(status: OrderStatus) -> &'static str {
    match status {
        OrderStatus::Processing => "text-blue-700 bg-blue-50",
        OrderStatus::Delivering => "text-amber-700 bg-amber-50",
        OrderStatus::Delivered => "text-emerald-700 bg-emerald-50",
        OrderStatus::Canceled => "text-rose-700 bg-rose-50",
    }
}

fn payment_status_style(status: PaymentStatus) -> &'static str {
    match status {
        PaymentStatus::Paid => "text-emerald-700 bg-emerald-50",
        PaymentStatus::NotPaid => "text-rose-700 bg-rose-50",
    }
}

fn status_form(store_id: DatabaseId, row: &OrderRow<'_>) -> Markup {
    let status_endpoint = format_endpoint(endpoints::ORDER_STATUS, &[&store_id, &row.order.id]);

    html!(
        form
            hx-post=(status_endpoint)
            hx-target-error="#alert-container"
            class="flex flex-col gap-2"
        {
            select
                name="order_status"
                aria-label="Order status"
                class="text-sm rounded border-gray-300 dark:bg-gray-700"
            {
                @for status in OrderStatus::ALL {
                    option value=(status.label()) selected[status == row.order.order_status]
                    {
                        (status.label())
                    }
                }
            }

            select
                name="is_paid"
                aria-label="Payment status"
                class="text-sm rounded border-gray-300 dark:bg-gray-700"
            {
                option value="true" selected[row.order.is_paid] { (PaymentStatus::Paid.label()) }
                option value="false" selected[!row.order.is_paid] { (PaymentStatus::NotPaid.label()) }
            }

            button type="submit" class="text-sm text-blue-600 hover:text-blue-500" { "Update" }
        }
    )
}

fn orders_view(store: &Store, orders: &[RawOrder]) -> Markup {
    let nav_bar = NavBar::new(store.id, store.name.as_ref(), endpoints::ORDERS_VIEW).into_html();
    let rows: Vec<OrderRow> = orders
        .iter()
        .map(|raw| OrderRow {
            raw,
            order: normalize_order(raw),
        })
        .collect();

    let table_row = |row: &OrderRow| {
        let delete_url = format_endpoint(endpoints::ORDER, &[&store.id, &row.order.id]);
        let image_urls = row
            .raw
            .order_items
            .iter()
            .filter_map(|item| item.images.first())
            .map(|image| image.url.as_str());
        let payment_status = row.order.payment_status();

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-2"
                    {
                        @for url in image_urls {
                            img src=(url) alt="" class="h-10 w-10 object-cover rounded";
                        }
                    }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    ul
                    {
                        @for item in &row.order.line_items {
                            li { (item.name) " (" (item.quantity) ")" }
                        }
                    }
                }
                td class=(TABLE_CELL_STYLE) { (row.raw.phone) }
                td class=(TABLE_CELL_STYLE) { (row.raw.address) }
                td class=(TABLE_CELL_STYLE) { (format_currency(row.order.total())) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class={ (BADGE_STYLE) " " (order_status_style(row.order.order_status)) }
                    {
                        (row.order.order_status.label())
                    }
                }
                td class=(TABLE_CELL_STYLE)
                {
                    span class={ (BADGE_STYLE) " " (payment_status_style(payment_status)) }
                    {
                        (payment_status.label())
                    }
                }
                td class=(TABLE_CELL_STYLE) { (format_created_at(row.order.created_at)) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex flex-col gap-4"
                    {
                        (status_form(store.id, row))

                        button
                            hx-delete=(delete_url)
                            hx-confirm="Are you sure you want to delete this order?"
                            hx-target="closest tr"
                            hx-target-error="#alert-container"
                            hx-swap="delete"
                            class=(BUTTON_DELETE_STYLE)
                        {
                            "Delete"
                        }
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-6xl"
            {
                header
                {
                    h1 class="text-xl font-bold" { "Orders (" (rows.len()) ")" }
                }

                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Images" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Products" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Phone" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Address" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Total" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Status" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Payment" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for row in &rows {
                            (table_row(row))
                        }

                        @if rows.is_empty() {
                            tr
                            {
                                td
                                    colspan="9"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No orders yet."
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Orders", &[], &content)
}
