//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The dashboard page with the summary cards and revenue charts
//! - The JSON summary with the same metrics for API clients
//! - State and query types used by the handlers

use std::{
    collections::{BTreeMap, HashMap},
    sync::{Arc, Mutex},
};

use axum::{
    Json,
    extract::{FromRef, Path, Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use time::{OffsetDateTime, UtcOffset};

use crate::{
    AppState, Error,
    dashboard::{
        aggregation::{
            MonthlyRevenue, RevenuePolicy, monthly_revenue, revenue_by_category,
            revenue_by_order_status, revenue_by_payment_status, total_revenue, total_sales,
        },
        cards::{SummaryCards, summary_cards_view},
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, monthly_revenue_chart,
            order_status_chart, payment_status_chart,
        },
    },
    database_id::DatabaseId,
    endpoints,
    html::{HeadElement, base},
    navigation::NavBar,
    order::{Order, OrderStatus, PaymentStatus, get_raw_orders, normalize_order},
    product::count_available_products,
    store::{Store, get_store},
    timezone::get_local_offset,
};

/// The state needed for displaying the dashboard page and summary.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading orders and products.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The local timezone as a canonical timezone name, e.g. "Asia/Jerusalem".
    pub local_timezone: String,
    /// Which orders count towards revenue.
    pub revenue_policy: RevenuePolicy,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
            revenue_policy: state.revenue_policy,
        }
    }
}

/// Query parameters accepted by the dashboard and the summary.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardQuery {
    /// The calendar year of the monthly revenue series. Defaults to the
    /// current year in the local timezone.
    pub year: Option<i32>,
}

/// Everything the dashboard shows for one store.
struct DashboardData {
    year: i32,
    cards: SummaryCards,
    monthly_revenue: Vec<MonthlyRevenue>,
    revenue_by_payment_status: HashMap<PaymentStatus, f64>,
    revenue_by_order_status: HashMap<OrderStatus, f64>,
    revenue_by_category: HashMap<String, f64>,
}

/// The dashboard metrics as JSON.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub year: i32,
    pub total_revenue: f64,
    pub total_sales: usize,
    pub products_in_stock: usize,
    pub monthly_revenue: Vec<MonthlyRevenue>,
    pub revenue_by_payment_status: BTreeMap<&'static str, f64>,
    pub revenue_by_order_status: BTreeMap<&'static str, f64>,
    pub revenue_by_category: BTreeMap<String, f64>,
}

impl From<DashboardData> for DashboardSummary {
    fn from(data: DashboardData) -> Self {
        Self {
            year: data.year,
            total_revenue: data.cards.total_revenue,
            total_sales: data.cards.total_sales,
            products_in_stock: data.cards.products_in_stock,
            monthly_revenue: data.monthly_revenue,
            revenue_by_payment_status: data
                .revenue_by_payment_status
                .into_iter()
                .map(|(status, total)| (status.label(), total))
                .collect(),
            revenue_by_order_status: data
                .revenue_by_order_status
                .into_iter()
                .map(|(status, total)| (status.label(), total))
                .collect(),
            revenue_by_category: data.revenue_by_category.into_iter().collect(),
        }
    }
}

/// Display the overview page of a store.
pub async fn get_dashboard_page(
    Path(store_id): Path<DatabaseId>,
    Query(query): Query<DashboardQuery>,
    State(state): State<DashboardState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let data = build_dashboard_data(
        store_id,
        query.year,
        &state.local_timezone,
        state.revenue_policy,
        &connection,
    )?;

    Ok(dashboard_view(&store, &data).into_response())
}

/// Return the dashboard metrics of a store as JSON.
///
/// Errors are returned as JSON `{error}` bodies.
pub async fn get_summary_json(
    Path(store_id): Path<DatabaseId>,
    Query(query): Query<DashboardQuery>,
    State(state): State<DashboardState>,
) -> Response {
    match summarize_store(store_id, query.year, &state) {
        Ok(summary) => Json(summary).into_response(),
        Err(error) => error.into_json_response(),
    }
}

fn summarize_store(
    store_id: DatabaseId,
    year: Option<i32>,
    state: &DashboardState,
) -> Result<DashboardSummary, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    get_store(store_id, &connection)?;
    let data = build_dashboard_data(
        store_id,
        year,
        &state.local_timezone,
        state.revenue_policy,
        &connection,
    )?;

    Ok(data.into())
}

/// Fetches a store's orders and reduces them to the dashboard metrics.
///
/// # Errors
/// Returns an error if the timezone is invalid or a database query fails,
/// including when a stored order cannot be decoded.
fn build_dashboard_data(
    store_id: DatabaseId,
    year: Option<i32>,
    local_timezone_name: &str,
    policy: RevenuePolicy,
    connection: &Connection,
) -> Result<DashboardData, Error> {
    let local_offset = get_local_offset(local_timezone_name).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", local_timezone_name);
        Error::InvalidTimezoneError(local_timezone_name.to_owned())
    })?;
    let year = year.unwrap_or_else(|| current_year(local_offset));

    let orders: Vec<Order> = get_raw_orders(store_id, connection)
        .inspect_err(|error| tracing::error!("Could not get orders for store {store_id}: {error}"))?
        .iter()
        .map(normalize_order)
        .collect();

    let products_in_stock = count_available_products(store_id, connection)
        .inspect_err(|error| tracing::error!("Could not count products: {error}"))?;

    Ok(DashboardData {
        year,
        cards: SummaryCards {
            total_revenue: total_revenue(&orders, policy),
            total_sales: total_sales(&orders),
            products_in_stock,
        },
        monthly_revenue: monthly_revenue(&orders, policy, year, local_offset),
        revenue_by_payment_status: revenue_by_payment_status(&orders),
        revenue_by_order_status: revenue_by_order_status(&orders, policy),
        revenue_by_category: revenue_by_category(&orders, policy),
    })
}

fn current_year(local_offset: UtcOffset) -> i32 {
    OffsetDateTime::now_utc().to_offset(local_offset).year()
}

fn build_dashboard_charts(data: &DashboardData) -> [DashboardChart; 4] {
    [
        DashboardChart {
            id: "monthly-revenue-chart",
            options: monthly_revenue_chart(&data.monthly_revenue, data.year).to_string(),
        },
        DashboardChart {
            id: "payment-status-chart",
            options: payment_status_chart(&data.revenue_by_payment_status).to_string(),
        },
        DashboardChart {
            id: "order-status-chart",
            options: order_status_chart(&data.revenue_by_order_status).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&data.revenue_by_category).to_string(),
        },
    ]
}

fn dashboard_view(store: &Store, data: &DashboardData) -> Markup {
    let nav_bar = NavBar::new(store.id, store.name.as_ref(), endpoints::DASHBOARD_VIEW).into_html();
    let charts = build_dashboard_charts(data);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            header class="w-full mb-4"
            {
                h1 class="text-2xl font-bold" { "Dashboard" }
                p class="text-sm text-gray-600 dark:text-gray-400" { "Overview of your store" }
            }

            (summary_cards_view(&data.cards))
            (charts_view(&charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}
