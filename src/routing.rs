//! Application router configuration.

use axum::{
    Router,
    http::{
        Method,
        header::{AUTHORIZATION, CONTENT_TYPE},
    },
    routing::{get, patch, post, put},
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    AppState,
    billboard::{
        create_billboard_endpoint, delete_billboard_endpoint, get_billboards_page,
        get_edit_billboard_page, get_new_billboard_page, update_billboard_endpoint,
    },
    category::{
        create_category_endpoint, delete_category_endpoint, get_categories_page,
        get_edit_category_page, get_new_category_page, update_category_endpoint,
    },
    dashboard::{get_dashboard_page, get_summary_json},
    endpoints,
    internal_server_error::get_internal_server_error_page,
    not_found::get_404_not_found,
    order::{
        checkout_endpoint, delete_order_endpoint, get_orders_page, patch_order_endpoint,
        update_order_status_endpoint,
    },
    product::{
        create_product_endpoint, delete_product_endpoint, get_edit_product_page,
        get_new_product_page, get_products_json, get_products_page, update_product_endpoint,
    },
    store::{create_store_endpoint, get_stores_page},
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let page_routes = Router::new()
        .route(endpoints::ROOT, get(get_stores_page))
        .route(endpoints::DASHBOARD_VIEW, get(get_dashboard_page))
        .route(endpoints::BILLBOARDS_VIEW, get(get_billboards_page))
        .route(endpoints::NEW_BILLBOARD_VIEW, get(get_new_billboard_page))
        .route(endpoints::EDIT_BILLBOARD_VIEW, get(get_edit_billboard_page))
        .route(endpoints::CATEGORIES_VIEW, get(get_categories_page))
        .route(endpoints::NEW_CATEGORY_VIEW, get(get_new_category_page))
        .route(endpoints::EDIT_CATEGORY_VIEW, get(get_edit_category_page))
        .route(endpoints::PRODUCTS_VIEW, get(get_products_page))
        .route(endpoints::NEW_PRODUCT_VIEW, get(get_new_product_page))
        .route(endpoints::EDIT_PRODUCT_VIEW, get(get_edit_product_page))
        .route(endpoints::ORDERS_VIEW, get(get_orders_page))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    // Form endpoints respond with HX-Redirect on success and alerts on failure.
    let api_routes = Router::new()
        .route(endpoints::POST_STORE, post(create_store_endpoint))
        .route(endpoints::POST_BILLBOARD, post(create_billboard_endpoint))
        .route(
            endpoints::BILLBOARD,
            put(update_billboard_endpoint).delete(delete_billboard_endpoint),
        )
        .route(endpoints::POST_CATEGORY, post(create_category_endpoint))
        .route(
            endpoints::CATEGORY,
            put(update_category_endpoint).delete(delete_category_endpoint),
        )
        .route(
            endpoints::PRODUCTS_API,
            get(get_products_json).post(create_product_endpoint),
        )
        .route(
            endpoints::PRODUCT,
            put(update_product_endpoint).delete(delete_product_endpoint),
        )
        .route(
            endpoints::ORDER,
            patch(patch_order_endpoint).delete(delete_order_endpoint),
        )
        .route(endpoints::ORDER_STATUS, post(update_order_status_endpoint))
        .route(endpoints::SUMMARY_API, get(get_summary_json));

    // Storefronts are served from other origins.
    let checkout_routes = Router::new()
        .route(endpoints::CHECKOUT, post(checkout_endpoint))
        .layer(checkout_cors_layer());

    page_routes
        .merge(api_routes)
        .merge(checkout_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

fn checkout_cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
}
