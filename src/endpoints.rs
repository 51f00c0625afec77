//! The API endpoints URIs.
//!
//! Every route below the root is scoped to a store. For endpoints that take
//! parameters, e.g. '/stores/{store_id}/billboards', use [format_endpoint].

/// The page listing all stores.
pub const ROOT: &str = "/";
/// The dashboard overview for a store.
pub const DASHBOARD_VIEW: &str = "/stores/{store_id}";
/// The page listing a store's billboards.
pub const BILLBOARDS_VIEW: &str = "/stores/{store_id}/billboards";
/// The page for creating a billboard.
pub const NEW_BILLBOARD_VIEW: &str = "/stores/{store_id}/billboards/new";
/// The page for editing a billboard.
pub const EDIT_BILLBOARD_VIEW: &str = "/stores/{store_id}/billboards/{billboard_id}/edit";
/// The page listing a store's categories.
pub const CATEGORIES_VIEW: &str = "/stores/{store_id}/categories";
/// The page for creating a category.
pub const NEW_CATEGORY_VIEW: &str = "/stores/{store_id}/categories/new";
/// The page for editing a category.
pub const EDIT_CATEGORY_VIEW: &str = "/stores/{store_id}/categories/{category_id}/edit";
/// The page listing a store's products.
pub const PRODUCTS_VIEW: &str = "/stores/{store_id}/products";
/// The page for creating a product.
pub const NEW_PRODUCT_VIEW: &str = "/stores/{store_id}/products/new";
/// The page for editing a product.
pub const EDIT_PRODUCT_VIEW: &str = "/stores/{store_id}/products/{product_id}/edit";
/// The page listing a store's orders.
pub const ORDERS_VIEW: &str = "/stores/{store_id}/orders";
/// The page to display when an internal server error occurs.
pub const INTERNAL_ERROR_VIEW: &str = "/error";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route for creating a store.
pub const POST_STORE: &str = "/api/stores";
/// The route to create billboards.
pub const POST_BILLBOARD: &str = "/api/stores/{store_id}/billboards";
/// The route to update or delete a billboard.
pub const BILLBOARD: &str = "/api/stores/{store_id}/billboards/{billboard_id}";
/// The route to create categories.
pub const POST_CATEGORY: &str = "/api/stores/{store_id}/categories";
/// The route to update or delete a category.
pub const CATEGORY: &str = "/api/stores/{store_id}/categories/{category_id}";
/// The route to create products (POST) or list them as JSON (GET).
pub const PRODUCTS_API: &str = "/api/stores/{store_id}/products";
/// The route to update or delete a product.
pub const PRODUCT: &str = "/api/stores/{store_id}/products/{product_id}";
/// The route to patch or delete an order.
pub const ORDER: &str = "/api/stores/{store_id}/orders/{order_id}";
/// The form route used by the orders table to change an order's status.
pub const ORDER_STATUS: &str = "/api/stores/{store_id}/orders/{order_id}/status";
/// The route storefront clients use to place an order.
pub const CHECKOUT: &str = "/api/stores/{store_id}/checkout";
/// The route for the dashboard metrics as JSON.
pub const SUMMARY_API: &str = "/api/stores/{store_id}/summary";

/// Replace the parameters in `endpoint_path` with `params`, in order.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/stores/{store_id}', '{store_id}' is the parameter.
///
/// Parameters without a matching value are left as they are, and extra
/// values are ignored.
pub fn format_endpoint(endpoint_path: &str, params: &[&dyn std::fmt::Display]) -> String {
    let mut formatted = String::with_capacity(endpoint_path.len());
    let mut params = params.iter();
    let mut rest = endpoint_path;

    while let Some(start) = rest.find('{') {
        let Some(length) = rest[start..].find('}') else {
            break;
        };
        let end = start + length + 1;

        formatted.push_str(&rest[..start]);

        match params.next() {
            Some(param) => formatted.push_str(&param.to_string()),
            None => formatted.push_str(&rest[start..end]),
        }

        rest = &rest[end..];
    }

    formatted.push_str(rest);
    formatted
}
