//! Product editing page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    product::{
        domain::{ProductFormData, parse_image_urls},
        form::{ProductFormDefaults, ProductFormMethod, product_form_view},
        get_product, update_product,
    },
    store::{Store, get_store},
};

/// The state needed for the edit product page and endpoint.
#[derive(Debug, Clone)]
pub struct EditProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the product editing page.
pub async fn get_edit_product_page(
    Path((store_id, product_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditProductState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let categories = get_all_categories(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;
    let update_endpoint = format_endpoint(endpoints::PRODUCT, &[&store_id, &product_id]);

    let view = match get_product(store_id, product_id, &connection) {
        Ok(product) => edit_product_view(
            &store,
            &update_endpoint,
            &ProductFormDefaults {
                name: product.name.as_ref(),
                price: Some(product.price),
                category: Some(product.category.as_ref()),
                images: &product.images,
                is_featured: product.is_featured,
                is_archived: product.is_archived,
            },
            &categories,
            "",
        ),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Product not found",
                _ => {
                    tracing::error!("Failed to retrieve product {product_id}: {error}");
                    "Failed to load product"
                }
            };

            edit_product_view(
                &store,
                &update_endpoint,
                &ProductFormDefaults::default(),
                &categories,
                error_message,
            )
        }
    };

    Ok(view.into_response())
}

/// Handle product update form submission.
pub async fn update_product_endpoint(
    Path((store_id, product_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditProductState>,
    Form(form): Form<ProductFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let fields = match form.validate() {
        Ok(fields) => fields,
        Err(error) => {
            let categories = match get_all_categories(store_id, &connection) {
                Ok(categories) => categories,
                Err(error) => return error.into_alert_response(),
            };
            let update_endpoint = format_endpoint(endpoints::PRODUCT, &[&store_id, &product_id]);
            let images = parse_image_urls(&form.images);

            return product_form_view(
                store_id,
                ProductFormMethod::Update(&update_endpoint),
                &ProductFormDefaults {
                    name: &form.name,
                    price: Some(form.price),
                    category: Some(&form.category),
                    images: &images,
                    is_featured: form.is_featured,
                    is_archived: form.is_archived,
                },
                &categories,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    match update_product(store_id, product_id, fields, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::PRODUCTS_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingProduct) => Error::UpdateMissingProduct.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating product {product_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_product_view(
    store: &Store,
    update_endpoint: &str,
    defaults: &ProductFormDefaults<'_>,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let nav_bar = NavBar::new(store.id, store.name.as_ref(), endpoints::PRODUCTS_VIEW).into_html();
    let form = product_form_view(
        store.id,
        ProductFormMethod::Update(update_endpoint),
        defaults,
        categories,
        error_message,
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Product" }
            (form)
        }
    };

    base("Edit Product", &[], &content)
}
