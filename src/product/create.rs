//! Product creation page and endpoint.

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
        create_product,
        domain::{ProductFormData, parse_image_urls},
        form::{ProductFormDefaults, ProductFormMethod, product_form_view},
    },
    store::{Store, get_store},
};

/// The state needed for creating a product.
#[derive(Debug, Clone)]
pub struct CreateProductState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateProductState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the product creation page.
pub async fn get_new_product_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateProductState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let categories = get_all_categories(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(new_product_view(&store, &categories).into_response())
}

/// Handle product creation form submission.
pub async fn create_product_endpoint(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateProductState>,
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
            let create_endpoint = format_endpoint(endpoints::PRODUCTS_API, &[&store_id]);
            let images = parse_image_urls(&form.images);

            return product_form_view(
                store_id,
                ProductFormMethod::Create(&create_endpoint),
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

    match create_product(store_id, fields, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::PRODUCTS_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a product: {error}");
            error.into_alert_response()
        }
    }
}

fn new_product_view(store: &Store, categories: &[Category]) -> Markup {
    let nav_bar = NavBar::new(store.id, store.name.as_ref(), endpoints::PRODUCTS_VIEW).into_html();
    let create_endpoint = format_endpoint(endpoints::PRODUCTS_API, &[&store.id]);
    let form = product_form_view(
        store.id,
        ProductFormMethod::Create(&create_endpoint),
        &ProductFormDefaults::default(),
        categories,
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create Product" }
            (form)
        }
    };

    base("Create Product", &[], &content)
}
