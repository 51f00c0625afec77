//! Category creation page and endpoint.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    billboard::{Billboard, get_all_billboards},
    category::{
        CategoryName, create_category,
        domain::CategoryFormData,
        form::{CategoryFormDefaults, CategoryFormMethod, category_form_view},
    },
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for creating a category.
#[derive(Debug, Clone)]
pub struct CreateCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category creation page.
pub async fn get_new_category_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let billboards = get_all_billboards(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve billboards: {error}"))?;

    Ok(new_category_view(&store, &billboards).into_response())
}

/// Handle category creation form submission.
pub async fn create_category_endpoint(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateCategoryState>,
    Form(form): Form<CategoryFormData>,
) -> Response {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    let name = match CategoryName::new(&form.name) {
        Ok(name) => name,
        Err(error) => {
            let billboards = match get_all_billboards(store_id, &connection) {
                Ok(billboards) => billboards,
                Err(error) => return error.into_alert_response(),
            };
            let create_endpoint = format_endpoint(endpoints::POST_CATEGORY, &[&store_id]);

            return category_form_view(
                store_id,
                CategoryFormMethod::Create(&create_endpoint),
                &CategoryFormDefaults {
                    name: &form.name,
                    billboard_id: Some(form.billboard_id),
                },
                &billboards,
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    match create_category(store_id, name, form.billboard_id, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::CATEGORIES_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::InvalidBillboard) => Error::InvalidBillboard.into_alert_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a category: {error}");
            error.into_alert_response()
        }
    }
}

fn new_category_view(store: &Store, billboards: &[Billboard]) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::CATEGORIES_VIEW).into_html();
    let create_endpoint = format_endpoint(endpoints::POST_CATEGORY, &[&store.id]);
    let form = category_form_view(
        store.id,
        CategoryFormMethod::Create(&create_endpoint),
        &CategoryFormDefaults::default(),
        billboards,
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create Category" }
            (form)
        }
    };

    base("Create Category", &[], &content)
}
