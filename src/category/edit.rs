//! Category editing page and endpoint.

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
        CategoryName,
        domain::CategoryFormData,
        form::{CategoryFormDefaults, CategoryFormMethod, category_form_view},
        get_category, update_category,
    },
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for the edit category page and endpoint.
#[derive(Debug, Clone)]
pub struct EditCategoryState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditCategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the category editing page.
pub async fn get_edit_category_page(
    Path((store_id, category_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditCategoryState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let billboards = get_all_billboards(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve billboards: {error}"))?;
    let update_endpoint = format_endpoint(endpoints::CATEGORY, &[&store_id, &category_id]);

    let view = match get_category(store_id, category_id, &connection) {
        Ok(category) => edit_category_view(
            &store,
            &update_endpoint,
            &CategoryFormDefaults {
                name: category.name.as_ref(),
                billboard_id: Some(category.billboard_id),
            },
            &billboards,
            "",
        ),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Category not found",
                _ => {
                    tracing::error!("Failed to retrieve category {category_id}: {error}");
                    "Failed to load category"
                }
            };

            edit_category_view(
                &store,
                &update_endpoint,
                &CategoryFormDefaults::default(),
                &billboards,
                error_message,
            )
        }
    };

    Ok(view.into_response())
}

/// Handle category update form submission.
pub async fn update_category_endpoint(
    Path((store_id, category_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditCategoryState>,
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
            let update_endpoint = format_endpoint(endpoints::CATEGORY, &[&store_id, &category_id]);

            return category_form_view(
                store_id,
                CategoryFormMethod::Update(&update_endpoint),
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

    match update_category(store_id, category_id, name, form.billboard_id, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::CATEGORIES_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error @ (Error::UpdateMissingCategory | Error::InvalidBillboard)) => {
            error.into_alert_response()
        }
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating category {category_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_category_view(
    store: &Store,
    update_endpoint: &str,
    defaults: &CategoryFormDefaults<'_>,
    billboards: &[Billboard],
    error_message: &str,
) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::CATEGORIES_VIEW).into_html();
    let form = category_form_view(
        store.id,
        CategoryFormMethod::Update(update_endpoint),
        defaults,
        billboards,
        error_message,
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Category" }
            (form)
        }
    };

    base("Edit Category", &[], &content)
}
