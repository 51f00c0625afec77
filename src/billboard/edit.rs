//! Billboard editing page and endpoint.

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
    billboard::{
        domain::BillboardFormData,
        form::{BillboardFormDefaults, BillboardFormMethod, billboard_form_view},
        get_billboard, update_billboard,
    },
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for the edit billboard page and endpoint.
#[derive(Debug, Clone)]
pub struct EditBillboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for EditBillboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the billboard editing page.
pub async fn get_edit_billboard_page(
    Path((store_id, billboard_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditBillboardState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let update_endpoint = format_endpoint(endpoints::BILLBOARD, &[&store_id, &billboard_id]);

    let view = match get_billboard(store_id, billboard_id, &connection) {
        Ok(billboard) => edit_billboard_view(
            &store,
            &update_endpoint,
            &BillboardFormDefaults {
                label: billboard.label.as_ref(),
                image_url: billboard.image_url.as_ref(),
            },
            "",
        ),
        Err(error) => {
            let error_message = match error {
                Error::NotFound => "Billboard not found",
                _ => {
                    tracing::error!("Failed to retrieve billboard {billboard_id}: {error}");
                    "Failed to load billboard"
                }
            };

            edit_billboard_view(
                &store,
                &update_endpoint,
                &BillboardFormDefaults::default(),
                error_message,
            )
        }
    };

    Ok(view.into_response())
}

/// Handle billboard update form submission.
pub async fn update_billboard_endpoint(
    Path((store_id, billboard_id)): Path<(DatabaseId, DatabaseId)>,
    State(state): State<EditBillboardState>,
    Form(form): Form<BillboardFormData>,
) -> Response {
    let update_endpoint = format_endpoint(endpoints::BILLBOARD, &[&store_id, &billboard_id]);

    let (label, image_url) = match form.validate() {
        Ok(fields) => fields,
        Err(error) => {
            return billboard_form_view(
                BillboardFormMethod::Update(&update_endpoint),
                &BillboardFormDefaults {
                    label: &form.label,
                    image_url: &form.image_url,
                },
                &format!("Error: {error}"),
            )
            .into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match update_billboard(store_id, billboard_id, label, image_url, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::BILLBOARDS_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(Error::UpdateMissingBillboard) => Error::UpdateMissingBillboard.into_alert_response(),
        Err(error) => {
            tracing::error!(
                "An unexpected error occurred while updating billboard {billboard_id}: {error}"
            );
            error.into_alert_response()
        }
    }
}

fn edit_billboard_view(
    store: &Store,
    update_endpoint: &str,
    defaults: &BillboardFormDefaults<'_>,
    error_message: &str,
) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::BILLBOARDS_VIEW).into_html();
    let form = billboard_form_view(
        BillboardFormMethod::Update(update_endpoint),
        defaults,
        error_message,
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Billboard" }
            (form)
        }
    };

    base("Edit Billboard", &[], &content)
}
