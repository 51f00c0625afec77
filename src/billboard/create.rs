//! Billboard creation page and endpoint.

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
        create_billboard,
        domain::BillboardFormData,
        form::{BillboardFormDefaults, BillboardFormMethod, billboard_form_view},
    },
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{FORM_CONTAINER_STYLE, base},
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for creating a billboard.
#[derive(Debug, Clone)]
pub struct CreateBillboardState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateBillboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the billboard creation page.
pub async fn get_new_billboard_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateBillboardState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;

    Ok(new_billboard_view(&store).into_response())
}

/// Handle billboard creation form submission.
pub async fn create_billboard_endpoint(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CreateBillboardState>,
    Form(form): Form<BillboardFormData>,
) -> Response {
    let create_endpoint = format_endpoint(endpoints::POST_BILLBOARD, &[&store_id]);

    let (label, image_url) = match form.validate() {
        Ok(fields) => fields,
        Err(error) => {
            return billboard_form_view(
                BillboardFormMethod::Create(&create_endpoint),
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

    match create_billboard(store_id, label, image_url, &connection) {
        Ok(_) => (
            HxRedirect(format_endpoint(endpoints::BILLBOARDS_VIEW, &[&store_id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a billboard: {error}");
            error.into_alert_response()
        }
    }
}

fn new_billboard_view(store: &Store) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::BILLBOARDS_VIEW).into_html();
    let create_endpoint = format_endpoint(endpoints::POST_BILLBOARD, &[&store.id]);
    let form = billboard_form_view(
        BillboardFormMethod::Create(&create_endpoint),
        &BillboardFormDefaults::default(),
        "",
    );

    let content = html! {
        (nav_bar)
        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Create Billboard" }
            (form)
        }
    };

    base("Create Billboard", &[], &content)
}
