//! Stores listing page and the endpoint for creating a store.

use std::sync::{Arc, Mutex};

use axum::{
    Form,
    extract::{FromRef, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE,
        PAGE_CONTAINER_STYLE, base,
    },
    store::{Store, StoreName, create_store, domain::StoreFormData, get_all_stores},
};

/// The state needed for listing and creating stores.
#[derive(Debug, Clone)]
pub struct StoresState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for StoresState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the page listing every store.
pub async fn get_stores_page(State(state): State<StoresState>) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let stores = get_all_stores(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve stores: {error}"))?;

    Ok(stores_view(&stores).into_response())
}

/// Handle the store creation form, redirecting to the new store's dashboard.
pub async fn create_store_endpoint(
    State(state): State<StoresState>,
    Form(form): Form<StoreFormData>,
) -> Response {
    let name = match StoreName::new(&form.name) {
        Ok(name) => name,
        Err(error) => return new_store_form_view(&format!("Error: {error}")).into_response(),
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_alert_response();
        }
    };

    match create_store(name, &connection) {
        Ok(store) => (
            HxRedirect(format_endpoint(endpoints::DASHBOARD_VIEW, &[&store.id])),
            StatusCode::SEE_OTHER,
        )
            .into_response(),
        Err(error) => {
            tracing::error!("An unexpected error occurred while creating a store: {error}");
            error.into_alert_response()
        }
    }
}

fn stores_view(stores: &[Store]) -> Markup {
    let content = html!(
        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full max-w-md"
            {
                h1 class="text-xl font-bold" { "Stores" }

                @if stores.is_empty() {
                    p { "No stores yet. Create one below to get started." }
                } @else {
                    ul class="space-y-2"
                    {
                        @for store in stores {
                            li
                            {
                                a
                                    href=(format_endpoint(endpoints::DASHBOARD_VIEW, &[&store.id]))
                                    class=(LINK_STYLE)
                                {
                                    (store.name)
                                }
                            }
                        }
                    }
                }

                (new_store_form_view(""))
            }
        }
    );

    base("Stores", &[], &content)
}

fn new_store_form_view(error_message: &str) -> Markup {
    html! {
        form
            hx-post=(endpoints::POST_STORE)
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Store Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Store Name"
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Create Store" }
        }
    }
}

#[cfg(test)]
mod stores_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{Form, extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use scraper::Selector;

    use crate::{
        db::initialize,
        endpoints,
        store::{StoreName, create_store, domain::StoreFormData, get_all_stores},
        test_utils::{
            assert_form_error_message, assert_form_input, assert_hx_endpoint, assert_hx_redirect,
            assert_valid_html, must_get_form, parse_html_document, parse_html_fragment,
        },
    };

    use super::{StoresState, create_store_endpoint, get_stores_page};

    fn get_state() -> StoresState {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        StoresState {
            db_connection: Arc::new(Mutex::new(connection)),
        }
    }

    #[tokio::test]
    async fn lists_stores_with_links_to_dashboard() {
        let state = get_state();
        let store = create_store(
            StoreName::new_unchecked("Falafel Express"),
            &state.db_connection.lock().unwrap(),
        )
        .unwrap();

        let response = get_stores_page(State(state)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let link = html
            .select(&Selector::parse("ul a").unwrap())
            .next()
            .expect("No store link found");
        assert_eq!(
            link.value().attr("href"),
            Some(format!("/stores/{}", store.id).as_str())
        );

        let form = must_get_form(&html);
        assert_hx_endpoint(&form, endpoints::POST_STORE, "hx-post");
        assert_form_input(&form, "name", "text");
    }

    #[tokio::test]
    async fn create_store_redirects_to_dashboard() {
        let state = get_state();

        let response = create_store_endpoint(
            State(state.clone()),
            Form(StoreFormData {
                name: "Falafel Express".to_owned(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_hx_redirect(&response, "/stores/1");
        assert_eq!(
            get_all_stores(&state.db_connection.lock().unwrap())
                .unwrap()
                .len(),
            1
        );
    }

    #[tokio::test]
    async fn create_store_fails_on_empty_name() {
        let state = get_state();

        let response = create_store_endpoint(
            State(state),
            Form(StoreFormData {
                name: " ".to_owned(),
            }),
        )
        .await
        .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_fragment(response).await;
        let form = must_get_form(&html);
        assert_form_error_message(&form, "Error: Store name cannot be empty");
    }
}
