//! Categories listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    category::{Category, get_all_categories},
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, TABLE_STYLE, base, edit_delete_action_links, format_created_at,
        list_header,
    },
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for the categories listing page.
#[derive(Debug, Clone)]
pub struct CategoriesPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoriesPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the categories listing page.
pub async fn get_categories_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<CategoriesPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let categories = get_all_categories(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve categories: {error}"))?;

    Ok(categories_view(&store, &categories).into_response())
}

fn categories_view(store: &Store, categories: &[Category]) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::CATEGORIES_VIEW).into_html();
    let new_category_route = format_endpoint(endpoints::NEW_CATEGORY_VIEW, &[&store.id]);

    let table_row = |category: &Category| {
        let edit_url = format_endpoint(
            endpoints::EDIT_CATEGORY_VIEW,
            &[&category.store_id, &category.id],
        );
        let delete_url = format_endpoint(endpoints::CATEGORY, &[&category.store_id, &category.id]);
        let confirm_message = format!("Are you sure you want to delete '{}'?", category.name);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (category.name) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(BADGE_STYLE) { (category.billboard_label) }
                }
                td class=(TABLE_CELL_STYLE) { (format_created_at(Some(category.created_at))) }
                td class=(TABLE_CELL_STYLE)
                {
                    div class="flex gap-4"
                    {
                        (edit_delete_action_links(&edit_url, &delete_url, &confirm_message, "closest tr"))
                    }
                }
            }
        )
    };

    let content = html!(
        (nav_bar)

        main class=(PAGE_CONTAINER_STYLE)
        {
            section class="space-y-4 w-full lg:max-w-5xl"
            {
                (list_header(
                    &format!("Categories ({})", categories.len()),
                    &new_category_route,
                    "Add New",
                ))

                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Billboard" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for category in categories {
                            (table_row(category))
                        }

                        @if categories.is_empty() {
                            tr
                            {
                                td
                                    colspan="4"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No categories created yet. "
                                    a href=(new_category_route) class=(LINK_STYLE)
                                    {
                                        "Create your first category"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Categories", &[], &content)
}
