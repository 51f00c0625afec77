//! Billboards listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    billboard::{Billboard, get_all_billboards},
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE,
        TABLE_STYLE, base, edit_delete_action_links, format_created_at, list_header,
    },
    navigation::NavBar,
    store::{Store, get_store},
};

/// The state needed for the billboards listing page.
#[derive(Debug, Clone)]
pub struct BillboardsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for BillboardsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the billboards listing page.
pub async fn get_billboards_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<BillboardsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let billboards = get_all_billboards(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve billboards: {error}"))?;

    Ok(billboards_view(&store, &billboards).into_response())
}

fn billboards_view(store: &Store, billboards: &[Billboard]) -> Markup {
    let nav_bar =
        NavBar::new(store.id, store.name.as_ref(), endpoints::BILLBOARDS_VIEW).into_html();
    let new_billboard_route = format_endpoint(endpoints::NEW_BILLBOARD_VIEW, &[&store.id]);

    let table_row = |billboard: &Billboard| {
        let edit_url = format_endpoint(
            endpoints::EDIT_BILLBOARD_VIEW,
            &[&billboard.store_id, &billboard.id],
        );
        let delete_url = format_endpoint(
            endpoints::BILLBOARD,
            &[&billboard.store_id, &billboard.id],
        );
        let confirm_message = format!(
            "Are you sure you want to delete '{}'? Categories using it must be changed first.",
            billboard.label
        );

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (billboard.label) }

                td class=(TABLE_CELL_STYLE)
                {
                    img
                        src=(billboard.image_url)
                        alt=(billboard.label)
                        class="h-10 w-16 object-cover rounded";
                }

                td class=(TABLE_CELL_STYLE) { (format_created_at(Some(billboard.created_at))) }

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
                    &format!("Billboards ({})", billboards.len()),
                    &new_billboard_route,
                    "Add New",
                ))

                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Label" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Image" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for billboard in billboards {
                            (table_row(billboard))
                        }

                        @if billboards.is_empty() {
                            tr
                            {
                                td
                                    colspan="4"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No billboards created yet. "
                                    a href=(new_billboard_route) class=(LINK_STYLE)
                                    {
                                        "Create your first billboard"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Billboards", &[], &content)
}
