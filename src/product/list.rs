//! Products listing page.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, TABLE_STYLE, base, edit_delete_action_links, format_created_at,
        format_currency, list_header,
    },
    navigation::NavBar,
    product::{Product, get_all_products},
    store::{Store, get_store},
};

/// The state needed for the products listing page.
#[derive(Debug, Clone)]
pub struct ProductsPageState {
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ProductsPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render the products listing page, archived products included.
pub async fn get_products_page(
    Path(store_id): Path<DatabaseId>,
    State(state): State<ProductsPageState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let store = get_store(store_id, &connection)?;
    let products = get_all_products(store_id, &connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve products: {error}"))?;

    Ok(products_view(&store, &products).into_response())
}

fn yes_no(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}

fn products_view(store: &Store, products: &[Product]) -> Markup {
    let nav_bar = NavBar::new(store.id, store.name.as_ref(), endpoints::PRODUCTS_VIEW).into_html();
    let new_product_route = format_endpoint(endpoints::NEW_PRODUCT_VIEW, &[&store.id]);

    let table_row = |product: &Product| {
        let edit_url = format_endpoint(
            endpoints::EDIT_PRODUCT_VIEW,
            &[&product.store_id, &product.id],
        );
        let delete_url = format_endpoint(endpoints::PRODUCT, &[&product.store_id, &product.id]);
        let confirm_message = format!("Are you sure you want to delete '{}'?", product.name);

        html!(
            tr class=(TABLE_ROW_STYLE)
            {
                td class=(TABLE_CELL_STYLE) { (product.name) }
                td class=(TABLE_CELL_STYLE) { (yes_no(product.is_archived)) }
                td class=(TABLE_CELL_STYLE) { (yes_no(product.is_featured)) }
                td class=(TABLE_CELL_STYLE) { (format_currency(product.price)) }
                td class=(TABLE_CELL_STYLE)
                {
                    span class=(BADGE_STYLE) { (product.category) }
                }
                td class=(TABLE_CELL_STYLE) { (format_created_at(Some(product.created_at))) }
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
                    &format!("Products ({})", products.len()),
                    &new_product_route,
                    "Add New",
                ))

                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Name" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Archived" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Featured" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Price" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                        }
                    }

                    tbody
                    {
                        @for product in products {
                            (table_row(product))
                        }

                        @if products.is_empty() {
                            tr
                            {
                                td
                                    colspan="7"
                                    class="px-6 py-4 text-center text-gray-500 dark:text-gray-400"
                                {
                                    "No products created yet. "
                                    a href=(new_product_route) class=(LINK_STYLE)
                                    {
                                        "Create your first product"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Products", &[], &content)
}

#[cfg(test)]
mod products_page_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, State},
        http::StatusCode,
    };
    use scraper::Selector;

    use crate::{
        category::CategoryName,
        product::{ProductFields, ProductName, create_product, get_products_page},
        test_utils::{
            assert_valid_html, create_test_store, get_test_connection, parse_html_document,
        },
    };

    use super::ProductsPageState;

    #[tokio::test]
    async fn lists_products_including_archived() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        for (name, is_archived) in [("Lemonade", false), ("Old Soda", true)] {
            create_product(
                store.id,
                ProductFields {
                    name: ProductName::new_unchecked(name),
                    price: 12.0,
                    category: CategoryName::new_unchecked("Drinks"),
                    images: vec![],
                    is_featured: false,
                    is_archived,
                },
                &connection,
            )
            .unwrap();
        }
        let state = ProductsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_products_page(Path(store.id), State(state))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);

        let rows: Vec<_> = html
            .select(&Selector::parse("tbody tr").unwrap())
            .collect();
        assert_eq!(rows.len(), 2);

        let cell_selector = Selector::parse("td").unwrap();
        let newest_cells: Vec<String> = rows[0]
            .select(&cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_owned())
            .collect();
        assert_eq!(newest_cells[0], "Old Soda");
        assert_eq!(newest_cells[1], "Yes");
        assert_eq!(newest_cells[2], "No");
        assert_eq!(newest_cells[3], "₪12");
        assert_eq!(newest_cells[4], "Drinks");
    }

    #[tokio::test]
    async fn shows_empty_state() {
        let connection = get_test_connection();
        let store = create_test_store(&connection);
        let state = ProductsPageState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_products_page(Path(store.id), State(state))
            .await
            .unwrap();

        let html = parse_html_document(response).await;
        let text = html.root_element().text().collect::<String>();
        assert!(text.contains("No products created yet."));
    }
}
