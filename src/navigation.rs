//! This file defines the templates and a convenience function for creating the navigation bar.

use maud::{Markup, html};

use crate::{
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
};

/// Template for a link in the navigation bar.
///
/// It will change appearance if `is_current` is set to
/// `true`. Only one link should be set as active at any one time.
#[derive(Clone)]
struct Link {
    url: String,
    title: &'static str,
    is_current: bool,
}

impl Link {
    fn into_html(self) -> Markup {
        let style = if self.is_current {
            "block py-2 px-3 text-white bg-blue-700 rounded-sm lg:bg-transparent
        lg:text-blue-700 lg:p-0 dark:text-white lg:dark:text-blue-500"
        } else {
            "block py-2 px-3 text-gray-900 rounded-sm hover:bg-gray-100
        lg:hover:bg-transparent lg:border-0 lg:hover:text-blue-700 lg:p-0
        dark:text-white lg:dark:hover:text-blue-500 dark:hover:bg-gray-700
        dark:hover:text-white lg:dark:hover:bg-transparent"
        };

        html!( a href=(self.url) class=(style) { (self.title) } )
    }
}

/// The navigation bar shown at the top of every page of a store.
pub struct NavBar {
    store_name: String,
    links: Vec<Link>,
}

impl NavBar {
    /// Get the navigation bar for the store `store_id`.
    ///
    /// `active_endpoint` is the unformatted endpoint of the current page, e.g.
    /// [endpoints::ORDERS_VIEW]. The link with the same endpoint will be
    /// marked as active and displayed differently in the HTML.
    pub fn new(store_id: DatabaseId, store_name: &str, active_endpoint: &str) -> NavBar {
        let links = [
            (endpoints::DASHBOARD_VIEW, "Overview"),
            (endpoints::BILLBOARDS_VIEW, "Billboards"),
            (endpoints::CATEGORIES_VIEW, "Categories"),
            (endpoints::PRODUCTS_VIEW, "Products"),
            (endpoints::ORDERS_VIEW, "Orders"),
        ]
        .into_iter()
        .map(|(endpoint, title)| Link {
            url: format_endpoint(endpoint, &[&store_id]),
            title,
            is_current: active_endpoint == endpoint,
        })
        .collect();

        NavBar {
            store_name: store_name.to_owned(),
            links,
        }
    }

    pub fn into_html(self) -> Markup {
        html!(
            nav class="bg-white border-gray-200 dark:bg-gray-900 mb-4"
            {
                div class="max-w-screen-xl flex flex-wrap items-center justify-between mx-auto p-4"
                {
                    a href=(endpoints::ROOT) class="flex items-center space-x-3"
                    {
                        span class="self-center text-2xl font-semibold whitespace-nowrap dark:text-white"
                        {
                            (self.store_name)
                        }
                    }

                    ul class="font-medium flex flex-col p-4 lg:p-0 mt-4 lg:flex-row lg:space-x-8 lg:mt-0"
                    {
                        @for link in self.links {
                            li { (link.into_html()) }
                        }
                    }
                }
            }
        )
    }
}
