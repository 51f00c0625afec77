use maud::{Markup, html};

use crate::{
    category::Category,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CHECKBOX_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, link,
    },
};

/// How a product form is submitted.
pub(super) enum ProductFormMethod<'a> {
    /// Create a new product with a POST request.
    Create(&'a str),
    /// Update an existing product with a PUT request.
    Update(&'a str),
}

/// The values shown in a product form.
#[derive(Default)]
pub(super) struct ProductFormDefaults<'a> {
    pub name: &'a str,
    pub price: Option<f64>,
    pub category: Option<&'a str>,
    pub images: &'a [String],
    pub is_featured: bool,
    pub is_archived: bool,
}

pub(super) fn product_form_view(
    store_id: DatabaseId,
    method: ProductFormMethod<'_>,
    defaults: &ProductFormDefaults<'_>,
    categories: &[Category],
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_text) = match method {
        ProductFormMethod::Create(endpoint) => (Some(endpoint), None, "Create Product"),
        ProductFormMethod::Update(endpoint) => (None, Some(endpoint), "Save Changes"),
    };
    let new_category_link = link(
        &format_endpoint(endpoints::NEW_CATEGORY_VIEW, &[&store_id]),
        "create a category",
    );
    let price = defaults.price.map(|price| price.to_string()).unwrap_or_default();
    let images = defaults.images.join("\n");

    html! {
        form
            hx-post=[hx_post]
            hx-put=[hx_put]
            hx-swap="outerHTML"
            hx-target-error="#alert-container"
            class="w-full space-y-4 md:space-y-6"
        {
            div
            {
                label for="name" class=(FORM_LABEL_STYLE) { "Name" }

                input
                    id="name"
                    type="text"
                    name="name"
                    placeholder="Product name"
                    value=(defaults.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="price" class=(FORM_LABEL_STYLE) { "Price" }

                input
                    id="price"
                    type="number"
                    name="price"
                    step="0.01"
                    min="0.01"
                    placeholder="9.99"
                    value=(price)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category"
                    name="category"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected[defaults.category.is_none()]
                    {
                        "Select a category"
                    }

                    @for category in categories {
                        option
                            value=(category.name)
                            selected[defaults.category == Some(category.name.as_ref())]
                        {
                            (category.name)
                        }
                    }
                }

                @if categories.is_empty() {
                    span class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "This store has no categories yet, " (new_category_link) " first."
                    }
                }
            }

            div
            {
                label for="images" class=(FORM_LABEL_STYLE) { "Image URLs (one per line)" }

                textarea
                    id="images"
                    name="images"
                    rows="3"
                    placeholder="https://example.com/product.png"
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    (images)
                }
            }

            div class="flex gap-6"
            {
                label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white"
                {
                    input
                        type="checkbox"
                        name="is_featured"
                        value="true"
                        checked[defaults.is_featured]
                        class=(FORM_CHECKBOX_STYLE);
                    "Featured"
                }

                label class="flex items-center gap-2 text-sm text-gray-900 dark:text-white"
                {
                    input
                        type="checkbox"
                        name="is_archived"
                        value="true"
                        checked[defaults.is_archived]
                        class=(FORM_CHECKBOX_STYLE);
                    "Archived"
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}
