use maud::{Markup, html};

use crate::{
    billboard::Billboard,
    database_id::DatabaseId,
    endpoints::{self, format_endpoint},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, link},
};

/// How a category form is submitted.
pub(super) enum CategoryFormMethod<'a> {
    /// Create a new category with a POST request.
    Create(&'a str),
    /// Update an existing category with a PUT request.
    Update(&'a str),
}

/// The values shown in a category form.
#[derive(Default)]
pub(super) struct CategoryFormDefaults<'a> {
    pub name: &'a str,
    pub billboard_id: Option<DatabaseId>,
}

/// Render the category form with a select listing the store's `billboards`.
pub(super) fn category_form_view(
    store_id: DatabaseId,
    method: CategoryFormMethod<'_>,
    defaults: &CategoryFormDefaults<'_>,
    billboards: &[Billboard],
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_text) = match method {
        CategoryFormMethod::Create(endpoint) => (Some(endpoint), None, "Create Category"),
        CategoryFormMethod::Update(endpoint) => (None, Some(endpoint), "Save Changes"),
    };
    let new_billboard_link = link(
        &format_endpoint(endpoints::NEW_BILLBOARD_VIEW, &[&store_id]),
        "create a billboard",
    );

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
                    placeholder="Category name"
                    value=(defaults.name)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="billboard_id" class=(FORM_LABEL_STYLE) { "Billboard" }

                select
                    id="billboard_id"
                    name="billboard_id"
                    required
                    class=(FORM_TEXT_INPUT_STYLE)
                {
                    option value="" disabled selected[defaults.billboard_id.is_none()]
                    {
                        "Select a billboard"
                    }

                    @for billboard in billboards {
                        option
                            value=(billboard.id)
                            selected[defaults.billboard_id == Some(billboard.id)]
                        {
                            (billboard.label)
                        }
                    }
                }

                @if billboards.is_empty() {
                    span class="text-sm text-gray-500 dark:text-gray-400"
                    {
                        "This store has no billboards yet, " (new_billboard_link) " first."
                    }
                }
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}
