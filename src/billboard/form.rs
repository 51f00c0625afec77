use maud::{Markup, html};

use crate::html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE};

/// How a billboard form is submitted.
pub(super) enum BillboardFormMethod<'a> {
    /// Create a new billboard with a POST request.
    Create(&'a str),
    /// Update an existing billboard with a PUT request.
    Update(&'a str),
}

/// The values shown in a billboard form.
#[derive(Default)]
pub(super) struct BillboardFormDefaults<'a> {
    pub label: &'a str,
    pub image_url: &'a str,
}

pub(super) fn billboard_form_view(
    method: BillboardFormMethod<'_>,
    defaults: &BillboardFormDefaults<'_>,
    error_message: &str,
) -> Markup {
    let (hx_post, hx_put, submit_text) = match method {
        BillboardFormMethod::Create(endpoint) => (Some(endpoint), None, "Create Billboard"),
        BillboardFormMethod::Update(endpoint) => (None, Some(endpoint), "Save Changes"),
    };

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
                label for="label" class=(FORM_LABEL_STYLE) { "Label" }

                input
                    id="label"
                    type="text"
                    name="label"
                    placeholder="Billboard label"
                    value=(defaults.label)
                    required
                    autofocus
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="image_url" class=(FORM_LABEL_STYLE) { "Background Image URL" }

                input
                    id="image_url"
                    type="url"
                    name="image_url"
                    placeholder="https://"
                    value=(defaults.image_url)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            @if !defaults.image_url.is_empty() {
                img src=(defaults.image_url) alt="Billboard preview" class="w-full rounded";
            }

            @if !error_message.is_empty() {
                p class="text-red-600 dark:text-red-400" { (error_message) }
            }

            button type="submit" class=(BUTTON_PRIMARY_STYLE) { (submit_text) }
        }
    }
}
