//! The page shown when a request fails on the server.
//!
//! Store failures are not retried, so the page only tells the user that
//! nothing was saved and where to look.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::html::error_view;

/// A 500 page with a headline and a suggested next step.
pub struct InternalServerError {
    pub description: String,
    pub fix: String,
}

impl Default for InternalServerError {
    fn default() -> Self {
        Self {
            description: "Something went wrong.".to_owned(),
            fix: "No changes were saved. Try again later or check the server logs.".to_owned(),
        }
    }
}

impl InternalServerError {
    /// The stores' timezone could not be resolved, so orders cannot be
    /// grouped into months.
    pub fn invalid_timezone(timezone: &str) -> Self {
        Self {
            description: "Invalid Timezone Settings".to_owned(),
            fix: format!(
                "Could not get local timezone \"{timezone}\". Restart the server with \
                --timezone set to a canonical timezone name such as \"Asia/Jerusalem\"."
            ),
        }
    }
}

impl IntoResponse for InternalServerError {
    fn into_response(self) -> Response {
        let page = error_view(
            "Internal Server Error",
            "500",
            &self.description,
            &self.fix,
        );

        (StatusCode::INTERNAL_SERVER_ERROR, Html(page.into_string())).into_response()
    }
}

pub async fn get_internal_server_error_page() -> Response {
    InternalServerError::default().into_response()
}

#[cfg(test)]
mod internal_server_error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::test_utils::{assert_valid_html, parse_html_document, select_text};

    use super::{InternalServerError, get_internal_server_error_page};

    #[tokio::test]
    async fn error_page_says_nothing_was_saved() {
        let response = get_internal_server_error_page().await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        assert_valid_html(&html);
        assert_eq!(
            select_text(&html, "p"),
            [
                "Something went wrong.",
                "No changes were saved. Try again later or check the server logs."
            ]
        );
    }

    #[tokio::test]
    async fn invalid_timezone_names_the_timezone() {
        let response = InternalServerError::invalid_timezone("Middle/Earth").into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let html = parse_html_document(response).await;
        let text = select_text(&html, "p").join(" ");
        assert!(text.contains("Invalid Timezone Settings"));
        assert!(text.contains("\"Middle/Earth\""));
    }
}
