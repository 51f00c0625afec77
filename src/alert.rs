//! Alert system for displaying success and error messages to users.
//!
//! Alerts are HTML fragments that htmx swaps into the `#alert-container`
//! element rendered by [crate::html::base].

use axum::response::{Html, IntoResponse, Response};
use maud::{Markup, html};

/// An alert message to show the user.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// A success message with extra details.
    Success { message: String, details: String },
    /// A success message on its own.
    SuccessSimple { message: String },
    /// An error message with details on how to fix it.
    Error { message: String, details: String },
}

impl Alert {
    /// Render the alert as an HTML fragment.
    pub fn into_html(self) -> Html<String> {
        Html(self.into_markup().into_string())
    }

    fn into_markup(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Success { message, details } => (SUCCESS_STYLE, message, details),
            Alert::SuccessSimple { message } => (SUCCESS_STYLE, message, String::new()),
            Alert::Error { message, details } => (ERROR_STYLE, message, details),
        };

        html! {
            div
                role="alert"
                class=(container_style)
            {
                p class="font-semibold" { (message) }

                @if !details.is_empty() {
                    p class="text-sm" { (details) }
                }
            }
        }
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        self.into_html().into_response()
    }
}

const SUCCESS_STYLE: &str = "p-4 mb-4 rounded-lg cursor-pointer text-green-800 \
    bg-green-50 dark:bg-gray-800 dark:text-green-400";

const ERROR_STYLE: &str = "p-4 mb-4 rounded-lg cursor-pointer text-red-800 \
    bg-red-50 dark:bg-gray-800 dark:text-red-400";

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::Alert;

    #[test]
    fn error_alert_shows_message_and_details() {
        let alert = Alert::Error {
            message: "Could not delete order".to_owned(),
            details: "The order could not be found.".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().0);

        let paragraphs: Vec<String> = html
            .select(&Selector::parse("p").unwrap())
            .map(|p| p.text().collect())
            .collect();
        assert_eq!(
            paragraphs,
            vec!["Could not delete order", "The order could not be found."]
        );
    }

    #[test]
    fn simple_alert_omits_details() {
        let alert = Alert::SuccessSimple {
            message: "Deleted".to_owned(),
        };

        let html = Html::parse_fragment(&alert.into_html().0);

        assert_eq!(html.select(&Selector::parse("p").unwrap()).count(), 1);
    }
}
