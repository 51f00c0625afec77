//! Defines the app level error type and conversions to rendered HTML pages and alerts.
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{alert::Alert, internal_server_error::InternalServerError, not_found::NotFoundError};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// An empty string was used to create a store name.
    #[error("Store name cannot be empty")]
    EmptyStoreName,

    /// An empty string was used to create a billboard label.
    #[error("Billboard label cannot be empty")]
    EmptyBillboardLabel,

    /// A billboard was created without an image.
    #[error("Billboard image URL cannot be empty")]
    EmptyBillboardImage,

    /// An empty string was used to create a category name.
    #[error("Category name cannot be empty")]
    EmptyCategoryName,

    /// An empty string was used to create a product name.
    #[error("Product name cannot be empty")]
    EmptyProductName,

    /// A product was given a price that is zero, negative or not a number.
    #[error("{0} is not a valid price, prices must be greater than zero")]
    InvalidPrice(f64),

    /// A product was saved without a category.
    #[error("Product category cannot be empty")]
    EmptyProductCategory,

    /// The billboard ID used to create or update a category does not refer
    /// to a billboard in the same store.
    #[error("the billboard ID does not refer to a valid billboard")]
    InvalidBillboard,

    /// Tried to delete a billboard that one or more categories still use.
    #[error("the billboard is used by at least one category")]
    BillboardInUse,

    /// An order update did not set any fields.
    #[error("either order status or payment status is required")]
    EmptyOrderUpdate,

    /// A checkout request did not contain any products.
    #[error("an order must contain at least one product")]
    EmptyOrder,

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),

    /// An error occurred while serializing or deserializing JSON.
    #[error("could not (de)serialize JSON: {0}")]
    JSONSerializationError(String),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// Tried to update a billboard that does not exist
    #[error("tried to update a billboard that is not in the database")]
    UpdateMissingBillboard,

    /// Tried to delete a billboard that does not exist
    #[error("tried to delete a billboard that is not in the database")]
    DeleteMissingBillboard,

    /// Tried to update a category that does not exist
    #[error("tried to update a category that is not in the database")]
    UpdateMissingCategory,

    /// Tried to delete a category that does not exist
    #[error("tried to delete a category that is not in the database")]
    DeleteMissingCategory,

    /// Tried to update a product that does not exist
    #[error("tried to update a product that is not in the database")]
    UpdateMissingProduct,

    /// Tried to delete a product that does not exist
    #[error("tried to delete a product that is not in the database")]
    DeleteMissingProduct,

    /// Tried to update an order that does not exist
    #[error("tried to update an order that is not in the database")]
    UpdateMissingOrder,

    /// Tried to delete an order that does not exist
    #[error("tried to delete an order that is not in the database")]
    DeleteMissingOrder,
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(value: serde_json::Error) -> Self {
        Error::JSONSerializationError(value.to_string())
    }
}

/// Whether `error` is SQLite rejecting a write because of a foreign key.
pub(crate) fn is_foreign_key_violation(error: &rusqlite::Error) -> bool {
    matches!(
        error,
        rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error {
                code: _,
                extended_code: rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY,
            },
            _,
        )
    )
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => NotFoundError.into_response(),
            Error::InvalidTimezoneError(timezone) => {
                InternalServerError::invalid_timezone(&timezone).into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with a JSON `{error}` body for API clients.
    pub fn into_json_response(self) -> Response {
        let (status_code, message) = match self {
            Error::NotFound => (StatusCode::NOT_FOUND, "Not Found"),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong.")
            }
        };

        (status_code, Json(json!({ "error": message }))).into_response()
    }

    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::InvalidBillboard => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Invalid billboard".to_owned(),
                    details: "Choose one of this store's billboards.".to_owned(),
                },
            ),
            Error::BillboardInUse => (
                StatusCode::CONFLICT,
                Alert::Error {
                    message: "Could not delete billboard".to_owned(),
                    details: "The billboard is still used by a category. \
                    Change or delete those categories first."
                        .to_owned(),
                },
            ),
            Error::EmptyOrderUpdate => (
                StatusCode::BAD_REQUEST,
                Alert::Error {
                    message: "Could not update order".to_owned(),
                    details: "Either order status or payment status is required.".to_owned(),
                },
            ),
            Error::UpdateMissingBillboard => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update billboard".to_owned(),
                    details: "The billboard could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingBillboard => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete billboard".to_owned(),
                    details: "The billboard could not be found. \
                    Try refreshing the page to see if the billboard has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update category".to_owned(),
                    details: "The category could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingCategory => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete category".to_owned(),
                    details: "The category could not be found. \
                    Try refreshing the page to see if the category has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingProduct => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update product".to_owned(),
                    details: "The product could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingProduct => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete product".to_owned(),
                    details: "The product could not be found. \
                    Try refreshing the page to see if the product has already been deleted."
                        .to_owned(),
                },
            ),
            Error::UpdateMissingOrder => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not update order".to_owned(),
                    details: "The order could not be found.".to_owned(),
                },
            ),
            Error::DeleteMissingOrder => (
                StatusCode::NOT_FOUND,
                Alert::Error {
                    message: "Could not delete order".to_owned(),
                    details: "The order could not be found. \
                    Try refreshing the page to see if the order has already been deleted."
                        .to_owned(),
                },
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::Error {
                    message: "Something went wrong".to_owned(),
                    details:
                        "An unexpected error occurred, check the server logs for more details."
                            .to_owned(),
                },
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
