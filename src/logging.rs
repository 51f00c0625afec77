//! Middleware for logging requests and responses.
//!
//! Customer contact details are redacted from logged request and response
//! bodies. HTML pages such as the orders table are not logged, only their size.

use axum::{
    body::Body,
    extract::Request,
    http::{HeaderMap, StatusCode, header::CONTENT_TYPE},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde_json::Value;

use crate::internal_server_error::InternalServerError;

/// The number of bytes of a body that are logged at the `info` level.
pub const LOG_BODY_LENGTH_LIMIT: usize = 64;

/// Request body fields that must not appear in the logs.
const REDACTED_FIELDS: [&str; 2] = ["phone", "address"];

const REDACTED: &str = "********";

/// Log the request and response for each request.
///
/// Both the request and response are logged at the `info` level.
/// If a body is longer than [LOG_BODY_LENGTH_LIMIT] bytes, it is
/// truncated and the full body is logged at the `debug` level.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let (parts, body_text) = match read_body(request.into_parts()).await {
        Ok(parts_and_body) => parts_and_body,
        Err(response) => return response,
    };

    log_request(&parts, &redact_body(content_type(&parts.headers), &body_text));

    let request = Request::from_parts(parts, body_text.into());
    let response = next.run(request).await;

    let (parts, body) = response.into_parts();
    let body_text = match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => String::from_utf8_lossy(&bytes).to_string(),
        Err(error) => {
            tracing::error!("could not read response body: {error}");
            return InternalServerError::default().into_response();
        }
    };
    log_response(&parts, &response_log_body(&parts, &body_text));

    Response::from_parts(parts, body_text.into())
}

async fn read_body(
    (parts, body): (axum::http::request::Parts, Body),
) -> Result<(axum::http::request::Parts, String), Response> {
    match axum::body::to_bytes(body, usize::MAX).await {
        Ok(bytes) => Ok((parts, String::from_utf8_lossy(&bytes).to_string())),
        Err(error) => {
            tracing::error!("could not read request body: {error}");
            Err((StatusCode::BAD_REQUEST, "Could not read request body").into_response())
        }
    }
}

fn content_type(headers: &HeaderMap) -> &str {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
}

fn response_log_body(parts: &axum::http::response::Parts, body: &str) -> String {
    redact_body(content_type(&parts.headers), body)
}

/// Replace the values of [REDACTED_FIELDS] in a form or JSON body.
///
/// HTML is replaced by its size. Other content types are returned unchanged.
fn redact_body(content_type: &str, body: &str) -> String {
    if content_type.starts_with("application/x-www-form-urlencoded") {
        REDACTED_FIELDS
            .iter()
            .fold(body.to_owned(), |text, field| redact_form_field(&text, field))
    } else if content_type.starts_with("application/json") {
        redact_json_fields(body)
    } else if content_type.starts_with("text/html") {
        format!("<{} bytes of HTML>", body.len())
    } else {
        body.to_owned()
    }
}

fn redact_form_field(form_text: &str, field_name: &str) -> String {
    form_text
        .split('&')
        .map(|pair| match pair.split_once('=') {
            Some((name, _)) if name == field_name => format!("{name}={REDACTED}"),
            _ => pair.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn redact_json_fields(json_text: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(json_text) else {
        return json_text.to_owned();
    };

    redact_json_value(&mut value);

    value.to_string()
}

/// Redacts at any depth, e.g. `orderDetails.phone` in a checkout response.
fn redact_json_value(value: &mut Value) {
    match value {
        Value::Object(fields) => {
            for (name, field_value) in fields.iter_mut() {
                if REDACTED_FIELDS.contains(&name.as_str()) {
                    *field_value = Value::String(REDACTED.to_owned());
                } else {
                    redact_json_value(field_value);
                }
            }
        }
        Value::Array(values) => values.iter_mut().for_each(redact_json_value),
        _ => {}
    }
}

/// Truncate `text` to at most [LOG_BODY_LENGTH_LIMIT] bytes without
/// splitting a character.
fn truncate(text: &str) -> &str {
    let mut end = LOG_BODY_LENGTH_LIMIT.min(text.len());
    while !text.is_char_boundary(end) {
        end -= 1;
    }

    &text[..end]
}

fn log_request(headers: &axum::http::request::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Received request: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full request body: {body:?}");
    } else {
        tracing::info!("Received request: {headers:#?}\nbody: {body:?}");
    }
}

fn log_response(headers: &axum::http::response::Parts, body: &str) {
    if body.len() > LOG_BODY_LENGTH_LIMIT {
        tracing::info!(
            "Sending response: {headers:#?}\nbody: {:}...",
            truncate(body)
        );
        tracing::debug!("Full response body: {body:?}");
    } else {
        tracing::info!("Sending response: {headers:#?}\nbody: {body:?}");
    }
}
