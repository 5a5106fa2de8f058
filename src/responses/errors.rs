use crate::errors::ServerError;
use crate::responses::json::{json_response, Envelope};
use crate::templates::pages::error_page;
use astra::{Body, Response, ResponseBuilder};
use tracing::error;

/// Last resort when even the error response cannot be built.
fn plain_response(status: u16, message: &str) -> Response {
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/plain; charset=utf-8")
        .body(Body::from(message.to_string()))
        .unwrap_or_else(|_| Response::new(Body::from(message.to_string())))
}

fn log_internal(err: &ServerError) {
    if err.is_internal() {
        error!(event_name = "http.internal_error", error = %err, "request failed");
    }
}

/// Convert a ServerError into an HTML error page. Internal details are
/// logged and replaced by a generic message.
pub fn html_error_response(err: ServerError, site_name: &str) -> Response {
    log_internal(&err);

    let status = err.status();
    let message = if err.is_internal() {
        "Internal Server Error".to_string()
    } else {
        err.to_string()
    };

    let markup = error_page(status, &message, site_name);
    ResponseBuilder::new()
        .status(status)
        .header("Content-Type", "text/html; charset=utf-8")
        .body(Body::from(markup.into_string()))
        .unwrap_or_else(|_| plain_response(status, &message))
}

/// Convert a ServerError into the API error envelope. `failure_message`
/// stands in for the message of internal errors.
pub fn json_error_response(err: ServerError, failure_message: &str) -> Response {
    log_internal(&err);

    let status = err.status();
    let message = if err.is_internal() {
        failure_message.to_string()
    } else {
        err.to_string()
    };

    let envelope: Envelope<()> = Envelope {
        status,
        message: Some(message.clone()),
        data: None,
        error: Some(err.code()),
    };

    json_response(status, &envelope).unwrap_or_else(|_| plain_response(status, &message))
}
