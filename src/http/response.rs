//! HTTP response building module
//!
//! JSON envelope responses used by the user API. Every body is either
//! `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use serde::Serialize;

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Serialize)]
struct Success<'a, T: Serialize> {
    success: bool,
    data: &'a T,
}

#[derive(Serialize)]
struct Failure<'a> {
    success: bool,
    error: &'a str,
}

/// 200 with `{"success": true, "data": data}`
pub fn build_success_response<T: Serialize>(data: &T, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(
        StatusCode::OK,
        &Success {
            success: true,
            data,
        },
        is_head,
    )
}

/// `status` with `{"success": false, "error": message}`
pub fn build_failure_response(status: StatusCode, message: &str, is_head: bool) -> Response<Full<Bytes>> {
    build_json_response(
        status,
        &Failure {
            success: false,
            error: message,
        },
        is_head,
    )
}

/// 404 for paths and methods nothing is routed to
pub fn build_route_not_found_response(is_head: bool) -> Response<Full<Bytes>> {
    build_failure_response(StatusCode::NOT_FOUND, "Route not found", is_head)
}

/// Serialize `body` as JSON. HEAD responses keep the headers and drop the body.
pub fn build_json_response<T: Serialize>(
    status: StatusCode,
    body: &T,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let json = match serde_json::to_vec(body) {
        Ok(json) => json,
        Err(e) => {
            crate::logger::log_error(&format!("Failed to serialize response: {e}"));
            return build_internal_error_response();
        }
    };

    let content_length = json.len();
    let body = if is_head { Bytes::new() } else { Bytes::from(json) };

    Response::builder()
        .status(status)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .header("Content-Length", content_length)
        .body(Full::new(body))
        .unwrap_or_else(|e| {
            log_build_error(status.as_str(), &e);
            Response::new(Full::new(Bytes::new()))
        })
}

fn build_internal_error_response() -> Response<Full<Bytes>> {
    const BODY: &str = r#"{"success":false,"error":"Internal server error"}"#;
    Response::builder()
        .status(StatusCode::INTERNAL_SERVER_ERROR)
        .header("Content-Type", JSON_CONTENT_TYPE)
        .body(Full::new(Bytes::from(BODY)))
        .unwrap_or_else(|e| {
            log_build_error("500", &e);
            Response::new(Full::new(Bytes::from(BODY)))
        })
}

/// Log response build error
fn log_build_error(status: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {status} response: {error}"));
}
