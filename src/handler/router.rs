//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: request logging, method check,
//! route matching, and access logging.

use crate::config::AppState;
use crate::handler::users;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::users::UserRepository;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Mount point of the user API
const USER_ROUTE: &str = "/api/user";

/// A matched user API route
#[derive(Debug, PartialEq, Eq)]
enum UserRoute<'a> {
    List,
    /// Percent-decoded `:id` segment
    Single(Cow<'a, str>),
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    let method = req.method();
    let uri = req.uri();

    logger::log_incoming(method, uri);

    let response = route_request(method, uri.path(), state.users.as_ref());

    let logging = &state.config.logging;
    if logging.access_log {
        let mut entry = AccessLogEntry::new(
            peer_addr.ip().to_string(),
            method.to_string(),
            uri.path().to_string(),
        );
        entry.query = uri.query().map(ToString::to_string);
        entry.http_version = AccessLogEntry::version_label(req.version()).to_string();
        entry.status = response.status().as_u16();
        entry.body_bytes = response.body().size_hint().exact().unwrap_or(0);
        entry.referer = header_value(&req, "referer");
        entry.user_agent = header_value(&req, "user-agent");
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &logging.access_log_format);
    }

    Ok(response)
}

/// Route a request to the user API; everything else is "Route not found".
///
/// `HEAD` is answered like `GET` without a body.
pub fn route_request(method: &Method, path: &str, repo: &dyn UserRepository) -> Response<Full<Bytes>> {
    let is_head = *method == Method::HEAD;
    if !is_head && *method != Method::GET {
        return http::build_route_not_found_response(false);
    }

    match match_user_route(path) {
        Some(UserRoute::List) => users::list_users(repo, is_head),
        Some(UserRoute::Single(raw_id)) => users::get_user(repo, &raw_id, is_head),
        None => http::build_route_not_found_response(is_head),
    }
}

/// Match `/api/user` and `/api/user/:id`, each with an optional trailing slash.
///
/// The mount point matches without regard to ASCII case. Invalid escapes in
/// `:id` are kept as written and bytes that are not UTF-8 become U+FFFD.
fn match_user_route(path: &str) -> Option<UserRoute<'_>> {
    let rest = strip_prefix_ignore_case(path, USER_ROUTE)?;
    let rest = rest.strip_suffix('/').unwrap_or(rest);
    if rest.is_empty() {
        return Some(UserRoute::List);
    }

    let id = rest.strip_prefix('/')?;
    if id.is_empty() || id.contains('/') {
        return None;
    }
    Some(UserRoute::Single(percent_decode_str(id).decode_utf8_lossy()))
}

fn strip_prefix_ignore_case<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let head = path.get(..prefix.len())?;
    if head.eq_ignore_ascii_case(prefix) {
        path.get(prefix.len()..)
    } else {
        None
    }
}

fn header_value<B>(req: &Request<B>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string)
}
