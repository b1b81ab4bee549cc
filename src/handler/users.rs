//! `/api/user` endpoints

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};

use crate::http;
use crate::users::UserRepository;

/// `GET /api/user`
pub fn list_users(users: &dyn UserRepository, is_head: bool) -> Response<Full<Bytes>> {
    http::build_success_response(&users.all(), is_head)
}

/// `GET /api/user/:id`
pub fn get_user(users: &dyn UserRepository, raw_id: &str, is_head: bool) -> Response<Full<Bytes>> {
    match parse_int_prefix(raw_id).and_then(|id| users.find(id)) {
        Some(user) => http::build_success_response(user, is_head),
        None => http::build_failure_response(StatusCode::NOT_FOUND, "Not found", is_head),
    }
}

/// Leading integer of `raw`, read the way JavaScript's `parseInt` does.
///
/// Leading whitespace and one sign are allowed, a `0x`/`0X` prefix switches to
/// hexadecimal, and parsing stops at the first character that is not a digit.
/// Returns `None` when no digit is found or the value does not fit in `i64`.
pub fn parse_int_prefix(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let (radix, digits) = match unsigned
        .strip_prefix("0x")
        .or_else(|| unsigned.strip_prefix("0X"))
    {
        Some(hex) => (16, hex),
        None => (10, unsigned),
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}
