//! HTTP protocol layer module
//!
//! Response builders shared by the request handlers.

pub mod response;

pub use response::{
    build_failure_response, build_json_response, build_route_not_found_response,
    build_success_response,
};
