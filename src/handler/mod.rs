//! Request handler module
//!
//! Request routing dispatch and the user API endpoints.

pub mod router;
pub mod users;

// Re-export main entry point
pub use router::{handle_request, route_request};
