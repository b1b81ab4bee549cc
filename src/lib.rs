//! jsdist: a JavaScript tree minifier and the small user API it ships with.
//!
//! - `build`: mirrors `.js` files from a source tree into a minified copy
//! - `users`, `handler`, `http`, `server`: the `/api/user` HTTP service
//! - `config`, `logger`: configuration loading and line-oriented logging

pub mod build;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod users;
