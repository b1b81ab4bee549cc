//! Logger module
//!
//! Line-oriented logging shared by the server and the build tool:
//! - Server lifecycle and request logging
//! - Access logging with multiple formats
//! - Build progress and per-file failures
//!
//! Until `init` is called, lines go straight to stdout/stderr and debug
//! lines are dropped. The build tool relies on that.

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use hyper::{Method, Uri};
use std::fmt::Display;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
        config.logging.level.eq_ignore_ascii_case("debug"),
    )
}

fn write_info(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_info(message),
        None => println!("{message}"),
    }
}

fn write_error(message: &str) {
    match writer::get() {
        Some(writer) => writer.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info(&format!("Server listening on port {}", addr.port()));
    log_debug(&format!("Bound address: {addr}"));
    log_debug(&format!("Log level: {}", config.logging.level));
    if let Some(workers) = config.server.workers {
        log_debug(&format!("Worker threads: {workers}"));
    }
    if let Some(ref path) = config.logging.access_log_file {
        log_debug(&format!("Access log: {path}"));
    }
    if let Some(ref path) = config.logging.error_log_file {
        log_debug(&format!("Error log: {path}"));
    }
}

pub fn log_server_stopped() {
    write_info("Server stopped accepting connections");
}

/// Request line logged before dispatch
pub fn log_incoming(method: &Method, uri: &Uri) {
    write_info(&format!("Incoming {method} {uri}"));
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    log_debug(&format!("[Connection] Accepted from: {peer_addr}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

/// Formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

pub fn log_debug(message: &str) {
    if let Some(writer) = writer::get().filter(|writer| writer.debug_enabled()) {
        writer.write_info(&format!("[DEBUG] {message}"));
    }
}

/// Write a message to the error stream exactly as given
pub fn log_error_line(message: &impl Display) {
    write_error(&message.to_string());
}

pub fn log_build_completed() {
    write_info("Build completed.");
}
