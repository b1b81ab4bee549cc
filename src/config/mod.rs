// Configuration module entry point
// Loads the server configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

pub use state::AppState;
pub use types::{Config, LoggingConfig, PerformanceConfig, ServerConfig};

/// Prefix for environment overrides, e.g. `JSDIST_SERVER__PORT`
const ENV_PREFIX: &str = "JSDIST";

impl Config {
    /// Load configuration from the given file path (without extension).
    ///
    /// Sources in increasing priority: built-in defaults, the file (optional),
    /// `JSDIST_*` environment variables, then `PORT`.
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        Self::from_sources(config_path, std::env::var("PORT").ok())
    }

    /// Same as `load_from` with an explicit `PORT` value
    pub fn from_sources(config_path: &str, port: Option<String>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("logging.access_log_format", "combined")?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?;

        if let Some(port) = port {
            builder = builder.set_override("server.port", port)?;
        }

        builder.build()?.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults_without_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        let cfg = Config::from_sources(missing.to_str().unwrap(), None).unwrap();

        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 3000);
        assert_eq!(cfg.server.workers, None);
        assert_eq!(cfg.logging.level, "info");
        assert!(cfg.logging.access_log);
        assert_eq!(cfg.logging.access_log_format, "combined");
        assert_eq!(cfg.performance.keep_alive_timeout, 75);
        assert_eq!(cfg.performance.max_connections, None);
    }

    #[test]
    fn test_file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("server.toml"),
            "[server]\nhost = \"127.0.0.1\"\nport = 4100\nworkers = 2\n\n[logging]\nlevel = \"debug\"\naccess_log_format = \"json\"\n",
        )
        .unwrap();
        let path = dir.path().join("server");

        let cfg = Config::from_sources(path.to_str().unwrap(), None).unwrap();

        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 4100);
        assert_eq!(cfg.server.workers, Some(2));
        assert_eq!(cfg.logging.level, "debug");
        assert_eq!(cfg.logging.access_log_format, "json");
        assert_eq!(cfg.socket_addr().unwrap(), "127.0.0.1:4100".parse().unwrap());
    }

    #[test]
    fn test_port_variable_wins() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("server.toml"), "[server]\nport = 4100\n").unwrap();
        let path = dir.path().join("server");

        let cfg = Config::from_sources(path.to_str().unwrap(), Some("5050".to_string())).unwrap();
        assert_eq!(cfg.server.port, 5050);
    }

    #[test]
    fn test_invalid_port_variable_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent");

        assert!(Config::from_sources(missing.to_str().unwrap(), Some("not-a-port".to_string())).is_err());
    }

    #[test]
    fn test_invalid_host_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("server.toml"), "[server]\nhost = \"not a host\"\n").unwrap();
        let path = dir.path().join("server");

        let cfg = Config::from_sources(path.to_str().unwrap(), None).unwrap();
        assert!(cfg.socket_addr().is_err());
    }
}
