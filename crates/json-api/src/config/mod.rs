//! Server configuration module

use clap::Parser;

use crate::config::{
    db::DatabaseConfig,
    observability::{LoggingConfig, ObservabilityConfig},
    server::ServerRuntimeConfig,
};

pub(crate) mod db;
pub(crate) mod observability;
pub(crate) mod server;

/// Foundry JSON API Server configuration
#[derive(Debug, Parser)]
#[command(name = "foundry-json", about = "Foundry JSON API Server", long_about = None)]
pub struct ServerConfig {
    /// Server network settings.
    #[command(flatten)]
    pub server: ServerRuntimeConfig,

    /// Logging output settings.
    #[command(flatten)]
    pub logging: LoggingConfig,

    /// Observability (traces/metrics) settings.
    #[command(flatten)]
    pub observability: ObservabilityConfig,

    /// Application database settings.
    #[command(flatten)]
    pub database: DatabaseConfig,
}

impl ServerConfig {
    /// Load configuration from environment and CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be parsed
    pub fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    /// Get the socket address for binding
    #[must_use]
    pub fn socket_addr(&self) -> String {
        self.server.socket_addr()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn defaults_apply_when_only_database_url_is_given() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "foundry-json",
            "--database-url",
            "postgres://localhost/foundry",
        ])?;

        assert_eq!(config.socket_addr(), "0.0.0.0:8698");
        assert_eq!(config.database.database_url, "postgres://localhost/foundry");
        assert_eq!(config.observability.slow_request_threshold_ms, 1_000);
        assert_eq!(
            config.server.shutdown_grace(),
            Some(std::time::Duration::from_secs(30))
        );
        assert_eq!(config.database.pool_settings().max_connections, 10);

        Ok(())
    }

    #[test]
    fn host_and_port_flags_override_defaults() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "foundry-json",
            "-H",
            "127.0.0.1",
            "-p",
            "9000",
            "--database-url",
            "postgres://localhost/foundry",
        ])?;

        assert_eq!(config.socket_addr(), "127.0.0.1:9000");

        Ok(())
    }

    #[test]
    fn zero_grace_waits_indefinitely() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "foundry-json",
            "--shutdown-grace-seconds",
            "0",
            "--database-url",
            "postgres://localhost/foundry",
        ])?;

        assert_eq!(config.server.shutdown_grace(), None);

        Ok(())
    }

    #[test]
    fn pool_never_shrinks_below_one_connection() -> TestResult {
        let config = ServerConfig::try_parse_from([
            "foundry-json",
            "--database-max-connections",
            "0",
            "--database-acquire-timeout-seconds",
            "2",
            "--database-url",
            "postgres://localhost/foundry",
        ])?;

        let settings = config.database.pool_settings();

        assert_eq!(settings.max_connections, 1);
        assert_eq!(settings.acquire_timeout, std::time::Duration::from_secs(2));

        Ok(())
    }
}
