// Configuration module entry point
// Loads layered configuration and holds the shared application state

mod state;
mod types;

use std::net::SocketAddr;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HttpConfig, LoggingConfig, PerformanceConfig, RoutesConfig, ServerConfig, StoreConfig,
};

/// Environment variable overriding `server.port`
pub const PORT_ENV: &str = "PORT";

/// Prefix for `GUESTS_<SECTION>__<KEY>` environment overrides
const ENV_PREFIX: &str = "GUESTS";

impl Config {
    /// Load configuration from `config.*` in the working directory and the
    /// process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        let port = std::env::var(PORT_ENV).ok();
        Self::load_from("config", port.as_deref())
    }

    /// Load configuration from specified file path (without extension)
    ///
    /// `port_env` is the raw value of `PORT`; unset or blank keeps the
    /// configured port.
    pub fn load_from(
        config_path: &str,
        port_env: Option<&str>,
    ) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_path, port_env, None)
    }

    /// Same as [`Config::load_from`], reading `GUESTS_*` overrides from
    /// `env_vars` instead of the process environment when given
    pub fn load_with_env(
        config_path: &str,
        port_env: Option<&str>,
        env_vars: Option<config::Map<String, String>>,
    ) -> Result<Self, config::ConfigError> {
        let port_override = port_env
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToString::to_string);

        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .source(env_vars),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("logging.level", "info")?
            .set_default("logging.access_log", true)?
            .set_default("performance.keep_alive_timeout", 75)?
            .set_default("performance.read_timeout", 30)?
            .set_default("performance.write_timeout", 30)?
            .set_default("performance.shutdown_timeout", 10)?
            .set_default(
                "http.server_name",
                concat!("guest_server/", env!("CARGO_PKG_VERSION")),
            )?
            .set_default("store.guests_file", "guests.json")?
            .set_override_option("server.port", port_override)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, String> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| format!("Invalid address: {e}"))
    }
}
