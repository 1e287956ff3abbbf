use std::env;
use std::net::SocketAddr;

fn env_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

/// Listener addresses for the API and the metrics endpoint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub metrics_port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            metrics_port: 9090,
        }
    }
}

impl ServerConfig {
    /// Reads `HOST`, `PORT` and `METRICS_PORT`, falling back to defaults
    /// for missing or unparsable values.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env_or("PORT", defaults.port),
            metrics_port: env_or("METRICS_PORT", defaults.metrics_port),
        }
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid HOST/PORT {}:{}: {}", self.host, self.port, e))
    }

    pub fn metrics_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.metrics_port)
            .parse()
            .map_err(|e| {
                anyhow::anyhow!(
                    "invalid HOST/METRICS_PORT {}:{}: {}",
                    self.host,
                    self.metrics_port,
                    e
                )
            })
    }
}

/// Logging and metrics switches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Default level for this crate's targets when `RUST_LOG` is unset
    pub log_level: String,
    /// Directory for the rolling log files
    pub log_dir: String,
    pub metrics_enabled: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: "storage/logs".to_string(),
            metrics_enabled: true,
        }
    }
}

impl ObservabilityConfig {
    /// Reads `LOG_LEVEL`, `LOG_DIR` and `METRICS_ENABLED`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_dir: env::var("LOG_DIR").unwrap_or(defaults.log_dir),
            metrics_enabled: env::var("METRICS_ENABLED")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.metrics_enabled),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_lowercase().as_str(), "false" | "0" | "no" | "off")
}
