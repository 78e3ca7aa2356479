//! Environment-driven configuration for the API binary.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Runtime configuration resolved once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP listener binds to.
    pub bind_addr: IpAddr,
    /// Port the HTTP listener binds to.
    pub http_port: u16,
    /// Base URL of the outbound push provider.
    pub push_endpoint: String,
    /// API key presented to the push provider.
    pub push_api_key: Option<String>,
    /// Log level passed to the tracing subscriber.
    pub log_level: String,
    /// Log format (`json` or `pretty`).
    pub log_format: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            http_port: 7070,
            push_endpoint: "https://push.invalid/v1/send".to_string(),
            push_api_key: None,
            log_level: "info".to_string(),
            log_format: String::new(),
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from `NOTIFLY_*` environment variables,
    /// falling back to defaults for anything unset or unparsable.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            bind_addr: read_env("NOTIFLY_BIND_ADDR")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.bind_addr),
            http_port: read_env("NOTIFLY_HTTP_PORT")
                .and_then(|value| value.parse().ok())
                .unwrap_or(defaults.http_port),
            push_endpoint: read_env("NOTIFLY_PUSH_ENDPOINT").unwrap_or(defaults.push_endpoint),
            push_api_key: read_env("NOTIFLY_PUSH_API_KEY"),
            log_level: read_env("NOTIFLY_LOG_LEVEL").unwrap_or(defaults.log_level),
            log_format: read_env("NOTIFLY_LOG_FORMAT").unwrap_or(defaults.log_format),
        }
    }

    /// Socket address the server listens on.
    #[must_use]
    pub const fn listen_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind_addr, self.http_port)
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_all_interfaces() {
        let config = ApiConfig::default();
        assert_eq!(config.listen_addr().port(), 7070);
        assert!(config.listen_addr().ip().is_unspecified());
        assert!(config.push_api_key.is_none());
    }
}
