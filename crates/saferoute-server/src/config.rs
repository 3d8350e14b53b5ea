//! Server configuration from environment.

use std::env;
use std::fmt;
use std::time::Duration;

use saferoute_providers::{DEFAULT_DIRECTIONS_URL, DEFAULT_ELEVATION_URL, DEFAULT_TRAFFIC_URL};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required credential {0}")]
    MissingCredential(&'static str),
    #[error("invalid value for {name}: {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

#[derive(Clone)]
pub struct Config {
    pub bind_addr: String,
    pub server_port: u16,
    pub google_maps_api_key: String,
    pub tomtom_api_key: String,
    pub openrouteservice_api_key: String,
    pub directions_url: String,
    pub traffic_url: String,
    pub elevation_url: String,
    pub provider_timeout: Duration,
    pub log_format: LogFormat,
}

impl Config {
    /// Load from the process environment after reading an optional `.env`.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let credential = |name: &'static str| get(name).ok_or(ConfigError::MissingCredential(name));

        let server_port: u16 = match get("SAFEROUTE_PORT") {
            Some(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
                name: "SAFEROUTE_PORT",
                value,
            })?,
            None => 5001,
        };

        let timeout_s: u64 = match get("SAFEROUTE_PROVIDER_TIMEOUT_S") {
            Some(value) => match value.parse() {
                Ok(secs) if (1..=60).contains(&secs) => secs,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "SAFEROUTE_PROVIDER_TIMEOUT_S",
                        value,
                    })
                }
            },
            None => 10,
        };

        let log_format = match get("SAFEROUTE_LOG_FORMAT") {
            None => LogFormat::Pretty,
            Some(value) => match value.to_ascii_lowercase().as_str() {
                "pretty" => LogFormat::Pretty,
                "json" => LogFormat::Json,
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: "SAFEROUTE_LOG_FORMAT",
                        value,
                    })
                }
            },
        };

        Ok(Self {
            bind_addr: get("SAFEROUTE_BIND").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port,
            google_maps_api_key: credential("GOOGLE_MAPS_API_KEY")?,
            tomtom_api_key: credential("TOMTOM_API_KEY")?,
            openrouteservice_api_key: credential("OPENROUTESERVICE_API_KEY")?,
            directions_url: get("SAFEROUTE_DIRECTIONS_URL")
                .unwrap_or_else(|| DEFAULT_DIRECTIONS_URL.to_string()),
            traffic_url: get("SAFEROUTE_TRAFFIC_URL")
                .unwrap_or_else(|| DEFAULT_TRAFFIC_URL.to_string()),
            elevation_url: get("SAFEROUTE_ELEVATION_URL")
                .unwrap_or_else(|| DEFAULT_ELEVATION_URL.to_string()),
            provider_timeout: Duration::from_secs(timeout_s),
            log_format,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("bind_addr", &self.bind_addr)
            .field("server_port", &self.server_port)
            .field("google_maps_api_key", &"<redacted>")
            .field("tomtom_api_key", &"<redacted>")
            .field("openrouteservice_api_key", &"<redacted>")
            .field("directions_url", &self.directions_url)
            .field("traffic_url", &self.traffic_url)
            .field("elevation_url", &self.elevation_url)
            .field("provider_timeout", &self.provider_timeout)
            .field("log_format", &self.log_format)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    const KEYS: [(&str, &str); 3] = [
        ("GOOGLE_MAPS_API_KEY", "g-secret"),
        ("TOMTOM_API_KEY", "t-secret"),
        ("OPENROUTESERVICE_API_KEY", "o-secret"),
    ];

    /// Credentials plus `extra`.
    fn load(extra: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let pairs: Vec<(&str, &str)> = KEYS.iter().chain(extra).copied().collect();
        Config::from_lookup(lookup(&pairs))
    }

    #[test]
    fn defaults_apply_when_only_keys_are_set() {
        let config = load(&[]).unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.server_port, 5001);
        assert_eq!(config.provider_timeout, Duration::from_secs(10));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.directions_url, DEFAULT_DIRECTIONS_URL);
        assert_eq!(config.traffic_url, DEFAULT_TRAFFIC_URL);
        assert_eq!(config.elevation_url, DEFAULT_ELEVATION_URL);
    }

    #[test]
    fn missing_or_blank_credential_is_an_error() {
        let err = Config::from_lookup(lookup(&[
            ("GOOGLE_MAPS_API_KEY", "g"),
            ("TOMTOM_API_KEY", "  "),
            ("OPENROUTESERVICE_API_KEY", "o"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::MissingCredential("TOMTOM_API_KEY"));
    }

    #[test]
    fn overrides_are_read() {
        let config = load(&[
            ("SAFEROUTE_PORT", "8080"),
            ("SAFEROUTE_BIND", "127.0.0.1"),
            ("SAFEROUTE_PROVIDER_TIMEOUT_S", "3"),
            ("SAFEROUTE_LOG_FORMAT", "JSON"),
            ("SAFEROUTE_TRAFFIC_URL", "http://localhost:9000/flow"),
        ])
        .unwrap();

        assert_eq!(config.server_port, 8080);
        assert_eq!(config.bind_addr, "127.0.0.1");
        assert_eq!(config.provider_timeout, Duration::from_secs(3));
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.traffic_url, "http://localhost:9000/flow");
    }

    #[test]
    fn out_of_range_timeout_is_rejected() {
        assert!(matches!(
            load(&[("SAFEROUTE_PROVIDER_TIMEOUT_S", "0")]),
            Err(ConfigError::InvalidValue { name: "SAFEROUTE_PROVIDER_TIMEOUT_S", .. })
        ));
        assert!(matches!(
            load(&[("SAFEROUTE_PROVIDER_TIMEOUT_S", "61")]),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn bad_port_and_log_format_are_rejected() {
        assert!(matches!(
            load(&[("SAFEROUTE_PORT", "http")]),
            Err(ConfigError::InvalidValue { name: "SAFEROUTE_PORT", .. })
        ));
        assert!(matches!(
            load(&[("SAFEROUTE_LOG_FORMAT", "xml")]),
            Err(ConfigError::InvalidValue { name: "SAFEROUTE_LOG_FORMAT", .. })
        ));
    }

    #[test]
    fn debug_output_redacts_keys() {
        let rendered = format!("{:?}", load(&[]).unwrap());

        assert!(rendered.contains("<redacted>"));
        assert!(!rendered.contains("g-secret"));
        assert!(!rendered.contains("t-secret"));
        assert!(!rendered.contains("o-secret"));
    }
}
