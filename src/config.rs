// src/config.rs
use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/chatbot";

pub const ENDPOINT_VAR: &str = "CHATBOT_ENDPOINT";
pub const TIMEOUT_VAR: &str = "CHATBOT_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub endpoint: String,
    /// `None` waits on the server indefinitely.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

impl ClientConfig {
    /// Read overrides from the process environment. Call `dotenvy::dotenv()`
    /// beforehand to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENDPOINT_VAR).filter(|s| !s.trim().is_empty()) {
            let endpoint = raw.trim();
            match reqwest::Url::parse(endpoint) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    config.endpoint = endpoint.to_string();
                }
                _ => {
                    return Err(ConfigError::InvalidEndpoint {
                        var: ENDPOINT_VAR,
                        value: raw.clone(),
                    });
                }
            }
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config.timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_set() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.endpoint, "http://localhost:8080/chatbot");
        assert_eq!(config.timeout, None);
    }

    #[test]
    fn overrides_endpoint_and_timeout() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (ENDPOINT_VAR, "http://127.0.0.1:9000/bot"),
            (TIMEOUT_VAR, "5"),
        ]))
        .unwrap();
        assert_eq!(config.endpoint, "http://127.0.0.1:9000/bot");
        assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn blank_endpoint_keeps_default() {
        let config = ClientConfig::from_lookup(lookup_from(&[(ENDPOINT_VAR, "  ")])).unwrap();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn rejects_endpoint_that_is_not_a_url() {
        for raw in ["garbage", "localhost:8080/chatbot", "ftp://localhost/chatbot"] {
            let err = ClientConfig::from_lookup(lookup_from(&[(ENDPOINT_VAR, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidEndpoint { .. }), "{raw}");
        }
    }

    #[test]
    fn rejects_bad_timeout() {
        for raw in ["0", "soon", "-3"] {
            let err = ClientConfig::from_lookup(lookup_from(&[(TIMEOUT_VAR, raw)])).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidTimeout { .. }), "{raw}");
        }
    }
}
