//! Configuration for Trysail clients.
//!
//! [`Config`] is an immutable value: every `with_*` method consumes the value
//! and returns an updated copy, so a base configuration can be cloned and
//! adjusted per call site without affecting other holders.

use crate::Error;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Environment variable holding the control-plane base URL.
pub const ENV_BASE_URL: &str = "TRYSAIL_BASE_URL";

/// Environment variable holding the request timeout in seconds.
pub const ENV_TIMEOUT: &str = "TRYSAIL_TIMEOUT";

/// Environment variable toggling TLS certificate verification.
pub const ENV_VERIFY_SSL: &str = "TRYSAIL_VERIFY_SSL";

/// Configuration for a Trysail client instance.
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Control-plane base URL, without trailing slash
    base_url: String,

    /// Request timeout in seconds
    timeout_secs: u64,

    /// Whether to verify TLS certificates
    verify_ssl: bool,

    /// Extra headers sent with every request
    headers: BTreeMap<String, String>,

    /// Pre-built HTTP client used instead of building one from this configuration
    #[serde(skip)]
    http_client: Option<reqwest::blocking::Client>,
}

impl Config {
    /// Create a configuration for the given base URL with default settings.
    ///
    /// The URL is not validated; a trailing `/` is removed.
    #[must_use]
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            base_url: trim_base_url(base_url.as_ref()),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            verify_ssl: true,
            headers: BTreeMap::new(),
            http_client: None,
        }
    }

    /// Build a configuration from a generic key/value map.
    ///
    /// Recognized keys are `base_url`, `timeout`, `verify_ssl` and `headers`.
    /// Missing keys and values of an unexpected JSON type fall back to the
    /// defaults; non-string header values are skipped. A pre-built HTTP client
    /// cannot travel through JSON and is supplied with [`Config::with_http_client`].
    #[must_use]
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let base_url = map.get("base_url").and_then(Value::as_str).unwrap_or("");
        let timeout_secs = map
            .get("timeout")
            .and_then(Value::as_u64)
            .unwrap_or(DEFAULT_TIMEOUT_SECS);
        let verify_ssl = map
            .get("verify_ssl")
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let headers = map
            .get("headers")
            .and_then(Value::as_object)
            .map(|headers| {
                headers
                    .iter()
                    .filter_map(|(name, value)| {
                        value.as_str().map(|value| (name.clone(), value.to_string()))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            base_url: trim_base_url(base_url),
            timeout_secs,
            verify_ssl,
            headers,
            http_client: None,
        }
    }

    /// Create a configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TRYSAIL_BASE_URL`: Control-plane URL (default: `http://localhost:8081`)
    /// - `TRYSAIL_TIMEOUT`: Request timeout in seconds (default: 30)
    /// - `TRYSAIL_VERIFY_SSL`: Verify TLS certificates (default: true)
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup(ENV_TIMEOUT) {
            Some(value) => value
                .trim()
                .parse()
                .map_err(|e| Error::config(format!("invalid {ENV_TIMEOUT}: {e}")))?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let verify_ssl = match lookup(ENV_VERIFY_SSL) {
            Some(value) => parse_bool(&value)
                .ok_or_else(|| Error::config(format!("invalid {ENV_VERIFY_SSL}: {value}")))?,
            None => true,
        };

        Ok(Self::new(base_url)
            .with_timeout(timeout_secs)
            .with_verify_ssl(verify_ssl))
    }

    /// Control-plane base URL, without trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request timeout in seconds.
    #[must_use]
    pub const fn timeout_secs(&self) -> u64 {
        self.timeout_secs
    }

    /// Request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether TLS certificates are verified.
    #[must_use]
    pub const fn verify_ssl(&self) -> bool {
        self.verify_ssl
    }

    /// Extra headers sent with every request.
    #[must_use]
    pub const fn headers(&self) -> &BTreeMap<String, String> {
        &self.headers
    }

    /// Pre-built HTTP client, if one was supplied.
    #[must_use]
    pub const fn http_client(&self) -> Option<&reqwest::blocking::Client> {
        self.http_client.as_ref()
    }

    /// Set the base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl AsRef<str>) -> Self {
        self.base_url = trim_base_url(base_url.as_ref());
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_verify_ssl(mut self, verify: bool) -> Self {
        self.verify_ssl = verify;
        self
    }

    /// Add or replace a single header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Replace all extra headers.
    #[must_use]
    pub fn with_headers(mut self, headers: BTreeMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    /// Use a pre-built HTTP client instead of building one from this configuration.
    ///
    /// The supplied client is used as-is: timeout, TLS and header settings of
    /// this configuration are not applied to it.
    #[must_use]
    pub fn with_http_client(mut self, client: reqwest::blocking::Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

fn trim_base_url(base_url: &str) -> String {
    base_url.trim_end_matches('/').to_string()
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;
    use serde_json::json;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_config_new() {
        let config = Config::new("https://trysail.example.com/");
        assert_eq!(config.base_url(), "https://trysail.example.com");
        assert_eq!(config.timeout_secs(), 30);
        assert!(config.verify_ssl());
        assert!(config.headers().is_empty());
        assert!(config.http_client().is_none());
    }

    #[test]
    fn test_config_does_not_validate_url() {
        let config = Config::new("not a url");
        assert_eq!(config.base_url(), "not a url");
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new("https://trysail.example.com")
            .with_timeout(60)
            .with_verify_ssl(false)
            .with_header("X-Api-Key", "secret")
            .with_base_url("https://other.example.com//");

        assert_eq!(config.base_url(), "https://other.example.com");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(!config.verify_ssl());
        assert_eq!(
            config.headers().get("X-Api-Key").map(String::as_str),
            Some("secret")
        );
    }

    #[test]
    fn test_with_methods_leave_original_untouched() {
        let base = Config::new("https://trysail.example.com");
        let derived = base.clone().with_timeout(5).with_header("X-Trace", "1");

        assert_eq!(base.timeout_secs(), 30);
        assert!(base.headers().is_empty());
        assert_eq!(derived.timeout_secs(), 5);
        assert_eq!(derived.headers().len(), 1);
    }

    #[test]
    fn test_with_headers_replaces_all() {
        let mut headers = BTreeMap::new();
        headers.insert("X-One".to_string(), "1".to_string());

        let config = Config::default()
            .with_header("X-Zero", "0")
            .with_headers(headers);

        assert_eq!(config.headers().len(), 1);
        assert!(config.headers().contains_key("X-One"));
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs(), DEFAULT_TIMEOUT_SECS);
        assert!(config.verify_ssl());
    }

    #[test]
    fn test_config_from_map() {
        let map = json!({
            "base_url": "https://cp.example.com/",
            "timeout": 10,
            "verify_ssl": false,
            "headers": {"X-Api-Key": "k", "X-Ignored": 5}
        });
        let config = Config::from_map(map.as_object().unwrap());

        assert_eq!(config.base_url(), "https://cp.example.com");
        assert_eq!(config.timeout_secs(), 10);
        assert!(!config.verify_ssl());
        assert_eq!(config.headers().len(), 1);
        assert_eq!(config.headers().get("X-Api-Key").map(String::as_str), Some("k"));
    }

    #[test]
    fn test_config_from_empty_map_uses_defaults() {
        let config = Config::from_map(&Map::new());
        assert_eq!(config.base_url(), "");
        assert_eq!(config.timeout_secs(), 30);
        assert!(config.verify_ssl());
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_config_from_map_ignores_wrong_types() {
        let map = json!({"base_url": 12, "timeout": "soon", "verify_ssl": "yes", "headers": []});
        let config = Config::from_map(map.as_object().unwrap());
        assert_eq!(config.base_url(), "");
        assert_eq!(config.timeout_secs(), 30);
        assert!(config.verify_ssl());
        assert!(config.headers().is_empty());
    }

    #[test]
    fn test_config_from_lookup_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs(), 30);
        assert!(config.verify_ssl());
    }

    #[test]
    fn test_config_from_lookup_values() {
        let config = Config::from_lookup(lookup_from(&[
            (ENV_BASE_URL, "https://cp.internal/"),
            (ENV_TIMEOUT, "15"),
            (ENV_VERIFY_SSL, "false"),
        ]))
        .unwrap();

        assert_eq!(config.base_url(), "https://cp.internal");
        assert_eq!(config.timeout_secs(), 15);
        assert!(!config.verify_ssl());
    }

    #[test]
    fn test_config_from_lookup_invalid_timeout() {
        let err = Config::from_lookup(lookup_from(&[(ENV_TIMEOUT, "thirty")])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
        assert!(err.message().contains(ENV_TIMEOUT));
    }

    #[test]
    fn test_config_from_lookup_invalid_verify_ssl() {
        let result = Config::from_lookup(lookup_from(&[(ENV_VERIFY_SSL, "maybe")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool(""), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_config_serialization_skips_client() {
        let config = Config::new("https://cp.example.com").with_header("X-A", "b");
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["base_url"], "https://cp.example.com");
        assert_eq!(json["timeout_secs"], 30);
        assert_eq!(json["headers"]["X-A"], "b");
        assert!(json.get("http_client").is_none());
    }
}
