//! HTTP client construction and the shared JSON transport.
//!
//! Every resource client composes an [`HttpTransport`]: it joins the base URL
//! with the request path, sends one blocking request, maps non-2xx responses
//! to [`Error`] and decodes the JSON body. No request is ever retried.

use crate::config::Config;
use crate::query::QueryParams;
use crate::{Error, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// User agent sent with every request built by [`build_http_client`].
pub const USER_AGENT: &str = concat!("trysail-rust-sdk/", env!("CARGO_PKG_VERSION"));

const APPLICATION_JSON: &str = "application/json";

/// Build a blocking HTTP client from the configuration.
///
/// The client sends `Accept` and `Content-Type: application/json`, the SDK
/// user agent and the configured extra headers. A timeout of 0 disables the
/// request timeout.
///
/// # Errors
///
/// Returns a configuration error if the underlying client cannot be built.
pub fn build_http_client(config: &Config) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(APPLICATION_JSON));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(APPLICATION_JSON));

    for (name, value) in config.headers() {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                headers.insert(name, value);
            }
            _ => warn!(header = %name, "Skipping invalid Trysail header"),
        }
    }

    let timeout = (config.timeout_secs() > 0).then(|| config.timeout());

    let mut builder = Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout);

    if !config.verify_ssl() {
        warn!("TLS verification disabled for Trysail client");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder
        .build()
        .map_err(|err| Error::config(format!("Failed to build Trysail HTTP client: {err}")))
}

/// Decode a successful response body.
///
/// An empty (or whitespace-only) body decodes to an empty JSON object.
///
/// # Errors
///
/// Returns a decode error carrying the response status when the body is not
/// valid JSON.
pub fn parse_response(status: StatusCode, body: &str) -> Result<Value> {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }

    serde_json::from_str(body)
        .map_err(|err| Error::decode(status.as_u16(), &err).with_raw_body(body))
}

/// Deserialize an already decoded response body into `T`.
///
/// # Errors
///
/// Returns a decode error carrying the response status when the value does
/// not match `T`.
pub fn decode_value<T>(status: StatusCode, value: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| Error::decode(status.as_u16(), &err))
}

/// Blocking JSON transport shared by the resource clients.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
    base_url: String,
}

impl HttpTransport {
    /// Wrap an existing HTTP client.
    #[must_use]
    pub fn new(http: Client, base_url: impl AsRef<str>) -> Self {
        Self {
            http,
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    /// Create the transport for a configuration.
    ///
    /// The pre-built client of the configuration is used when present;
    /// otherwise one is built with [`build_http_client`].
    ///
    /// # Errors
    ///
    /// Returns a configuration error if a client has to be built and fails.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = match config.http_client() {
            Some(client) => {
                debug!("Using pre-built HTTP client for Trysail transport");
                client.clone()
            }
            None => build_http_client(config)?,
        };

        Ok(Self::new(http, config.base_url()))
    }

    /// Return the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Return the underlying HTTP client.
    #[must_use]
    pub const fn http_client(&self) -> &Client {
        &self.http
    }

    /// Send a request and return the status and body of a 2xx response.
    ///
    /// The URL is `base_url + path + query`; path segments are interpolated
    /// by the caller without further escaping.
    ///
    /// # Errors
    ///
    /// Transport failures and non-2xx responses are returned as [`Error`].
    pub fn request<B>(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<&B>,
    ) -> Result<(StatusCode, String)>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{path}{query}", self.base_url);
        debug!(%method, path, query, "Sending Trysail request");

        let mut request = self.http.request(method.clone(), &url);
        if let Some(payload) = body {
            request = request.json(payload);
        }

        let response = request.send()?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|err| Error::from(err).with_status_code(status.as_u16()))?;

        debug!(%method, path, status = status.as_u16(), "Trysail response received");

        if status.is_success() {
            Ok((status, text))
        } else {
            debug!(%method, path, %status, "Trysail request failed");
            Err(Error::from_response(
                status.as_u16(),
                text,
                format!("{method} {path} resulted in a `{status}` response"),
            ))
        }
    }

    /// Send a request and decode the JSON response body.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::request`] and [`parse_response`].
    pub fn send_json<B>(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<&B>,
    ) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let (status, text) = self.request(method, path, query, body)?;
        parse_response(status, &text)
    }

    /// Send a request and deserialize the JSON response body into `T`.
    ///
    /// An empty body is presented to `T` as an empty JSON object. A body that
    /// does not match `T` is a decode error carrying the response status.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::request`] and [`parse_response`].
    pub fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        query: &str,
        body: Option<&B>,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let (status, text) = self.request(method, path, query, body)?;
        decode_value(status, parse_response(status, &text)?)
    }

    /// `GET` a path and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send_json`].
    pub fn get(&self, path: &str) -> Result<Value> {
        self.send_json::<()>(Method::GET, path, "", None)
    }

    /// `GET` a path with query parameters and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send_json`].
    pub fn get_with_query(&self, path: &str, params: &QueryParams) -> Result<Value> {
        self.send_json::<()>(Method::GET, path, &params.to_query_string(), None)
    }

    /// `POST` to a path without a body and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send_json`].
    pub fn post(&self, path: &str) -> Result<Value> {
        self.send_json::<()>(Method::POST, path, "", None)
    }

    /// `POST` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send_json`].
    pub fn post_json<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::POST, path, "", Some(body))
    }

    /// `PUT` a JSON body and decode the response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::send_json`].
    pub fn put_json<B>(&self, path: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.send_json(Method::PUT, path, "", Some(body))
    }

    /// `DELETE` a path, ignoring the response body.
    ///
    /// Returns `true` on any 2xx response.
    ///
    /// # Errors
    ///
    /// See [`HttpTransport::request`].
    pub fn delete(&self, path: &str) -> Result<bool> {
        self.request::<()>(Method::DELETE, path, "", None)
            .map(|_| true)
    }
}
