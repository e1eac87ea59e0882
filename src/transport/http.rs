//! Generic HTTP request wrapper with timeout enforcement and JSON decoding.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use crate::config::{CONNECT_TIMEOUT, DEFAULT_TIMEOUT};
use crate::error::{Error, Result};

/// Per-call request configuration.
///
/// Constructed per call, never shared. `params` is a `BTreeMap`, so a
/// repeated key overwrites the previous value and the serialized key order
/// is deterministic.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// HTTP method.
    pub method: Method,
    /// Extra headers, merged over the default `Content-Type: application/json`.
    pub headers: BTreeMap<String, String>,
    /// JSON body. Serialized for non-GET methods only.
    pub body: Option<serde_json::Value>,
    /// Query parameters. Appended to the URL for GET requests only.
    pub params: BTreeMap<String, String>,
    /// Overall timeout for the send-and-read.
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: BTreeMap::new(),
            body: None,
            params: BTreeMap::new(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RequestOptions {
    /// Set the HTTP method.
    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    /// Add a header, overriding the default of the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Set the JSON body.
    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Add a query parameter. A repeated key overwrites.
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Replace all query parameters.
    pub fn params(mut self, params: BTreeMap<String, String>) -> Self {
        self.params = params;
        self
    }

    /// Set the overall timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Envelope returned by CORS relay services: the raw upstream body is
/// carried as a string in `contents`.
#[derive(Debug, Deserialize)]
struct RelayEnvelope {
    contents: String,
}

/// HTTP client wrapper.
///
/// Issues one outbound request per call, races it against the configured
/// timeout, checks the status, and decodes the JSON body into the caller's
/// type. Failures are logged once and returned; there is no retry.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    relay: Option<String>,
}

impl HttpClient {
    /// Create a client with default settings.
    pub fn new() -> Self {
        let client = match reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                warn!("Failed to build HTTP client with custom config: {}; using defaults", e);
                reqwest::Client::default()
            }
        };
        Self {
            client,
            relay: None,
        }
    }

    /// Wrap a custom reqwest client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            relay: None,
        }
    }

    /// Route requests through a CORS relay endpoint.
    ///
    /// The target URL (query string included) is percent-encoded into the
    /// relay's `url` parameter, and the response is unwrapped from the
    /// relay's `{"contents": "..."}` envelope before decoding.
    pub fn with_relay(mut self, relay: impl Into<String>) -> Self {
        self.relay = Some(relay.into());
        self
    }

    /// Issue a request and decode the JSON response into `T`.
    pub async fn request<T: DeserializeOwned>(
        &self,
        url: &str,
        options: RequestOptions,
    ) -> Result<T> {
        match self.execute(url, options).await {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(url, error = %e, "Request failed");
                Err(e)
            }
        }
    }

    async fn execute<T: DeserializeOwned>(&self, url: &str, options: RequestOptions) -> Result<T> {
        let RequestOptions {
            method,
            headers,
            body,
            params,
            timeout,
        } = options;

        let target = build_target_url(url, &method, &params)?;
        let target = match &self.relay {
            Some(relay) => wrap_in_relay(relay, &target)?,
            None => target,
        };

        let mut builder = self
            .client
            .request(method.clone(), target)
            .headers(build_headers(&headers)?);
        if method != Method::GET {
            if let Some(body) = &body {
                let encoded = serde_json::to_vec(body)
                    .map_err(|e| Error::Config(format!("unserializable body: {}", e)))?;
                builder = builder.body(encoded);
            }
        }

        // The timeout scopes the entire send-and-read; on expiry the
        // in-flight future is dropped, which aborts the connection.
        let send_and_read = async {
            let response = builder.send().await.map_err(|e| {
                if e.is_timeout() {
                    Error::Timeout
                } else {
                    Error::Network(e)
                }
            })?;

            let status = response.status();
            if !(status.is_success() || status.is_redirection()) {
                return Err(Error::Status {
                    status: status.as_u16(),
                });
            }

            response.bytes().await.map_err(Error::Network)
        };
        let bytes = tokio::time::timeout(timeout, send_and_read)
            .await
            .map_err(|_| Error::Timeout)??;

        if self.relay.is_some() {
            let envelope: RelayEnvelope = serde_json::from_slice(&bytes)
                .map_err(|e| Error::Decode(format!("relay envelope: {}", e)))?;
            serde_json::from_str(&envelope.contents).map_err(|e| Error::Decode(e.to_string()))
        } else {
            serde_json::from_slice(&bytes).map_err(|e| Error::Decode(e.to_string()))
        }
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Append the query string for GET requests. Key order is the map's
/// iteration order; values are form-encoded.
fn build_target_url(url: &str, method: &Method, params: &BTreeMap<String, String>) -> Result<Url> {
    let mut target =
        Url::parse(url).map_err(|e| Error::Config(format!("invalid URL '{}': {}", url, e)))?;
    if *method == Method::GET && !params.is_empty() {
        target.query_pairs_mut().extend_pairs(params.iter());
    }
    Ok(target)
}

fn wrap_in_relay(relay: &str, target: &Url) -> Result<Url> {
    let mut wrapped = Url::parse(relay)
        .map_err(|e| Error::Config(format!("invalid relay URL '{}': {}", relay, e)))?;
    wrapped
        .query_pairs_mut()
        .append_pair("url", target.as_str());
    Ok(wrapped)
}

/// Merge caller headers over the default `Content-Type: application/json`.
fn build_headers(extra: &BTreeMap<String, String>) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| Error::Config(format!("invalid header name '{}': {}", name, e)))?;
        let value = HeaderValue::from_str(value)
            .map_err(|e| Error::Config(format!("invalid header value: {}", e)))?;
        headers.insert(name, value);
    }
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_options() {
        let options = RequestOptions::default();
        assert_eq!(options.method, Method::GET);
        assert!(options.headers.is_empty());
        assert!(options.body.is_none());
        assert!(options.params.is_empty());
        assert_eq!(options.timeout, Duration::from_millis(5000));
    }

    #[test]
    fn test_repeated_param_overwrites() {
        let options = RequestOptions::default()
            .param("idx", "1")
            .param("idx", "3");
        assert_eq!(options.params.get("idx").map(String::as_str), Some("3"));
        assert_eq!(options.params.len(), 1);
    }

    #[test]
    fn test_query_round_trip() {
        let options = RequestOptions::default()
            .param("idx", "3")
            .param("n", "1")
            .param("mkt", "zh-CN");
        let url = build_target_url("https://example.com/archive", &Method::GET, &options.params)
            .unwrap();

        let parsed: HashMap<String, String> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed["idx"], "3");
        assert_eq!(parsed["n"], "1");
        assert_eq!(parsed["mkt"], "zh-CN");
    }

    #[test]
    fn test_params_ignored_for_post() {
        let options = RequestOptions::default().param("idx", "3");
        let url =
            build_target_url("https://example.com/archive", &Method::POST, &options.params)
                .unwrap();
        assert!(url.query().is_none());
    }

    #[test]
    fn test_query_order_is_deterministic() {
        let a = RequestOptions::default()
            .param("mkt", "zh-CN")
            .param("idx", "3");
        let b = RequestOptions::default()
            .param("idx", "3")
            .param("mkt", "zh-CN");
        let url_a = build_target_url("https://example.com/", &Method::GET, &a.params).unwrap();
        let url_b = build_target_url("https://example.com/", &Method::GET, &b.params).unwrap();
        assert_eq!(url_a.as_str(), url_b.as_str());
    }

    #[test]
    fn test_relay_wrapping_encodes_target() {
        let target = build_target_url(
            "https://example.com/archive",
            &Method::GET,
            &RequestOptions::default().param("idx", "3").params,
        )
        .unwrap();
        let wrapped = wrap_in_relay("https://relay.example/get", &target).unwrap();
        assert!(wrapped.as_str().starts_with("https://relay.example/get?url="));
        // The inner query must be escaped, not spliced in raw.
        assert!(!wrapped.query().unwrap().contains("idx=3"));
    }

    #[test]
    fn test_custom_header_overrides_default() {
        let headers = build_headers(
            &RequestOptions::default()
                .header("content-type", "text/plain")
                .headers,
        )
        .unwrap();
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "text/plain");
        assert_eq!(headers.len(), 1);
    }

    #[test]
    fn test_invalid_header_rejected() {
        assert!(build_headers(
            &RequestOptions::default().header("bad name", "x").headers
        )
        .is_err());
    }
}
