//! HTTP client wrapper for the OPAP REST services
//!
//! This module owns the base URL and the underlying `reqwest::Client`.
//! It resolves relative paths against the base URL, executes requests,
//! classifies HTTP status and decodes JSON bodies. It knows nothing about
//! specific endpoints.

use std::time::Duration;

use reqwest::header::HeaderMap;
use reqwest::{Body, Method, Request, StatusCode, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{OpapError, Result};

/// Base URL of the OPAP web services
pub const DEFAULT_BASE_URL: &str = "http://applications.opap.gr/";

/// Path segment prefixing every draw lookup
pub const DEFAULT_DRAWS_ENDPOINT: &str = "DrawsRestServices";

/// Default User-Agent sent by the built-in transport
const DEFAULT_USER_AGENT: &str = concat!("opap-core/", env!("CARGO_PKG_VERSION"));

/// Configuration for the default transport and endpoints
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// User-Agent header value
    pub user_agent: String,
    /// Absolute base URL every path is resolved against
    pub base_url: String,
    /// Endpoint prefix used by [`DrawsService`](crate::DrawsService)
    pub draws_endpoint: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            draws_endpoint: DEFAULT_DRAWS_ENDPOINT.to_string(),
        }
    }
}

/// Metadata of an HTTP response.
///
/// The body is always drained before a call returns, so only the status,
/// headers and final URL are kept.
#[derive(Debug, Clone)]
pub struct Response {
    /// HTTP status code
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Final URL of the response
    pub url: Url,
}

impl Response {
    fn from_reqwest(resp: &reqwest::Response) -> Self {
        Self {
            status: resp.status(),
            headers: resp.headers().clone(),
            url: resp.url().clone(),
        }
    }
}

/// HTTP client for the OPAP REST services
///
/// Holds no per-call state. Clones share the underlying connection pool and
/// can be used concurrently from many tasks.
#[derive(Debug, Clone)]
pub struct OpapClient {
    /// Underlying HTTP transport
    client: reqwest::Client,
    /// Base URL, always ending in `/`
    base_url: Url,
}

impl OpapClient {
    /// Create a new client.
    ///
    /// Uses `http_client` as the transport when given, otherwise builds a fresh
    /// one from [`ClientConfig::default`]. The base URL is set to
    /// [`DEFAULT_BASE_URL`]. Performs no network I/O.
    ///
    /// # Errors
    /// Returns an error if the default HTTP client cannot be created
    pub fn new(http_client: Option<reqwest::Client>) -> Result<Self> {
        match http_client {
            Some(client) => Ok(Self {
                client,
                base_url: parse_base_url(DEFAULT_BASE_URL)?,
            }),
            None => Self::with_config(&ClientConfig::default()),
        }
    }

    /// Create a new client with custom configuration
    ///
    /// # Arguments
    /// * `config` - Transport settings and base URL
    ///
    /// # Errors
    /// - `OpapError::Transport` if the HTTP client cannot be created
    /// - `OpapError::MalformedUrl` if `config.base_url` is not an absolute http(s) URL
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: parse_base_url(&config.base_url)?,
        })
    }

    /// Replace the base URL, builder style.
    ///
    /// # Errors
    /// Returns `OpapError::MalformedUrl` if `base_url` is not an absolute http(s) URL
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self> {
        self.set_base_url(base_url)?;
        Ok(self)
    }

    /// Replace the base URL.
    ///
    /// A trailing slash is appended to the path when missing, so that relative
    /// paths are resolved beneath it rather than replacing its last segment.
    ///
    /// # Errors
    /// Returns `OpapError::MalformedUrl` if `base_url` is not an absolute http(s) URL
    pub fn set_base_url(&mut self, base_url: &str) -> Result<()> {
        self.base_url = parse_base_url(base_url)?;
        Ok(())
    }

    /// The base URL every relative path is resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build a request for a path relative to the base URL.
    ///
    /// Relative paths should be given without a leading slash: a leading slash
    /// resolves against the host root and discards any path in the base URL.
    ///
    /// # Arguments
    /// * `method` - HTTP method
    /// * `path` - URL reference relative to the base URL (e.g., "DrawsRestServices/joker/last.json")
    /// * `body` - Optional request body
    ///
    /// # Errors
    /// Returns `OpapError::MalformedUrl` if `path` is not a valid URL reference
    /// or does not resolve to an http(s) URL
    pub fn new_request(&self, method: Method, path: &str, body: Option<Body>) -> Result<Request> {
        validate_reference(path)?;

        let url = self.base_url.join(path).map_err(|e| OpapError::MalformedUrl {
            url: path.to_string(),
            reason: e.to_string(),
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(OpapError::MalformedUrl {
                url: path.to_string(),
                reason: format!("unsupported scheme {:?}", url.scheme()),
            });
        }

        let mut request = Request::new(method, url);
        *request.body_mut() = body;
        Ok(request)
    }

    /// Send a request and decode its JSON body into `T`.
    ///
    /// # Errors
    /// - `OpapError::Transport` - Network failure, no response available
    /// - `OpapError::HttpStatus` - Status outside 200..=299
    /// - `OpapError::BodyRead` - Body could not be read
    /// - `OpapError::Decode` - Body is not valid JSON for `T`
    pub async fn execute<T: DeserializeOwned>(&self, request: Request) -> Result<(T, Response)> {
        let (body, response) = self.round_trip(request).await?;

        match decode_first(&body) {
            Ok(value) => Ok((value, response)),
            Err(source) => Err(OpapError::Decode {
                source,
                body: String::from_utf8_lossy(&body).into_owned(),
                response,
            }),
        }
    }

    /// Send a request without decoding its body.
    ///
    /// The body is still read to completion and status is classified exactly
    /// as in [`execute`](Self::execute).
    ///
    /// # Errors
    /// Same as [`execute`](Self::execute), minus `OpapError::Decode`
    pub async fn send(&self, request: Request) -> Result<Response> {
        let (_, response) = self.round_trip(request).await?;
        Ok(response)
    }

    /// GET a path relative to the base URL and decode the JSON body into `T`.
    ///
    /// # Errors
    /// Any error of [`new_request`](Self::new_request) or [`execute`](Self::execute)
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<(T, Response)> {
        let request = self.new_request(Method::GET, path, None)?;
        self.execute(request).await
    }

    /// One request/response cycle. The body is always read in full so the
    /// connection returns to the pool.
    async fn round_trip(&self, request: Request) -> Result<(Vec<u8>, Response)> {
        let method = request.method().clone();
        let url = request.url().clone();
        debug!(%method, %url, "sending request");

        let resp = self.client.execute(request).await?;
        let response = Response::from_reqwest(&resp);

        let body = match resp.bytes().await {
            Ok(bytes) => bytes.to_vec(),
            Err(source) => return Err(OpapError::BodyRead { source, response }),
        };
        debug!(status = response.status.as_u16(), len = body.len(), "received response");

        if !response.status.is_success() {
            return Err(OpapError::HttpStatus {
                method,
                url,
                body: String::from_utf8_lossy(&body).into_owned(),
                response,
            });
        }

        Ok((body, response))
    }
}

/// Decode the first JSON value in `body`. Anything after it is ignored.
fn decode_first<T: DeserializeOwned>(body: &[u8]) -> serde_json::Result<T> {
    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<T>();
    match stream.next() {
        Some(result) => result,
        // Empty or whitespace-only body: let the plain decoder report EOF.
        None => serde_json::from_slice(body),
    }
}

/// Parse an absolute http(s) base URL and make sure its path ends in `/`.
fn parse_base_url(base_url: &str) -> Result<Url> {
    let malformed = |reason: String| OpapError::MalformedUrl {
        url: base_url.to_string(),
        reason,
    };

    let mut url = Url::parse(base_url).map_err(|e| malformed(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(malformed(format!("unsupported scheme {:?}", url.scheme())));
    }
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// Reject references that a strict URL parser would refuse: control
/// characters and `%` not followed by two hex digits.
fn validate_reference(path: &str) -> Result<()> {
    let malformed = |reason: &str| OpapError::MalformedUrl {
        url: path.to_string(),
        reason: reason.to_string(),
    };

    if path.chars().any(|c| c.is_ascii_control()) {
        return Err(malformed("invalid control character"));
    }

    let bytes = path.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(malformed("invalid percent-encoding"));
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
