//! Logic Apps runtime management API client.
//!
//! This module provides a lightweight client for the runtime management
//! endpoints exposed by a Logic Apps host. It focuses on:
//!
//! - Constructing an HTTP client with sensible defaults
//! - Validating the configured base URL for safety
//! - Building requests that carry the master key as a `code` query parameter
//! - Strict 200-only response handling with structured remote error payloads
//!
//! The primary entry point is [`RuntimeClient`]. Create an instance via
//! [`RuntimeClient::new`], build requests with [`RuntimeClient::request`] (or
//! [`RuntimeClient::request_absolute`] for resolved callback URLs), and
//! execute them with [`RuntimeClient::execute`].
//!
//! There is no retry policy anywhere: a single failed call aborts the whole
//! user-initiated action, and every failure is logged before it propagates.

use std::time::{Duration, Instant};

use lar_types::MasterKey;
use lar_util::redact_sensitive;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url, header};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

/// Hostnames allowed with any scheme; everything else must use HTTPS.
const LOCALHOST_DOMAINS: &[&str] = &["localhost", "127.0.0.1"];

/// Structured error payload the runtime attaches to failed management calls,
/// in the shape `{ "error": { "code": ..., "message": ... } }`.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RemoteErrorEnvelope {
    #[serde(default)]
    error: Option<RemoteError>,
}

/// Error raised by [`RuntimeClient`] operations.
///
/// URLs embedded in these errors are already redacted, so the variants are
/// safe to log and to surface to the user verbatim.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid runtime base URL: {0}")]
    InvalidBaseUrl(String),
    #[error("could not build the HTTP client: {0}")]
    Build(#[source] reqwest::Error),
    #[error("network error calling {url}: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: StatusCode,
        /// Structured `{code, message}` payload, when the body carried one.
        error: Option<RemoteError>,
    },
    #[error("invalid JSON in response from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// The remote system's structured error message, when one was returned.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            Self::Status { error: Some(remote), .. } => remote.message.as_deref(),
            _ => None,
        }
    }
}

/// Thin wrapper around a configured `reqwest::Client` for runtime management
/// API access.
///
/// The client pre-configures default headers and builds requests against a
/// validated base URL. Authorization is a master key forwarded as a `code`
/// query parameter on each request; the client holds no credential state of
/// its own and is built fresh for every command invocation.
#[derive(Debug, Clone)]
pub struct RuntimeClient {
    pub base_url: String,
    http: Client,
    user_agent: String,
}

impl RuntimeClient {
    /// Construct a [`RuntimeClient`] for the given base URL.
    ///
    /// `localhost`/`127.0.0.1` hosts may use any scheme (the common case is a
    /// locally hosted runtime on `http://localhost:7071`); any other host
    /// must use HTTPS.
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        validate_base_url(base_url)?;

        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(header::ACCEPT, header::HeaderValue::from_static("application/json"));

        let http = Client::builder()
            .default_headers(default_headers)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(ApiError::Build)?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
            user_agent: format!("logicapp-runner/0.1; {}", std::env::consts::OS),
        })
    }

    /// Build a request for a base-URL-relative path.
    ///
    /// Used for the admin key endpoint, which is the one call made before a
    /// master key exists.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %redact_sensitive(&url), %method, "building request");

        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    /// Build a request for a management-API-relative path, carrying the
    /// master key as the `code` query parameter.
    pub fn request_with_key(&self, method: Method, path: &str, key: &MasterKey) -> RequestBuilder {
        self.request(method, path).query(&[("code", key.expose())])
    }

    /// Build a request against a fully-qualified URL, bypassing the base URL.
    ///
    /// Used for resolved trigger callback URLs, which are absolute, signed,
    /// and carry their own authorization in the query string.
    pub fn request_absolute(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(url = %redact_sensitive(url), %method, "building callback request");

        self.http.request(method, url).header(header::USER_AGENT, &self.user_agent)
    }

    /// Execute a request and parse the response body as JSON.
    ///
    /// Only HTTP 200 counts as success; any other status becomes
    /// [`ApiError::Status`], with the runtime's structured `{code, message}`
    /// payload attached when the body carries one. An empty 200 body parses
    /// as [`Value::Null`]. Failures are logged at `warn` before propagating.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Value, ApiError> {
        let start = Instant::now();
        let request = builder.build().map_err(ApiError::Build)?;
        let url = redact_sensitive(request.url().as_str());
        let method = request.method().clone();

        let response = self.http.execute(request).await.map_err(|source| {
            warn!(
                url = %url,
                %method,
                error = %source,
                duration_ms = start.elapsed().as_millis(),
                "request failed in transport"
            );
            ApiError::Transport {
                url: url.clone(),
                source,
            }
        })?;

        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        if status != StatusCode::OK {
            let remote = parse_remote_error(&body_text);
            warn!(
                url = %url,
                %method,
                %status,
                remote_message = remote.as_ref().and_then(|e| e.message.as_deref()).unwrap_or(""),
                duration_ms = start.elapsed().as_millis(),
                "request failed"
            );
            return Err(ApiError::Status {
                url,
                status,
                error: remote,
            });
        }

        debug!(
            url = %url,
            %method,
            %status,
            duration_ms = start.elapsed().as_millis(),
            "request completed"
        );

        if body_text.trim().is_empty() {
            return Ok(Value::Null);
        }

        serde_json::from_str(&body_text).map_err(|source| ApiError::Json { url, source })
    }
}

/// Validate that a base URL is acceptable for use by the client.
///
/// Rules:
/// - `localhost` or `127.0.0.1`: any scheme is allowed
/// - otherwise: scheme must be HTTPS
fn validate_base_url(base: &str) -> Result<(), ApiError> {
    let parsed = Url::parse(base).map_err(|e| ApiError::InvalidBaseUrl(format!("'{}': {}", base, e)))?;

    let host_name = parsed
        .host_str()
        .ok_or_else(|| ApiError::InvalidBaseUrl(format!("'{}' has no host", base)))?;

    if LOCALHOST_DOMAINS.iter().any(|&allowed| host_name.eq_ignore_ascii_case(allowed)) {
        return Ok(());
    }

    if parsed.scheme() != "https" {
        return Err(ApiError::InvalidBaseUrl(format!(
            "non-localhost hosts must use https; got '{}://'",
            parsed.scheme()
        )));
    }

    Ok(())
}

fn parse_remote_error(body: &str) -> Option<RemoteError> {
    serde_json::from_str::<RemoteErrorEnvelope>(body).ok().and_then(|envelope| envelope.error)
}
