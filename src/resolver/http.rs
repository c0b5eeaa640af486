//! Outbound HTTP with uniform error classification.
//!
//! Every provider call goes through [`HttpFetcher::fetch`], so a failure
//! always lands in one of the [`FetchError`] variants no matter which
//! provider made the call:
//! - non-2xx status → [`FetchError::Status`] (checked before the body is parsed)
//! - empty body → `Ok(None)`
//! - body that isn't JSON → [`FetchError::ResponseFormat`] carrying the URL

use std::time::Duration;

use reqwest::Method;
use reqwest::header::{CONTENT_TYPE, HeaderName, HeaderValue};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::config::HttpConfig;

/// Errors from a single outbound call
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    #[error("Invalid request to {url}: {message}")]
    InvalidRequest { url: String, message: String },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP {status_code}: {body}")]
    Status { status_code: u16, body: String },

    #[error("Malformed response from {url}: {message}")]
    ResponseFormat { url: String, message: String },
}

impl FetchError {
    /// Upstream HTTP status, if the call got that far.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            FetchError::Status { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
enum Auth {
    Bearer(String),
    Basic { user: String, password: String },
}

/// Method, headers and body of one outbound call.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    method: Method,
    headers: Vec<(HeaderName, String)>,
    auth: Option<Auth>,
    body: Option<String>,
}

impl FetchRequest {
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    pub fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            auth: None,
            body: None,
        }
    }

    pub fn header(mut self, name: HeaderName, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    pub fn bearer(mut self, token: impl Into<String>) -> Self {
        self.auth = Some(Auth::Bearer(token.into()));
        self
    }

    pub fn basic_auth(mut self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth = Some(Auth::Basic {
            user: user.into(),
            password: password.into(),
        });
        self
    }

    /// Set an `application/x-www-form-urlencoded` body.
    pub fn form_body(self, body: impl Into<String>) -> Self {
        let mut request = self.header(CONTENT_TYPE, "application/x-www-form-urlencoded");
        request.body = Some(body.into());
        request
    }
}

/// Shared HTTP client. Cheap to clone.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    /// Build a fetcher with the configured timeouts
    pub fn new(config: &HttpConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .gzip(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| FetchError::InvalidRequest {
                url: String::new(),
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self { client })
    }

    /// Issue a request and decode the body as JSON.
    ///
    /// `url` must be absolute. Returns `Ok(None)` for an empty body.
    pub async fn fetch(
        &self,
        url: &str,
        request: FetchRequest,
    ) -> Result<Option<Value>, FetchError> {
        let parsed = reqwest::Url::parse(url).map_err(|e| FetchError::InvalidRequest {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let mut builder = self.client.request(request.method, parsed);
        for (name, value) in request.headers {
            let value = HeaderValue::from_str(&value).map_err(|e| FetchError::InvalidRequest {
                url: url.to_string(),
                message: format!("bad value for header {name}: {e}"),
            })?;
            builder = builder.header(name, value);
        }
        builder = match request.auth {
            Some(Auth::Bearer(token)) => builder.bearer_auth(token),
            Some(Auth::Basic { user, password }) => builder.basic_auth(user, Some(password)),
            None => builder,
        };
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| FetchError::Network {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status_code: status.as_u16(),
                body,
            });
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body)
            .map(Some)
            .map_err(|e| FetchError::ResponseFormat {
                url: url.to_string(),
                message: e.to_string(),
            })
    }

    /// [`fetch`](Self::fetch), then decode into a DTO.
    pub async fn fetch_json<T: DeserializeOwned>(
        &self,
        url: &str,
        request: FetchRequest,
    ) -> Result<Option<T>, FetchError> {
        let Some(value) = self.fetch(url, request).await? else {
            return Ok(None);
        };

        serde_json::from_value(value)
            .map(Some)
            .map_err(|e| FetchError::ResponseFormat {
                url: url.to_string(),
                message: e.to_string(),
            })
    }
}
