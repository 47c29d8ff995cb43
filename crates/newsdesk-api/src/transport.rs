//! HTTP transport
//!
//! [`Transport`] is the seam between the client logic and the network.
//! [`HttpTransport`] is the reqwest-backed implementation used in production.

use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

use crate::error::ApiError;
use crate::Result;

pub use reqwest::Method;

/// A backend call, relative to the configured base URL
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Absolute path, always starting with `/`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: &str) -> Self {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        Self {
            method,
            path,
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn get(path: &str) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: &str, body: Value) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query.push((key.to_string(), value.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }
}

/// Status and decoded body of a completed call.
///
/// Bodies that are not JSON are kept as a JSON string; an empty body is `Null`.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Non-empty string value of a top-level body field
    pub fn field_str(&self, field: &str) -> Option<String> {
        self.body
            .get(field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
    }

    /// Server-provided failure message: `error`, then `message`
    pub fn error_message(&self) -> Option<String> {
        self.field_str("error").or_else(|| self.field_str("message"))
    }

    /// False when the server sent an empty or non-JSON body
    pub fn has_json_body(&self) -> bool {
        !matches!(self.body, Value::Null | Value::String(_))
    }

    /// Whether the body carries a set `error` field
    pub fn has_error_field(&self) -> bool {
        match self.body.get("error") {
            None | Some(Value::Null) | Some(Value::Bool(false)) => false,
            Some(Value::String(s)) => !s.is_empty(),
            Some(_) => true,
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one call. Errors only on transport failure; any HTTP status,
    /// including 4xx and 5xx, comes back as an [`ApiResponse`].
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

pub struct HttpTransport {
    http: reqwest::Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self> {
        let parsed =
            url::Url::parse(base_url).map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(ApiError::InvalidUrl(format!(
                "{base_url}: only http(s) is supported"
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent("NewsDesk");
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = format!("{}{}", self.base_url, request.path);

        let mut rb = self
            .http
            .request(request.method.clone(), &url)
            .header(reqwest::header::ACCEPT, "application/json");
        if !request.query.is_empty() {
            rb = rb.query(&request.query);
        }
        if let Some(token) = &request.bearer {
            rb = rb.bearer_auth(token);
        }
        if let Some(body) = &request.body {
            rb = rb.json(body);
        }

        let response = rb.send().await.map_err(|e| {
            tracing::warn!(method = %request.method, path = %request.path, error = %e, "Request failed");
            ApiError::Network(e.to_string())
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            serde_json::from_str(&text).unwrap_or_else(|_| Value::String(text))
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status,
            "Request completed"
        );

        Ok(ApiResponse { status, body })
    }
}
