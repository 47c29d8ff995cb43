//! Authenticated request gateway
//!
//! Attaches the session's bearer token to a call. A 401 answer is the one
//! place a live session is invalidated because the backend rejected it.

use serde_json::Value;
use std::sync::Arc;

use newsdesk_session::SessionManager;

use crate::error::ApiError;
use crate::transport::{ApiRequest, Method, Transport};
use crate::Result;

pub struct RequestGateway {
    transport: Arc<dyn Transport>,
    session: SessionManager,
}

impl RequestGateway {
    pub fn new(transport: Arc<dyn Transport>, session: SessionManager) -> Self {
        Self { transport, session }
    }

    /// Call `path` with the current bearer token and return the response body as-is.
    ///
    /// Fails with [`ApiError::NoSession`] before touching the network when
    /// signed out. On 401 the session is cleared before
    /// [`ApiError::AuthExpired`] is returned, so callers never clear it themselves.
    pub async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let token = self.session.token().ok_or(ApiError::NoSession)?;

        let mut request = ApiRequest::new(method, path).with_bearer(token);
        if let Some(body) = body {
            request = request.with_body(body);
        }
        let path = request.path.clone();

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(path = %path, error = %e, "Authenticated request failed");
            e
        })?;

        if response.status == 401 {
            tracing::warn!(path = %path, "Credentials rejected, clearing session");
            if let Err(e) = self.session.clear() {
                tracing::error!(error = %e, "Failed to erase persisted session");
            }
            return Err(ApiError::AuthExpired);
        }

        if !response.is_success() {
            return Err(ApiError::Request {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| "Request failed".to_string()),
            });
        }

        Ok(response.body)
    }

    pub async fn get(&self, path: &str) -> Result<Value> {
        self.call(Method::GET, path, None).await
    }

    pub async fn post(&self, path: &str, body: Value) -> Result<Value> {
        self.call(Method::POST, path, Some(body)).await
    }
}
