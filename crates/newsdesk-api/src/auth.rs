//! Authentication client
//!
//! Register/login replace the session wholesale on success; logout clears
//! it locally; refresh revalidates the stored token against the backend.

use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use newsdesk_session::{SessionManager, User};

use crate::error::ApiError;
use crate::transport::{ApiRequest, Transport};
use crate::Result;

#[derive(Debug, Deserialize)]
struct AuthPayload {
    user: User,
    token: String,
}

pub struct AuthClient {
    transport: Arc<dyn Transport>,
    session: SessionManager,
}

impl AuthClient {
    pub fn new(transport: Arc<dyn Transport>, session: SessionManager) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Create an account and sign in as it
    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User> {
        self.session.begin_call();

        let result = async {
            require_fields(&[
                ("Email", email.trim()),
                ("Name", name.trim()),
                ("Password", password),
            ])?;
            let request = ApiRequest::post(
                "/register",
                json!({ "email": email, "name": name, "password": password }),
            );
            self.authenticate(request, "Registration failed").await
        }
        .await;

        self.finish("register", result)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        self.session.begin_call();

        let result = async {
            require_fields(&[("Email", email.trim()), ("Password", password)])?;
            let request =
                ApiRequest::post("/login", json!({ "email": email, "password": password }));
            self.authenticate(request, "Login failed").await
        }
        .await;

        self.finish("login", result)
    }

    /// Forget the current session. Never fails; a storage error while
    /// erasing the persisted copy is logged.
    pub fn logout(&self) {
        if let Err(e) = self.session.clear() {
            tracing::error!(error = %e, "Failed to erase persisted session");
        }
        tracing::info!("Logged out");
    }

    /// Revalidate the stored token and pick up the latest user record.
    ///
    /// Returns `None` without a request when signed out. A 401 ends the
    /// session; any other failure leaves it as it was. If the session was
    /// cleared or replaced while the request was in flight, the current
    /// session user is returned instead of the fetched one.
    pub async fn refresh(&self) -> Option<User> {
        let token = self.session.token()?;

        self.session.begin_call();
        let result = self.fetch_current_user(&token).await;

        match result {
            Ok(user) => {
                self.session.end_call(None);
                user
            }
            Err(ApiError::AuthExpired) => {
                tracing::warn!("Stored token rejected, logging out");
                self.logout();
                self.session
                    .end_call(Some(ApiError::AuthExpired.to_string()));
                None
            }
            Err(e) => {
                tracing::warn!(error = %e, "Could not refresh current user");
                self.session.end_call(Some(e.to_string()));
                None
            }
        }
    }

    async fn fetch_current_user(&self, token: &str) -> Result<Option<User>> {
        let response = self
            .transport
            .send(ApiRequest::get("/user").with_bearer(token))
            .await?;

        if response.status == 401 {
            return Err(ApiError::AuthExpired);
        }
        if !response.is_success() {
            return Err(ApiError::Request {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| "Failed to get user".to_string()),
            });
        }

        let user: User = serde_json::from_value(response.body)?;
        if !self.session.update_user(token, user.clone())? {
            tracing::debug!("Session replaced during refresh, keeping newer state");
            return Ok(self.session.user());
        }

        Ok(Some(user))
    }

    async fn authenticate(&self, request: ApiRequest, fallback: &str) -> Result<User> {
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(ApiError::Auth {
                status: response.status,
                message: response
                    .error_message()
                    .unwrap_or_else(|| fallback.to_string()),
            });
        }

        let AuthPayload { user, token } = serde_json::from_value(response.body)?;
        self.session.set(user.clone(), token)?;

        tracing::info!(user_id = %user.id, "Authenticated");
        Ok(user)
    }

    fn finish<T>(&self, operation: &str, result: Result<T>) -> Result<T> {
        match &result {
            Ok(_) => self.session.end_call(None),
            Err(e) => {
                tracing::warn!(operation, error = %e, "Authentication failed");
                self.session.end_call(Some(e.to_string()));
            }
        }
        result
    }
}

/// Callers trim identity fields first; passwords are checked verbatim so a
/// whitespace password still reaches the backend.
fn require_fields(fields: &[(&str, &str)]) -> Result<()> {
    for (name, value) in fields {
        if value.is_empty() {
            return Err(ApiError::Validation(format!("{name} is required")));
        }
    }
    Ok(())
}
