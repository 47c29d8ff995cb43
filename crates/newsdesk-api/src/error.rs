//! API error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// Required input missing; raised before any request is sent
    #[error("{0}")]
    Validation(String),

    #[error("Network error: {0}")]
    Network(String),

    /// Login or registration rejected by the backend
    #[error("{message}")]
    Auth { status: u16, message: String },

    /// Non-2xx response to any other call
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The backend rejected the bearer token; the session has been cleared
    #[error("Session expired, please log in again")]
    AuthExpired,

    #[error("No authentication token")]
    NoSession,

    /// 2xx response carrying an explicit `error` field
    #[error("{0}")]
    Backend(String),

    #[error("Unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Session error: {0}")]
    Session(#[from] newsdesk_session::SessionError),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Auth { status, .. } | ApiError::Request { status, .. } => Some(*status),
            ApiError::AuthExpired => Some(401),
            _ => None,
        }
    }

    /// True when no usable response arrived at all
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Network(_) | ApiError::Decode(_))
    }
}
