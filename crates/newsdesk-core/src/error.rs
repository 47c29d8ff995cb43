//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(#[from] newsdesk_storage::StorageError),

    #[error("Session error: {0}")]
    Session(#[from] newsdesk_session::SessionError),

    #[error(transparent)]
    Api(#[from] newsdesk_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(String),
}
