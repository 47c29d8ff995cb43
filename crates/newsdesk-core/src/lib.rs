//! NewsDesk Core
//!
//! Composition root for the client: one [`NewsDesk`] owns the session and
//! hands it to every component that needs credentials. Nothing here is a
//! global; build one instance at startup and pass it around.

mod config;
mod desk;
mod error;

pub use config::Config;
pub use desk::NewsDesk;
pub use error::CoreError;

// Re-export core components
pub use newsdesk_api::{
    ApiError, ApiRequest, ApiResponse, Article, AuthClient, HttpTransport, Method, NewsApi,
    RequestGateway, TimelineEvent, TimelineSource, Transport,
};
pub use newsdesk_assistant::{Assistant, FallbackOutcome, NewsBackend, TimelineView};
pub use newsdesk_session::{Session, SessionError, SessionManager, User, UserId};
pub use newsdesk_storage::{Database, KeyValueStore, MemoryStore, StorageError};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
