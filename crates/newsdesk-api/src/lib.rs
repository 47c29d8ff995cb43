//! NewsDesk API Client
//!
//! Talks to the news-aggregation backend:
//! - `AuthClient`: register, login, logout and session refresh
//! - `RequestGateway`: authenticated calls that expire the session on 401
//! - `NewsApi`: article search, conversational answers and timelines
//!
//! Every call goes through the [`Transport`] trait so tests can script the
//! backend without a network.

mod auth;
mod error;
mod gateway;
mod news;
mod transport;

#[cfg(test)]
mod testing;

pub use auth::AuthClient;
pub use error::ApiError;
pub use gateway::RequestGateway;
pub use news::{
    AskReply, Article, NewsApi, TimelineEvent, TimelineReply, TimelineSource, UNTITLED,
};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method, Transport};

pub type Result<T> = std::result::Result<T, ApiError>;
