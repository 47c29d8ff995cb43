//! NewsDesk Session Management
//!
//! - A Session is "who is logged in": a user record paired with its bearer token
//! - The user and token are always present together or absent together
//! - Every change to the credentials is mirrored to durable storage before
//!   it becomes visible in memory
//! - Observers subscribe to state changes instead of polling

mod error;
mod manager;
mod session;

pub use error::SessionError;
pub use manager::{SessionManager, TOKEN_KEY, USER_KEY};
pub use session::{Credentials, Session, User, UserId};

pub type Result<T> = std::result::Result<T, SessionError>;
