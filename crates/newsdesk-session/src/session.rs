//! Session data structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend user identifier. Numeric in some deployments, a document id string in others.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserId {
    Number(i64),
    Text(String),
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserId::Number(n) => write!(f, "{n}"),
            UserId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
    pub id: UserId,
    #[serde(default, alias = "name")]
    pub username: String,
    #[serde(default)]
    pub email: String,
    /// Server-formatted creation timestamp, kept verbatim
    #[serde(
        rename = "createdAt",
        alias = "created_at",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,
}

/// A user together with the bearer token that authenticates them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: User,
    pub token: String,
}

/// Client authentication state.
///
/// `user` and `token` live in a single `Option` so one can never be set
/// without the other.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub(crate) credentials: Option<Credentials>,
    /// True only while an auth call is in flight
    pub is_loading: bool,
    /// Message of the last failed auth call
    pub error: Option<String>,
}

impl Session {
    pub fn user(&self) -> Option<&User> {
        self.credentials.as_ref().map(|c| &c.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.credentials.as_ref().map(|c| c.token.as_str())
    }

    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
