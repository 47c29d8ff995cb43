//! Session Manager
//!
//! Owns the in-memory session and keeps the persisted mirror in step with it.
//! Credentials are written to storage before they are published, and cleared
//! from memory before storage is erased.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use newsdesk_storage::KeyValueStore;

use crate::error::SessionError;
use crate::session::{Credentials, Session, User};
use crate::Result;

/// Persisted key holding the JSON user record
pub const USER_KEY: &str = "user";
/// Persisted key holding the bearer token
pub const TOKEN_KEY: &str = "token";

pub struct SessionManager {
    /// Current session; receivers are notified on change
    state: Arc<watch::Sender<Session>>,
    /// Durable mirror of the credentials
    store: Arc<dyn KeyValueStore>,
    /// Serializes persist-then-publish sequences
    write_lock: Arc<Mutex<()>>,
}

impl SessionManager {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (state, _) = watch::channel(Session::default());

        Self {
            state: Arc::new(state),
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Load persisted credentials into memory.
    ///
    /// A half-present or unreadable record is treated as corrupt and erased.
    pub fn restore(&self) -> Result<Option<User>> {
        let _guard = self.write_lock.lock();

        let user_json = self.store.get(USER_KEY)?;
        let token = self.store.get(TOKEN_KEY)?;

        match (user_json, token) {
            (None, None) => {
                tracing::debug!("No persisted session");
                Ok(None)
            }
            (Some(user_json), Some(token)) if !token.is_empty() => {
                match serde_json::from_str::<User>(&user_json) {
                    Ok(user) => {
                        self.state.send_modify(|session| {
                            session.credentials = Some(Credentials {
                                user: user.clone(),
                                token,
                            });
                        });

                        tracing::info!(user_id = %user.id, "Restored session");
                        Ok(Some(user))
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "Persisted user record is unreadable, clearing");
                        self.clear_locked()?;
                        Ok(None)
                    }
                }
            }
            (user_json, token) => {
                tracing::warn!(
                    has_user = user_json.is_some(),
                    has_token = token.as_deref().is_some_and(|t| !t.is_empty()),
                    "Persisted session is incomplete, clearing"
                );
                self.clear_locked()?;
                Ok(None)
            }
        }
    }

    /// Replace the current credentials.
    ///
    /// Both keys are persisted in one write before memory changes; on a
    /// storage failure the previous session stays in place.
    pub fn set(&self, user: User, token: String) -> Result<()> {
        if token.is_empty() {
            return Err(SessionError::EmptyToken);
        }

        let user_json = serde_json::to_string(&user)?;

        let _guard = self.write_lock.lock();
        self.store
            .put_all(&[(USER_KEY, user_json.as_str()), (TOKEN_KEY, token.as_str())])?;

        tracing::info!(user_id = %user.id, "Session established");

        self.state.send_modify(|session| {
            session.credentials = Some(Credentials { user, token });
        });

        Ok(())
    }

    /// Drop the current credentials. Safe to call when already signed out.
    ///
    /// Memory is cleared even when erasing the persisted copy fails.
    pub fn clear(&self) -> Result<()> {
        let _guard = self.write_lock.lock();
        self.clear_locked()
    }

    fn clear_locked(&self) -> Result<()> {
        let was_authenticated = self
            .state
            .send_if_modified(|session| session.credentials.take().is_some());

        if was_authenticated {
            tracing::info!("Session cleared");
        }

        self.store.delete_all(&[USER_KEY, TOKEN_KEY])?;
        Ok(())
    }

    /// Replace the user record while `token` is still the active credential.
    ///
    /// Returns false (and changes nothing) if the session was cleared or
    /// replaced since `token` was read.
    pub fn update_user(&self, token: &str, user: User) -> Result<bool> {
        let user_json = serde_json::to_string(&user)?;

        let _guard = self.write_lock.lock();
        if self.state.borrow().token() != Some(token) {
            tracing::debug!("Session changed underneath user update, skipping");
            return Ok(false);
        }

        self.store.put(USER_KEY, &user_json)?;
        self.state.send_modify(|session| {
            if let Some(credentials) = session.credentials.as_mut() {
                credentials.user = user;
            }
        });

        Ok(true)
    }

    /// Mark the start of an auth call: loading on, previous error cleared
    pub fn begin_call(&self) {
        self.state.send_modify(|session| {
            session.is_loading = true;
            session.error = None;
        });
    }

    /// Mark the end of an auth call, recording its failure message if any
    pub fn end_call(&self, error: Option<String>) {
        self.state.send_modify(|session| {
            session.is_loading = false;
            session.error = error;
        });
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().is_authenticated()
    }

    pub fn user(&self) -> Option<User> {
        self.state.borrow().user().cloned()
    }

    pub fn token(&self) -> Option<String> {
        self.state.borrow().token().map(str::to_string)
    }

    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Receive every subsequent session change
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }
}

impl Clone for SessionManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            store: Arc::clone(&self.store),
            write_lock: Arc::clone(&self.write_lock),
        }
    }
}
