//! Client state container
//!
//! One session, shared by every component that needs to know who is
//! logged in.

use serde_json::Value;
use std::sync::Arc;

use newsdesk_api::{Article, AuthClient, HttpTransport, Method, NewsApi, RequestGateway, Transport};
use newsdesk_assistant::{Assistant, TimelineView};
use newsdesk_session::{SessionManager, User};
use newsdesk_storage::{Database, KeyValueStore};

use crate::config::Config;
use crate::Result;

pub struct NewsDesk {
    config: Config,
    session: SessionManager,
    auth: AuthClient,
    gateway: RequestGateway,
    news: Arc<NewsApi>,
    assistant: Assistant,
}

impl NewsDesk {
    /// Open the on-disk session store and connect to the configured backend
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;

        let db = Database::open(&config.database_path)?;
        Self::with_store(config, Arc::new(db))
    }

    /// Same as [`new`](Self::new) but persisting into `store`
    pub fn with_store(config: Config, store: Arc<dyn KeyValueStore>) -> Result<Self> {
        config.validate()?;

        let transport = HttpTransport::new(&config.api_base_url, config.request_timeout())?;
        Ok(Self::assemble(config, store, Arc::new(transport)))
    }

    /// Wire the components together over an arbitrary transport
    pub fn assemble(
        config: Config,
        store: Arc<dyn KeyValueStore>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let session = SessionManager::new(store);
        let news = Arc::new(NewsApi::new(Arc::clone(&transport)));

        Self {
            auth: AuthClient::new(Arc::clone(&transport), session.clone()),
            gateway: RequestGateway::new(transport, session.clone()),
            assistant: Assistant::new(news.clone()),
            news,
            session,
            config,
        }
    }

    /// Restore the persisted session, if any. Call once at startup.
    pub fn initialize(&self) -> Result<Option<User>> {
        let user = self.session.restore()?;

        match &user {
            Some(user) => tracing::info!(user = %user.username, "NewsDesk initialized with restored session"),
            None => tracing::info!("NewsDesk initialized without a session"),
        }

        Ok(user)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    pub fn auth(&self) -> &AuthClient {
        &self.auth
    }

    pub fn gateway(&self) -> &RequestGateway {
        &self.gateway
    }

    pub fn news(&self) -> &NewsApi {
        &self.news
    }

    pub fn assistant(&self) -> &Assistant {
        &self.assistant
    }

    // === Account operations ===

    pub async fn register(&self, email: &str, name: &str, password: &str) -> Result<User> {
        Ok(self.auth.register(email, name, password).await?)
    }

    pub async fn login(&self, email: &str, password: &str) -> Result<User> {
        Ok(self.auth.login(email, password).await?)
    }

    pub fn logout(&self) {
        self.auth.logout();
    }

    pub async fn refresh(&self) -> Option<User> {
        self.auth.refresh().await
    }

    pub async fn call(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        Ok(self.gateway.call(method, path, body).await?)
    }

    // === News operations ===

    pub async fn search(&self, query: &str) -> Result<Vec<Article>> {
        Ok(self.news.search(query).await?)
    }

    pub async fn ask(&self, query: &str) -> String {
        self.assistant.ask(query).await
    }

    pub async fn timeline(&self, topic: &str) -> TimelineView {
        self.assistant.timeline(topic).await
    }
}
