//! Conversational assistant and timeline generator

use async_trait::async_trait;
use std::sync::Arc;

use newsdesk_api::{Article, NewsApi, TimelineReply};

use crate::fallback::{run_fallback, FallbackOutcome};
use crate::timeline::{TimelineView, EMPTY_TOPIC};

/// Shown instead of calling the backend when the question is blank
pub const EMPTY_QUERY: &str = "Please enter some text.";

/// The raw backend queries the assistant is built on
#[async_trait]
pub trait NewsBackend: Send + Sync {
    /// AI-backed answer; `Ok(None)` when the backend sent no answer text
    async fn ask(&self, query: &str) -> newsdesk_api::Result<Option<String>>;

    async fn search(&self, query: &str) -> newsdesk_api::Result<Vec<Article>>;

    async fn timeline(&self, topic: &str) -> newsdesk_api::Result<TimelineReply>;
}

#[async_trait]
impl NewsBackend for NewsApi {
    async fn ask(&self, query: &str) -> newsdesk_api::Result<Option<String>> {
        Ok(NewsApi::ask(self, query).await?.answer)
    }

    async fn search(&self, query: &str) -> newsdesk_api::Result<Vec<Article>> {
        NewsApi::search(self, query).await
    }

    async fn timeline(&self, topic: &str) -> newsdesk_api::Result<TimelineReply> {
        NewsApi::timeline(self, topic).await
    }
}

pub struct Assistant {
    backend: Arc<dyn NewsBackend>,
}

impl Assistant {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self { backend }
    }

    /// Answer a question, degrading to an article list if the AI call fails
    pub async fn ask(&self, query: &str) -> String {
        let query = query.trim();
        if query.is_empty() {
            return EMPTY_QUERY.to_string();
        }

        self.ask_detailed(query).await.render(query)
    }

    /// Same as [`ask`](Self::ask) but returns the outcome unrendered
    pub async fn ask_detailed(&self, query: &str) -> FallbackOutcome {
        let backend = &self.backend;
        run_fallback(
            query,
            |q| async move { backend.ask(&q).await },
            |q| async move { backend.search(&q).await },
        )
        .await
    }

    /// Generate a timeline for `topic`. There is no fallback tier here.
    pub async fn timeline(&self, topic: &str) -> TimelineView {
        let topic = topic.trim();
        if topic.is_empty() {
            return TimelineView::Invalid(EMPTY_TOPIC.to_string());
        }

        let result = self.backend.timeline(topic).await;
        TimelineView::from_result(topic, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use newsdesk_api::{ApiError, TimelineEvent};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Backend with fixed replies that counts every call
    #[derive(Default)]
    struct FakeBackend {
        answer: Option<newsdesk_api::Result<Option<String>>>,
        articles: Option<newsdesk_api::Result<Vec<Article>>>,
        timeline: Option<newsdesk_api::Result<TimelineReply>>,
        ask_calls: AtomicUsize,
        search_calls: AtomicUsize,
        timeline_calls: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    fn take<T>(slot: &Option<newsdesk_api::Result<T>>) -> newsdesk_api::Result<T>
    where
        T: Clone,
    {
        match slot {
            Some(Ok(value)) => Ok(value.clone()),
            Some(Err(e)) => Err(ApiError::Network(e.to_string())),
            None => Err(ApiError::Network("not scripted".to_string())),
        }
    }

    #[async_trait]
    impl NewsBackend for FakeBackend {
        async fn ask(&self, query: &str) -> newsdesk_api::Result<Option<String>> {
            self.ask_calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            match &self.answer {
                Some(Err(ApiError::Backend(m))) => Err(ApiError::Backend(m.clone())),
                other => take(other),
            }
        }

        async fn search(&self, query: &str) -> newsdesk_api::Result<Vec<Article>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            self.queries.lock().unwrap().push(query.to_string());
            take(&self.articles)
        }

        async fn timeline(&self, _topic: &str) -> newsdesk_api::Result<TimelineReply> {
            self.timeline_calls.fetch_add(1, Ordering::SeqCst);
            take(&self.timeline)
        }
    }

    fn articles(n: usize) -> Vec<Article> {
        (1..=n)
            .map(|i| Article {
                title: format!("Story {i}"),
                description: None,
                url: format!("https://news.example/{i}"),
                image: None,
                published_at: None,
            })
            .collect()
    }

    #[tokio::test]
    async fn test_answer_without_fallback() {
        let backend = Arc::new(FakeBackend {
            answer: Some(Ok(Some("**Key points** 1. One 2. Two".to_string()))),
            articles: Some(Ok(articles(3))),
            ..Default::default()
        });
        let assistant = Assistant::new(backend.clone());

        let text = assistant.ask("  ai  ").await;

        assert_eq!(text, "Key points\n\n1. One\n\n2. Two");
        assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 0);
        assert_eq!(*backend.queries.lock().unwrap(), vec!["ai".to_string()]);
    }

    #[tokio::test]
    async fn test_backend_error_falls_back_once() {
        let backend = Arc::new(FakeBackend {
            answer: Some(Err(ApiError::Backend("model timeout".to_string()))),
            articles: Some(Ok(articles(7))),
            ..Default::default()
        });
        let assistant = Assistant::new(backend.clone());

        let text = assistant.ask("ai").await;

        assert!(text.starts_with("⚠️"));
        assert_eq!(text.matches("• ").count(), 5);
        assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            *backend.queries.lock().unwrap(),
            vec!["ai".to_string(), "ai".to_string()]
        );
    }

    #[tokio::test]
    async fn test_both_stages_fail() {
        let backend = Arc::new(FakeBackend::default());
        let assistant = Assistant::new(backend.clone());

        assert_eq!(assistant.ask("ai").await, crate::APOLOGY);
        assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_blank_query_makes_no_calls() {
        let backend = Arc::new(FakeBackend::default());
        let assistant = Assistant::new(backend.clone());

        assert_eq!(assistant.ask("   ").await, EMPTY_QUERY);
        assert_eq!(backend.ask_calls.load(Ordering::SeqCst), 0);
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_empty_timeline_has_no_fallback() {
        let backend = Arc::new(FakeBackend {
            timeline: Some(Ok(TimelineReply::default())),
            articles: Some(Ok(articles(3))),
            ..Default::default()
        });
        let assistant = Assistant::new(backend.clone());

        let view = assistant.timeline("xyz").await;

        assert!(matches!(view, TimelineView::Empty(_)));
        assert!(view
            .message()
            .unwrap()
            .contains("No timeline data found for \"xyz\""));
        assert_eq!(backend.timeline_calls.load(Ordering::SeqCst), 1);
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_failed_timeline_has_no_fallback() {
        let backend = Arc::new(FakeBackend {
            articles: Some(Ok(articles(3))),
            ..Default::default()
        });
        let assistant = Assistant::new(backend.clone());

        let view = assistant.timeline("xyz").await;

        assert!(matches!(view, TimelineView::Failed(_)));
        assert_eq!(backend.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_timeline_events_and_blank_topic() {
        let backend = Arc::new(FakeBackend {
            timeline: Some(Ok(TimelineReply {
                timeline: vec![TimelineEvent {
                    date: "2024-03-01".to_string(),
                    summary: "Draft published".to_string(),
                    sources: Vec::new(),
                }],
                message: None,
            })),
            ..Default::default()
        });
        let assistant = Assistant::new(backend.clone());

        assert_eq!(
            assistant.timeline(" ").await,
            TimelineView::Invalid(EMPTY_TOPIC.to_string())
        );
        assert_eq!(backend.timeline_calls.load(Ordering::SeqCst), 0);

        let view = assistant.timeline("AI Regulation").await;
        assert_eq!(view.events()[0].summary, "Draft published");
        assert_eq!(view.message(), None);
    }
}
