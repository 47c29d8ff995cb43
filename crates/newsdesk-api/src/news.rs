//! Unauthenticated news endpoints: keyword search, the conversational
//! assistant and timeline generation.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::Result;

/// Title shown for articles the backend sent without one
pub const UNTITLED: &str = "No Title";

/// Search result. Any field may arrive as `null` from upstream feeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    #[serde(default = "untitled", deserialize_with = "title_or_untitled")]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub published_at: Option<String>,
}

fn untitled() -> String {
    UNTITLED.to_string()
}

fn title_or_untitled<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let title = Option::<String>::deserialize(deserializer)?;
    Ok(title.filter(|t| !t.trim().is_empty()).unwrap_or_else(untitled))
}

fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a successful `/ask_newsbot` call
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AskReply {
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineSource {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEvent {
    #[serde(default, deserialize_with = "null_as_default")]
    pub date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub summary: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<TimelineSource>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TimelineReply {
    #[serde(default, deserialize_with = "null_as_default")]
    pub timeline: Vec<TimelineEvent>,
    /// Optional note from the backend, e.g. that results were trimmed
    #[serde(default)]
    pub message: Option<String>,
}

pub struct NewsApi {
    transport: Arc<dyn Transport>,
}

impl NewsApi {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Keyword article search. An empty query returns top headlines.
    pub async fn search(&self, query: &str) -> Result<Vec<Article>> {
        let request = ApiRequest::get("/get_news").with_query("query", query.trim());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            return Err(request_error(&response, "Failed to fetch news"));
        }

        Ok(serde_json::from_value(response.body)?)
    }

    /// Ask the AI-backed assistant.
    ///
    /// A 2xx response still counts as a failure when its body carries an
    /// `error` field. A failed response with an unreadable body is reported
    /// as [`ApiError::Decode`], like any other unusable reply.
    pub async fn ask(&self, query: &str) -> Result<AskReply> {
        let request = ApiRequest::post("/ask_newsbot", json!({ "query": query }));
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            if !response.has_json_body() {
                return Err(ApiError::Decode(serde::de::Error::custom(format!(
                    "status {} without a JSON body",
                    response.status
                ))));
            }
            return Err(request_error(&response, "Failed to get an answer"));
        }
        if response.has_error_field() {
            return Err(ApiError::Backend(
                response
                    .error_message()
                    .unwrap_or_else(|| "The assistant reported an error".to_string()),
            ));
        }

        Ok(serde_json::from_value(response.body)?)
    }

    pub async fn timeline(&self, topic: &str) -> Result<TimelineReply> {
        let request = ApiRequest::get("/generate_timeline").with_query("topic", topic.trim());
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let message = response
                .field_str("message")
                .or_else(|| response.field_str("error"))
                .unwrap_or_else(|| "Failed to generate timeline".to_string());
            return Err(ApiError::Request {
                status: response.status,
                message,
            });
        }

        Ok(serde_json::from_value(response.body)?)
    }
}

fn request_error(response: &ApiResponse, fallback: &str) -> ApiError {
    ApiError::Request {
        status: response.status,
        message: response
            .error_message()
            .unwrap_or_else(|| fallback.to_string()),
    }
}
