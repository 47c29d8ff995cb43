//! Scripted transport for unit tests

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;

use crate::error::ApiError;
use crate::transport::{ApiRequest, ApiResponse, Transport};
use crate::Result;

enum Reply {
    Response(ApiResponse),
    NetworkFailure(String),
}

/// Replays queued replies in order and records every request it receives
#[derive(Clone, Default)]
pub(crate) struct ScriptedTransport {
    replies: Arc<Mutex<VecDeque<Reply>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl ScriptedTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: Value) -> &Self {
        self.replies
            .lock()
            .push_back(Reply::Response(ApiResponse::new(status, body)));
        self
    }

    pub(crate) fn fail(&self, reason: &str) -> &Self {
        self.replies
            .lock()
            .push_back(Reply::NetworkFailure(reason.to_string()));
        self
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().clone()
    }

    pub(crate) fn call_count(&self) -> usize {
        self.requests.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().push(request);
        match self.replies.lock().pop_front() {
            Some(Reply::Response(response)) => Ok(response),
            Some(Reply::NetworkFailure(reason)) => Err(ApiError::Network(reason)),
            None => Err(ApiError::Network("no scripted reply".to_string())),
        }
    }
}
