//! Timeline results as the caller should present them

use newsdesk_api::{TimelineEvent, TimelineReply};

/// Shown instead of calling the backend when no topic was given
pub const EMPTY_TOPIC: &str = "Please enter a topic to generate a timeline";

#[derive(Debug, Clone, PartialEq)]
pub enum TimelineView {
    /// Events in backend order, with the backend's note if it sent one
    Events {
        events: Vec<TimelineEvent>,
        note: Option<String>,
    },
    /// The backend found nothing for the topic
    Empty(String),
    /// The call failed
    Failed(String),
    /// No topic given
    Invalid(String),
}

impl TimelineView {
    pub(crate) fn from_result(topic: &str, result: newsdesk_api::Result<TimelineReply>) -> Self {
        match result {
            Ok(reply) if reply.timeline.is_empty() => TimelineView::Empty(format!(
                "No timeline data found for \"{topic}\". Try a different topic."
            )),
            Ok(reply) => TimelineView::Events {
                events: reply.timeline,
                note: reply.message.filter(|m| !m.trim().is_empty()),
            },
            Err(e) => {
                tracing::warn!(topic, error = %e, "Timeline generation failed");
                TimelineView::Failed(format!("❌ {e}"))
            }
        }
    }

    /// Text to show alongside (or instead of) the events
    pub fn message(&self) -> Option<&str> {
        match self {
            TimelineView::Events { note, .. } => note.as_deref(),
            TimelineView::Empty(message)
            | TimelineView::Failed(message)
            | TimelineView::Invalid(message) => Some(message),
        }
    }

    pub fn events(&self) -> &[TimelineEvent] {
        match self {
            TimelineView::Events { events, .. } => events,
            _ => &[],
        }
    }
}
