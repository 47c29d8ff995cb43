//! NewsDesk Assistant
//!
//! - Conversational answers come from the AI-backed endpoint
//! - When that call fails for any reason, keyword article search stands in,
//!   under a warning banner
//! - Callers always get a display string back, never an error
//! - Timelines have no fallback tier: a failure is reported as-is

mod assistant;
mod fallback;
mod format;
mod timeline;

pub use assistant::{Assistant, NewsBackend, EMPTY_QUERY};
pub use fallback::{
    run_fallback, FallbackOutcome, PrimaryFailure, APOLOGY, MAX_FALLBACK_ITEMS, NO_ANSWER,
    NO_RESULTS,
};
pub use format::{format_articles, normalize_answer};
pub use timeline::{TimelineView, EMPTY_TOPIC};
