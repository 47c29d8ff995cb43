//! Two-tier query with graceful degradation
//!
//! The primary stage is the AI-backed answer; the secondary stage is plain
//! article search. Each runs at most once, strictly one after the other,
//! and the secondary only runs when the primary failed.

use std::future::Future;

use newsdesk_api::{ApiError, Article};

use crate::format::{format_articles, normalize_answer};

/// Shown when the primary stage succeeds without any answer text
pub const NO_ANSWER: &str = "No answer available.";
/// Shown when the secondary stage finds nothing
pub const NO_RESULTS: &str = "No news found for this topic.";
/// Shown when both stages fail
pub const APOLOGY: &str = "Unable to retrieve news at this time.";
/// Articles listed in a degraded answer
pub const MAX_FALLBACK_ITEMS: usize = 5;

/// How the primary stage failed; picks the warning banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryFailure {
    /// The backend answered but refused: non-2xx or an `error` field
    Refused,
    /// No usable response: connection failure or unreadable body
    Unreachable,
}

impl PrimaryFailure {
    fn from_error(error: &ApiError) -> Self {
        if error.is_transport() {
            PrimaryFailure::Unreachable
        } else {
            PrimaryFailure::Refused
        }
    }

    fn banner(self, query: &str) -> String {
        match self {
            PrimaryFailure::Refused => format!(
                "⚠️ I couldn't generate a comprehensive answer about \"{query}\" right now.\n\n\
                 Here are some related news items instead:"
            ),
            PrimaryFailure::Unreachable => format!(
                "⚠️ Sorry, I encountered a technical issue.\n\n\
                 Here are some news items about \"{query}\" instead:"
            ),
        }
    }
}

#[derive(Debug)]
pub enum FallbackOutcome {
    /// Primary stage succeeded; the answer may be missing or empty
    Answered(Option<String>),
    /// Primary failed, secondary found articles
    Degraded {
        failure: PrimaryFailure,
        articles: Vec<Article>,
    },
    /// Primary failed, secondary found nothing
    NoResults { failure: PrimaryFailure },
    /// Both stages failed
    Exhausted {
        failure: PrimaryFailure,
        error: ApiError,
    },
}

impl FallbackOutcome {
    pub fn is_degraded(&self) -> bool {
        !matches!(self, FallbackOutcome::Answered(_))
    }

    /// Display text for this outcome
    pub fn render(&self, query: &str) -> String {
        match self {
            FallbackOutcome::Answered(answer) => {
                let text = answer
                    .as_deref()
                    .filter(|a| !a.is_empty())
                    .unwrap_or(NO_ANSWER);
                normalize_answer(text)
            }
            FallbackOutcome::Degraded { failure, articles } => {
                format!("{}\n\n{}", failure.banner(query), format_articles(articles))
            }
            FallbackOutcome::NoResults { .. } => NO_RESULTS.to_string(),
            FallbackOutcome::Exhausted { .. } => APOLOGY.to_string(),
        }
    }
}

/// Run `primary`, and only if it fails run `secondary`, with the same query.
///
/// Never returns an error: every failure becomes part of the outcome.
pub async fn run_fallback<P, PF, S, SF>(query: &str, primary: P, secondary: S) -> FallbackOutcome
where
    P: FnOnce(String) -> PF,
    PF: Future<Output = newsdesk_api::Result<Option<String>>>,
    S: FnOnce(String) -> SF,
    SF: Future<Output = newsdesk_api::Result<Vec<Article>>>,
{
    let failure = match primary(query.to_string()).await {
        Ok(answer) => return FallbackOutcome::Answered(answer),
        Err(e) => {
            tracing::warn!(query, error = %e, "Primary query failed, falling back to article search");
            PrimaryFailure::from_error(&e)
        }
    };

    match secondary(query.to_string()).await {
        Ok(articles) if articles.is_empty() => FallbackOutcome::NoResults { failure },
        Ok(articles) => {
            tracing::info!(query, count = articles.len(), "Serving degraded answer");
            FallbackOutcome::Degraded { failure, articles }
        }
        Err(error) => {
            tracing::error!(query, error = %error, "Fallback article search failed");
            FallbackOutcome::Exhausted { failure, error }
        }
    }
}
