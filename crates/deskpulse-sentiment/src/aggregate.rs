//! Ticket-level sentiment aggregation.
//!
//! Two modes over a ticket's description and comment history:
//!
//! - **Incremental** (new-comment trigger): score/confidence are the mean of
//!   the stored per-comment values of *qualifying* comments (those authored
//!   by `user`-role callers); staff responses never dilute the customer
//!   signal. Keywords are always refreshed by one scorer pass over the full
//!   qualifying corpus, so the keyword list tracks the freshest read even
//!   while score/confidence track the averaged history.
//! - **Full re-analysis** (explicit): one scorer pass over description plus
//!   every comment regardless of author role, replacing the rollup
//!   wholesale.
//!
//! Both modes are idempotent for an unchanged corpus, and total: scoring
//! failures inside either mode degrade to the neutral fallback.

use chrono::Utc;

use deskpulse_core::model::comment::CommentFields;
use deskpulse_core::model::sentiment::{Sentiment, SentimentClass};
use deskpulse_core::model::user::Role;

use crate::score::Scorer;

/// The per-comment inputs aggregation needs: the stored role snapshot, the
/// body for keyword refresh, and the write-once sentiment values.
#[derive(Debug, Clone, PartialEq)]
pub struct CommentSignal {
    pub author_role: Role,
    pub content: String,
    pub score: SentimentClass,
    pub confidence: f64,
}

impl From<&CommentFields> for CommentSignal {
    fn from(comment: &CommentFields) -> Self {
        Self {
            author_role: comment.author_role,
            content: comment.content.clone(),
            score: comment.sentiment.score,
            confidence: comment.sentiment.confidence,
        }
    }
}

/// Incremental rollup after a new comment landed.
///
/// `trigger` is the sentiment of the event that caused this aggregation:
/// the new comment's own record, or the description's record when a ticket
/// is created. It is adopted (with a fresh timestamp) when no qualifying
/// comment exists yet.
#[must_use]
pub fn aggregate_incremental(
    scorer: &Scorer,
    description: &str,
    comments: &[CommentSignal],
    trigger: &Sentiment,
) -> Sentiment {
    let qualifying: Vec<&CommentSignal> = comments
        .iter()
        .filter(|c| c.author_role == Role::User)
        .collect();

    if qualifying.is_empty() {
        return trigger.at(Utc::now());
    }

    #[allow(clippy::cast_precision_loss)]
    let count = qualifying.len() as f64;
    let score_mean = qualifying
        .iter()
        .map(|c| f64::from(c.score.value()))
        .sum::<f64>()
        / count;
    let confidence_mean = qualifying.iter().map(|c| c.confidence).sum::<f64>() / count;

    let corpus = join_corpus(description, qualifying.iter().map(|c| c.content.as_str()));

    Sentiment {
        score: SentimentClass::from_mean(score_mean),
        confidence: confidence_mean.clamp(0.0, 1.0),
        keywords: scorer.score_or_neutral(&corpus).keywords,
        computed_at: Utc::now(),
    }
}

/// Explicit full re-analysis: one scoring pass over the whole corpus,
/// every comment included regardless of author role.
#[must_use]
pub fn aggregate_full(scorer: &Scorer, description: &str, comments: &[CommentSignal]) -> Sentiment {
    let corpus = join_corpus(description, comments.iter().map(|c| c.content.as_str()));
    scorer.score_or_neutral(&corpus)
}

fn join_corpus<'a>(description: &str, bodies: impl Iterator<Item = &'a str>) -> String {
    let mut corpus = description.to_string();
    for body in bodies {
        corpus.push(' ');
        corpus.push_str(body);
    }
    corpus
}
