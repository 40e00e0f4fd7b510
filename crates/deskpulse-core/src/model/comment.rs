use serde::{Deserialize, Serialize};

use super::sentiment::Sentiment;
use super::user::Role;

/// All persisted fields for a comment.
///
/// `author_role` is a snapshot of the author's role at write time; the
/// incremental aggregator uses it to select qualifying comments without a
/// join back to the user table. `sentiment` is computed once at creation
/// from `content` alone and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommentFields {
    pub comment_id: i64,
    pub ticket_id: i64,
    pub author_id: i64,
    pub author_role: Role,
    pub content: String,
    pub sentiment: Sentiment,
    pub created_at_us: i64,
}
