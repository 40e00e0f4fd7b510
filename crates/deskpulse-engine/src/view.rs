//! Serializable read models returned across the engine boundary.
//!
//! Views carry resolved display names next to the raw ids so API layers
//! never need a second lookup. Timestamps are surfaced as UTC datetimes.

use chrono::{DateTime, Utc};
use serde::Serialize;

use deskpulse_core::clock::us_to_datetime;
use deskpulse_core::model::comment::CommentFields;
use deskpulse_core::model::sentiment::Sentiment;
use deskpulse_core::model::ticket::{Department, Priority, Status, TicketFields};
use deskpulse_core::model::user::{Role, UserFields};

/// Minimal display reference to a user embedded in other views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartyRef {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<&UserFields> for PartyRef {
    fn from(user: &UserFields) -> Self {
        Self {
            id: user.user_id,
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// A single comment with its write-once sentiment.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    pub id: i64,
    pub ticket_id: i64,
    pub author_id: i64,
    pub author_role: Role,
    pub content: String,
    pub sentiment: Sentiment,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<PartyRef>,
}

impl CommentView {
    pub(crate) fn from_fields(comment: CommentFields, author: Option<PartyRef>) -> Self {
        Self {
            id: comment.comment_id,
            ticket_id: comment.ticket_id,
            author_id: comment.author_id,
            author_role: comment.author_role,
            content: comment.content,
            sentiment: comment.sentiment,
            created_at: us_to_datetime(comment.created_at_us),
            author,
        }
    }
}

/// A ticket with owner/assignee references, rollup sentiment, and its
/// comment thread oldest-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketView {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub department: Department,
    pub owner_id: i64,
    pub assigned_to: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner: Option<PartyRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assignee: Option<PartyRef>,
    /// Rollup sentiment; `None` only before the first computation.
    pub overall_sentiment: Option<Sentiment>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub comments: Vec<CommentView>,
}

impl TicketView {
    pub(crate) fn from_parts(
        ticket: TicketFields,
        owner: Option<PartyRef>,
        assignee: Option<PartyRef>,
        comments: Vec<CommentView>,
    ) -> Self {
        Self {
            id: ticket.ticket_id,
            title: ticket.title,
            description: ticket.description,
            status: ticket.status,
            priority: ticket.priority,
            department: ticket.department,
            owner_id: ticket.owner_id,
            assigned_to: ticket.assignee_id,
            owner,
            assignee,
            overall_sentiment: ticket.sentiment,
            created_at: us_to_datetime(ticket.created_at_us),
            updated_at: us_to_datetime(ticket.updated_at_us),
            comments,
        }
    }
}

/// Result of posting a comment: the comment record plus the refreshed
/// ticket rollup it triggered.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentPosted {
    pub comment: CommentView,
    pub overall_sentiment: Sentiment,
}

/// A user record without internal timestamps in raw microseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserFields> for UserView {
    fn from(user: UserFields) -> Self {
        Self {
            id: user.user_id,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            role: user.role,
            created_at: us_to_datetime(user.created_at_us),
            updated_at: us_to_datetime(user.updated_at_us),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CommentView, PartyRef, TicketView};
    use chrono::Utc;
    use deskpulse_core::model::comment::CommentFields;
    use deskpulse_core::model::sentiment::Sentiment;
    use deskpulse_core::model::ticket::{Department, Priority, Status, TicketFields};
    use deskpulse_core::model::user::Role;

    #[test]
    fn ticket_view_serializes_camel_case() {
        let ticket = TicketFields {
            ticket_id: 1,
            title: "Printer is down".to_string(),
            description: "No jobs go through".to_string(),
            status: Status::New,
            priority: Priority::default(),
            department: Department::It,
            owner_id: 7,
            assignee_id: None,
            sentiment: None,
            created_at_us: 0,
            updated_at_us: 0,
        };
        let owner = PartyRef {
            id: 7,
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
        };

        let view = TicketView::from_parts(ticket, Some(owner), None, Vec::new());
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["ownerId"], 7);
        assert_eq!(json["owner"]["firstName"], "Ada");
        assert_eq!(json["overallSentiment"], serde_json::Value::Null);
        assert!(json.get("assignee").is_none());
        assert_eq!(json["status"], "new");
    }

    #[test]
    fn comment_view_serializes_sentiment_class_as_integer() {
        let comment = CommentFields {
            comment_id: 4,
            ticket_id: 1,
            author_id: 7,
            author_role: Role::User,
            content: "still broken".to_string(),
            sentiment: Sentiment::neutral(Utc::now()),
            created_at_us: 0,
        };

        let view = CommentView::from_fields(comment, None);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["sentiment"]["score"], 3);
        assert_eq!(json["authorRole"], "user");
    }
}
