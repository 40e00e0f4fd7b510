//! Typed query helpers for the deskpulse store.
//!
//! All functions take a shared `&Connection` reference and return
//! `rusqlite::Result<T>` with model structs (never raw rows). Callers that
//! need transactional grouping pass the transaction's connection.

use rusqlite::types::{Type, Value};
use rusqlite::{Connection, OptionalExtension, Row, params, params_from_iter};
use std::str::FromStr;

use crate::clock::{datetime_to_us, us_to_datetime};
use crate::model::comment::CommentFields;
use crate::model::sentiment::{Sentiment, SentimentClass};
use crate::model::ticket::{Department, Priority, Status, TicketFields, TicketPatch};
use crate::model::user::{Role, UserFields, UserPatch};

// ---------------------------------------------------------------------------
// Row mapping
// ---------------------------------------------------------------------------

fn text_conversion_error(
    index: usize,
    error: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(error))
}

fn keywords_from_json(index: usize, raw: &str) -> rusqlite::Result<Vec<String>> {
    serde_json::from_str(raw).map_err(|e| text_conversion_error(index, e))
}

fn keywords_to_json(keywords: &[String]) -> rusqlite::Result<String> {
    serde_json::to_string(keywords)
        .map_err(|e| rusqlite::Error::ToSqlConversionFailure(Box::new(e)))
}

/// Assemble an optional sentiment record from four adjacent nullable
/// columns. All four are written together, so a present score implies the
/// rest are present.
fn sentiment_from_row(row: &Row<'_>, first_index: usize) -> rusqlite::Result<Option<Sentiment>> {
    let score: Option<u8> = row.get(first_index)?;
    let Some(score) = score else {
        return Ok(None);
    };

    let score =
        SentimentClass::try_from(score).map_err(|e| text_conversion_error(first_index, e))?;
    let confidence: f64 = row.get(first_index + 1)?;
    let raw_keywords: String = row.get(first_index + 2)?;
    let keywords = keywords_from_json(first_index + 2, &raw_keywords)?;
    let computed_at_us: i64 = row.get(first_index + 3)?;

    Ok(Some(Sentiment {
        score,
        confidence,
        keywords,
        computed_at: us_to_datetime(computed_at_us),
    }))
}

fn ticket_from_row(row: &Row<'_>) -> rusqlite::Result<TicketFields> {
    let status: String = row.get(3)?;
    let priority: u8 = row.get(4)?;
    let department: String = row.get(5)?;

    Ok(TicketFields {
        ticket_id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: Status::from_str(&status).map_err(|e| text_conversion_error(3, e))?,
        priority: Priority::try_from(priority).map_err(|e| text_conversion_error(4, e))?,
        department: Department::from_str(&department).map_err(|e| text_conversion_error(5, e))?,
        owner_id: row.get(6)?,
        assignee_id: row.get(7)?,
        sentiment: sentiment_from_row(row, 8)?,
        created_at_us: row.get(12)?,
        updated_at_us: row.get(13)?,
    })
}

fn comment_from_row(row: &Row<'_>) -> rusqlite::Result<CommentFields> {
    let author_role: String = row.get(3)?;
    let sentiment = sentiment_from_row(row, 5)?.ok_or_else(|| {
        rusqlite::Error::IntegralValueOutOfRange(5, 0) // non-null column, cannot happen
    })?;

    Ok(CommentFields {
        comment_id: row.get(0)?,
        ticket_id: row.get(1)?,
        author_id: row.get(2)?,
        author_role: Role::from_str(&author_role).map_err(|e| text_conversion_error(3, e))?,
        content: row.get(4)?,
        sentiment,
        created_at_us: row.get(9)?,
    })
}

fn user_from_row(row: &Row<'_>) -> rusqlite::Result<UserFields> {
    let role: String = row.get(4)?;
    Ok(UserFields {
        user_id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        role: Role::from_str(&role).map_err(|e| text_conversion_error(4, e))?,
        created_at_us: row.get(5)?,
        updated_at_us: row.get(6)?,
    })
}

const TICKET_COLUMNS: &str = "ticket_id, title, description, status, priority, department, \
     owner_id, assignee_id, sentiment_score, sentiment_confidence, sentiment_keywords, \
     sentiment_computed_at_us, created_at_us, updated_at_us";

const COMMENT_COLUMNS: &str = "comment_id, ticket_id, author_id, author_role, content, \
     sentiment_score, sentiment_confidence, sentiment_keywords, sentiment_computed_at_us, \
     created_at_us";

const USER_COLUMNS: &str =
    "user_id, first_name, last_name, email, role, created_at_us, updated_at_us";

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

/// Insert a user record and return its id.
pub fn insert_user(
    conn: &Connection,
    first_name: &str,
    last_name: &str,
    email: &str,
    role: Role,
    now_us: i64,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO users (first_name, last_name, email, role, created_at_us, updated_at_us)
         VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
        params![first_name, last_name, email, role.to_string(), now_us],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a user by id.
pub fn get_user(conn: &Connection, user_id: i64) -> rusqlite::Result<Option<UserFields>> {
    conn.query_row(
        &format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = ?1"),
        params![user_id],
        user_from_row,
    )
    .optional()
}

/// True when another user already holds this email address.
pub fn email_in_use(conn: &Connection, email: &str, exclude_user: i64) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM users WHERE email = ?1 AND user_id <> ?2)",
        params![email, exclude_user],
        |row| row.get(0),
    )
}

/// Apply a pre-authorized user patch as one dynamic UPDATE. Returns the
/// number of updated rows (0 when the user does not exist).
pub fn apply_user_patch(
    conn: &Connection,
    user_id: i64,
    patch: &UserPatch,
    now_us: i64,
) -> rusqlite::Result<usize> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(first_name) = &patch.first_name {
        clauses.push("first_name = ?");
        values.push(Value::Text(first_name.clone()));
    }
    if let Some(last_name) = &patch.last_name {
        clauses.push("last_name = ?");
        values.push(Value::Text(last_name.clone()));
    }
    if let Some(email) = &patch.email {
        clauses.push("email = ?");
        values.push(Value::Text(email.clone()));
    }
    if let Some(role) = patch.role {
        clauses.push("role = ?");
        values.push(Value::Text(role.to_string()));
    }

    if clauses.is_empty() {
        return Ok(0);
    }

    clauses.push("updated_at_us = ?");
    values.push(Value::Integer(now_us));
    values.push(Value::Integer(user_id));

    let sql = format!(
        "UPDATE users SET {} WHERE user_id = ?",
        numbered_clauses(&clauses)
    );
    conn.execute(&sql, params_from_iter(values))
}

// ---------------------------------------------------------------------------
// Tickets
// ---------------------------------------------------------------------------

/// Insert a ticket and return its id. Status always starts at `new` and the
/// rollup sentiment columns start NULL; the coordinator writes the initial
/// sentiment separately.
pub fn insert_ticket(
    conn: &Connection,
    title: &str,
    description: &str,
    priority: Priority,
    department: Department,
    owner_id: i64,
    now_us: i64,
) -> rusqlite::Result<i64> {
    conn.execute(
        "INSERT INTO tickets (title, description, status, priority, department, owner_id,
                              created_at_us, updated_at_us)
         VALUES (?1, ?2, 'new', ?3, ?4, ?5, ?6, ?6)",
        params![
            title,
            description,
            priority.value(),
            department.to_string(),
            owner_id,
            now_us
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a ticket by id.
pub fn get_ticket(conn: &Connection, ticket_id: i64) -> rusqlite::Result<Option<TicketFields>> {
    conn.query_row(
        &format!("SELECT {TICKET_COLUMNS} FROM tickets WHERE ticket_id = ?1"),
        params![ticket_id],
        ticket_from_row,
    )
    .optional()
}

/// Apply a pre-authorized ticket patch as one dynamic UPDATE, mirroring the
/// per-field whitelist the authorization matrix produced. Returns the number
/// of updated rows (0 when the ticket does not exist).
pub fn apply_ticket_patch(
    conn: &Connection,
    ticket_id: i64,
    patch: &TicketPatch,
    now_us: i64,
) -> rusqlite::Result<usize> {
    let mut clauses: Vec<&str> = Vec::new();
    let mut values: Vec<Value> = Vec::new();

    if let Some(title) = &patch.title {
        clauses.push("title = ?");
        values.push(Value::Text(title.clone()));
    }
    if let Some(description) = &patch.description {
        clauses.push("description = ?");
        values.push(Value::Text(description.clone()));
    }
    if let Some(status) = patch.status {
        clauses.push("status = ?");
        values.push(Value::Text(status.to_string()));
    }
    if let Some(assignee) = patch.assigned_to {
        clauses.push("assignee_id = ?");
        values.push(assignee.map_or(Value::Null, Value::Integer));
    }
    if let Some(priority) = patch.priority {
        clauses.push("priority = ?");
        values.push(Value::Integer(i64::from(priority.value())));
    }
    if let Some(department) = patch.department {
        clauses.push("department = ?");
        values.push(Value::Text(department.to_string()));
    }

    if clauses.is_empty() {
        return Ok(0);
    }

    clauses.push("updated_at_us = ?");
    values.push(Value::Integer(now_us));
    values.push(Value::Integer(ticket_id));

    let sql = format!(
        "UPDATE tickets SET {} WHERE ticket_id = ?",
        numbered_clauses(&clauses)
    );
    conn.execute(&sql, params_from_iter(values))
}

/// Replace the ticket-level rollup sentiment wholesale.
pub fn write_ticket_sentiment(
    conn: &Connection,
    ticket_id: i64,
    sentiment: &Sentiment,
) -> rusqlite::Result<usize> {
    let keywords = keywords_to_json(&sentiment.keywords)?;
    conn.execute(
        "UPDATE tickets
         SET sentiment_score = ?1,
             sentiment_confidence = ?2,
             sentiment_keywords = ?3,
             sentiment_computed_at_us = ?4
         WHERE ticket_id = ?5",
        params![
            sentiment.score.value(),
            sentiment.confidence,
            keywords,
            datetime_to_us(sentiment.computed_at),
            ticket_id
        ],
    )
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Insert a comment with its write-once sentiment and return the comment id.
pub fn insert_comment(
    conn: &Connection,
    ticket_id: i64,
    author_id: i64,
    author_role: Role,
    content: &str,
    sentiment: &Sentiment,
    now_us: i64,
) -> rusqlite::Result<i64> {
    let keywords = keywords_to_json(&sentiment.keywords)?;
    conn.execute(
        "INSERT INTO ticket_comments (ticket_id, author_id, author_role, content,
                                      sentiment_score, sentiment_confidence,
                                      sentiment_keywords, sentiment_computed_at_us,
                                      created_at_us)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            ticket_id,
            author_id,
            author_role.to_string(),
            content,
            sentiment.score.value(),
            sentiment.confidence,
            keywords,
            datetime_to_us(sentiment.computed_at),
            now_us
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Fetch a single comment by id.
pub fn get_comment(conn: &Connection, comment_id: i64) -> rusqlite::Result<Option<CommentFields>> {
    conn.query_row(
        &format!("SELECT {COMMENT_COLUMNS} FROM ticket_comments WHERE comment_id = ?1"),
        params![comment_id],
        comment_from_row,
    )
    .optional()
}

/// All comments for a ticket, oldest first.
pub fn get_comments(conn: &Connection, ticket_id: i64) -> rusqlite::Result<Vec<CommentFields>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COMMENT_COLUMNS}
         FROM ticket_comments
         WHERE ticket_id = ?1
         ORDER BY created_at_us ASC, comment_id ASC"
    ))?;

    let rows = stmt.query_map(params![ticket_id], comment_from_row)?;
    rows.collect()
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Rewrite `field = ?` clauses into `field = ?N` positional parameters.
fn numbered_clauses(clauses: &[&str]) -> String {
    clauses
        .iter()
        .enumerate()
        .map(|(i, clause)| clause.replace('?', &format!("?{}", i + 1)))
        .collect::<Vec<_>>()
        .join(", ")
}
