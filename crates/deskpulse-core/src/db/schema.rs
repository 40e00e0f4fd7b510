//! Canonical SQLite schema for the deskpulse store.
//!
//! The schema is normalized for queryability:
//! - `users` holds caller identity and the stored role
//! - `tickets` keeps the latest aggregate fields plus the nullable rollup
//!   sentiment columns
//! - `ticket_comments` carries the write-once per-comment sentiment and the
//!   author role snapshot used by incremental aggregation
//! - `store_meta` tracks the applied schema version
//!
//! Sentiment keywords are stored as JSON arrays, matching the shape they
//! cross the API boundary with.

/// Migration v1: users, tickets, comments, store metadata.
pub const MIGRATION_V1_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    user_id INTEGER PRIMARY KEY AUTOINCREMENT,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    role TEXT NOT NULL DEFAULT 'user' CHECK (role IN ('admin', 'tech', 'user')),
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS tickets (
    ticket_id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL CHECK (length(trim(title)) > 0),
    description TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'new'
        CHECK (status IN ('new', 'in_progress', 'resolved', 'rejected')),
    priority INTEGER NOT NULL DEFAULT 3 CHECK (priority BETWEEN 1 AND 5),
    department TEXT NOT NULL
        CHECK (department IN ('it', 'hr', 'finance', 'operations', 'customer_service', 'sales')),
    owner_id INTEGER NOT NULL REFERENCES users(user_id),
    assignee_id INTEGER REFERENCES users(user_id),
    sentiment_score INTEGER CHECK (sentiment_score IS NULL OR sentiment_score BETWEEN 1 AND 5),
    sentiment_confidence REAL
        CHECK (sentiment_confidence IS NULL OR sentiment_confidence BETWEEN 0.0 AND 1.0),
    sentiment_keywords TEXT,
    sentiment_computed_at_us INTEGER,
    created_at_us INTEGER NOT NULL,
    updated_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS ticket_comments (
    comment_id INTEGER PRIMARY KEY AUTOINCREMENT,
    ticket_id INTEGER NOT NULL REFERENCES tickets(ticket_id) ON DELETE CASCADE,
    author_id INTEGER NOT NULL REFERENCES users(user_id),
    author_role TEXT NOT NULL CHECK (author_role IN ('admin', 'tech', 'user')),
    content TEXT NOT NULL CHECK (length(trim(content)) > 0),
    sentiment_score INTEGER NOT NULL CHECK (sentiment_score BETWEEN 1 AND 5),
    sentiment_confidence REAL NOT NULL CHECK (sentiment_confidence BETWEEN 0.0 AND 1.0),
    sentiment_keywords TEXT NOT NULL DEFAULT '[]',
    sentiment_computed_at_us INTEGER NOT NULL,
    created_at_us INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS store_meta (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    schema_version INTEGER NOT NULL
);

INSERT OR IGNORE INTO store_meta (id, schema_version) VALUES (1, 1);

CREATE INDEX IF NOT EXISTS idx_tickets_owner ON tickets(owner_id);
CREATE INDEX IF NOT EXISTS idx_tickets_assignee ON tickets(assignee_id);
CREATE INDEX IF NOT EXISTS idx_tickets_status ON tickets(status);
CREATE INDEX IF NOT EXISTS idx_comments_ticket ON ticket_comments(ticket_id, created_at_us);
"#;

/// Indexes that must exist after migration; used by schema tests.
pub const REQUIRED_INDEXES: &[&str] = &[
    "idx_tickets_owner",
    "idx_tickets_assignee",
    "idx_tickets_status",
    "idx_comments_ticket",
];
