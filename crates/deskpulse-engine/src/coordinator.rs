//! Ticket lifecycle coordination.
//!
//! [`TicketEngine`] owns the store connection and the scorer and drives
//! every write path: ticket creation, authorized patches, comment posting
//! with its rollup refresh, and explicit full re-analysis. A comment's
//! insert and the ticket rollup it triggers commit atomically; a reader
//! never observes the comment without the refreshed rollup.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::Path;

use rusqlite::{Connection, TransactionBehavior};
use tracing::{debug, info};

use deskpulse_core::clock::now_us;
use deskpulse_core::config::LimitsConfig;
use deskpulse_core::db::{open_in_memory, open_store, query};
use deskpulse_core::error::{Error, Result};
use deskpulse_core::model::ticket::{TicketDraft, TicketFields, TicketPatch};
use deskpulse_core::model::user::{Role, UserPatch};
use deskpulse_sentiment::{CommentSignal, Scorer, aggregate_full, aggregate_incremental};

use crate::authz::{authorize_ticket_patch, authorize_user_patch};
use crate::view::{CommentPosted, CommentView, PartyRef, TicketView, UserView};

/// The authenticated identity an operation runs as. Resolved by the API
/// layer before the engine is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub id: i64,
    pub role: Role,
}

/// Coordinator over one store connection.
///
/// Multi-step write paths (creation, comment plus rollup, re-analysis) run
/// inside an IMMEDIATE transaction; concurrent engines on the same database
/// file contend on the SQLite write lock rather than interleave. Patches
/// are a single UPDATE and need no explicit transaction.
pub struct TicketEngine {
    conn: Connection,
    scorer: Scorer,
    limits: LimitsConfig,
}

impl TicketEngine {
    #[must_use]
    pub fn new(conn: Connection) -> Self {
        Self::with_limits(conn, LimitsConfig::default())
    }

    #[must_use]
    pub fn with_limits(conn: Connection, limits: LimitsConfig) -> Self {
        Self {
            conn,
            scorer: Scorer::new(),
            limits,
        }
    }

    /// Open (or create) the store at `path` and wrap it in an engine.
    ///
    /// # Errors
    ///
    /// Returns an error if opening or migrating the database fails.
    pub fn open(path: &Path) -> anyhow::Result<Self> {
        Ok(Self::new(open_store(path)?))
    }

    /// In-memory engine; test and tooling helper.
    ///
    /// # Errors
    ///
    /// Returns an error if migration fails.
    pub fn in_memory() -> anyhow::Result<Self> {
        Ok(Self::new(open_in_memory()?))
    }

    /// Shared access to the underlying store, for the surrounding CRUD
    /// layer and for seeding in tests.
    #[must_use]
    pub const fn store(&self) -> &Connection {
        &self.conn
    }

    // -----------------------------------------------------------------------
    // Users
    // -----------------------------------------------------------------------

    /// Create a user record.
    ///
    /// # Errors
    ///
    /// `Validation` for empty fields, `Conflict` for a taken email.
    pub fn create_user(
        &self,
        first_name: &str,
        last_name: &str,
        email: &str,
        role: Role,
    ) -> Result<UserView> {
        require_filled(first_name, "firstName")?;
        require_filled(last_name, "lastName")?;
        require_filled(email, "email")?;
        if query::email_in_use(&self.conn, email, 0)? {
            return Err(Error::Conflict {
                reason: format!("email {email} already in use"),
            });
        }

        let user_id = query::insert_user(&self.conn, first_name, last_name, email, role, now_us())?;
        info!(user_id, %role, "user created");
        self.user_view(user_id)
    }

    /// Apply an authorized patch to a user record.
    ///
    /// # Errors
    ///
    /// `NotFound` when the user does not exist; `AccessDenied` when no
    /// requested field survives authorization; `Conflict` when the new
    /// email is already taken; `Validation` for empty field values.
    pub fn update_user(
        &self,
        caller: Caller,
        user_id: i64,
        requested: &UserPatch,
    ) -> Result<UserView> {
        query::get_user(&self.conn, user_id)?.ok_or(Error::NotFound {
            entity: "user",
            id: user_id,
        })?;

        let is_self = caller.id == user_id;
        let allowed = authorize_user_patch(caller.role, is_self, requested);
        if allowed.is_empty() {
            return Err(denial_for(requested.is_empty()));
        }

        if let Some(first_name) = &allowed.first_name {
            require_filled(first_name, "firstName")?;
        }
        if let Some(last_name) = &allowed.last_name {
            require_filled(last_name, "lastName")?;
        }
        if let Some(email) = &allowed.email {
            require_filled(email, "email")?;
            if query::email_in_use(&self.conn, email, user_id)? {
                return Err(Error::Conflict {
                    reason: format!("email {email} already in use"),
                });
            }
        }

        query::apply_user_patch(&self.conn, user_id, &allowed, now_us())?;
        debug!(user_id, caller_id = caller.id, "user patched");
        self.user_view(user_id)
    }

    // -----------------------------------------------------------------------
    // Tickets
    // -----------------------------------------------------------------------

    /// Create a ticket owned by the caller. Status always starts at `new`;
    /// the initial rollup sentiment is derived from the description.
    ///
    /// # Errors
    ///
    /// `Validation` for an empty or oversized title, or empty description.
    pub fn create_ticket(&mut self, caller: Caller, draft: &TicketDraft) -> Result<TicketView> {
        require_filled(&draft.title, "title")?;
        if draft.title.chars().count() > self.limits.max_title_chars {
            return Err(Error::Validation { field: "title" });
        }
        require_filled(&draft.description, "description")?;

        let sentiment = self.scorer.score_or_neutral(&draft.description);

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let ticket_id = query::insert_ticket(
            &tx,
            &draft.title,
            &draft.description,
            draft.priority,
            draft.department,
            caller.id,
            now_us(),
        )?;
        query::write_ticket_sentiment(&tx, ticket_id, &sentiment)?;
        tx.commit()?;

        info!(
            ticket_id,
            owner_id = caller.id,
            score = sentiment.score.value(),
            "ticket created"
        );
        self.ticket_view_unchecked(ticket_id)
    }

    /// Apply an authorized patch to a ticket.
    ///
    /// # Errors
    ///
    /// `NotFound` when the ticket does not exist. `AccessDenied` when no
    /// requested field survives authorization; a valid id with no
    /// qualifying rule is a denial, never a `NotFound`. `Validation` for
    /// empty or oversized content values.
    pub fn update_ticket(
        &self,
        caller: Caller,
        ticket_id: i64,
        requested: &TicketPatch,
    ) -> Result<TicketView> {
        let ticket = self.require_ticket(ticket_id)?;

        let is_owner = caller.id == ticket.owner_id;
        let allowed = authorize_ticket_patch(caller.role, is_owner, requested);
        if allowed.is_empty() {
            return Err(denial_for(requested.is_empty()));
        }

        if let Some(title) = &allowed.title {
            require_filled(title, "title")?;
            if title.chars().count() > self.limits.max_title_chars {
                return Err(Error::Validation { field: "title" });
            }
        }
        if let Some(description) = &allowed.description {
            require_filled(description, "description")?;
        }

        query::apply_ticket_patch(&self.conn, ticket_id, &allowed, now_us())?;
        debug!(ticket_id, caller_id = caller.id, "ticket patched");
        self.ticket_view_unchecked(ticket_id)
    }

    /// Fetch a ticket with its comment thread. Staff see every ticket;
    /// other callers only their own.
    ///
    /// # Errors
    ///
    /// `NotFound` when the ticket does not exist, `AccessDenied` when the
    /// caller is neither staff nor the owner.
    pub fn ticket_view(&self, caller: Caller, ticket_id: i64) -> Result<TicketView> {
        let ticket = self.require_ticket(ticket_id)?;
        if !caller.role.is_staff() && caller.id != ticket.owner_id {
            return Err(Error::AccessDenied {
                reason: "only staff or the ticket owner may view this ticket",
            });
        }
        self.assemble_view(ticket)
    }

    // -----------------------------------------------------------------------
    // Comments and sentiment
    // -----------------------------------------------------------------------

    /// Post a comment and refresh the ticket rollup in one transaction.
    ///
    /// The comment is scored once at insert and that record never changes.
    /// The rollup refresh is incremental: the mean over stored `user`-role
    /// comment sentiments, with keywords re-read from the qualifying
    /// corpus. Scoring failures degrade to neutral and never block the
    /// comment itself.
    ///
    /// # Errors
    ///
    /// `NotFound` when the ticket does not exist, `AccessDenied` when the
    /// caller is neither staff nor the owner, `Validation` for an empty or
    /// oversized body.
    pub fn add_comment(
        &mut self,
        caller: Caller,
        ticket_id: i64,
        content: &str,
    ) -> Result<CommentPosted> {
        require_filled(content, "content")?;
        if content.chars().count() > self.limits.max_comment_chars {
            return Err(Error::Validation { field: "content" });
        }

        let sentiment = self.scorer.score_or_neutral(content);
        let scorer = self.scorer;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let ticket = query::get_ticket(&tx, ticket_id)?.ok_or(Error::NotFound {
            entity: "ticket",
            id: ticket_id,
        })?;
        if !caller.role.is_staff() && caller.id != ticket.owner_id {
            return Err(Error::AccessDenied {
                reason: "only staff or the ticket owner may comment on this ticket",
            });
        }

        let comment_id = query::insert_comment(
            &tx,
            ticket_id,
            caller.id,
            caller.role,
            content,
            &sentiment,
            now_us(),
        )?;

        let comments = query::get_comments(&tx, ticket_id)?;
        let signals: Vec<CommentSignal> = comments.iter().map(CommentSignal::from).collect();
        let rollup = aggregate_incremental(&scorer, &ticket.description, &signals, &sentiment);
        query::write_ticket_sentiment(&tx, ticket_id, &rollup)?;
        tx.commit()?;

        info!(
            ticket_id,
            comment_id,
            comment_score = sentiment.score.value(),
            rollup_score = rollup.score.value(),
            "comment posted"
        );

        let comment = comments
            .into_iter()
            .find(|c| c.comment_id == comment_id)
            .ok_or(Error::NotFound {
                entity: "comment",
                id: comment_id,
            })?;
        let author = query::get_user(&self.conn, caller.id)?
            .as_ref()
            .map(PartyRef::from);

        Ok(CommentPosted {
            comment: CommentView::from_fields(comment, author),
            overall_sentiment: rollup,
        })
    }

    /// Recompute the rollup from scratch: one scoring pass over the
    /// description plus every comment, all author roles included. Replaces
    /// the stored rollup wholesale. Any caller may trigger it; the result
    /// depends only on the corpus.
    ///
    /// # Errors
    ///
    /// `NotFound` when the ticket does not exist.
    pub fn reanalyze(&mut self, ticket_id: i64) -> Result<TicketView> {
        let scorer = self.scorer;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        let ticket = query::get_ticket(&tx, ticket_id)?.ok_or(Error::NotFound {
            entity: "ticket",
            id: ticket_id,
        })?;

        let comments = query::get_comments(&tx, ticket_id)?;
        let signals: Vec<CommentSignal> = comments.iter().map(CommentSignal::from).collect();
        let rollup = aggregate_full(&scorer, &ticket.description, &signals);
        query::write_ticket_sentiment(&tx, ticket_id, &rollup)?;
        tx.commit()?;

        info!(
            ticket_id,
            rollup_score = rollup.score.value(),
            "ticket re-analyzed"
        );
        self.ticket_view_unchecked(ticket_id)
    }

    // -----------------------------------------------------------------------
    // View assembly
    // -----------------------------------------------------------------------

    fn require_ticket(&self, ticket_id: i64) -> Result<TicketFields> {
        query::get_ticket(&self.conn, ticket_id)?.ok_or(Error::NotFound {
            entity: "ticket",
            id: ticket_id,
        })
    }

    fn user_view(&self, user_id: i64) -> Result<UserView> {
        query::get_user(&self.conn, user_id)?
            .map(UserView::from)
            .ok_or(Error::NotFound {
                entity: "user",
                id: user_id,
            })
    }

    fn ticket_view_unchecked(&self, ticket_id: i64) -> Result<TicketView> {
        let ticket = self.require_ticket(ticket_id)?;
        self.assemble_view(ticket)
    }

    fn assemble_view(&self, ticket: TicketFields) -> Result<TicketView> {
        let owner = query::get_user(&self.conn, ticket.owner_id)?
            .as_ref()
            .map(PartyRef::from);
        let assignee = match ticket.assignee_id {
            Some(id) => query::get_user(&self.conn, id)?.as_ref().map(PartyRef::from),
            None => None,
        };

        let comments = query::get_comments(&self.conn, ticket.ticket_id)?;
        let mut authors: HashMap<i64, Option<PartyRef>> = HashMap::new();
        let mut views = Vec::with_capacity(comments.len());
        for comment in comments {
            let author = match authors.entry(comment.author_id) {
                Entry::Occupied(entry) => entry.get().clone(),
                Entry::Vacant(entry) => {
                    let fetched = query::get_user(&self.conn, comment.author_id)?
                        .as_ref()
                        .map(PartyRef::from);
                    entry.insert(fetched).clone()
                }
            };
            views.push(CommentView::from_fields(comment, author));
        }

        Ok(TicketView::from_parts(ticket, owner, assignee, views))
    }
}

/// A request whose every field got dropped is a denial; an outright empty
/// request reads the same to the caller but names its own reason.
const fn denial_for(request_was_empty: bool) -> Error {
    if request_was_empty {
        Error::AccessDenied {
            reason: "no recognized field requested",
        }
    } else {
        Error::AccessDenied {
            reason: "none of the requested fields are permitted for this caller",
        }
    }
}

fn require_filled(value: &str, field: &'static str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::Validation { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{Caller, TicketEngine};
    use deskpulse_core::config::LimitsConfig;
    use deskpulse_core::error::Error;
    use deskpulse_core::model::ticket::{Department, TicketDraft, TicketPatch};
    use deskpulse_core::model::user::Role;

    fn engine() -> TicketEngine {
        TicketEngine::in_memory().expect("in-memory engine")
    }

    fn seed_caller(engine: &TicketEngine, email: &str, role: Role) -> Caller {
        let user = engine
            .create_user("Test", "Caller", email, role)
            .expect("create user");
        Caller { id: user.id, role }
    }

    fn draft(title: &str, description: &str) -> TicketDraft {
        TicketDraft {
            title: title.to_string(),
            description: description.to_string(),
            department: Department::It,
            priority: deskpulse_core::model::ticket::Priority::default(),
        }
    }

    #[test]
    fn blank_title_and_description_are_rejected() {
        let mut engine = engine();
        let caller = seed_caller(&engine, "owner@example.com", Role::User);

        let result = engine.create_ticket(caller, &draft("   ", "something is wrong"));
        assert!(matches!(result, Err(Error::Validation { field: "title" })));

        let result = engine.create_ticket(caller, &draft("Broken printer", ""));
        assert!(matches!(
            result,
            Err(Error::Validation {
                field: "description"
            })
        ));
    }

    #[test]
    fn oversized_title_is_rejected() {
        let conn = deskpulse_core::db::open_in_memory().expect("open store");
        let mut engine = TicketEngine::with_limits(
            conn,
            LimitsConfig {
                max_title_chars: 10,
                ..LimitsConfig::default()
            },
        );
        let caller = seed_caller(&engine, "owner@example.com", Role::User);

        let result = engine.create_ticket(caller, &draft("a title well past ten chars", "body"));
        assert!(matches!(result, Err(Error::Validation { field: "title" })));
    }

    #[test]
    fn oversized_comment_is_rejected() {
        let conn = deskpulse_core::db::open_in_memory().expect("open store");
        let mut engine = TicketEngine::with_limits(
            conn,
            LimitsConfig {
                max_comment_chars: 8,
                ..LimitsConfig::default()
            },
        );
        let caller = seed_caller(&engine, "owner@example.com", Role::User);
        let ticket = engine
            .create_ticket(caller, &draft("Printer", "it is broken"))
            .expect("create ticket");

        let result = engine.add_comment(caller, ticket.id, "way past the limit");
        assert!(matches!(result, Err(Error::Validation { field: "content" })));
    }

    #[test]
    fn empty_patch_is_denied_not_missing() {
        let mut engine = engine();
        let caller = seed_caller(&engine, "owner@example.com", Role::User);
        let ticket = engine
            .create_ticket(caller, &draft("Printer", "it is broken"))
            .expect("create ticket");

        let result = engine.update_ticket(caller, ticket.id, &TicketPatch::default());
        assert!(matches!(result, Err(Error::AccessDenied { .. })));
    }

    #[test]
    fn missing_ticket_is_not_found_for_every_path() {
        let mut engine = engine();
        let caller = seed_caller(&engine, "owner@example.com", Role::Admin);

        assert!(matches!(
            engine.ticket_view(caller, 404),
            Err(Error::NotFound {
                entity: "ticket",
                id: 404
            })
        ));
        assert!(matches!(
            engine.add_comment(caller, 404, "hello"),
            Err(Error::NotFound { .. })
        ));
        assert!(matches!(
            engine.reanalyze(404),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn duplicate_email_is_a_conflict() {
        let engine = engine();
        engine
            .create_user("A", "One", "taken@example.com", Role::User)
            .expect("first user");
        let result = engine.create_user("B", "Two", "taken@example.com", Role::User);
        assert!(matches!(result, Err(Error::Conflict { .. })));
    }
}
