//! Mutation authorization and ticket lifecycle coordination.
//!
//! [`authz`] is the pure field-level authorization matrix: it narrows a
//! requested patch down to the fields the caller's role and ownership
//! permit, silently dropping the rest. [`coordinator`] owns the store
//! connection and drives the write paths (create, patch, comment,
//! re-analysis), keeping each comment's insert and the ticket rollup
//! refresh inside one transaction.

#![forbid(unsafe_code)]

pub mod authz;
pub mod coordinator;
pub mod view;

pub use authz::{authorize_ticket_patch, authorize_user_patch};
pub use coordinator::{Caller, TicketEngine};
pub use view::{CommentPosted, CommentView, PartyRef, TicketView, UserView};
