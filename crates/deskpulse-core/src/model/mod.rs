//! Core data model: tickets, comments, users, and sentiment records.

pub mod comment;
pub mod sentiment;
pub mod ticket;
pub mod user;
