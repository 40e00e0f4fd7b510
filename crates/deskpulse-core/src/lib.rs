#![forbid(unsafe_code)]
//! deskpulse-core library.
//!
//! # Conventions
//!
//! - **Errors**: typed [`error::Error`] at the engine boundary,
//!   `anyhow::Result` in setup plumbing.
//! - **Logging**: use `tracing` macros (`info!`, `warn!`, `error!`,
//!   `debug!`, `trace!`).

pub mod clock;
pub mod config;
pub mod db;
pub mod error;
pub mod model;
