#![forbid(unsafe_code)]
//! deskpulse-sentiment library.
//!
//! Maps free ticket/comment text to discrete sentiment records and rolls
//! them up into a single live overall sentiment per ticket. The pipeline is
//! total: any internal scoring failure degrades to a fixed neutral record
//! instead of propagating, so aggregation can never leave a ticket stale.
//!
//! # Conventions
//!
//! - **Errors**: [`score::ScoreError`] never crosses the aggregation
//!   boundary; callers use [`score::Scorer::score_or_neutral`].
//! - **Logging**: use `tracing` macros (`warn!` on recovered scoring
//!   failures, `debug!` elsewhere).

pub mod aggregate;
pub mod keywords;
pub mod lexicon;
pub mod normalize;
pub mod score;

pub use aggregate::{CommentSignal, aggregate_full, aggregate_incremental};
pub use normalize::normalize;
pub use score::{ClassThresholds, ScoreError, Scorer};
