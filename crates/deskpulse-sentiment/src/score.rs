//! Lexical sentiment scorer.
//!
//! Produces a continuous polarity in `[-1, 1]` and subjectivity in `[0, 1]`
//! from normalized text, then maps polarity to a discrete 1..=5 class via
//! fixed, inclusive upper-bound thresholds. Confidence is the complement of
//! subjectivity: opinionated text scores low, flat factual text scores high.

use chrono::Utc;
use tracing::warn;

use deskpulse_core::error::ErrorCode;
use deskpulse_core::model::sentiment::{Sentiment, SentimentClass};

use crate::keywords::extract_keywords;
use crate::lexicon;
use crate::normalize::normalize;

/// How many unrelated tokens a degree modifier or negator survives before
/// it stops applying to the next sentiment word.
const MODIFIER_WINDOW: u8 = 2;

/// Polarity dampening applied under negation ("not good" reads as mildly
/// negative, not as the mirror image of "good").
const NEGATION_FACTOR: f64 = -0.5;

/// Inclusive upper bounds mapping polarity to the 1..=5 classes.
///
/// Immutable configuration injected into the scorer; there is deliberately
/// no way to change these at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassThresholds {
    pub very_negative_max: f64,
    pub negative_max: f64,
    pub neutral_max: f64,
    pub positive_max: f64,
}

impl ClassThresholds {
    pub const DEFAULT: Self = Self {
        very_negative_max: -0.6,
        negative_max: -0.2,
        neutral_max: 0.2,
        positive_max: 0.6,
    };
}

impl Default for ClassThresholds {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Error raised when a text cannot be scored. Never surfaced past the
/// sentiment pipeline; see [`Scorer::score_or_neutral`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreError {
    #[error("text is empty after normalization")]
    EmptyInput,
}

/// Deterministic lexical sentiment scorer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Scorer {
    thresholds: ClassThresholds,
}

impl Scorer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn with_thresholds(thresholds: ClassThresholds) -> Self {
        Self { thresholds }
    }

    /// Score a raw text into a sentiment record.
    ///
    /// # Errors
    ///
    /// Returns [`ScoreError::EmptyInput`] when nothing scorable remains
    /// after normalization. A text with no lexicon matches is *not* an
    /// error; it reads as a neutral, fully objective statement.
    pub fn score(&self, text: &str) -> Result<Sentiment, ScoreError> {
        let normalized = normalize(text);
        if normalized.split_whitespace().next().is_none() {
            return Err(ScoreError::EmptyInput);
        }

        let (polarity, subjectivity) = measure(&normalized);

        Ok(Sentiment {
            score: self.classify(polarity),
            confidence: (1.0 - subjectivity).clamp(0.0, 1.0),
            keywords: extract_keywords(&normalized),
            computed_at: Utc::now(),
        })
    }

    /// Total scoring: any failure degrades to the fixed neutral record.
    /// The aggregator depends on this to keep the pipeline total.
    #[must_use]
    pub fn score_or_neutral(&self, text: &str) -> Sentiment {
        match self.score(text) {
            Ok(sentiment) => sentiment,
            Err(error) => {
                warn!(
                    code = %ErrorCode::ScoringRecovered,
                    %error,
                    "scoring failed, using neutral fallback"
                );
                Sentiment::neutral(Utc::now())
            }
        }
    }

    /// Map polarity to a class; every bound is an inclusive upper bound.
    pub(crate) fn classify(&self, polarity: f64) -> SentimentClass {
        let t = &self.thresholds;
        if polarity <= t.very_negative_max {
            SentimentClass::VeryNegative
        } else if polarity <= t.negative_max {
            SentimentClass::Negative
        } else if polarity <= t.neutral_max {
            SentimentClass::Neutral
        } else if polarity <= t.positive_max {
            SentimentClass::Positive
        } else {
            SentimentClass::VeryPositive
        }
    }
}

#[derive(Debug)]
struct Modifiers {
    intensity: f64,
    negated: bool,
    gap: u8,
}

impl Modifiers {
    const fn clear() -> Self {
        Self {
            intensity: 1.0,
            negated: false,
            gap: 0,
        }
    }
}

/// Measure mean polarity and subjectivity over the lexicon hits in
/// normalized text. No hits reads as `(0.0, 0.0)`.
pub(crate) fn measure(normalized: &str) -> (f64, f64) {
    let mut polarity_sum = 0.0;
    let mut subjectivity_sum = 0.0;
    let mut hits = 0usize;
    let mut modifiers = Modifiers::clear();

    for token in normalized.split_whitespace() {
        if let Some(factor) = lexicon::intensifier(token) {
            modifiers.intensity *= factor;
            modifiers.gap = 0;
            continue;
        }
        if lexicon::is_negator(token) {
            modifiers.negated = true;
            modifiers.gap = 0;
            continue;
        }

        if let Some(entry) = lexicon::lookup(token) {
            let mut polarity = entry.polarity * modifiers.intensity;
            if modifiers.negated {
                polarity *= NEGATION_FACTOR;
            }
            polarity_sum += polarity.clamp(-1.0, 1.0);
            subjectivity_sum += (entry.subjectivity * modifiers.intensity).clamp(0.0, 1.0);
            hits += 1;
            modifiers = Modifiers::clear();
            continue;
        }

        modifiers.gap += 1;
        if modifiers.gap > MODIFIER_WINDOW {
            modifiers = Modifiers::clear();
        }
    }

    if hits == 0 {
        return (0.0, 0.0);
    }

    #[allow(clippy::cast_precision_loss)]
    let count = hits as f64;
    (polarity_sum / count, subjectivity_sum / count)
}
