use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of keywords carried on any sentiment record.
pub const MAX_KEYWORDS: usize = 5;

/// Discrete sentiment class on the 1..=5 scale.
///
/// Serialized as a bare integer so keyword lists and classes cross the API
/// boundary exactly as the surrounding system expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum SentimentClass {
    VeryNegative,
    Negative,
    Neutral,
    Positive,
    VeryPositive,
}

impl SentimentClass {
    /// Numeric value on the 1..=5 scale.
    #[must_use]
    pub const fn value(self) -> u8 {
        match self {
            Self::VeryNegative => 1,
            Self::Negative => 2,
            Self::Neutral => 3,
            Self::Positive => 4,
            Self::VeryPositive => 5,
        }
    }

    /// Round a mean of class values half away from zero and clamp to 1..=5.
    #[must_use]
    pub fn from_mean(mean: f64) -> Self {
        if !mean.is_finite() {
            return Self::Neutral;
        }

        match mean.round().clamp(1.0, 5.0) as u8 {
            1 => Self::VeryNegative,
            2 => Self::Negative,
            4 => Self::Positive,
            5 => Self::VeryPositive,
            _ => Self::Neutral,
        }
    }
}

impl From<SentimentClass> for u8 {
    fn from(class: SentimentClass) -> Self {
        class.value()
    }
}

impl TryFrom<u8> for SentimentClass {
    type Error = InvalidClassValue;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::VeryNegative),
            2 => Ok(Self::Negative),
            3 => Ok(Self::Neutral),
            4 => Ok(Self::Positive),
            5 => Ok(Self::VeryPositive),
            _ => Err(InvalidClassValue { got: value }),
        }
    }
}

impl fmt::Display for SentimentClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Error returned when a stored class value is outside 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid sentiment class value: {got} (expected 1..=5)")]
pub struct InvalidClassValue {
    pub got: u8,
}

/// A computed sentiment record, attached to tickets (nullable rollup) and
/// comments (mandatory, write-once).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sentiment {
    pub score: SentimentClass,
    /// Complement of subjectivity, in `[0, 1]`.
    pub confidence: f64,
    /// Noun/adjective tokens in first-appearance order, at most
    /// [`MAX_KEYWORDS`].
    pub keywords: Vec<String>,
    pub computed_at: DateTime<Utc>,
}

impl Sentiment {
    /// The fixed neutral fallback used whenever scoring fails.
    #[must_use]
    pub fn neutral(computed_at: DateTime<Utc>) -> Self {
        Self {
            score: SentimentClass::Neutral,
            confidence: 0.5,
            keywords: Vec::new(),
            computed_at,
        }
    }

    /// Same record with a fresh timestamp; used when an aggregation adopts
    /// an earlier reading but must report its own call time.
    #[must_use]
    pub fn at(&self, computed_at: DateTime<Utc>) -> Self {
        Self {
            computed_at,
            ..self.clone()
        }
    }
}
