use std::fmt;

/// Machine-readable error codes for API-layer decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ConfigParseError,
    NotFound,
    AccessDenied,
    ValidationFailed,
    InvalidEnumValue,
    Conflict,
    StorageFailed,
    ScoringRecovered,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::ConfigParseError => "E1001",
            Self::NotFound => "E2001",
            Self::AccessDenied => "E2002",
            Self::ValidationFailed => "E2003",
            Self::InvalidEnumValue => "E2004",
            Self::Conflict => "E2005",
            Self::StorageFailed => "E5001",
            Self::ScoringRecovered => "E6001",
        }
    }

    /// Short human-facing summary for logs and API payloads.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::ConfigParseError => "Config file parse error",
            Self::NotFound => "Record not found",
            Self::AccessDenied => "Access denied",
            Self::ValidationFailed => "Required field missing or invalid",
            Self::InvalidEnumValue => "Invalid status/department/priority/role value",
            Self::Conflict => "Record conflicts with existing data",
            Self::StorageFailed => "Store operation failed",
            Self::ScoringRecovered => "Sentiment scoring failed, neutral fallback used",
        }
    }

    /// Optional remediation hint surfaced to operators.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::ConfigParseError => Some("Fix syntax in deskpulse.toml and retry."),
            Self::NotFound => None,
            Self::AccessDenied => {
                Some("The caller's role does not permit any of the requested fields.")
            }
            Self::ValidationFailed => Some("Provide the named field with a non-empty value."),
            Self::InvalidEnumValue => {
                Some("Use one of the documented status/department/priority/role values.")
            }
            Self::Conflict => Some("Use a different email address."),
            Self::StorageFailed => Some("Check the database file and disk permissions."),
            Self::ScoringRecovered => {
                Some("Diagnostics only; the pipeline already recovered with a neutral record.")
            }
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors surfaced across the engine boundary.
///
/// `AccessDenied` is always kept distinct from `NotFound`: a caller holding
/// a valid ticket id but no qualifying rule must learn it was denied, not
/// that the ticket is gone. Scoring failures never appear here; they are
/// recovered inside the sentiment pipeline.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    #[error("access denied: {reason}")]
    AccessDenied { reason: &'static str },

    #[error("missing or invalid field: {field}")]
    Validation { field: &'static str },

    #[error("conflict: {reason}")]
    Conflict { reason: String },

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
}

impl Error {
    /// Map the error to its stable machine-readable code.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::AccessDenied { .. } => ErrorCode::AccessDenied,
            Self::Validation { .. } => ErrorCode::ValidationFailed,
            Self::Conflict { .. } => ErrorCode::Conflict,
            Self::Storage(_) => ErrorCode::StorageFailed,
        }
    }
}

/// Convenience alias for engine-boundary results.
pub type Result<T> = std::result::Result<T, Error>;
