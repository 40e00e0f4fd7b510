use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::sentiment::Sentiment;

/// The four ticket lifecycle states.
///
/// No transition graph is enforced: staff may set any status from any
/// status. This mirrors the behavior of the surrounding system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    New,
    InProgress,
    Resolved,
    Rejected,
}

impl Status {
    const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Rejected => "rejected",
        }
    }
}

/// Departments a ticket can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Department {
    It,
    Hr,
    Finance,
    Operations,
    CustomerService,
    Sales,
}

impl Department {
    const fn as_str(self) -> &'static str {
        match self {
            Self::It => "it",
            Self::Hr => "hr",
            Self::Finance => "finance",
            Self::Operations => "operations",
            Self::CustomerService => "customer_service",
            Self::Sales => "sales",
        }
    }
}

/// Ticket priority on the 1..=5 scale (1 = highest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Construct a priority, rejecting values outside 1..=5.
    pub fn new(value: u8) -> Result<Self, InvalidPriority> {
        if (1..=5).contains(&value) {
            Ok(Self(value))
        } else {
            Err(InvalidPriority { got: value })
        }
    }

    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self(3)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

impl TryFrom<u8> for Priority {
    type Error = InvalidPriority;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Error returned when a priority value is outside 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid priority: {got} (expected 1..=5)")]
pub struct InvalidPriority {
    pub got: u8,
}

/// All persisted fields for a ticket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketFields {
    pub ticket_id: i64,
    pub title: String,
    pub description: String,
    pub status: Status,
    pub priority: Priority,
    pub department: Department,
    pub owner_id: i64,
    pub assignee_id: Option<i64>,
    /// Overall rollup sentiment; `None` until first computed.
    pub sentiment: Option<Sentiment>,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

/// Draft used to create a new ticket. Status always starts at `new` and the
/// caller becomes the owner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TicketDraft {
    pub title: String,
    pub description: String,
    pub department: Department,
    #[serde(default)]
    pub priority: Priority,
}

/// A requested mutation against a ticket. `None` fields were not requested;
/// the authorization matrix drops the rest down to an allowed subset.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TicketPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<Status>,
    /// `Some(None)` clears the assignee, `Some(Some(id))` sets it.
    pub assigned_to: Option<Option<i64>>,
    pub priority: Option<Priority>,
    pub department: Option<Department>,
}

impl TicketPatch {
    /// True when no field is requested at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.assigned_to.is_none()
            && self.priority.is_none()
            && self.department.is_none()
    }
}

/// Error returned when parsing an enum value from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {expected}: '{got}'")]
pub struct ParseEnumError {
    pub expected: &'static str,
    pub got: String,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn normalize(input: &str) -> String {
    input.trim().to_ascii_lowercase()
}

impl FromStr for Status {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "new" => Ok(Self::New),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError {
                expected: "status",
                got: s.to_string(),
            }),
        }
    }
}

impl FromStr for Department {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "it" => Ok(Self::It),
            "hr" => Ok(Self::Hr),
            "finance" => Ok(Self::Finance),
            "operations" => Ok(Self::Operations),
            "customer_service" => Ok(Self::CustomerService),
            "sales" => Ok(Self::Sales),
            _ => Err(ParseEnumError {
                expected: "department",
                got: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Department, Priority, Status, TicketPatch};
    use std::str::FromStr;

    #[test]
    fn status_display_parse_roundtrips() {
        for value in [
            Status::New,
            Status::InProgress,
            Status::Resolved,
            Status::Rejected,
        ] {
            assert_eq!(Status::from_str(&value.to_string()).unwrap(), value);
        }
        assert!(Status::from_str("closed").is_err());
    }

    #[test]
    fn department_display_parse_roundtrips() {
        for value in [
            Department::It,
            Department::Hr,
            Department::Finance,
            Department::Operations,
            Department::CustomerService,
            Department::Sales,
        ] {
            assert_eq!(Department::from_str(&value.to_string()).unwrap(), value);
        }
        assert!(Department::from_str("legal").is_err());
    }

    #[test]
    fn status_json_uses_snake_case() {
        assert_eq!(
            serde_json::to_string(&Status::InProgress).unwrap(),
            "\"in_progress\""
        );
        assert_eq!(
            serde_json::from_str::<Department>("\"customer_service\"").unwrap(),
            Department::CustomerService
        );
    }

    #[test]
    fn priority_bounds_enforced() {
        assert!(Priority::new(0).is_err());
        assert!(Priority::new(6).is_err());
        assert_eq!(Priority::new(1).unwrap().value(), 1);
        assert_eq!(Priority::default().value(), 3);
    }

    #[test]
    fn empty_patch_detected() {
        assert!(TicketPatch::default().is_empty());

        let patch = TicketPatch {
            status: Some(Status::Resolved),
            ..TicketPatch::default()
        };
        assert!(!patch.is_empty());
    }

    #[test]
    fn patch_deserializes_camel_case_and_null_assignee() {
        let patch: TicketPatch =
            serde_json::from_str(r#"{"assignedTo": null, "status": "resolved"}"#).unwrap();
        // Absent and explicit-null are both "not requested" for assignedTo
        // under serde defaults; setting happens via a concrete id.
        assert_eq!(patch.status, Some(Status::Resolved));
        assert_eq!(patch.assigned_to, None);

        let patch: TicketPatch = serde_json::from_str(r#"{"assignedTo": 7}"#).unwrap();
        assert_eq!(patch.assigned_to, Some(Some(7)));
    }
}
