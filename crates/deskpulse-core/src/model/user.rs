use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use super::ticket::ParseEnumError;

/// Caller roles recognized by the authorization matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Tech,
    User,
}

impl Role {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Tech => "tech",
            Self::User => "user",
        }
    }

    /// True for staff roles (admin and tech).
    #[must_use]
    pub const fn is_staff(self) -> bool {
        matches!(self, Self::Admin | Self::Tech)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "tech" => Ok(Self::Tech),
            "user" => Ok(Self::User),
            _ => Err(ParseEnumError {
                expected: "role",
                got: s.to_string(),
            }),
        }
    }
}

/// All persisted fields for a user record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserFields {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub created_at_us: i64,
    pub updated_at_us: i64,
}

/// A requested mutation against a user record. Profile fields are
/// self-service or admin; `role` is admin-only.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

impl UserPatch {
    /// True when no field is requested at all.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_name.is_none()
            && self.last_name.is_none()
            && self.email.is_none()
            && self.role.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::{Role, UserPatch};
    use std::str::FromStr;

    #[test]
    fn role_display_parse_roundtrips() {
        for value in [Role::Admin, Role::Tech, Role::User] {
            assert_eq!(Role::from_str(&value.to_string()).unwrap(), value);
        }
        assert!(Role::from_str("owner").is_err());
    }

    #[test]
    fn staff_covers_admin_and_tech() {
        assert!(Role::Admin.is_staff());
        assert!(Role::Tech.is_staff());
        assert!(!Role::User.is_staff());
    }

    #[test]
    fn empty_patch_detected() {
        assert!(UserPatch::default().is_empty());
        let patch = UserPatch {
            role: Some(Role::Tech),
            ..UserPatch::default()
        };
        assert!(!patch.is_empty());
    }
}
