//! Field-level mutation authorization.
//!
//! Authorization is a pure narrowing step: given the caller's role, their
//! relationship to the record, and the requested patch, produce the subset
//! of fields the caller may actually change. Unauthorized fields are
//! dropped without error; the coordinator rejects the whole request only
//! when *nothing* survives. Row visibility (who may read a ticket at all)
//! lives with the coordinator, not here.
//!
//! Ticket rules:
//!
//! | field         | owner | tech | admin |
//! |---------------|-------|------|-------|
//! | `title`       | yes   | no   | no    |
//! | `description` | yes   | no   | no    |
//! | `status`      | no    | yes  | yes   |
//! | `assigned_to` | no    | yes  | yes   |
//! | `priority`    | no    | no   | yes   |
//! | `department`  | no    | no   | yes   |
//!
//! A staff caller who also owns the ticket holds both column sets. User
//! records: profile fields are self-service or admin, `role` is admin-only.

use deskpulse_core::model::ticket::TicketPatch;
use deskpulse_core::model::user::{Role, UserPatch};

/// Narrow a requested ticket patch to the fields this caller may change.
#[must_use]
pub fn authorize_ticket_patch(role: Role, is_owner: bool, requested: &TicketPatch) -> TicketPatch {
    TicketPatch {
        title: requested.title.clone().filter(|_| is_owner),
        description: requested.description.clone().filter(|_| is_owner),
        status: requested.status.filter(|_| role.is_staff()),
        assigned_to: requested.assigned_to.filter(|_| role.is_staff()),
        priority: requested.priority.filter(|_| role == Role::Admin),
        department: requested.department.filter(|_| role == Role::Admin),
    }
}

/// Narrow a requested user patch to the fields this caller may change.
#[must_use]
pub fn authorize_user_patch(role: Role, is_self: bool, requested: &UserPatch) -> UserPatch {
    let profile = is_self || role == Role::Admin;
    UserPatch {
        first_name: requested.first_name.clone().filter(|_| profile),
        last_name: requested.last_name.clone().filter(|_| profile),
        email: requested.email.clone().filter(|_| profile),
        role: requested.role.filter(|_| role == Role::Admin),
    }
}

#[cfg(test)]
mod tests {
    use super::{authorize_ticket_patch, authorize_user_patch};
    use deskpulse_core::model::ticket::{Department, Priority, Status, TicketPatch};
    use deskpulse_core::model::user::{Role, UserPatch};

    fn full_ticket_patch() -> TicketPatch {
        TicketPatch {
            title: Some("New title".to_string()),
            description: Some("New description".to_string()),
            status: Some(Status::Resolved),
            assigned_to: Some(Some(9)),
            priority: Some(Priority::new(1).unwrap()),
            department: Some(Department::Finance),
        }
    }

    #[test]
    fn owner_keeps_only_content_fields() {
        let allowed = authorize_ticket_patch(Role::User, true, &full_ticket_patch());
        assert_eq!(allowed.title.as_deref(), Some("New title"));
        assert_eq!(allowed.description.as_deref(), Some("New description"));
        assert_eq!(allowed.status, None);
        assert_eq!(allowed.assigned_to, None);
        assert_eq!(allowed.priority, None);
        assert_eq!(allowed.department, None);
    }

    #[test]
    fn owner_resolving_their_own_ticket_is_left_with_nothing() {
        let requested = TicketPatch {
            status: Some(Status::Resolved),
            ..TicketPatch::default()
        };
        let allowed = authorize_ticket_patch(Role::User, true, &requested);
        assert!(allowed.is_empty());

        let allowed = authorize_ticket_patch(Role::Admin, false, &requested);
        assert_eq!(allowed.status, Some(Status::Resolved));
    }

    #[test]
    fn tech_keeps_workflow_fields_but_loses_priority_and_department() {
        let allowed = authorize_ticket_patch(Role::Tech, false, &full_ticket_patch());
        assert_eq!(allowed.status, Some(Status::Resolved));
        assert_eq!(allowed.assigned_to, Some(Some(9)));
        assert_eq!(allowed.priority, None);
        assert_eq!(allowed.department, None);
        assert_eq!(allowed.title, None);
        assert_eq!(allowed.description, None);
    }

    #[test]
    fn admin_keeps_everything_but_content_unless_owner() {
        let allowed = authorize_ticket_patch(Role::Admin, false, &full_ticket_patch());
        assert_eq!(allowed.status, Some(Status::Resolved));
        assert_eq!(allowed.assigned_to, Some(Some(9)));
        assert_eq!(allowed.priority, Some(Priority::new(1).unwrap()));
        assert_eq!(allowed.department, Some(Department::Finance));
        assert_eq!(allowed.title, None);

        // An admin who owns the ticket holds both column sets.
        let allowed = authorize_ticket_patch(Role::Admin, true, &full_ticket_patch());
        assert_eq!(allowed.title.as_deref(), Some("New title"));
        assert_eq!(allowed.priority, Some(Priority::new(1).unwrap()));
    }

    #[test]
    fn staff_can_clear_an_assignee() {
        let requested = TicketPatch {
            assigned_to: Some(None),
            ..TicketPatch::default()
        };
        let allowed = authorize_ticket_patch(Role::Tech, false, &requested);
        assert_eq!(allowed.assigned_to, Some(None));

        let allowed = authorize_ticket_patch(Role::User, true, &requested);
        assert_eq!(allowed.assigned_to, None);
    }

    #[test]
    fn non_owner_user_is_left_with_nothing() {
        let allowed = authorize_ticket_patch(Role::User, false, &full_ticket_patch());
        assert!(allowed.is_empty());
    }

    #[test]
    fn user_profile_is_self_service_but_role_is_admin_only() {
        let requested = UserPatch {
            first_name: Some("Ada".to_string()),
            email: Some("ada@example.com".to_string()),
            role: Some(Role::Admin),
            ..UserPatch::default()
        };

        let allowed = authorize_user_patch(Role::User, true, &requested);
        assert_eq!(allowed.first_name.as_deref(), Some("Ada"));
        assert_eq!(allowed.email.as_deref(), Some("ada@example.com"));
        assert_eq!(allowed.role, None);

        let allowed = authorize_user_patch(Role::User, false, &requested);
        assert!(allowed.is_empty());

        let allowed = authorize_user_patch(Role::Admin, false, &requested);
        assert_eq!(allowed.first_name.as_deref(), Some("Ada"));
        assert_eq!(allowed.role, Some(Role::Admin));
    }

    #[test]
    fn tech_cannot_edit_other_users() {
        let requested = UserPatch {
            last_name: Some("Lovelace".to_string()),
            ..UserPatch::default()
        };
        let allowed = authorize_user_patch(Role::Tech, false, &requested);
        assert!(allowed.is_empty());
    }
}
