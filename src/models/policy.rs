//! Role-based access policy

use super::user::Role;

/// Protected operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ListUsers,
    /// View or update someone else's account
    ManageUsers,
    CreateAdmin,
    DeleteUser,
    ReadCatalog,
    WriteCatalog,
    ViewStatistics,
}

const ADMIN_ONLY: &[Role] = &[Role::Admin];
const ANY_ROLE: &[Role] = &[Role::Admin, Role::User];

/// Roles allowed to perform each action
const POLICY: &[(Action, &[Role])] = &[
    (Action::ListUsers, ADMIN_ONLY),
    (Action::ManageUsers, ADMIN_ONLY),
    (Action::CreateAdmin, ADMIN_ONLY),
    (Action::DeleteUser, ADMIN_ONLY),
    (Action::ReadCatalog, ANY_ROLE),
    (Action::WriteCatalog, ADMIN_ONLY),
    (Action::ViewStatistics, ANY_ROLE),
];

impl Action {
    pub fn allowed_roles(self) -> &'static [Role] {
        POLICY
            .iter()
            .find(|(action, _)| *action == self)
            .map(|(_, roles)| *roles)
            .unwrap_or(&[])
    }

    pub fn permits(self, role: Role) -> bool {
        self.allowed_roles().contains(&role)
    }

    pub fn describe(self) -> &'static str {
        match self {
            Action::ListUsers => "list users",
            Action::ManageUsers => "manage other users",
            Action::CreateAdmin => "create administrators",
            Action::DeleteUser => "delete users",
            Action::ReadCatalog => "read the catalog",
            Action::WriteCatalog => "modify the catalog",
            Action::ViewStatistics => "view statistics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Action; 7] = [
        Action::ListUsers,
        Action::ManageUsers,
        Action::CreateAdmin,
        Action::DeleteUser,
        Action::ReadCatalog,
        Action::WriteCatalog,
        Action::ViewStatistics,
    ];

    #[test]
    fn test_every_action_has_a_policy() {
        for action in ALL {
            assert!(!action.allowed_roles().is_empty(), "{:?} has no roles", action);
        }
    }

    #[test]
    fn test_admin_can_do_everything() {
        for action in ALL {
            assert!(action.permits(Role::Admin));
        }
    }

    #[test]
    fn test_user_is_limited_to_reads() {
        assert!(Action::ReadCatalog.permits(Role::User));
        assert!(Action::ViewStatistics.permits(Role::User));
        assert!(!Action::WriteCatalog.permits(Role::User));
        assert!(!Action::ListUsers.permits(Role::User));
        assert!(!Action::CreateAdmin.permits(Role::User));
        assert!(!Action::DeleteUser.permits(Role::User));
    }
}
