use serde::{Deserialize, Serialize};

use super::role::Role;
use super::permission::Permission;

/// The identity attached to a session at login.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: i64,
    pub username: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn can(&self, permission: Permission) -> bool {
        permission.is_allowed_for_role(self.role)
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> CurrentUser {
        CurrentUser { id: 1, username: "u".into(), role }
    }

    #[test]
    fn can_follows_the_role_capability_table() {
        assert!(user(Role::Admin).can(Permission::DeleteIncidents));
        assert!(user(Role::Engineer).can(Permission::EditIncidents));
        assert!(!user(Role::Engineer).can(Permission::DeleteIncidents));
        assert!(user(Role::Viewer).can(Permission::ViewDashboard));
        assert!(!user(Role::Viewer).can(Permission::UploadIncidents));
    }
}
