use serde::{Deserialize, Serialize};

use super::role::Role;

/// Action a user may perform.
/// Every protected route is mapped to one of these, and each [`Role`]
/// grants a fixed set of them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    /// Bulk-create incidents from a CSV file.
    UploadIncidents,
    /// Browse, search and open incidents.
    ViewIncidents,
    /// See the aggregate dashboard.
    ViewDashboard,
    /// Download CSV and PDF reports.
    ExportReports,
    /// Change the fields of an existing incident.
    EditIncidents,
    /// Permanently remove an incident.
    DeleteIncidents,
    /// Read the notification feed.
    ViewNotifications,
}

impl Permission {
    /// Human-readable name shown in the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Permission::UploadIncidents => "Upload Incidents",
            Permission::ViewIncidents => "View Incidents",
            Permission::ViewDashboard => "View Dashboard",
            Permission::ExportReports => "Export Reports",
            Permission::EditIncidents => "Edit Incidents",
            Permission::DeleteIncidents => "Delete Incidents",
            Permission::ViewNotifications => "View Notifications",
        }
    }

    /// Returns every permission the given role grants.
    ///
    /// - `Admin`    → everything.
    /// - `Engineer` → everything except deleting incidents.
    /// - `Viewer`   → read and export only.
    pub fn for_role(role: Role) -> &'static [Permission] {
        match role {
            Role::Admin => Self::all(),
            Role::Engineer => &[
                Permission::UploadIncidents,
                Permission::ViewIncidents,
                Permission::ViewDashboard,
                Permission::ExportReports,
                Permission::EditIncidents,
                Permission::ViewNotifications,
            ],
            Role::Viewer => &[
                Permission::ViewIncidents,
                Permission::ViewDashboard,
                Permission::ExportReports,
                Permission::ViewNotifications,
            ],
        }
    }

    pub fn is_allowed_for_role(&self, role: Role) -> bool {
        Self::for_role(role).contains(self)
    }

    /// All defined permissions in a stable display order.
    pub fn all() -> &'static [Permission] {
        &[
            Permission::UploadIncidents,
            Permission::ViewIncidents,
            Permission::ViewDashboard,
            Permission::ExportReports,
            Permission::EditIncidents,
            Permission::DeleteIncidents,
            Permission::ViewNotifications,
        ]
    }
}
