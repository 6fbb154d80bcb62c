use crate::models::{CurrentUser, Permission};

/// Fields every page carries, plus the permission checks `base.html` uses
/// to decide which navigation links to show.
pub trait BaseTemplate {
    fn current_user(&self) -> &Option<CurrentUser>;
    fn flash_messages(&self) -> &Vec<String>;
    fn has_flash_messages(&self) -> bool;

    fn can(&self, permission: Permission) -> bool {
        self.current_user().as_ref().is_some_and(|u| u.can(permission))
    }

    fn can_upload(&self) -> bool {
        self.can(Permission::UploadIncidents)
    }

    fn can_edit(&self) -> bool {
        self.can(Permission::EditIncidents)
    }

    fn can_delete(&self) -> bool {
        self.can(Permission::DeleteIncidents)
    }

    fn can_export(&self) -> bool {
        self.can(Permission::ExportReports)
    }
}

/// Implements [`BaseTemplate`] for a struct with the standard fields.
#[macro_export]
macro_rules! impl_base_template {
    ($struct_name:ty) => {
        impl $crate::templates::BaseTemplate for $struct_name {
            fn current_user(&self) -> &Option<$crate::models::CurrentUser> {
                &self.current_user
            }
            fn flash_messages(&self) -> &Vec<String> {
                &self.flash_messages
            }
            fn has_flash_messages(&self) -> bool {
                self.has_flash_messages
            }
        }
    };
}
