pub mod app_state;
pub mod current_user;
pub mod incident;
pub mod notification;
pub mod permission;
pub mod role;
pub mod user_record;

pub use app_state::AppState;
pub use current_user::CurrentUser;
pub use incident::{Incident, IncidentInput, INCIDENT_COLUMNS};
pub use notification::Notification;
pub use permission::Permission;
pub use role::Role;
pub use user_record::UserRecord;
