// Base template trait for inheritance
pub mod base_template;
pub use base_template::BaseTemplate;

// Individual template files
pub mod home_template;
pub mod login_template;
pub mod upload_template;
pub mod incidents_page_template;
pub mod incident_detail_template;
pub mod edit_incident_template;
pub mod dashboard_template;
pub mod notifications_template;

pub use home_template::HomeTemplate;
pub use login_template::LoginTemplate;
pub use upload_template::UploadTemplate;
pub use incidents_page_template::IncidentsPageTemplate;
pub use incident_detail_template::IncidentDetailTemplate;
pub use edit_incident_template::EditIncidentTemplate;
pub use dashboard_template::DashboardTemplate;
pub use notifications_template::NotificationsTemplate;
