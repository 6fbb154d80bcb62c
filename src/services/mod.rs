pub mod incident_service;
pub mod ingest_service;
pub mod user_service;

// Re-export commonly used functions
pub use incident_service::{search_incidents, FieldErrors, IncidentForm};
pub use ingest_service::{check_file_name, ingest_csv, parse_incident_csv, IngestError};
pub use user_service::{
    authenticate, generate_password_hash, random_session_id, register_user, reset_password, seed_default_admin, set_role,
    verify_password, UserError,
};
