use askama::Template;
use crate::models::CurrentUser;
use crate::services::{FieldErrors, IncidentForm};
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "incident_edit.html")]
pub struct EditIncidentTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub incident_id: i64,
    pub form: IncidentForm,
    pub errors: FieldErrors,
}

crate::impl_base_template!(EditIncidentTemplate);
