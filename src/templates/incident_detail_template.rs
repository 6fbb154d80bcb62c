use askama::Template;
use crate::models::{CurrentUser, Incident};
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "incident_detail.html")]
pub struct IncidentDetailTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub incident: Incident,
}

crate::impl_base_template!(IncidentDetailTemplate);
