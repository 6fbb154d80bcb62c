use askama::Template;
use crate::models::{CurrentUser, Incident};
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "incidents.html")]
pub struct IncidentsPageTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub incidents: Vec<Incident>,
    pub query: String,
    /// Export link carrying the current search.
    pub csv_url: String,
}

crate::impl_base_template!(IncidentsPageTemplate);
