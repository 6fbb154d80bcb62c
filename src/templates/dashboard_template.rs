use askama::Template;
use crate::models::CurrentUser;
use crate::reports::DashboardSummary;
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub summary: DashboardSummary,
    pub chart_json: String,
}

crate::impl_base_template!(DashboardTemplate);
