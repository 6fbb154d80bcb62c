use askama::Template;
use crate::models::CurrentUser;
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub error: Option<String>,
    /// Echoed back into the form after a failed attempt.
    pub username: String,
}

crate::impl_base_template!(LoginTemplate);
