use askama::Template;
use crate::models::CurrentUser;
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

crate::impl_base_template!(HomeTemplate);
