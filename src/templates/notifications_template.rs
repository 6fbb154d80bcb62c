use askama::Template;
use crate::models::{CurrentUser, Notification};
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "notifications.html")]
pub struct NotificationsTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub notifications: Vec<Notification>,
}

crate::impl_base_template!(NotificationsTemplate);
