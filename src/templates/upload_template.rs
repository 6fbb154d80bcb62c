use askama::Template;
use crate::models::CurrentUser;
use super::BaseTemplate;

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadTemplate {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
    pub columns: &'static [&'static str],
}

crate::impl_base_template!(UploadTemplate);
