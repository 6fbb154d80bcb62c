use axum::{extract::State, response::Response};
use axum_extra::extract::cookie::CookieJar;

use crate::config::NOTIFICATIONS_LIMIT;
use crate::error::AppError;
use crate::models::{AppState, Permission};
use crate::templates::NotificationsTemplate;

use super::helpers::{build_template_globals, render_template, require_permission, TemplateGlobals};

pub async fn notifications_list(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ViewNotifications)?;
    let notifications = state.db.recent_notifications(NOTIFICATIONS_LIMIT).await?;
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(NotificationsTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        notifications,
    })
}
