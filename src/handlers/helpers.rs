use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::models::{AppState, CurrentUser, Permission};

pub const SESSION_COOKIE: &str = "session_id";

pub fn session_id_from_jar(jar: &CookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE).map(|c| c.value().to_string())
}

pub fn current_user_from_jar(state: &AppState, jar: &CookieJar) -> Option<CurrentUser> {
    let sid = session_id_from_jar(jar)?;
    state.sessions.lock().unwrap().get(&sid).cloned()
}

/// Queues a message for the next page rendered for this session.
/// Requests without a session have nowhere to keep it, so it is dropped.
pub fn push_flash(state: &AppState, jar: &CookieJar, message: impl Into<String>) {
    if let Some(sid) = session_id_from_jar(jar) {
        state
            .flash_store
            .lock()
            .unwrap()
            .entry(sid)
            .or_default()
            .push(message.into());
    }
}

pub fn take_flash_messages(state: &AppState, jar: &CookieJar) -> Vec<String> {
    let Some(sid) = session_id_from_jar(jar) else {
        return vec![];
    };
    let mut fs = state.flash_store.lock().unwrap();
    fs.remove(&sid).unwrap_or_default()
}

#[derive(Default)]
pub struct TemplateGlobals {
    pub current_user: Option<CurrentUser>,
    pub flash_messages: Vec<String>,
    pub has_flash_messages: bool,
}

/// Consumes the session's pending flash messages.
pub fn build_template_globals(state: &AppState, jar: &CookieJar) -> TemplateGlobals {
    let current_user = current_user_from_jar(state, jar);
    let flash_messages = take_flash_messages(state, jar);
    let has_flash_messages = !flash_messages.is_empty();
    TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    }
}

pub fn render_template<T: Template>(t: T) -> Result<Response, AppError> {
    Ok(Html(t.render()?).into_response())
}

pub fn render_with_status<T: Template>(status: StatusCode, t: T) -> Result<Response, AppError> {
    Ok((status, Html(t.render()?)).into_response())
}

pub fn require_login(state: &AppState, jar: &CookieJar) -> Result<CurrentUser, AppError> {
    current_user_from_jar(state, jar).ok_or(AppError::Unauthenticated)
}

pub fn require_permission(state: &AppState, jar: &CookieJar, permission: Permission) -> Result<CurrentUser, AppError> {
    let user = require_login(state, jar)?;
    if user.can(permission) {
        Ok(user)
    } else {
        tracing::warn!(username = %user.username, role = %user.role, permission = permission.label(), "Access denied");
        Err(AppError::Forbidden)
    }
}
