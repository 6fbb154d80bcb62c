use axum::{
    extract::{Form, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::{Cookie, CookieJar};
use serde::Deserialize;

use crate::error::AppError;
use crate::models::AppState;
use crate::services::{authenticate, random_session_id};
use crate::templates::{HomeTemplate, LoginTemplate};

use super::helpers::{build_template_globals, current_user_from_jar, render_template, session_id_from_jar, TemplateGlobals, SESSION_COOKIE};

const LOGIN_FAILED: &str = "Invalid username or password";

#[derive(Deserialize, Default)]
#[serde(default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

fn session_cookie(value: String) -> Cookie<'static> {
    let mut cookie = Cookie::new(SESSION_COOKIE, value);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie
}

pub async fn home(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(HomeTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
    })
}

pub async fn login_get(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    if current_user_from_jar(&state, &jar).is_some() {
        return Ok(Redirect::to("/dashboard/").into_response());
    }
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(LoginTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        error: None,
        username: String::new(),
    })
}

pub async fn login_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    if let Some(user) = authenticate(&state.db, &form.username, &form.password).await? {
        let sid = random_session_id();
        tracing::info!(username = %user.username, role = %user.role, "Login succeeded");
        state.sessions.lock().unwrap().insert(sid.clone(), user);
        return Ok((jar.add(session_cookie(sid)), Redirect::to("/dashboard/")).into_response());
    }
    tracing::warn!(username = %form.username.trim(), "Login failed");
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(LoginTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        error: Some(LOGIN_FAILED.into()),
        username: form.username.trim().to_string(),
    })
}

pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    if let Some(sid) = session_id_from_jar(&jar) {
        state.sessions.lock().unwrap().remove(&sid);
        state.flash_store.lock().unwrap().remove(&sid);
    }
    let cleared = jar.remove(session_cookie(String::new()));
    (cleared, Redirect::to("/login/")).into_response()
}
