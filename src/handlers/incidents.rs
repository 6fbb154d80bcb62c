use axum::{
    extract::{Form, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{AppState, Permission};
use crate::services::{search_incidents, FieldErrors, IncidentForm};
use crate::templates::{EditIncidentTemplate, IncidentDetailTemplate, IncidentsPageTemplate};
use crate::utils::with_search_query;

use super::helpers::{
    build_template_globals, push_flash, render_template, render_with_status, require_permission, TemplateGlobals,
};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchQuery {
    pub q: String,
}

pub async fn incidents_list(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(search): Query<SearchQuery>,
) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ViewIncidents)?;
    let incidents = search_incidents(&state.db, &search.q).await?;
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(IncidentsPageTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        incidents,
        csv_url: with_search_query("/download_csv/", &search.q),
        query: search.q,
    })
}

pub async fn incident_detail(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ViewIncidents)?;
    let incident = state.db.get_incident(id).await?.ok_or(AppError::NotFound)?;
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(IncidentDetailTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        incident,
    })
}

fn edit_page(
    state: &AppState,
    jar: &CookieJar,
    status: StatusCode,
    incident_id: i64,
    form: IncidentForm,
    errors: FieldErrors,
) -> Result<Response, AppError> {
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(state, jar);
    render_with_status(
        status,
        EditIncidentTemplate {
            current_user,
            flash_messages,
            has_flash_messages,
            incident_id,
            form,
            errors,
        },
    )
}

pub async fn incident_edit_get(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::EditIncidents)?;
    let incident = state.db.get_incident(id).await?.ok_or(AppError::NotFound)?;
    edit_page(&state, &jar, StatusCode::OK, id, IncidentForm::from_incident(&incident), FieldErrors::default())
}

pub async fn incident_edit_post(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
    Form(form): Form<IncidentForm>,
) -> Result<Response, AppError> {
    let user = require_permission(&state, &jar, Permission::EditIncidents)?;
    if state.db.get_incident(id).await?.is_none() {
        return Err(AppError::NotFound);
    }
    let input = match form.validate() {
        Ok(input) => input,
        Err(errors) => {
            tracing::warn!(id, errors = %errors, "Incident edit rejected");
            return edit_page(&state, &jar, StatusCode::UNPROCESSABLE_ENTITY, id, form, errors);
        }
    };
    if !state.db.update_incident(id, &input).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, username = %user.username, "Incident updated");
    push_flash(&state, &jar, "Incident updated successfully");
    Ok(Redirect::to(&format!("/incident/{}/", id)).into_response())
}

pub async fn incident_delete(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let user = require_permission(&state, &jar, Permission::DeleteIncidents)?;
    if !state.db.delete_incident(id).await? {
        return Err(AppError::NotFound);
    }
    tracing::info!(id, username = %user.username, "Incident deleted");
    push_flash(&state, &jar, "Incident deleted");
    Ok(Redirect::to("/incidents/").into_response())
}
