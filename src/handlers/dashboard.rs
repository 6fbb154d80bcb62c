use axum::{
    extract::State,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::models::{AppState, Permission};
use crate::reports::{DashboardSummary, PdfReport, RiskCounts};
use crate::templates::DashboardTemplate;

use super::exports::pdf_response;
use super::helpers::{build_template_globals, render_template, require_permission, TemplateGlobals};

pub async fn dashboard(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ViewDashboard)?;
    let incidents = state.db.list_incidents().await?;
    let summary = DashboardSummary::from_incidents(&incidents, state.settings.legacy_month_keys);
    let chart_json = summary.chart_json();
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(DashboardTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        summary,
        chart_json,
    })
}

pub async fn dashboard_pdf(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ExportReports)?;
    let incidents = state.db.list_incidents().await?;
    pdf_response(&state, PdfReport::dashboard(RiskCounts::from_incidents(&incidents))).await
}
