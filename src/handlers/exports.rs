use axum::{
    extract::{Query, State},
    http::header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::models::{AppState, Permission};
use crate::reports::{incidents_to_csv, FontSource, PdfReport, CSV_FILENAME};
use crate::services::search_incidents;

use super::helpers::require_permission;
use super::incidents::SearchQuery;

fn attachment(content_type: &str, filename: &str, body: Vec<u8>) -> Response {
    (
        [
            (CONTENT_TYPE, content_type.to_string()),
            (CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", filename)),
        ],
        body,
    )
        .into_response()
}

/// Renders off the async runtime; font loading and layout are blocking.
pub async fn pdf_response(state: &AppState, report: PdfReport) -> Result<Response, AppError> {
    let fonts = FontSource::new(&state.settings.pdf_font_dir, &state.settings.pdf_font_name).resolve();
    let filename = report.filename;
    let rows = report.detail_row_count();
    let bytes = tokio::task::spawn_blocking(move || report.render(&fonts)).await??;
    tracing::info!(filename, rows, size = bytes.len(), "PDF report rendered");
    Ok(attachment("application/pdf", filename, bytes))
}

pub async fn download_csv(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(search): Query<SearchQuery>,
) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ExportReports)?;
    let incidents = search_incidents(&state.db, &search.q).await?;
    let body = incidents_to_csv(&incidents)?;
    Ok(attachment("text/csv; charset=utf-8", CSV_FILENAME, body))
}

pub async fn download_pdf(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::ExportReports)?;
    let incidents = state.db.list_incidents().await?;
    pdf_response(&state, PdfReport::full(&incidents)).await
}
