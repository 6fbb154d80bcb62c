use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::error::AppError;
use crate::models::{AppState, Permission, INCIDENT_COLUMNS};
use crate::services::{ingest_csv, IngestError};
use crate::templates::UploadTemplate;

use super::helpers::{build_template_globals, push_flash, render_template, require_permission, TemplateGlobals};

/// Upload size accepted by `/upload/`.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

pub async fn upload_get(State(state): State<AppState>, jar: CookieJar) -> Result<Response, AppError> {
    require_permission(&state, &jar, Permission::UploadIncidents)?;
    let TemplateGlobals {
        current_user,
        flash_messages,
        has_flash_messages,
    } = build_template_globals(&state, &jar);
    render_template(UploadTemplate {
        current_user,
        flash_messages,
        has_flash_messages,
        columns: &INCIDENT_COLUMNS,
    })
}

/// The `file` part's name and contents. A part with no name and no bytes is
/// what browsers send when nothing was chosen.
async fn read_file_part(multipart: &mut Multipart) -> Result<Option<(String, Vec<u8>)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await?;
        if file_name.is_empty() && bytes.is_empty() {
            return Ok(None);
        }
        return Ok(Some((file_name, bytes.to_vec())));
    }
    Ok(None)
}

pub async fn upload_post(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<Response, AppError> {
    let user = require_permission(&state, &jar, Permission::UploadIncidents)?;
    let outcome = match read_file_part(&mut multipart).await {
        Ok(Some((file_name, bytes))) => ingest_csv(&state.db, &file_name, &bytes, Some(user.id)).await,
        Ok(None) => Err(IngestError::NoFile),
        Err(e) => Err(IngestError::Malformed(e.body_text())),
    };
    match outcome {
        Ok(inserted) => {
            tracing::info!(username = %user.username, inserted, "Upload accepted");
            push_flash(&state, &jar, format!("CSV uploaded successfully ({} incidents)", inserted));
            Ok(Redirect::to("/incidents/").into_response())
        }
        Err(e) => {
            if let IngestError::Database(ref db) = e {
                tracing::error!(e = %db, username = %user.username, "Upload could not be stored");
            } else {
                tracing::warn!(e = %e, username = %user.username, "Upload rejected");
            }
            push_flash(&state, &jar, e.to_string());
            Ok(Redirect::to("/upload/").into_response())
        }
    }
}
