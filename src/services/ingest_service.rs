use thiserror::Error;

use crate::db::Database;
use crate::models::{IncidentInput, INCIDENT_COLUMNS};
use crate::services::incident_service::IncidentForm;

/// Why an upload was refused. `Display` is the message shown to the user.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("No file uploaded")]
    NoFile,

    #[error("File must be CSV")]
    NotCsv,

    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    #[error("Error in row {row}: {message}")]
    InvalidRow { row: usize, message: String },

    #[error("Error: {0}")]
    Malformed(String),

    #[error("Error: could not save incidents")]
    Database(#[from] sqlx::Error),
}

pub fn check_file_name(name: &str) -> Result<(), IngestError> {
    if name.trim().is_empty() {
        return Err(IngestError::NoFile);
    }
    if !name.to_lowercase().ends_with(".csv") {
        return Err(IngestError::NotCsv);
    }
    Ok(())
}

/// Parses the whole file before anything is written. Rows are returned in
/// file order; the first bad row aborts the parse.
pub fn parse_incident_csv(bytes: &[u8]) -> Result<Vec<IncidentInput>, IngestError> {
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(bytes);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::None)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| IngestError::Malformed(e.to_string()))?
        .clone();
    let mut positions = [0usize; INCIDENT_COLUMNS.len()];
    for (slot, column) in positions.iter_mut().zip(INCIDENT_COLUMNS) {
        *slot = headers
            .iter()
            .position(|h| h.trim() == column)
            .ok_or(IngestError::MissingColumn(column))?;
    }

    let mut out = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| IngestError::InvalidRow { row, message: e.to_string() })?;
        let field = |i: usize| record.get(positions[i]).unwrap_or("").to_string();
        let form = IncidentForm {
            date: field(0),
            last_maintenance_date: field(1),
            pressure: field(2),
            temperature: field(3),
            failure: field(4),
            risk: field(5),
            actions: field(6),
        };
        let input = form
            .validate()
            .map_err(|errors| IngestError::InvalidRow { row, message: errors.to_string() })?;
        out.push(input);
    }
    Ok(out)
}

/// Validates, parses and stores an uploaded file in one all-or-nothing batch.
pub async fn ingest_csv(
    db: &Database,
    file_name: &str,
    bytes: &[u8],
    reported_by: Option<i64>,
) -> Result<u64, IngestError> {
    check_file_name(file_name)?;
    let inputs = parse_incident_csv(bytes)?;
    let inserted = db.insert_incidents(&inputs, reported_by).await?;
    tracing::info!(file_name, inserted, "CSV ingested");
    Ok(inserted)
}
