//! Aggregation and document rendering over incident rows.

pub mod csv_export;
pub mod dashboard;
pub mod pdf;

pub use csv_export::{incidents_to_csv, CSV_FILENAME};
pub use dashboard::{DashboardSummary, LabelCount, RiskCounts};
pub use pdf::{FontSource, PdfError, PdfReport};
