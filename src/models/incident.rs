use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// The seven user-supplied columns, in export order.
pub const INCIDENT_COLUMNS: [&str; 7] = [
    "date",
    "last_maintenance_date",
    "pressure",
    "temperature",
    "failure",
    "risk",
    "actions",
];

/// An incident row joined with its reporter's username.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Incident {
    pub id: i64,
    pub date: NaiveDate,
    pub last_maintenance_date: Option<NaiveDate>,
    pub pressure: f64,
    pub temperature: f64,
    pub failure: String,
    pub risk: String,
    pub actions: Option<String>,
    pub reported_by: Option<i64>,
    pub reported_by_username: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Incident {
    /// Case-insensitive substring match against failure, risk and the ISO date.
    /// A blank query matches everything.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.trim().is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.failure.to_lowercase().contains(&needle)
            || self.risk.to_lowercase().contains(&needle)
            || self.date_string().contains(&needle)
    }

    pub fn date_string(&self) -> String {
        self.date.to_string()
    }

    pub fn last_maintenance_string(&self) -> String {
        self.last_maintenance_date.map(|d| d.to_string()).unwrap_or_default()
    }

    pub fn actions_text(&self) -> &str {
        self.actions.as_deref().unwrap_or("")
    }

    pub fn reporter(&self) -> &str {
        self.reported_by_username.as_deref().unwrap_or("")
    }

    /// CSS modifier for the risk badge.
    pub fn risk_class(&self) -> &'static str {
        if self.risk.eq_ignore_ascii_case("high") {
            "risk-high"
        } else if self.risk.eq_ignore_ascii_case("medium") {
            "risk-medium"
        } else if self.risk.eq_ignore_ascii_case("low") {
            "risk-low"
        } else {
            "risk-other"
        }
    }

    /// The seven user-facing fields as strings, in [`INCIDENT_COLUMNS`] order.
    pub fn field_strings(&self) -> [String; 7] {
        self.to_input().field_strings()
    }

    pub fn to_input(&self) -> IncidentInput {
        IncidentInput {
            date: self.date,
            last_maintenance_date: self.last_maintenance_date,
            pressure: self.pressure,
            temperature: self.temperature,
            failure: self.failure.clone(),
            risk: self.risk.clone(),
            actions: self.actions.clone(),
        }
    }
}

/// Validated field values for creating or updating an incident.
#[derive(Debug, Clone, PartialEq)]
pub struct IncidentInput {
    pub date: NaiveDate,
    pub last_maintenance_date: Option<NaiveDate>,
    pub pressure: f64,
    pub temperature: f64,
    pub failure: String,
    pub risk: String,
    pub actions: Option<String>,
}

impl IncidentInput {
    pub fn field_strings(&self) -> [String; 7] {
        [
            self.date.to_string(),
            self.last_maintenance_date.map(|d| d.to_string()).unwrap_or_default(),
            self.pressure.to_string(),
            self.temperature.to_string(),
            self.failure.clone(),
            self.risk.clone(),
            self.actions.clone().unwrap_or_default(),
        ]
    }
}
