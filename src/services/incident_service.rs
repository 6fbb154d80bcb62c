use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;

use crate::db::Database;
use crate::models::{Incident, IncidentInput};
use crate::utils::{parse_date, parse_float, parse_optional_date};

/// Raw, unvalidated incident fields as submitted by a form or read from a CSV row.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IncidentForm {
    pub date: String,
    pub last_maintenance_date: String,
    pub pressure: String,
    pub temperature: String,
    pub failure: String,
    pub risk: String,
    pub actions: String,
}

/// Field name → error message, ordered by field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, message) in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            first = false;
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

impl IncidentForm {
    pub fn from_incident(incident: &Incident) -> Self {
        let [date, last_maintenance_date, pressure, temperature, failure, risk, actions] = incident.field_strings();
        Self {
            date,
            last_maintenance_date,
            pressure,
            temperature,
            failure,
            risk,
            actions,
        }
    }

    /// Checks every field and reports all problems at once.
    /// Text fields are kept exactly as given.
    pub fn validate(&self) -> Result<IncidentInput, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = if self.date.trim().is_empty() {
            errors.add("date", "This field is required.");
            None
        } else {
            let parsed = parse_date(&self.date);
            if parsed.is_none() {
                errors.add("date", format!("Enter a valid date, got '{}'.", self.date));
            }
            parsed
        };

        let last_maintenance_date = match parse_optional_date(&self.last_maintenance_date) {
            Ok(d) => d,
            Err(_) => {
                errors.add(
                    "last_maintenance_date",
                    format!("Enter a valid date, got '{}'.", self.last_maintenance_date),
                );
                None
            }
        };

        let pressure = parse_float(&self.pressure);
        if pressure.is_none() {
            errors.add("pressure", format!("Enter a number, got '{}'.", self.pressure));
        }
        let temperature = parse_float(&self.temperature);
        if temperature.is_none() {
            errors.add("temperature", format!("Enter a number, got '{}'.", self.temperature));
        }

        if self.failure.trim().is_empty() {
            errors.add("failure", "This field is required.");
        }
        if self.risk.trim().is_empty() {
            errors.add("risk", "This field is required.");
        }

        match (date, pressure, temperature) {
            (Some(date), Some(pressure), Some(temperature)) if errors.is_empty() => Ok(IncidentInput {
                date,
                last_maintenance_date,
                pressure,
                temperature,
                failure: self.failure.clone(),
                risk: self.risk.clone(),
                actions: if self.actions.trim().is_empty() {
                    None
                } else {
                    Some(self.actions.clone())
                },
            }),
            _ => Err(errors),
        }
    }
}

/// Incidents matching `query` (see [`Incident::matches_query`]), newest date first.
pub async fn search_incidents(db: &Database, query: &str) -> Result<Vec<Incident>, sqlx::Error> {
    let mut incidents = db.list_incidents().await?;
    if !query.trim().is_empty() {
        incidents.retain(|i| i.matches_query(query));
    }
    Ok(incidents)
}
