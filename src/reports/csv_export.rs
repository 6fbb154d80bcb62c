use crate::models::{Incident, INCIDENT_COLUMNS};

pub const CSV_FILENAME: &str = "incidents.csv";

/// One header row plus one row per incident, in the upload column order.
/// Absent optional values are written as empty fields.
pub fn incidents_to_csv(incidents: &[Incident]) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(INCIDENT_COLUMNS)?;
    for incident in incidents {
        writer.write_record(incident.field_strings())?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::parse_incident_csv;
    use chrono::Utc;

    fn incident(id: i64, failure: &str, actions: Option<&str>) -> Incident {
        let now = Utc::now();
        Incident {
            id,
            date: "2024-01-01".parse().unwrap(),
            last_maintenance_date: Some("2023-11-30".parse().unwrap()),
            pressure: 12.5,
            temperature: 80.0,
            failure: failure.into(),
            risk: "High".into(),
            actions: actions.map(str::to_string),
            reported_by: None,
            reported_by_username: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn writes_fixed_header_and_rows() {
        let bytes = incidents_to_csv(&[incident(1, "Valve leak", Some("Replaced valve"))]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("date,last_maintenance_date,pressure,temperature,failure,risk,actions")
        );
        assert_eq!(lines.next(), Some("2024-01-01,2023-11-30,12.5,80,Valve leak,High,Replaced valve"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn quotes_fields_containing_commas() {
        let bytes = incidents_to_csv(&[incident(1, "Leak, minor", None)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.contains("\"Leak, minor\",High,\n"));
    }

    #[test]
    fn empty_listing_is_header_only() {
        let text = String::from_utf8(incidents_to_csv(&[]).unwrap()).unwrap();
        assert_eq!(text, "date,last_maintenance_date,pressure,temperature,failure,risk,actions\n");
    }

    #[test]
    fn export_reimports_to_the_same_fields() {
        let original = vec![
            incident(1, "Valve leak", Some("Replaced \"main\" valve")),
            incident(2, "Leak, minor", None),
        ];
        let bytes = incidents_to_csv(&original).unwrap();
        let reparsed = parse_incident_csv(&bytes).unwrap();
        let expected: Vec<_> = original.iter().map(Incident::to_input).collect();
        assert_eq!(reparsed, expected);
    }
}
