use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::json;

use crate::config::RECENT_INCIDENTS_LIMIT;
use crate::models::Incident;

/// Total plus case-insensitive High / Medium / Low tallies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub total: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskCounts {
    pub fn from_incidents(incidents: &[Incident]) -> Self {
        let mut counts = RiskCounts {
            total: incidents.len(),
            ..Default::default()
        };
        for incident in incidents {
            let risk = incident.risk.as_str();
            if risk.eq_ignore_ascii_case("high") {
                counts.high += 1;
            } else if risk.eq_ignore_ascii_case("medium") {
                counts.medium += 1;
            } else if risk.eq_ignore_ascii_case("low") {
                counts.low += 1;
            }
        }
        counts
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
    /// Share of the largest bucket in the same group, 0..=100.
    pub percent: usize,
}

fn to_label_counts(counter: BTreeMap<String, usize>) -> Vec<LabelCount> {
    let max = counter.values().copied().max().unwrap_or(0);
    counter
        .into_iter()
        .map(|(label, count)| LabelCount {
            percent: if max == 0 { 0 } else { count * 100 / max },
            label,
            count,
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardSummary {
    pub counts: RiskCounts,
    /// Sorted by failure text.
    pub by_failure: Vec<LabelCount>,
    /// Sorted by risk text.
    pub by_risk: Vec<LabelCount>,
    /// Sorted by bucket key.
    pub trend: Vec<LabelCount>,
    pub recent: Vec<Incident>,
}

impl DashboardSummary {
    /// With `legacy_month_keys` each incident is counted under both
    /// `YYYY-MM` and `MM/DD/YY-MM`, reproducing the historical trend chart.
    pub fn from_incidents(incidents: &[Incident], legacy_month_keys: bool) -> Self {
        let mut failures: BTreeMap<String, usize> = BTreeMap::new();
        let mut risks: BTreeMap<String, usize> = BTreeMap::new();
        let mut months: BTreeMap<String, usize> = BTreeMap::new();

        for incident in incidents {
            *failures.entry(incident.failure.clone()).or_default() += 1;
            *risks.entry(incident.risk.clone()).or_default() += 1;
            *months.entry(incident.date.format("%Y-%m").to_string()).or_default() += 1;
            if legacy_month_keys {
                *months.entry(incident.date.format("%x-%m").to_string()).or_default() += 1;
            }
        }

        let mut recent: Vec<Incident> = incidents.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        recent.truncate(RECENT_INCIDENTS_LIMIT);

        Self {
            counts: RiskCounts::from_incidents(incidents),
            by_failure: to_label_counts(failures),
            by_risk: to_label_counts(risks),
            trend: to_label_counts(months),
            recent,
        }
    }

    /// Chart series for client-side rendering. `</` is escaped so the
    /// payload can sit inside a `<script>` element.
    pub fn chart_json(&self) -> String {
        fn split(items: &[LabelCount]) -> (Vec<&str>, Vec<usize>) {
            items.iter().map(|i| (i.label.as_str(), i.count)).unzip()
        }
        let (failure_labels, failure_counts) = split(&self.by_failure);
        let (risk_labels, risk_counts) = split(&self.by_risk);
        let (months, counts) = split(&self.trend);
        json!({
            "failure_labels": failure_labels,
            "failure_counts": failure_counts,
            "risk_labels": risk_labels,
            "risk_counts": risk_counts,
            "months": months,
            "counts": counts,
        })
        .to_string()
        .replace("</", "<\\/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn incident(id: i64, date: &str, failure: &str, risk: &str) -> Incident {
        let now = Utc::now();
        Incident {
            id,
            date: date.parse().unwrap(),
            last_maintenance_date: None,
            pressure: 0.0,
            temperature: 0.0,
            failure: failure.into(),
            risk: risk.into(),
            actions: None,
            reported_by: None,
            reported_by_username: None,
            created_at: now,
            updated_at: now,
        }
    }

    fn fixture() -> Vec<Incident> {
        vec![
            incident(1, "2024-01-05", "Valve leak", "High"),
            incident(2, "2024-01-20", "Valve leak", "high"),
            incident(3, "2024-02-01", "Pump seal", "Medium"),
            incident(4, "2023-12-31", "Crack", "LOW"),
            incident(5, "2024-02-01", "Crack", "Critical"),
            incident(6, "2022-07-07", "Corrosion", "Low"),
        ]
    }

    #[test]
    fn risk_counts_ignore_case_and_skip_unknown() {
        let counts = RiskCounts::from_incidents(&fixture());
        assert_eq!(counts, RiskCounts { total: 6, high: 2, medium: 1, low: 2 });
        assert!(counts.high + counts.medium + counts.low <= counts.total);
    }

    #[test]
    fn risk_counts_sum_to_total_for_standard_vocabulary() {
        let only_standard: Vec<Incident> = fixture().into_iter().filter(|i| i.risk != "Critical").collect();
        let counts = RiskCounts::from_incidents(&only_standard);
        assert_eq!(counts.high + counts.medium + counts.low, counts.total);
    }

    #[test]
    fn groups_are_sorted_and_exact() {
        let summary = DashboardSummary::from_incidents(&fixture(), false);
        let failures: Vec<(&str, usize)> = summary.by_failure.iter().map(|l| (l.label.as_str(), l.count)).collect();
        assert_eq!(failures, vec![("Corrosion", 1), ("Crack", 2), ("Pump seal", 1), ("Valve leak", 2)]);
        let risks: Vec<&str> = summary.by_risk.iter().map(|l| l.label.as_str()).collect();
        assert_eq!(risks, vec!["Critical", "High", "LOW", "Low", "Medium", "high"]);
    }

    #[test]
    fn trend_without_legacy_keys_is_monthly() {
        let summary = DashboardSummary::from_incidents(&fixture(), false);
        let trend: Vec<(&str, usize)> = summary.trend.iter().map(|l| (l.label.as_str(), l.count)).collect();
        assert_eq!(trend, vec![("2022-07", 1), ("2023-12", 1), ("2024-01", 2), ("2024-02", 2)]);
    }

    #[test]
    fn legacy_keys_double_count_into_the_same_trend() {
        let incidents = vec![incident(1, "2024-01-05", "A", "High")];
        let summary = DashboardSummary::from_incidents(&incidents, true);
        let trend: Vec<(&str, usize)> = summary.trend.iter().map(|l| (l.label.as_str(), l.count)).collect();
        assert_eq!(trend, vec![("01/05/24-01", 1), ("2024-01", 1)]);
    }

    #[test]
    fn recent_is_five_newest_by_date() {
        let summary = DashboardSummary::from_incidents(&fixture(), false);
        let ids: Vec<i64> = summary.recent.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![5, 3, 2, 1, 4]);
    }

    #[test]
    fn summary_is_reproducible() {
        let a = DashboardSummary::from_incidents(&fixture(), true);
        let b = DashboardSummary::from_incidents(&fixture(), true);
        assert_eq!(a.chart_json(), b.chart_json());
        assert_eq!(a.by_failure, b.by_failure);
    }

    #[test]
    fn empty_input_yields_zeroes() {
        let summary = DashboardSummary::from_incidents(&[], true);
        assert_eq!(summary.counts, RiskCounts::default());
        assert!(summary.trend.is_empty());
        assert!(summary.recent.is_empty());
    }

    #[test]
    fn chart_json_escapes_script_terminators() {
        let incidents = vec![incident(1, "2024-01-05", "</script><b>", "High")];
        let json = DashboardSummary::from_incidents(&incidents, false).chart_json();
        assert!(!json.contains("</script>"));
        assert!(json.contains("\"failure_counts\":[1]"));
    }
}
