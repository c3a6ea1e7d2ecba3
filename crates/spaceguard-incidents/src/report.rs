//! The outbound incident payload.

use serde::{Deserialize, Serialize};

use spaceguard_alerts::AlertKind;

use crate::activity::Activity;

/// The incident body POSTed to the notification endpoint.
///
/// Field names are the endpoint's wire contract; the report is transient
/// and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IncidentReport {
    /// Human-readable summary of what happened.
    pub what: String,
    /// The space the incident occurred in.
    pub r#where: String,
    /// Always `"Critical"`.
    pub severity: String,
    /// The bot identity that reported the incident.
    pub source: String,
    /// The affected applications; always a singleton today.
    pub applications_or_services: Vec<String>,
}

impl IncidentReport {
    /// Builds a report for an alertable activity.
    #[must_use]
    pub fn from_activity(activity: &Activity, kind: AlertKind, source: &str) -> Self {
        Self {
            what: summary(kind, activity),
            r#where: activity.space_name.clone(),
            severity: "Critical".to_string(),
            source: source.to_string(),
            applications_or_services: vec![activity.app_name.clone()],
        }
    }
}

/// Kind-keyed summary template. Threshold kinds carry the observed
/// percentage with a literal `%` suffix; crashes carry none.
fn summary(kind: AlertKind, activity: &Activity) -> String {
    let app = &activity.app_name;
    let observed = activity.threshold_percentage.unwrap_or_default();
    match kind {
        AlertKind::Cpu => {
            format!("CPU usage for application {app} has exceeded the threshold of {observed}%.")
        }
        AlertKind::Memory => {
            format!("Memory usage for application {app} has exceeded the threshold of {observed}%.")
        }
        AlertKind::Disk => {
            format!("Disk usage for application {app} has exceeded the threshold of {observed}%.")
        }
        AlertKind::Crash => format!("Application {app} has crashed."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::activity::{ACTIVITY_CRASH, ACTIVITY_MEMORY};

    fn memory_activity() -> Activity {
        Activity {
            activity_id: ACTIVITY_MEMORY.to_string(),
            app_name: "orders-api".to_string(),
            app_guid: None,
            space_name: "testSpace".to_string(),
            space_guid: "g1".to_string(),
            threshold_percentage: Some(95),
        }
    }

    #[test]
    fn report_carries_space_severity_and_source() {
        let report = IncidentReport::from_activity(&memory_activity(), AlertKind::Memory, "guardbot");

        assert_eq!(report.r#where, "testSpace");
        assert_eq!(report.severity, "Critical");
        assert_eq!(report.source, "guardbot");
        assert_eq!(report.applications_or_services, vec!["orders-api".to_string()]);
        assert!(report.what.contains("95%"));
        assert!(report.what.contains("orders-api"));
    }

    #[test]
    fn crash_summary_has_no_percentage() {
        let activity = Activity {
            activity_id: ACTIVITY_CRASH.to_string(),
            threshold_percentage: None,
            ..memory_activity()
        };
        let report = IncidentReport::from_activity(&activity, AlertKind::Crash, "guardbot");

        assert_eq!(report.what, "Application orders-api has crashed.");
        assert!(!report.what.contains('%'));
    }

    #[test]
    fn wire_field_names_are_pascal_case() {
        let report = IncidentReport::from_activity(&memory_activity(), AlertKind::Memory, "guardbot");
        let json = serde_json::to_value(&report).unwrap();

        assert!(json.get("What").is_some());
        assert!(json.get("Where").is_some());
        assert_eq!(json["Severity"], "Critical");
        assert!(json.get("ApplicationsOrServices").is_some());
    }
}
