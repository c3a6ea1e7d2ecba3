//! Inbound activity events and the alertability decision.

use serde::{Deserialize, Serialize};

use spaceguard_alerts::{AlertContext, AlertKind};

/// Activity id for CPU threshold violations.
pub const ACTIVITY_CPU: &str = "activity.threshold.violation.cpu";
/// Activity id for memory threshold violations.
pub const ACTIVITY_MEMORY: &str = "activity.threshold.violation.memory";
/// Activity id for disk threshold violations.
pub const ACTIVITY_DISK: &str = "activity.threshold.violation.disk";
/// Activity id for application crashes.
pub const ACTIVITY_CRASH: &str = "activity.app.crash";

/// A runtime occurrence reported by the platform, to be evaluated against
/// the per-space alert configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Well-known activity identifier.
    pub activity_id: String,
    /// Application the activity concerns.
    pub app_name: String,
    /// Application guid, when the emitter provides one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_guid: Option<String>,
    /// Human-readable space name.
    pub space_name: String,
    /// Stable space identifier.
    pub space_guid: String,
    /// Observed utilization percentage; absent for crash activities.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threshold_percentage: Option<u8>,
}

/// Maps an activity id to an alert kind. Anything but the four well-known
/// ids is not alertable.
#[must_use]
pub fn classify(activity_id: &str) -> Option<AlertKind> {
    match activity_id {
        ACTIVITY_CPU => Some(AlertKind::Cpu),
        ACTIVITY_MEMORY => Some(AlertKind::Memory),
        ACTIVITY_DISK => Some(AlertKind::Disk),
        ACTIVITY_CRASH => Some(AlertKind::Crash),
        _ => None,
    }
}

/// Decides whether an activity qualifies for an incident.
///
/// True exactly when the activity classifies to a kind, its space is
/// configured, the kind's setting is enabled, and — for threshold kinds —
/// both a configured threshold and an observed percentage exist with
/// configured ≤ observed. Crash activities alert on enablement alone.
#[must_use]
pub fn is_alertable(ctx: Option<&AlertContext>, activity: &Activity) -> bool {
    let Some(kind) = classify(&activity.activity_id) else {
        return false;
    };
    let Some(config) = ctx.and_then(|ctx| ctx.space(&activity.space_guid)) else {
        return false;
    };

    let setting = config.alerts.get(kind);
    if !setting.enabled {
        return false;
    }
    if kind == AlertKind::Crash {
        return true;
    }

    match (setting.threshold, activity.threshold_percentage) {
        (Some(configured), Some(observed)) => configured <= observed,
        _ => false,
    }
}
