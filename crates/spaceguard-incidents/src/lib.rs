//! Activity classification and incident dispatch for SpaceGuard.
//!
//! `spaceguard-incidents` turns platform activity events (threshold
//! violations, application crashes) into incident reports and delivers
//! them to the configured notification endpoint over HTTP.
//!
//! The decision of whether an activity warrants an incident lives in
//! [`is_alertable`] and reads the per-space configuration owned by
//! [`spaceguard_alerts`]. Delivery is fire-and-forget: failures are
//! logged and never reach the activity source.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod activity;
pub mod dispatch;
pub mod error;
pub mod report;

// Re-export main types at crate root
pub use activity::{
    ACTIVITY_CPU, ACTIVITY_CRASH, ACTIVITY_DISK, ACTIVITY_MEMORY, Activity, classify, is_alertable,
};
pub use dispatch::{
    ActivityListener, ENV_ENDPOINT, ENV_PASSWORD, ENV_USERNAME, IncidentDispatcher, NotifierConfig,
};
pub use error::{DispatchError, Result};
pub use report::IncidentReport;
