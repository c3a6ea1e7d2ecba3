//! Core types for per-space alert configuration.
//!
//! This module provides the data model shared across the SpaceGuard crates:
//! - [`AlertKind`]: the class of monitored condition
//! - [`AlertTarget`]: a single kind or `all`, as supplied by commands
//! - [`AlertSetting`]: enablement plus optional threshold for one kind
//! - [`SpaceAlertConfig`]: everything configured for one space
//! - [`AlertContext`]: the whole persisted mapping of spaces

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AlertError;

/// Default utilization threshold applied when a space is first configured.
pub const DEFAULT_THRESHOLD: u8 = 85;

/// A class of monitored condition.
///
/// Older persisted configurations stored the crash setting under the key
/// `event`; the alias keeps those readable while everything written going
/// forward uses `crash`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    /// CPU utilization threshold violations.
    Cpu,
    /// Memory utilization threshold violations.
    Memory,
    /// Disk utilization threshold violations.
    Disk,
    /// Application crash events (boolean only, never carries a threshold).
    #[serde(alias = "event")]
    Crash,
}

impl AlertKind {
    /// All kinds, in the order configuration listings render them.
    pub const ALL: [Self; 4] = [Self::Cpu, Self::Memory, Self::Disk, Self::Crash];

    /// Legacy command/storage token accepted for [`AlertKind::Crash`].
    pub const LEGACY_CRASH_TOKEN: &'static str = "event";

    /// Returns the canonical token for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
            Self::Crash => "crash",
        }
    }

    /// Returns true if this kind carries a percentage threshold.
    #[must_use]
    pub const fn has_threshold(&self) -> bool {
        !matches!(self, Self::Crash)
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for AlertKind {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "memory" => Ok(Self::Memory),
            "disk" => Ok(Self::Disk),
            "crash" | Self::LEGACY_CRASH_TOKEN => Ok(Self::Crash),
            other => Err(AlertError::UnknownToken {
                token: other.to_string(),
            }),
        }
    }
}

/// The threshold-bearing subset of [`AlertKind`].
///
/// The set-threshold and enable-and-set commands only ever apply to these;
/// `crash` and `all` are rejected at the parse seam.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    /// CPU utilization.
    Cpu,
    /// Memory utilization.
    Memory,
    /// Disk utilization.
    Disk,
}

impl ThresholdKind {
    /// Returns the canonical token for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cpu => "cpu",
            Self::Memory => "memory",
            Self::Disk => "disk",
        }
    }
}

impl From<ThresholdKind> for AlertKind {
    fn from(kind: ThresholdKind) -> Self {
        match kind {
            ThresholdKind::Cpu => Self::Cpu,
            ThresholdKind::Memory => Self::Memory,
            ThresholdKind::Disk => Self::Disk,
        }
    }
}

impl fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ThresholdKind {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cpu" => Ok(Self::Cpu),
            "memory" => Ok(Self::Memory),
            "disk" => Ok(Self::Disk),
            other => Err(AlertError::UnknownToken {
                token: other.to_string(),
            }),
        }
    }
}

/// What an enable/disable command applies to: one kind, or everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AlertTarget {
    /// A single alert kind.
    Kind(AlertKind),
    /// Every alert kind at once.
    #[default]
    All,
}

impl AlertTarget {
    /// Returns the canonical token for this target.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Kind(kind) => kind.as_str(),
            Self::All => "all",
        }
    }
}

impl fmt::Display for AlertTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<AlertKind> for AlertTarget {
    fn from(kind: AlertKind) -> Self {
        Self::Kind(kind)
    }
}

impl FromStr for AlertTarget {
    type Err = AlertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        if token == "all" {
            Ok(Self::All)
        } else {
            token.parse::<AlertKind>().map(Self::Kind)
        }
    }
}

/// Enablement and optional threshold for one alert kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertSetting {
    /// Whether this kind is currently enabled.
    pub enabled: bool,
    /// Percentage threshold in `[1, 100]`; absent for crash alerts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<u8>,
}

impl AlertSetting {
    /// A disabled setting with the given threshold.
    #[must_use]
    pub const fn disabled_at(threshold: u8) -> Self {
        Self {
            enabled: false,
            threshold: Some(threshold),
        }
    }

    /// A disabled setting with no threshold (crash).
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            threshold: None,
        }
    }
}

/// The per-kind settings for one space, in fixed kind order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpaceAlerts {
    /// CPU setting.
    pub cpu: AlertSetting,
    /// Memory setting.
    pub memory: AlertSetting,
    /// Disk setting.
    pub disk: AlertSetting,
    /// Crash setting; read under the legacy `event` key too.
    #[serde(alias = "event")]
    pub crash: AlertSetting,
}

impl Default for SpaceAlerts {
    fn default() -> Self {
        Self {
            cpu: AlertSetting::disabled_at(DEFAULT_THRESHOLD),
            memory: AlertSetting::disabled_at(DEFAULT_THRESHOLD),
            disk: AlertSetting::disabled_at(DEFAULT_THRESHOLD),
            crash: AlertSetting::disabled(),
        }
    }
}

impl SpaceAlerts {
    /// Returns the setting for a kind.
    #[must_use]
    pub const fn get(&self, kind: AlertKind) -> &AlertSetting {
        match kind {
            AlertKind::Cpu => &self.cpu,
            AlertKind::Memory => &self.memory,
            AlertKind::Disk => &self.disk,
            AlertKind::Crash => &self.crash,
        }
    }

    /// Returns the mutable setting for a kind.
    pub const fn get_mut(&mut self, kind: AlertKind) -> &mut AlertSetting {
        match kind {
            AlertKind::Cpu => &mut self.cpu,
            AlertKind::Memory => &mut self.memory,
            AlertKind::Disk => &mut self.disk,
            AlertKind::Crash => &mut self.crash,
        }
    }

    /// Iterates settings in listing order (cpu, memory, disk, crash).
    pub fn iter(&self) -> impl Iterator<Item = (AlertKind, &AlertSetting)> {
        AlertKind::ALL.into_iter().map(|kind| (kind, self.get(kind)))
    }

    /// Marks a single kind or every kind as enabled.
    pub fn set_enabled(&mut self, target: AlertTarget, enabled: bool) {
        match target {
            AlertTarget::Kind(kind) => self.get_mut(kind).enabled = enabled,
            AlertTarget::All => {
                for kind in AlertKind::ALL {
                    self.get_mut(kind).enabled = enabled;
                }
            }
        }
    }

    /// Returns true if no kind is enabled.
    #[must_use]
    pub fn all_disabled(&self) -> bool {
        AlertKind::ALL.into_iter().all(|kind| !self.get(kind).enabled)
    }
}

/// A workspace identity as handed in by the command router.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Space {
    /// Stable space identifier.
    pub guid: String,
    /// Human-readable space name.
    pub name: String,
}

impl Space {
    /// Creates a space identity.
    pub fn new(guid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            guid: guid.into(),
            name: name.into(),
        }
    }
}

/// An opaque chat-room reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Room(pub String);

impl Room {
    /// Creates a room reference.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Everything configured for one space.
///
/// A config whose settings are all disabled must not persist; the engine
/// removes the entry when the last enabled kind is turned off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpaceAlertConfig {
    /// Stable space identifier.
    pub guid: String,
    /// Human-readable space name.
    pub name: String,
    /// Per-kind settings.
    pub alerts: SpaceAlerts,
    /// The room alerts for this space are delivered to, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room: Option<Room>,
}

impl SpaceAlertConfig {
    /// Creates a fresh config with every kind disabled at defaults.
    #[must_use]
    pub fn new(space: &Space) -> Self {
        Self {
            guid: space.guid.clone(),
            name: space.name.clone(),
            alerts: SpaceAlerts::default(),
            room: None,
        }
    }

    /// Enables every kind. Mostly useful for seeding state in tests and
    /// bootstrap flows, since the engine gate requires prior enablement.
    pub fn enable_all(&mut self) -> &mut Self {
        self.alerts.set_enabled(AlertTarget::All, true);
        self
    }
}

/// The whole persisted alert configuration, one entry per space that has
/// at least one alert enabled.
///
/// The context is replaced wholesale on every mutation: the engine always
/// performs a full read-modify-write, never a partial merge. `BTreeMap`
/// keeps iteration deterministic for listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlertContext {
    /// Per-space configuration keyed by space guid.
    pub space_config: BTreeMap<String, SpaceAlertConfig>,
}

impl AlertContext {
    /// Returns the config for a space, if any.
    #[must_use]
    pub fn space(&self, guid: &str) -> Option<&SpaceAlertConfig> {
        self.space_config.get(guid)
    }

    /// Returns the config for a space, creating a default entry if absent.
    pub fn space_entry(&mut self, space: &Space) -> &mut SpaceAlertConfig {
        self.space_config
            .entry(space.guid.clone())
            .or_insert_with(|| SpaceAlertConfig::new(space))
    }

    /// Removes a space entry entirely.
    pub fn remove_space(&mut self, guid: &str) -> Option<SpaceAlertConfig> {
        self.space_config.remove(guid)
    }

    /// True iff the space exists, the kind is enabled, and — for
    /// threshold-bearing kinds with a threshold argument — the configured
    /// threshold is at or below the given one. Crash is boolean-only.
    #[must_use]
    pub fn is_alert_enabled(&self, guid: &str, kind: AlertKind, threshold: Option<u8>) -> bool {
        let Some(config) = self.space(guid) else {
            return false;
        };
        let setting = config.alerts.get(kind);
        if !setting.enabled {
            return false;
        }
        if kind == AlertKind::Crash {
            return true;
        }
        match threshold {
            None => true,
            Some(given) => setting.threshold.is_some_and(|configured| configured <= given),
        }
    }

    /// True iff cpu, memory, disk and crash are all enabled for the space.
    #[must_use]
    pub fn all_enabled(&self, guid: &str) -> bool {
        AlertKind::ALL
            .into_iter()
            .all(|kind| self.is_alert_enabled(guid, kind, None))
    }

    /// The gate applied before honoring an enable-style command: the target
    /// (every kind for `all`) must already be enabled. Deliberately
    /// circular; preserved from the system this replaces.
    #[must_use]
    pub fn target_enabled(&self, guid: &str, target: AlertTarget) -> bool {
        match target {
            AlertTarget::All => self.all_enabled(guid),
            AlertTarget::Kind(kind) => self.is_alert_enabled(guid, kind, None),
        }
    }
}
