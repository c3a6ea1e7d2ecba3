//! Alert configuration command engine.
//!
//! The engine owns the command semantics: validation, the enablement gate,
//! lazy space-config creation, room-redirect bookkeeping, and removal of a
//! space entry once its last alert is disabled. Every operation composes a
//! load → transform → save round trip over [`AlertStore`] and returns a
//! user-facing message; the message text is the only success/failure
//! signal a caller gets.
//!
//! The enablement gate is deliberately circular: enabling a target is only
//! honored when that target is already enabled (all four kinds for `all`).
//! That matches the behavior of the system this replaces and is preserved
//! as-is; seeding the store is the supported way to bootstrap a space.

use tracing::{debug, info};

use crate::messages;
use crate::query;
use crate::store::AlertStore;
use crate::types::{AlertKind, AlertTarget, Room, Space, ThresholdKind};

/// Destination for formatter events that are not the command's own reply,
/// such as room-redirect notices.
pub trait ResponseSink: Send + Sync {
    /// Delivers a message to a room.
    fn emit(&self, room: &Room, message: &str);
}

/// A [`ResponseSink`] that logs events through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl ResponseSink for LogSink {
    fn emit(&self, room: &Room, message: &str) {
        info!(room = %room, message, "formatter event");
    }
}

/// Command engine over the persisted alert configuration.
pub struct AlertConfigEngine {
    store: AlertStore,
    sink: Box<dyn ResponseSink>,
    bot_name: String,
}

impl AlertConfigEngine {
    /// Creates an engine over a store, a formatter sink, and the bot
    /// identity used in gate-failure messages and incident sources.
    pub fn new(store: AlertStore, sink: Box<dyn ResponseSink>, bot_name: impl Into<String>) -> Self {
        Self {
            store,
            sink,
            bot_name: bot_name.into(),
        }
    }

    /// Returns the underlying store handle.
    #[must_use]
    pub const fn store(&self) -> &AlertStore {
        &self.store
    }

    /// Returns the bot identity name.
    #[must_use]
    pub fn bot_name(&self) -> &str {
        &self.bot_name
    }

    /// Enables one kind or every kind for a space.
    ///
    /// Gated on the target already being enabled (see module docs). Lazily
    /// creates the space config with defaults, records the delivery room,
    /// and emits a redirect notice to both old and new rooms when the room
    /// changes.
    pub fn enable(&self, space: &Space, target: AlertTarget, room: Option<Room>) -> String {
        let mut ctx = self.store.load().unwrap_or_default();

        if !ctx.target_enabled(&space.guid, target) {
            debug!(space = %space.guid, target = %target, "enable gate not satisfied");
            return messages::must_be_enabled(target.as_str(), &space.name, &self.bot_name);
        }

        let config = ctx.space_entry(space);
        config.alerts.set_enabled(target, true);

        if let Some(new_room) = room {
            if let Some(old_room) = &config.room {
                if *old_room != new_room {
                    // Alerts follow the room they were last enabled in;
                    // both rooms get told about the move.
                    let notice = messages::room_moved(&config.name, &new_room.0);
                    self.sink.emit(old_room, &notice);
                    self.sink.emit(&new_room, &notice);
                }
            }
            config.room = Some(new_room);
        }

        let name = config.name.clone();
        self.store.save(&ctx);
        info!(space = %space.guid, target = %target, "alerts enabled");
        messages::alerts_enabled(target.as_str(), &name)
    }

    /// Overwrites the threshold for an already-enabled kind.
    ///
    /// Fails on a threshold outside `[1, 100]`, and on the lookup gate: the
    /// kind must be enabled with a configured threshold at or below the
    /// requested one.
    pub fn set_threshold(&self, space: &Space, kind: ThresholdKind, threshold: u8) -> String {
        if !(1..=100).contains(&threshold) {
            return messages::invalid_threshold(threshold);
        }

        let mut ctx = self.store.load().unwrap_or_default();
        let alert_kind = AlertKind::from(kind);

        if !ctx.is_alert_enabled(&space.guid, alert_kind, Some(threshold)) {
            debug!(space = %space.guid, kind = %kind, threshold, "threshold gate not satisfied");
            return messages::must_be_enabled_with_threshold(
                kind.as_str(),
                &space.name,
                threshold,
                &self.bot_name,
            );
        }

        let Some(config) = ctx.space_config.get_mut(&space.guid) else {
            return messages::please_enable(kind.as_str());
        };
        if !config.alerts.get(alert_kind).enabled {
            return messages::please_enable(kind.as_str());
        }

        config.alerts.get_mut(alert_kind).threshold = Some(threshold);
        self.store.save(&ctx);
        info!(space = %space.guid, kind = %kind, threshold, "alert threshold set");
        messages::threshold_set(kind.as_str(), threshold, &space.name)
    }

    /// Enables a kind and sets its threshold in one command.
    ///
    /// Validates the threshold and the single-kind gate, then composes
    /// [`Self::enable`] and [`Self::set_threshold`]. The inner replies are
    /// discarded; the combined confirmation is the command's reply.
    pub fn enable_and_set(
        &self,
        space: &Space,
        kind: ThresholdKind,
        threshold: u8,
        room: Option<Room>,
    ) -> String {
        if !(1..=100).contains(&threshold) {
            return messages::invalid_threshold(threshold);
        }

        let ctx = self.store.load().unwrap_or_default();
        let target = AlertTarget::Kind(kind.into());
        if !ctx.target_enabled(&space.guid, target) {
            return messages::must_be_enabled(kind.as_str(), &space.name, &self.bot_name);
        }

        let _ = self.enable(space, target, room);
        let _ = self.set_threshold(space, kind, threshold);
        messages::enabled_with_threshold(kind.as_str(), threshold, &space.name)
    }

    /// Disables one kind or every kind for a space.
    ///
    /// With nothing configured this is a pure no-op that answers with the
    /// informational "no alerts" message. Disabling the last enabled kind
    /// removes the space entry entirely.
    pub fn disable(&self, space: &Space, target: AlertTarget) -> String {
        let mut ctx = self.store.load().unwrap_or_default();

        let Some(config) = ctx.space_config.get_mut(&space.guid) else {
            return messages::no_alerts_to_disable(&space.name);
        };

        config.alerts.set_enabled(target, false);
        if config.alerts.all_disabled() {
            ctx.remove_space(&space.guid);
            debug!(space = %space.guid, "last alert disabled, removing space config");
        }

        self.store.save(&ctx);
        info!(space = %space.guid, target = %target, "alerts disabled");
        messages::alerts_disabled(target.as_str(), &space.name)
    }

    /// Renders the listing of every space with an enabled alert.
    #[must_use]
    pub fn list(&self) -> String {
        query::list_alerts(self.store.load().as_ref())
    }
}

impl std::fmt::Debug for AlertConfigEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertConfigEngine")
            .field("bot_name", &self.bot_name)
            .finish_non_exhaustive()
    }
}
