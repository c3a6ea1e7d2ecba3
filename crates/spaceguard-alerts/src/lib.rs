//! Per-space resource alert configuration for SpaceGuard.
//!
//! `spaceguard-alerts` owns the alert-configuration state engine of the
//! SpaceGuard chat-bot extension: enabling, disabling, and
//! threshold-configuring CPU, memory, disk, and crash alerts per workspace
//! ("space"), plus the listing query over that configuration.
//!
//! # Features
//!
//! - **Typed command seams**: alert kinds and targets are enums; token
//!   normalization (trim, lowercase, the legacy `event` alias for `crash`)
//!   happens once at the `FromStr` boundary
//! - **Explicit persistence boundary**: the bot platform's key-value store
//!   is abstracted behind [`ContextStore`]; every mutation is a full
//!   read-modify-write of [`AlertContext`] under one key
//! - **Exact-string replies**: commands answer with user-facing message
//!   strings from [`messages`]; there is no separate error channel
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use spaceguard_alerts::{
//!     AlertConfigEngine, AlertContext, AlertStore, AlertTarget, LogSink, MemoryStore, Space,
//! };
//!
//! let store = AlertStore::new(Arc::new(MemoryStore::default()));
//!
//! // The enable gate is deliberately circular: a target is only honored
//! // when it is already enabled, so bootstrap by seeding the store.
//! let space = Space::new("guid-1", "production");
//! let mut ctx = AlertContext::default();
//! ctx.space_entry(&space).enable_all();
//! store.save(&ctx);
//!
//! let engine = AlertConfigEngine::new(store, Box::new(LogSink), "guardbot");
//! let reply = engine.enable(&space, AlertTarget::All, None);
//! assert!(reply.contains("enabled"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod engine;
pub mod error;
pub mod messages;
pub mod query;
pub mod store;
pub mod types;

// Re-export main types at crate root
pub use engine::{AlertConfigEngine, LogSink, ResponseSink};
pub use error::{AlertError, Result};
pub use query::{list_alerts, spaces_with_enabled_alerts};
pub use store::{AlertStore, CONTEXT_KEY, ContextStore, MemoryStore};
pub use types::{
    AlertContext, AlertKind, AlertSetting, AlertTarget, DEFAULT_THRESHOLD, Room, Space,
    SpaceAlertConfig, SpaceAlerts, ThresholdKind,
};
