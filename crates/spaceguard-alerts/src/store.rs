//! Persistence boundary for the alert context.
//!
//! The bot platform owns the actual key-value backend ("brain"); this module
//! only defines the pass-through contract and the [`AlertStore`] handle that
//! round-trips the whole [`AlertContext`] under one well-known key. There is
//! no merge logic: every mutation is a full read-modify-write, and callers
//! treat that sequence as logically atomic within one command handling.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tracing::warn;

use crate::types::AlertContext;

/// The single key the alert context is persisted under.
///
/// Predecessor code paths disagreed between a read-side and a write-side
/// key; this implementation unifies on one.
pub const CONTEXT_KEY: &str = "alert.notification.context";

/// External key-value collaborator contract. No validation, pure
/// pass-through.
pub trait ContextStore: Send + Sync {
    /// Returns the stored value for a key, if any.
    fn get(&self, key: &str) -> Option<Value>;

    /// Stores a value under a key, replacing any previous value.
    fn set(&self, key: &str, value: Value);
}

/// In-process [`ContextStore`] standing in for the bot brain.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, Value>>,
}

impl ContextStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.read().get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) {
        self.entries.write().insert(key.to_string(), value);
    }
}

/// Cheap-to-clone handle binding a backend to [`CONTEXT_KEY`].
#[derive(Clone)]
pub struct AlertStore {
    backend: Arc<dyn ContextStore>,
}

impl AlertStore {
    /// Creates a store handle over the given backend.
    #[must_use]
    pub fn new(backend: Arc<dyn ContextStore>) -> Self {
        Self { backend }
    }

    /// Loads the persisted context. Absent or malformed state reads as
    /// "no alerts configured"; malformed state is logged and dropped.
    #[must_use]
    pub fn load(&self) -> Option<AlertContext> {
        let value = self.backend.get(CONTEXT_KEY)?;
        match serde_json::from_value(value) {
            Ok(ctx) => Some(ctx),
            Err(e) => {
                warn!(key = CONTEXT_KEY, error = %e, "discarding malformed alert context");
                None
            }
        }
    }

    /// Persists the context wholesale.
    pub fn save(&self, ctx: &AlertContext) {
        match serde_json::to_value(ctx) {
            Ok(value) => self.backend.set(CONTEXT_KEY, value),
            Err(e) => {
                warn!(key = CONTEXT_KEY, error = %e, "failed to serialize alert context");
            }
        }
    }
}

impl std::fmt::Debug for AlertStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlertStore").finish_non_exhaustive()
    }
}
