//! "Remind me later" throttling for update prompts.
//!
//! A [`ReminderGate`] records, per key, the instant before which the user
//! should not be prompted again. Records live in a [`FallbackPreferenceStore`]:
//! a persistent primary backend with an in-memory shadow that takes over for
//! the rest of the session once the primary fails.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use nudge_backend::{PreferenceError, PreferenceStore};

const KEY_PREFIX: &str = "nudge_remind_";
const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: Mutex<HashMap<String, i64>>,
}

impl InMemoryPreferenceStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn values(&self) -> std::sync::MutexGuard<'_, HashMap<String, i64>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl PreferenceStore for InMemoryPreferenceStore {
    fn get(&self, key: &str) -> Result<Option<i64>, PreferenceError> {
        Ok(self.values().get(key).copied())
    }

    fn set(&self, key: &str, value: i64) -> Result<(), PreferenceError> {
        self.values().insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), PreferenceError> {
        self.values().remove(key);
        Ok(())
    }
}

/// Primary preference backend with an in-memory fallback.
///
/// Every write is mirrored into memory. The first primary failure switches
/// the store to session-only mode, after which the primary is not touched.
pub struct FallbackPreferenceStore {
    primary: Option<Arc<dyn PreferenceStore>>,
    memory: InMemoryPreferenceStore,
    degraded: AtomicBool,
}

impl FallbackPreferenceStore {
    #[must_use]
    pub fn new(primary: Arc<dyn PreferenceStore>) -> Self {
        Self {
            primary: Some(primary),
            memory: InMemoryPreferenceStore::new(),
            degraded: AtomicBool::new(false),
        }
    }

    #[must_use]
    pub fn session_only() -> Self {
        Self {
            primary: None,
            memory: InMemoryPreferenceStore::new(),
            degraded: AtomicBool::new(true),
        }
    }

    /// Whether reads and writes are served from memory only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.degraded.load(Ordering::Acquire)
    }

    fn active_primary(&self) -> Option<&dyn PreferenceStore> {
        if self.is_degraded() {
            None
        } else {
            self.primary.as_deref()
        }
    }

    fn degrade(&self, operation: &str, error: &PreferenceError) {
        if !self.degraded.swap(true, Ordering::AcqRel) {
            warn!("Preference store {operation} failed, keeping reminders in memory: {error}");
        }
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<i64> {
        if let Some(primary) = self.active_primary() {
            match primary.get(key) {
                Ok(value) => return value,
                Err(error) => self.degrade("read", &error),
            }
        }
        self.memory.values().get(key).copied()
    }

    pub fn set(&self, key: &str, value: i64) {
        self.memory.values().insert(key.to_string(), value);
        if let Some(primary) = self.active_primary()
            && let Err(error) = primary.set(key, value)
        {
            self.degrade("write", &error);
        }
    }

    pub fn remove(&self, key: &str) {
        self.memory.values().remove(key);
        if let Some(primary) = self.active_primary()
            && let Err(error) = primary.remove(key)
        {
            self.degrade("remove", &error);
        }
    }
}

/// Per-key "do not prompt before" timestamps in UTC epoch seconds.
pub struct ReminderGate {
    store: FallbackPreferenceStore,
}

impl ReminderGate {
    #[must_use]
    pub fn new(primary: Arc<dyn PreferenceStore>) -> Self {
        Self {
            store: FallbackPreferenceStore::new(primary),
        }
    }

    /// A gate that only remembers deferrals for the current session.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            store: FallbackPreferenceStore::session_only(),
        }
    }

    #[must_use]
    pub fn store(&self) -> &FallbackPreferenceStore {
        &self.store
    }

    #[must_use]
    pub fn should_prompt(&self, key: &str) -> bool {
        self.should_prompt_at(key, Utc::now())
    }

    #[must_use]
    pub fn should_prompt_at(&self, key: &str, now: DateTime<Utc>) -> bool {
        match self.store.get(&preference_key(key)) {
            None | Some(0) => true,
            Some(remind_at) => now.timestamp() >= remind_at,
        }
    }

    /// Suppress prompts for `key` until `days_later` days from now. Zero or
    /// negative values leave prompting allowed immediately.
    pub fn set_remind_later(&self, key: &str, days_later: i64) {
        self.set_remind_later_at(key, days_later, Utc::now());
    }

    pub fn set_remind_later_at(&self, key: &str, days_later: i64, now: DateTime<Utc>) {
        let remind_at = now
            .timestamp()
            .saturating_add(days_later.saturating_mul(SECONDS_PER_DAY));
        debug!("Deferring update prompt {key} until {remind_at}");
        self.store.set(&preference_key(key), remind_at);
    }

    pub fn clear(&self, key: &str) {
        self.store.remove(&preference_key(key));
    }

    /// The stored deferral instant, if any.
    #[must_use]
    pub fn remind_at(&self, key: &str) -> Option<DateTime<Utc>> {
        self.store
            .get(&preference_key(key))
            .filter(|&timestamp| timestamp != 0)
            .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
    }
}

impl Default for ReminderGate {
    fn default() -> Self {
        Self::in_memory()
    }
}

fn preference_key(key: &str) -> String {
    format!("{KEY_PREFIX}{key}")
}
