//! Store update checks for mobile apps.
//!
//! [`AppUpdater`] asks a [`StoreUpdateProvider`] whether a newer build is
//! published, decides how disruptive the update should be, and either runs
//! the store's in-app update flow or opens the store page. A
//! [`ReminderGate`] keeps "remind me later" choices from re-prompting too
//! soon.
//!
//! Providers for Google Play and the App Store live in `nudge-play` and
//! `nudge-appstore`; host-side storage and URL opening in `nudge-platform`.

mod error;
pub mod logging;
pub mod reminder;
pub mod settings;
mod updater;

pub use error::{OperationError, UpdaterError};
pub use reminder::{FallbackPreferenceStore, InMemoryPreferenceStore, ReminderGate};
pub use updater::{AppUpdater, PromptOutcome};

pub use nudge_backend::{
    BackendError, PreferenceError, PreferenceStore, PromptChoice, StoreAvailability,
    StoreUpdateProvider, UpdateFlow, UpdatePresenter, UrlOpener,
};
pub use nudge_core::{
    AppUpdaterOptions, StorePlatform, StoreUrls, UpdateInfo, UpdateStrategy, UpdateType,
    ValidationError, Version, build_safe_apple_store_url, is_newer_version,
    is_valid_apple_id_or_url, is_valid_play_package_name, parse_version,
};
pub use nudge_platform::{JsonFilePreferenceStore, SystemUrlOpener};
