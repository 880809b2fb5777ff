//! Core store-update logic for Nudge.
//!
//! This crate holds the pieces that never touch a store, a network, or a UI:
//! - Store identifier validation (Play package names, App Store ids/URLs).
//! - Dotted numeric version parsing and comparison.
//! - Allow-listed store deep-link construction.
//! - The update data model and updater options.

mod error;
mod options;
mod platform;
pub mod store_url;
mod types;
pub mod validation;
mod version;

/// Validation failures raised synchronously for configuration mistakes.
pub use error::ValidationError;
/// Updater configuration and its platform validation.
pub use options::{AppUpdaterOptions, DEFAULT_CHECK_INTERVAL, DEFAULT_REMIND_LATER_DAYS};
/// Store platform selection.
pub use platform::StorePlatform;
/// Safe deep-link builders for both stores.
pub use store_url::{
    StoreUrls, apple_app_id, build_apple_web_url, build_play_store_url, build_play_web_url,
    build_safe_apple_store_url, store_urls_for,
};
/// Update model shared by providers, the facade, and callers.
pub use types::{UpdateInfo, UpdateStrategy, UpdateType};
/// Identifier validators.
pub use validation::{is_valid_apple_id_or_url, is_valid_play_package_name};
/// Version model and comparison helpers.
pub use version::{Version, is_newer_version, parse_version};
