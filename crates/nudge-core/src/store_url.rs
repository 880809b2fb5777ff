//! Deep-link construction for store pages.
//!
//! Output URLs come from fixed templates with only a validated identifier
//! substituted. Path or query content from the input is never echoed back.

use crate::error::ValidationError;
use crate::options::AppUpdaterOptions;
use crate::platform::StorePlatform;
use crate::validation::{APP_STORE_URL, is_valid_play_package_name};

const APPLE_NATIVE_PREFIX: &str = "itms-apps://apps.apple.com/app/id";
const APPLE_WEB_PREFIX: &str = "https://apps.apple.com/app/id";
const PLAY_NATIVE_PREFIX: &str = "market://details?id=";
const PLAY_WEB_PREFIX: &str = "https://play.google.com/store/apps/details?id=";

/// Native store URL plus the web page to fall back to when no store app
/// handles the native scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreUrls {
    pub native: String,
    pub web: String,
}

/// Extract the numeric App Store id from an id or `apps.apple.com` URL.
///
/// # Errors
/// Returns [`ValidationError::InvalidStoreIdentifier`] when no id can be
/// extracted or the numeric id is negative.
pub fn apple_app_id(id_or_url: &str) -> Result<String, ValidationError> {
    if id_or_url.trim().is_empty() {
        return Err(ValidationError::invalid_store_identifier(id_or_url));
    }

    // Validation accepts any integer; only non-negative ids make a link.
    if let Ok(id) = id_or_url.parse::<i64>() {
        return if id < 0 {
            Err(ValidationError::invalid_store_identifier(id_or_url))
        } else {
            Ok(id.to_string())
        };
    }

    APP_STORE_URL
        .captures(id_or_url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
        .ok_or_else(|| ValidationError::invalid_store_identifier(id_or_url))
}

/// Build an `itms-apps://` link from a numeric App Store id or an
/// `https://apps.apple.com/.../id<digits>` URL.
///
/// # Errors
/// Returns [`ValidationError::InvalidStoreIdentifier`] for blank input or
/// anything that is neither an integer nor an `apps.apple.com` URL.
pub fn build_safe_apple_store_url(id_or_url: &str) -> Result<String, ValidationError> {
    apple_app_id(id_or_url).map(|id| format!("{APPLE_NATIVE_PREFIX}{id}"))
}

/// Web counterpart of [`build_safe_apple_store_url`].
///
/// # Errors
/// Same as [`build_safe_apple_store_url`].
pub fn build_apple_web_url(id_or_url: &str) -> Result<String, ValidationError> {
    apple_app_id(id_or_url).map(|id| format!("{APPLE_WEB_PREFIX}{id}"))
}

fn checked_package(package_name: &str) -> Result<&str, ValidationError> {
    if is_valid_play_package_name(package_name) {
        Ok(package_name)
    } else {
        Err(ValidationError::invalid_store_identifier(package_name))
    }
}

/// Build a `market://` link for a Play package.
///
/// # Errors
/// Returns [`ValidationError::InvalidStoreIdentifier`] when the package name
/// is not a valid Play package name.
pub fn build_play_store_url(package_name: &str) -> Result<String, ValidationError> {
    checked_package(package_name).map(|name| format!("{PLAY_NATIVE_PREFIX}{name}"))
}

/// Web counterpart of [`build_play_store_url`].
///
/// # Errors
/// Same as [`build_play_store_url`].
pub fn build_play_web_url(package_name: &str) -> Result<String, ValidationError> {
    checked_package(package_name).map(|name| format!("{PLAY_WEB_PREFIX}{name}"))
}

/// Resolve both store URLs for `platform` from the configured identifier.
///
/// # Errors
/// Returns [`ValidationError::Configuration`] when the identifier for the
/// platform is missing, or [`ValidationError::InvalidStoreIdentifier`] when it
/// is malformed.
pub fn store_urls_for(
    platform: StorePlatform,
    options: &AppUpdaterOptions,
) -> Result<StoreUrls, ValidationError> {
    match platform {
        StorePlatform::Android => {
            let package = options.play_package_name.as_deref().ok_or_else(|| {
                ValidationError::configuration("Play Store package name not configured")
            })?;
            Ok(StoreUrls {
                native: build_play_store_url(package)?,
                web: build_play_web_url(package)?,
            })
        }
        StorePlatform::Ios => {
            let id_or_url = options.app_store_id_or_url.as_deref().ok_or_else(|| {
                ValidationError::configuration("App Store ID/URL not configured")
            })?;
            Ok(StoreUrls {
                native: build_safe_apple_store_url(id_or_url)?,
                web: build_apple_web_url(id_or_url)?,
            })
        }
    }
}
