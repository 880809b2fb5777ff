use async_trait::async_trait;
use nudge_core::{AppUpdaterOptions, StorePlatform, StoreUrls, UpdateInfo, ValidationError};

use crate::error::{BackendError, PreferenceError};
use crate::types::{PromptChoice, StoreAvailability, UpdateFlow};

/// A store the app is distributed through.
///
/// One implementation exists per platform; callers pick the variant that
/// matches their build and hand it to the updater.
#[async_trait]
pub trait StoreUpdateProvider: Send + Sync {
    fn platform(&self) -> StorePlatform;

    async fn query_update_availability(
        &self,
        options: &AppUpdaterOptions,
    ) -> Result<StoreAvailability, BackendError>;

    /// Whether `available` in [`StoreAvailability`] already means "newer than
    /// the installed build".
    ///
    /// Providers that only report the latest listed version return `false`;
    /// the updater then needs `current_version` to decide.
    fn reports_newer_only(&self) -> bool {
        true
    }

    /// Whether this provider can run update flows inside the app.
    fn supports_in_app_updates(&self) -> bool {
        false
    }

    async fn launch_update_flow(&self, _flow: UpdateFlow) -> Result<bool, BackendError> {
        Err(BackendError::Unsupported {
            operation: "launch_update_flow",
        })
    }

    fn store_urls(&self, options: &AppUpdaterOptions) -> Result<StoreUrls, ValidationError> {
        nudge_core::store_urls_for(self.platform(), options)
    }
}

#[async_trait]
pub trait UrlOpener: Send + Sync {
    /// Open `url` with whatever handles its scheme. `Ok(false)` means no
    /// handler accepted it.
    async fn open_url(&self, url: &str) -> Result<bool, BackendError>;
}

/// Process-wide integer preferences.
pub trait PreferenceStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<i64>, PreferenceError>;

    fn set(&self, key: &str, value: i64) -> Result<(), PreferenceError>;

    fn remove(&self, key: &str) -> Result<(), PreferenceError>;
}

/// Shows an update prompt and reports the user's choice.
#[async_trait]
pub trait UpdatePresenter: Send + Sync {
    async fn present(&self, info: &UpdateInfo) -> Result<PromptChoice, BackendError>;
}
