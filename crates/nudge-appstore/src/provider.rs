use async_trait::async_trait;
use log::debug;
use nudge_backend::{BackendError, StoreAvailability, StoreUpdateProvider};
use nudge_core::{AppUpdaterOptions, StorePlatform, ValidationError, apple_app_id};

use crate::lookup::{LOOKUP_URL, availability_from_lookup, lookup_app};

/// Apple App Store variant of [`StoreUpdateProvider`].
///
/// Update flows always happen in the App Store app, so the updater opens the
/// store page for both flexible and immediate updates.
#[derive(Debug, Clone)]
pub struct AppStoreProvider {
    client: reqwest::Client,
    country: Option<String>,
    lookup_url: String,
}

impl AppStoreProvider {
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            country: None,
            lookup_url: LOOKUP_URL.to_string(),
        }
    }

    /// Restrict lookups to one storefront, given as a two-letter country code.
    ///
    /// # Errors
    /// Returns [`ValidationError::Configuration`] when `country` is not two
    /// ASCII letters.
    pub fn with_country(mut self, country: &str) -> Result<Self, ValidationError> {
        if country.len() != 2 || !country.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ValidationError::configuration(format!(
                "Invalid App Store country code: {country:?}"
            )));
        }
        self.country = Some(country.to_ascii_lowercase());
        Ok(self)
    }

    #[must_use]
    pub fn with_lookup_url(mut self, lookup_url: impl Into<String>) -> Self {
        self.lookup_url = lookup_url.into();
        self
    }

    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.country.as_deref()
    }
}

#[async_trait]
impl StoreUpdateProvider for AppStoreProvider {
    fn platform(&self) -> StorePlatform {
        StorePlatform::Ios
    }

    /// The lookup returns whatever version is listed, installed or not.
    fn reports_newer_only(&self) -> bool {
        false
    }

    async fn query_update_availability(
        &self,
        options: &AppUpdaterOptions,
    ) -> Result<StoreAvailability, BackendError> {
        let id_or_url = options.app_store_id_or_url.as_deref().unwrap_or_default();
        let app_id = apple_app_id(id_or_url)
            .map_err(|error| BackendError::platform("app store lookup", error.to_string()))?;

        let response =
            lookup_app(&self.client, &self.lookup_url, &app_id, self.country.as_deref()).await?;
        debug!(
            "App Store lookup for id{app_id} returned {} result(s)",
            response.result_count
        );
        Ok(availability_from_lookup(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_country_normalizes_valid_codes() {
        let provider = AppStoreProvider::new(reqwest::Client::new())
            .with_country("GB")
            .expect("two-letter code should be accepted");

        assert_eq!(provider.country(), Some("gb"));
    }

    #[test]
    fn with_country_rejects_injection_attempts() {
        for country in ["", "usa", "u1", "us&x"] {
            let result = AppStoreProvider::new(reqwest::Client::new()).with_country(country);
            assert!(
                matches!(result, Err(ValidationError::Configuration(_))),
                "{country:?} should be rejected"
            );
        }
    }

    #[test]
    fn provider_targets_ios_without_in_app_flows() {
        let provider = AppStoreProvider::new(reqwest::Client::new());

        assert_eq!(provider.platform(), StorePlatform::Ios);
        assert!(!provider.supports_in_app_updates());
        assert!(!provider.reports_newer_only());
    }

    #[tokio::test]
    async fn query_without_identifier_fails_before_any_request() {
        let provider = AppStoreProvider::new(reqwest::Client::new())
            .with_lookup_url("http://127.0.0.1:9/unreachable");

        let result = provider
            .query_update_availability(&AppUpdaterOptions::default())
            .await;

        assert!(matches!(
            result,
            Err(BackendError::Platform {
                context: "app store lookup",
                ..
            })
        ));
    }
}
