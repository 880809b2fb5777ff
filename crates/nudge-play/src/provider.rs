use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use nudge_backend::{BackendError, StoreAvailability, StoreUpdateProvider, UpdateFlow};
use nudge_core::{AppUpdaterOptions, StorePlatform};

use crate::client::{PlayCoreClient, PlayUpdateInfo};

/// Google Play variant of [`StoreUpdateProvider`].
///
/// Without a [`PlayCoreClient`] the provider cannot see store state: it
/// reports no update and callers fall back to opening the store page.
#[derive(Clone, Default)]
pub struct PlayStoreProvider {
    client: Option<Arc<dyn PlayCoreClient>>,
}

impl PlayStoreProvider {
    #[must_use]
    pub fn new() -> Self {
        Self { client: None }
    }

    #[must_use]
    pub fn with_client(mut self, client: Arc<dyn PlayCoreClient>) -> Self {
        self.client = Some(client);
        self
    }
}

fn availability_from_play(info: &PlayUpdateInfo) -> StoreAvailability {
    if !info.availability.is_available() {
        return StoreAvailability::unavailable();
    }

    StoreAvailability {
        available: true,
        latest_version_token: info.available_version_code.to_string(),
        allowed_flexible: info.flexible_allowed,
        allowed_immediate: info.immediate_allowed,
        priority: info.update_priority,
        release_notes: None,
    }
}

#[async_trait]
impl StoreUpdateProvider for PlayStoreProvider {
    fn platform(&self) -> StorePlatform {
        StorePlatform::Android
    }

    async fn query_update_availability(
        &self,
        _options: &AppUpdaterOptions,
    ) -> Result<StoreAvailability, BackendError> {
        let Some(client) = &self.client else {
            debug!("No Play Core client configured, reporting no update");
            return Ok(StoreAvailability::unavailable());
        };

        let info = client.request_update_info().await?;
        debug!(
            "Play update info: {:?}, version code {}, staleness {:?} days",
            info.availability, info.available_version_code, info.client_version_staleness_days
        );
        Ok(availability_from_play(&info))
    }

    fn supports_in_app_updates(&self) -> bool {
        self.client.is_some()
    }

    async fn launch_update_flow(&self, flow: UpdateFlow) -> Result<bool, BackendError> {
        let Some(client) = &self.client else {
            return Err(BackendError::Unsupported {
                operation: "launch_update_flow",
            });
        };

        info!("Starting {flow} Play update flow");
        client.start_update_flow(flow).await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::client::UpdateAvailability;

    struct MockPlayClient {
        info: Result<PlayUpdateInfo, BackendError>,
        started: Mutex<Vec<UpdateFlow>>,
    }

    impl MockPlayClient {
        fn new(info: Result<PlayUpdateInfo, BackendError>) -> Arc<Self> {
            Arc::new(Self {
                info,
                started: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl PlayCoreClient for MockPlayClient {
        async fn request_update_info(&self) -> Result<PlayUpdateInfo, BackendError> {
            self.info.clone()
        }

        async fn start_update_flow(&self, flow: UpdateFlow) -> Result<bool, BackendError> {
            self.started
                .lock()
                .unwrap_or_else(std::sync::PoisonError::into_inner)
                .push(flow);
            Ok(true)
        }
    }

    fn play_info(availability: UpdateAvailability) -> PlayUpdateInfo {
        PlayUpdateInfo {
            availability,
            available_version_code: 42,
            flexible_allowed: true,
            immediate_allowed: false,
            update_priority: 2,
            client_version_staleness_days: Some(3),
        }
    }

    #[tokio::test]
    async fn without_client_reports_no_update() {
        let provider = PlayStoreProvider::new();

        let availability = provider
            .query_update_availability(&AppUpdaterOptions::default())
            .await
            .expect("query without client succeeds");

        assert_eq!(availability, StoreAvailability::unavailable());
        assert!(!provider.supports_in_app_updates());
        assert!(matches!(
            provider.launch_update_flow(UpdateFlow::Flexible).await,
            Err(BackendError::Unsupported { .. })
        ));
    }

    #[tokio::test]
    async fn maps_available_update_from_client() {
        let client = MockPlayClient::new(Ok(play_info(UpdateAvailability::UpdateAvailable)));
        let provider = PlayStoreProvider::new().with_client(client);

        let availability = provider
            .query_update_availability(&AppUpdaterOptions::default())
            .await
            .expect("query succeeds");

        assert!(availability.available);
        assert_eq!(availability.latest_version_token, "42");
        assert!(availability.allowed_flexible);
        assert!(!availability.allowed_immediate);
        assert_eq!(availability.priority, 2);
    }

    #[tokio::test]
    async fn not_available_maps_to_unavailable() {
        let client = MockPlayClient::new(Ok(play_info(UpdateAvailability::UpdateNotAvailable)));
        let provider = PlayStoreProvider::new().with_client(client);

        let availability = provider
            .query_update_availability(&AppUpdaterOptions::default())
            .await
            .expect("query succeeds");

        assert!(!availability.available);
    }

    #[tokio::test]
    async fn client_errors_propagate() {
        let client = MockPlayClient::new(Err(BackendError::platform(
            "request update info",
            "play services missing",
        )));
        let provider = PlayStoreProvider::new().with_client(client);

        let result = provider
            .query_update_availability(&AppUpdaterOptions::default())
            .await;

        assert!(matches!(result, Err(BackendError::Platform { .. })));
    }

    #[tokio::test]
    async fn launch_delegates_to_client() {
        let client = MockPlayClient::new(Ok(play_info(UpdateAvailability::UpdateAvailable)));
        let provider = PlayStoreProvider::new().with_client(client.clone());

        assert!(provider.supports_in_app_updates());
        let started = provider
            .launch_update_flow(UpdateFlow::Immediate)
            .await
            .expect("flow should start");

        assert!(started);
        assert_eq!(
            *client.started.lock().expect("lock should not be poisoned"),
            vec![UpdateFlow::Immediate]
        );
    }
}
