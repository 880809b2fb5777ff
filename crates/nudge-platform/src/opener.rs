use async_trait::async_trait;
use log::debug;
use nudge_backend::{BackendError, UrlOpener};

/// Opens URLs with the operating system's registered handler.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemUrlOpener;

impl SystemUrlOpener {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    async fn open_url(&self, url: &str) -> Result<bool, BackendError> {
        debug!("Opening {url} with the system handler");
        let url = url.to_string();
        tokio::task::spawn_blocking(move || open::that(url))
            .await
            .map_err(|e| BackendError::platform("open url task", e.to_string()))??;
        Ok(true)
    }
}
