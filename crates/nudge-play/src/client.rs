use async_trait::async_trait;
use nudge_backend::{BackendError, UpdateFlow};
use serde::{Deserialize, Serialize};

/// Availability codes reported by the Play in-app update API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateAvailability {
    Unknown,
    UpdateNotAvailable,
    UpdateAvailable,
    DeveloperTriggeredUpdateInProgress,
}

impl UpdateAvailability {
    /// Map the raw integer constant used by the Play SDK.
    #[must_use]
    pub fn from_code(code: i32) -> Self {
        match code {
            1 => Self::UpdateNotAvailable,
            2 => Self::UpdateAvailable,
            3 => Self::DeveloperTriggeredUpdateInProgress,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub fn is_available(self) -> bool {
        matches!(
            self,
            Self::UpdateAvailable | Self::DeveloperTriggeredUpdateInProgress
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayUpdateInfo {
    pub availability: UpdateAvailability,
    pub available_version_code: i64,
    pub flexible_allowed: bool,
    pub immediate_allowed: bool,
    pub update_priority: i32,
    #[serde(default)]
    pub client_version_staleness_days: Option<i32>,
}

/// Bridge to the Play in-app update SDK, supplied by the host app.
#[async_trait]
pub trait PlayCoreClient: Send + Sync {
    async fn request_update_info(&self) -> Result<PlayUpdateInfo, BackendError>;

    async fn start_update_flow(&self, flow: UpdateFlow) -> Result<bool, BackendError>;
}
