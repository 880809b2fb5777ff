use serde::{Deserialize, Serialize};

/// How disruptive an offered update is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateType {
    #[default]
    None,
    Flexible,
    Immediate,
}

/// Whether prompting cadence is driven by the caller or self-scheduled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UpdateStrategy {
    #[default]
    Manual,
    Automatic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateInfo {
    pub is_update_available: bool,
    pub latest_version: String,
    pub update_type: UpdateType,
    pub priority: i32,
    pub release_notes: Option<String>,
}

impl UpdateInfo {
    #[must_use]
    pub fn none() -> Self {
        Self {
            is_update_available: false,
            latest_version: String::new(),
            update_type: UpdateType::None,
            priority: 0,
            release_notes: None,
        }
    }

    #[must_use]
    pub fn available(
        latest_version: impl Into<String>,
        update_type: UpdateType,
        priority: i32,
        release_notes: Option<String>,
    ) -> Self {
        Self {
            is_update_available: true,
            latest_version: latest_version.into(),
            update_type,
            priority,
            release_notes,
        }
    }

    #[must_use]
    pub fn is_immediate(&self) -> bool {
        self.is_update_available && self.update_type == UpdateType::Immediate
    }
}
