use serde::{Deserialize, Serialize};

/// What a store reports for the running app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreAvailability {
    pub available: bool,
    pub latest_version_token: String,
    pub allowed_flexible: bool,
    pub allowed_immediate: bool,
    pub priority: i32,
    #[serde(default)]
    pub release_notes: Option<String>,
}

impl StoreAvailability {
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            available: false,
            latest_version_token: String::new(),
            allowed_flexible: false,
            allowed_immediate: false,
            priority: 0,
            release_notes: None,
        }
    }

    /// Whether the store offers any way to perform the update.
    #[must_use]
    pub fn has_supported_flow(&self) -> bool {
        self.allowed_flexible || self.allowed_immediate
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpdateFlow {
    Flexible,
    Immediate,
}

impl UpdateFlow {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Flexible => "flexible",
            Self::Immediate => "immediate",
        }
    }
}

impl std::fmt::Display for UpdateFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user's answer to an update prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Update,
    Later,
}
