use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid version: {input:?}")]
    InvalidVersion { input: String },

    #[error("Invalid store identifier: {input:?}")]
    InvalidStoreIdentifier { input: String },
}

impl ValidationError {
    pub fn configuration(details: impl Into<String>) -> Self {
        Self::Configuration(details.into())
    }

    pub fn invalid_version(input: impl Into<String>) -> Self {
        Self::InvalidVersion {
            input: input.into(),
        }
    }

    pub fn invalid_store_identifier(input: impl Into<String>) -> Self {
        Self::InvalidStoreIdentifier {
            input: input.into(),
        }
    }
}
