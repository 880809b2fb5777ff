use nudge_backend::BackendError;
use nudge_core::ValidationError;
use thiserror::Error;

/// Recoverable failure of a collaborator during a public updater operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    #[error("No presentation context available to show the update prompt")]
    NoPresentationContext {
        #[source]
        source: BackendError,
    },

    #[error("Failed to check the store for updates: {source}")]
    StoreQuery {
        #[source]
        source: BackendError,
    },

    #[error("Failed to run the {flow} update flow: {source}")]
    UpdateFlow {
        flow: &'static str,
        #[source]
        source: BackendError,
    },

    /// Neither the native store link nor the web page could be opened.
    /// `source` is the web failure; `native` is the native failure, if the
    /// native open errored rather than finding no handler.
    #[error("Failed to open the {store}: {source}")]
    StoreOpen {
        store: &'static str,
        native: Option<BackendError>,
        #[source]
        source: BackendError,
    },
}

impl OperationError {
    /// Presentation-context failures keep their kind regardless of which
    /// collaborator reported them.
    pub(crate) fn from_backend(
        source: BackendError,
        wrap: impl FnOnce(BackendError) -> Self,
    ) -> Self {
        if matches!(source, BackendError::NoPresentationContext { .. }) {
            Self::NoPresentationContext { source }
        } else {
            wrap(source)
        }
    }

    #[must_use]
    pub fn source_error(&self) -> &BackendError {
        match self {
            Self::NoPresentationContext { source }
            | Self::StoreQuery { source }
            | Self::UpdateFlow { source, .. }
            | Self::StoreOpen { source, .. } => source,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Operation(#[from] OperationError),
}

impl UpdaterError {
    /// Validation errors point at a programming or configuration mistake and
    /// are not worth retrying.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
