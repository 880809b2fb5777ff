mod error;
mod traits;
mod types;

pub use error::{BackendError, NetworkStage, PreferenceError};
pub use traits::{PreferenceStore, StoreUpdateProvider, UpdatePresenter, UrlOpener};
pub use types::{PromptChoice, StoreAvailability, UpdateFlow};
