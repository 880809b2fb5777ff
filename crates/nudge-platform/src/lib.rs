mod opener;
mod paths;
mod preferences;

pub use opener::SystemUrlOpener;
pub use paths::{AppPaths, AppPathsError};
pub use preferences::JsonFilePreferenceStore;
