use std::path::{Path, PathBuf};
use thiserror::Error;

const DIR_NAME: &str = "nudge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AppPathsError {
    #[error("Could not determine config directory")]
    ConfigDirUnavailable,
    #[error("Could not determine data directory")]
    DataDirUnavailable,
    #[error("No per-user library directories on {0}; pass explicit paths instead")]
    UnsupportedPlatform(&'static str),
}

/// Desktop hosts where per-user config and data directories exist. On mobile
/// targets the app sandbox owns storage, so callers pass paths themselves.
fn has_user_dirs(os: &str) -> bool {
    !matches!(os, "android" | "ios")
}

pub struct AppPaths {
    pub config_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl AppPaths {
    /// Build library paths for the current desktop platform.
    ///
    /// # Errors
    /// Returns [`AppPathsError::UnsupportedPlatform`] on Android and iOS, and
    /// an error when the config or data directory cannot be determined.
    pub fn new() -> Result<Self, AppPathsError> {
        if !has_user_dirs(std::env::consts::OS) {
            return Err(AppPathsError::UnsupportedPlatform(std::env::consts::OS));
        }

        Ok(Self {
            config_dir: dirs::config_dir()
                .ok_or(AppPathsError::ConfigDirUnavailable)?
                .join(DIR_NAME),
            data_dir: dirs::data_dir()
                .ok_or(AppPathsError::DataDirUnavailable)?
                .join(DIR_NAME),
        })
    }

    /// Paths rooted in a directory the host already owns, such as an app
    /// sandbox's files directory.
    #[must_use]
    pub fn under(root: &Path) -> Self {
        Self {
            config_dir: root.join(DIR_NAME),
            data_dir: root.join(DIR_NAME),
        }
    }

    #[must_use]
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join("settings.json")
    }

    #[must_use]
    pub fn preferences_file(&self) -> PathBuf {
        self.data_dir.join("preferences.json")
    }

    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.data_dir.join("debug.log")
    }

    /// Ensure all library directories exist on disk.
    ///
    /// # Errors
    /// Returns an error if any directory cannot be created.
    pub fn ensure_dirs(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        Ok(())
    }
}
