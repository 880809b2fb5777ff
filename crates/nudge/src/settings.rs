use std::path::Path;

use log::warn;
use nudge_core::AppUpdaterOptions;
use nudge_platform::AppPaths;

/// Load updater options from the default settings file, falling back to
/// defaults when the file is missing or unreadable.
#[must_use]
pub fn load_options() -> AppUpdaterOptions {
    let Ok(paths) = AppPaths::new() else {
        return AppUpdaterOptions::default();
    };
    load_options_from_path(&paths.settings_file())
}

#[must_use]
pub fn load_options_from_path(path: &Path) -> AppUpdaterOptions {
    if !path.exists() {
        return AppUpdaterOptions::default();
    }

    match std::fs::read_to_string(path) {
        Ok(content) => serde_json::from_str(&content).unwrap_or_else(|error| {
            warn!("Ignoring unreadable settings {}: {error}", path.display());
            AppUpdaterOptions::default()
        }),
        Err(_) => AppUpdaterOptions::default(),
    }
}

/// Save updater options to the default settings file.
///
/// # Errors
/// Returns an error when the settings directory cannot be resolved or the
/// file cannot be written.
pub fn save_options(options: &AppUpdaterOptions) -> Result<(), std::io::Error> {
    let paths = AppPaths::new().map_err(std::io::Error::other)?;
    paths.ensure_dirs()?;
    save_options_to_path(options, &paths.settings_file())
}

/// # Errors
/// Returns an error when serialization or the write fails.
pub fn save_options_to_path(options: &AppUpdaterOptions, path: &Path) -> Result<(), std::io::Error> {
    let content = serde_json::to_string_pretty(options)?;
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use nudge_core::{AppUpdaterOptions, UpdateStrategy};

    use super::{load_options_from_path, save_options_to_path};

    #[test]
    fn missing_file_loads_defaults() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");

        let options = load_options_from_path(&temp_dir.path().join("settings.json"));

        assert_eq!(options, AppUpdaterOptions::default());
    }

    #[test]
    fn invalid_json_loads_defaults() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("settings.json");
        std::fs::write(&path, "{not-valid-json").expect("invalid file should be written");

        assert_eq!(load_options_from_path(&path), AppUpdaterOptions::default());
    }

    #[test]
    fn save_and_load_preserve_options() {
        let temp_dir = tempfile::tempdir().expect("temporary directory should be created");
        let path = temp_dir.path().join("settings.json");
        let options = AppUpdaterOptions {
            play_package_name: Some("com.example.app".to_string()),
            update_strategy: UpdateStrategy::Automatic,
            force_update: true,
            check_interval: Duration::from_secs(600),
            current_version: Some("1.4.0".to_string()),
            ..AppUpdaterOptions::default()
        };

        save_options_to_path(&options, &path).expect("options should be saved");

        let content = std::fs::read_to_string(&path).expect("settings should be readable");
        assert!(content.contains("\"check_interval_secs\": 600"));
        assert_eq!(load_options_from_path(&path), options);
    }
}
