use std::time::Duration;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::platform::StorePlatform;
use crate::types::UpdateStrategy;
use crate::validation::{is_valid_apple_id_or_url, is_valid_play_package_name};

pub const DEFAULT_CHECK_INTERVAL: Duration = Duration::from_secs(12 * 60 * 60);
pub const DEFAULT_REMIND_LATER_DAYS: i64 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppUpdaterOptions {
    #[serde(default)]
    pub play_package_name: Option<String>,

    #[serde(default)]
    pub app_store_id_or_url: Option<String>,

    #[serde(default)]
    pub update_strategy: UpdateStrategy,

    #[serde(default)]
    pub force_update: bool,

    #[serde(
        default = "default_check_interval",
        rename = "check_interval_secs",
        deserialize_with = "deserialize_interval_secs",
        serialize_with = "serialize_interval_secs"
    )]
    pub check_interval: Duration,

    #[serde(default)]
    pub enable_debug_logging: bool,

    /// Installed app version, compared against the store's latest version.
    #[serde(default)]
    pub current_version: Option<String>,

    #[serde(default = "default_remind_later_days")]
    pub remind_later_days: i64,
}

fn default_check_interval() -> Duration {
    DEFAULT_CHECK_INTERVAL
}

fn default_remind_later_days() -> i64 {
    DEFAULT_REMIND_LATER_DAYS
}

fn deserialize_interval_secs<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    u64::deserialize(deserializer).map(Duration::from_secs)
}

fn serialize_interval_secs<S>(interval: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_u64(interval.as_secs())
}

impl Default for AppUpdaterOptions {
    fn default() -> Self {
        Self {
            play_package_name: None,
            app_store_id_or_url: None,
            update_strategy: UpdateStrategy::Manual,
            force_update: false,
            check_interval: default_check_interval(),
            enable_debug_logging: false,
            current_version: None,
            remind_later_days: default_remind_later_days(),
        }
    }
}

impl AppUpdaterOptions {
    /// Check that the identifier for `platform` is present and well formed.
    ///
    /// # Errors
    /// Returns [`ValidationError::Configuration`] when the identifier is
    /// missing or malformed.
    pub fn validate_for(&self, platform: StorePlatform) -> Result<(), ValidationError> {
        match platform {
            StorePlatform::Android => {
                let Some(package) = non_blank(self.play_package_name.as_deref()) else {
                    return Err(ValidationError::configuration(
                        "Play Store package name not configured",
                    ));
                };
                if !is_valid_play_package_name(package) {
                    return Err(ValidationError::configuration(
                        "Invalid Play Store package name format",
                    ));
                }
                if self.app_store_id_or_url.is_some() {
                    debug!("Ignoring App Store identifier on {platform}");
                }
            }
            StorePlatform::Ios => {
                let Some(id_or_url) = non_blank(self.app_store_id_or_url.as_deref()) else {
                    return Err(ValidationError::configuration(
                        "App Store ID/URL not configured",
                    ));
                };
                if !is_valid_apple_id_or_url(id_or_url) {
                    return Err(ValidationError::configuration(
                        "Invalid App Store ID/URL format",
                    ));
                }
                if self.play_package_name.is_some() {
                    debug!("Ignoring Play Store package name on {platform}");
                }
            }
        }
        Ok(())
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn android_options(package: &str) -> AppUpdaterOptions {
        AppUpdaterOptions {
            play_package_name: Some(package.to_string()),
            ..AppUpdaterOptions::default()
        }
    }

    #[test]
    fn defaults_match_expected_values() {
        let options = AppUpdaterOptions::default();

        assert_eq!(options.update_strategy, UpdateStrategy::Manual);
        assert_eq!(options.check_interval, Duration::from_secs(43_200));
        assert_eq!(options.remind_later_days, 1);
        assert!(!options.force_update);
        assert!(!options.enable_debug_logging);
    }

    #[test]
    fn android_requires_package_name() {
        let error = AppUpdaterOptions::default()
            .validate_for(StorePlatform::Android)
            .unwrap_err();
        assert_eq!(
            error,
            ValidationError::configuration("Play Store package name not configured")
        );

        let blank = android_options("  ").validate_for(StorePlatform::Android);
        assert!(matches!(blank, Err(ValidationError::Configuration(_))));
    }

    #[test]
    fn android_rejects_malformed_package_name() {
        let error = android_options("com.example")
            .validate_for(StorePlatform::Android)
            .unwrap_err();
        assert_eq!(
            error,
            ValidationError::configuration("Invalid Play Store package name format")
        );
    }

    #[test]
    fn android_accepts_valid_package_and_ignores_apple_id() {
        let options = AppUpdaterOptions {
            app_store_id_or_url: Some("garbage".to_string()),
            ..android_options("com.example.app")
        };

        assert!(options.validate_for(StorePlatform::Android).is_ok());
    }

    #[test]
    fn ios_requires_valid_identifier() {
        let missing = android_options("com.example.app").validate_for(StorePlatform::Ios);
        assert!(matches!(missing, Err(ValidationError::Configuration(ref m)) if m.contains("not configured")));

        let invalid = AppUpdaterOptions {
            app_store_id_or_url: Some("https://example.com/id1".to_string()),
            ..AppUpdaterOptions::default()
        };
        assert!(matches!(
            invalid.validate_for(StorePlatform::Ios),
            Err(ValidationError::Configuration(ref m)) if m.contains("format")
        ));

        let valid = AppUpdaterOptions {
            app_store_id_or_url: Some("https://apps.apple.com/us/app/foo/id123".to_string()),
            ..AppUpdaterOptions::default()
        };
        assert!(valid.validate_for(StorePlatform::Ios).is_ok());
    }

    #[test]
    fn deserialization_fills_missing_fields_with_defaults() {
        let options: AppUpdaterOptions = serde_json::from_value(json!({
            "play_package_name": "com.example.app",
            "check_interval_secs": 3600
        }))
        .expect("options JSON should deserialize");

        assert_eq!(options.play_package_name.as_deref(), Some("com.example.app"));
        assert_eq!(options.check_interval, Duration::from_secs(3600));
        assert_eq!(options.remind_later_days, DEFAULT_REMIND_LATER_DAYS);
        assert_eq!(options.update_strategy, UpdateStrategy::Manual);
    }

    #[test]
    fn serialization_writes_interval_as_seconds() {
        let value = serde_json::to_value(AppUpdaterOptions::default())
            .expect("options should serialize");

        assert_eq!(value["check_interval_secs"], json!(43_200));
        assert!(value.get("check_interval").is_none());
    }
}
