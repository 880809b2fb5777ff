use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use log::{debug, info, warn};
use nudge_backend::{
    BackendError, PromptChoice, StoreAvailability, StoreUpdateProvider, UpdateFlow,
    UpdatePresenter, UrlOpener,
};
use nudge_core::{
    AppUpdaterOptions, StorePlatform, UpdateInfo, UpdateType, ValidationError, is_newer_version,
    parse_version,
};

use crate::error::{OperationError, UpdaterError};
use crate::reminder::ReminderGate;

/// Result of [`AppUpdater::prompt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    NoUpdate,
    /// An update exists but the user deferred it and the deadline has not
    /// passed yet.
    Snoozed { until: Option<DateTime<Utc>> },
    RemindLater,
    Started(bool),
}

/// Decides whether to offer an update and carries out the user's choice.
pub struct AppUpdater {
    options: AppUpdaterOptions,
    provider: Arc<dyn StoreUpdateProvider>,
    opener: Arc<dyn UrlOpener>,
    reminders: ReminderGate,
}

impl AppUpdater {
    /// Build an updater for the provider's platform.
    ///
    /// # Errors
    /// Returns [`ValidationError::Configuration`] when the options lack a
    /// valid identifier for `provider.platform()`, or lack `current_version`
    /// while the provider cannot tell a newer listing from the installed one.
    /// A `current_version` that does not parse is
    /// [`ValidationError::InvalidVersion`].
    pub fn new(
        options: AppUpdaterOptions,
        provider: Arc<dyn StoreUpdateProvider>,
        opener: Arc<dyn UrlOpener>,
    ) -> Result<Self, ValidationError> {
        let platform = provider.platform();
        options.validate_for(platform)?;

        match options.current_version.as_deref() {
            Some(current) => {
                parse_version(current)?;
            }
            None if !provider.reports_newer_only() => {
                return Err(ValidationError::configuration(format!(
                    "Installed app version not configured, required to compare against {} listings",
                    platform.store_name()
                )));
            }
            None => {}
        }

        debug!(
            "App updater configured for {platform} ({:?} strategy, force update: {})",
            options.update_strategy, options.force_update
        );

        Ok(Self {
            options,
            provider,
            opener,
            reminders: ReminderGate::in_memory(),
        })
    }

    #[must_use]
    pub fn with_reminder_gate(mut self, reminders: ReminderGate) -> Self {
        self.reminders = reminders;
        self
    }

    #[must_use]
    pub fn options(&self) -> &AppUpdaterOptions {
        &self.options
    }

    #[must_use]
    pub fn platform(&self) -> StorePlatform {
        self.provider.platform()
    }

    #[must_use]
    pub fn reminders(&self) -> &ReminderGate {
        &self.reminders
    }

    /// Ask the store whether a newer version can be installed.
    ///
    /// # Errors
    /// Returns [`OperationError::StoreQuery`] when the provider fails, or
    /// [`ValidationError::InvalidVersion`] when `current_version` is set and
    /// either version cannot be parsed.
    pub async fn check_for_update(&self) -> Result<UpdateInfo, UpdaterError> {
        let availability = self
            .provider
            .query_update_availability(&self.options)
            .await
            .map_err(|source| {
                OperationError::from_backend(source, |source| OperationError::StoreQuery { source })
            })?;

        if !availability.available {
            debug!("Store reports no update available");
            return Ok(UpdateInfo::none());
        }

        if !availability.has_supported_flow() {
            debug!("Store reports an update without a supported update flow");
            return Ok(UpdateInfo::none());
        }

        if let Some(current) = self.options.current_version.as_deref()
            && !is_newer_version(current, &availability.latest_version_token)?
        {
            debug!(
                "Installed version {current} is up to date with store version {}",
                availability.latest_version_token
            );
            return Ok(UpdateInfo::none());
        }

        let update_type = classify(self.options.force_update, &availability);
        info!(
            "Update {} available ({update_type:?}, priority {})",
            availability.latest_version_token, availability.priority
        );

        Ok(UpdateInfo::available(
            availability.latest_version_token,
            update_type,
            availability.priority,
            availability.release_notes,
        ))
    }

    /// # Errors
    /// See [`AppUpdater::open_store`] and [`OperationError::UpdateFlow`].
    pub async fn start_flexible_update(&self) -> Result<bool, UpdaterError> {
        self.start_update(UpdateFlow::Flexible).await
    }

    /// # Errors
    /// See [`AppUpdater::open_store`] and [`OperationError::UpdateFlow`].
    pub async fn start_immediate_update(&self) -> Result<bool, UpdaterError> {
        self.start_update(UpdateFlow::Immediate).await
    }

    async fn start_update(&self, flow: UpdateFlow) -> Result<bool, UpdaterError> {
        if !self.provider.supports_in_app_updates() {
            debug!("No in-app {flow} update flow, opening the store instead");
            return self.open_store().await;
        }

        info!("Launching {flow} update flow");
        self.provider
            .launch_update_flow(flow)
            .await
            .map_err(|source| {
                OperationError::from_backend(source, |source| OperationError::UpdateFlow {
                    flow: flow.as_str(),
                    source,
                })
                .into()
            })
    }

    /// Open the store page, trying the native store scheme first and the
    /// web page second.
    ///
    /// # Errors
    /// Returns a validation error when no store URL can be built, and
    /// [`OperationError::StoreOpen`], carrying both causes, when the web
    /// fallback fails too.
    pub async fn open_store(&self) -> Result<bool, UpdaterError> {
        let urls = self.provider.store_urls(&self.options)?;
        let store = self.platform().store_name();

        let native = match self.opener.open_url(&urls.native).await {
            Ok(true) => {
                info!("Opened {store} at {}", urls.native);
                return Ok(true);
            }
            Ok(false) => {
                debug!("No handler accepted {}, trying the web page", urls.native);
                None
            }
            Err(source @ BackendError::NoPresentationContext { .. }) => {
                return Err(OperationError::NoPresentationContext { source }.into());
            }
            Err(error) => {
                warn!("Failed to open {}: {error}, trying the web page", urls.native);
                Some(error)
            }
        };

        match self.opener.open_url(&urls.web).await {
            Ok(opened) => {
                if opened {
                    info!("Opened {store} web page at {}", urls.web);
                }
                Ok(opened)
            }
            Err(source) => Err(OperationError::from_backend(source, |source| {
                OperationError::StoreOpen {
                    store,
                    native,
                    source,
                }
            })
            .into()),
        }
    }

    /// Check for an update and, when one is due, show it through `presenter`
    /// and act on the answer.
    ///
    /// Flexible updates respect the reminder gate for `key`; immediate updates
    /// are always presented.
    ///
    /// # Errors
    /// Propagates errors from [`AppUpdater::check_for_update`] and the
    /// selected action. A presenter failure is reported as
    /// [`OperationError::NoPresentationContext`].
    pub async fn prompt(
        &self,
        key: &str,
        presenter: &dyn UpdatePresenter,
    ) -> Result<PromptOutcome, UpdaterError> {
        let info = self.check_for_update().await?;
        if !info.is_update_available {
            return Ok(PromptOutcome::NoUpdate);
        }

        if !info.is_immediate() && !self.reminders.should_prompt(key) {
            debug!("Update prompt {key} is snoozed");
            return Ok(PromptOutcome::Snoozed {
                until: self.reminders.remind_at(key),
            });
        }

        let choice = presenter
            .present(&info)
            .await
            .map_err(|source| OperationError::NoPresentationContext { source })?;

        match choice {
            PromptChoice::Update => {
                let started = if info.is_immediate() {
                    self.start_immediate_update().await?
                } else {
                    self.start_flexible_update().await?
                };
                if started {
                    self.reminders.clear(key);
                }
                Ok(PromptOutcome::Started(started))
            }
            PromptChoice::Later => {
                self.reminders
                    .set_remind_later(key, self.options.remind_later_days);
                Ok(PromptOutcome::RemindLater)
            }
        }
    }

    /// Whether a caller-driven schedule should check again, given when the
    /// last check ran.
    #[must_use]
    pub fn is_check_due(&self, last_checked: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
        let Some(last_checked) = last_checked else {
            return true;
        };
        let interval = TimeDelta::from_std(self.options.check_interval).unwrap_or(TimeDelta::MAX);
        now.signed_duration_since(last_checked) >= interval
    }
}

fn classify(force_update: bool, availability: &StoreAvailability) -> UpdateType {
    if force_update || (availability.allowed_immediate && !availability.allowed_flexible) {
        UpdateType::Immediate
    } else {
        UpdateType::Flexible
    }
}
