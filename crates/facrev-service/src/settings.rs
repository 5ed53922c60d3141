//! Site feature toggles.

use std::sync::Arc;

use tracing::info;

use facrev_core::traits::storage::ISettingsStore;
use facrev_core::{ServiceError, SiteSettings, SiteSettingsUpdate};
use facrev_storage::StorageEngine;

pub struct SettingsService {
    settings: Arc<dyn ISettingsStore>,
}

impl SettingsService {
    pub fn new(settings: Arc<dyn ISettingsStore>) -> Self {
        Self { settings }
    }

    pub fn from_engine(engine: &Arc<StorageEngine>) -> Self {
        Self::new(engine.as_settings_store())
    }

    pub fn get(&self) -> Result<SiteSettings, ServiceError> {
        Ok(self.settings.get_settings()?)
    }

    /// Partial update; omitted fields keep their stored value. Returns the
    /// merged settings that subscribers will observe.
    pub fn update(&self, update: &SiteSettingsUpdate) -> Result<SiteSettings, ServiceError> {
        let merged = self.settings.update_settings(update)?;
        info!(
            chat = merged.is_chat_enabled,
            about = merged.is_about_page_enabled,
            "site settings updated"
        );
        Ok(merged)
    }
}
