//! `ISettingsStore` trait — the site feature toggle singleton.
//!
//! Maps to `facrev-storage/src/queries/settings.rs`.

use std::sync::Arc;

use crate::errors::StorageError;
use crate::types::entities::{SiteSettings, SiteSettingsUpdate};

/// Singleton key-value store of boolean feature flags.
pub trait ISettingsStore: Send + Sync {
    fn get_settings(&self) -> Result<SiteSettings, StorageError>;

    /// Partial update; `None` fields keep their current value.
    fn update_settings(&self, update: &SiteSettingsUpdate) -> Result<SiteSettings, StorageError>;
}

impl<T: ISettingsStore + ?Sized> ISettingsStore for Arc<T> {
    fn get_settings(&self) -> Result<SiteSettings, StorageError> {
        (**self).get_settings()
    }
    fn update_settings(&self, update: &SiteSettingsUpdate) -> Result<SiteSettings, StorageError> {
        (**self).update_settings(update)
    }
}
