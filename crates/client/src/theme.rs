//! Light/dark preference context.

use std::sync::Arc;

use tokio::sync::RwLock;

use afilado_core::theme::{ThemePreference, THEME_STORAGE_KEY};

use crate::storage::Storage;

pub struct ThemeContext {
    storage: Arc<dyn Storage>,
    current: RwLock<ThemePreference>,
}

impl ThemeContext {
    /// Start from the persisted preference, or `system_default` if none is stored.
    pub fn initialize(storage: Arc<dyn Storage>, system_default: ThemePreference) -> Self {
        let stored = storage.get(THEME_STORAGE_KEY);
        let current = ThemePreference::resolve(stored.as_deref(), system_default);
        Self {
            storage,
            current: RwLock::new(current),
        }
    }

    pub async fn current(&self) -> ThemePreference {
        *self.current.read().await
    }

    pub async fn set(&self, preference: ThemePreference) {
        self.storage.set(THEME_STORAGE_KEY, preference.as_str());
        *self.current.write().await = preference;
    }

    /// Flip between light and dark, persisting the result.
    pub async fn toggle(&self) -> ThemePreference {
        let next = self.current().await.toggled();
        self.set(next).await;
        next
    }
}
