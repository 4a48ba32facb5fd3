//! Composition root.
//!
//! Builds the API handle and the context objects once and hands them to the
//! rendering layer. Nothing here is global.

use std::sync::Arc;

use chrono::Utc;

use afilado_core::theme::ThemePreference;

use crate::api::SawShopApi;
use crate::config::ClientConfig;
use crate::error::ApiResult;
use crate::http::HttpApi;
use crate::session::{Session, SessionContext};
use crate::storage::Storage;
use crate::theme::ThemeContext;

pub struct App {
    pub api: Arc<dyn SawShopApi>,
    pub session: SessionContext,
    pub theme: ThemeContext,
}

impl App {
    pub fn new(
        api: Arc<dyn SawShopApi>,
        storage: Arc<dyn Storage>,
        system_theme: ThemePreference,
    ) -> Self {
        Self {
            session: SessionContext::new(Arc::clone(&api), Arc::clone(&storage)),
            theme: ThemeContext::initialize(storage, system_theme),
            api,
        }
    }

    /// Build the application against the configured HTTP backend.
    pub fn from_config(
        config: &ClientConfig,
        storage: Arc<dyn Storage>,
        system_theme: ThemePreference,
    ) -> ApiResult<Self> {
        let api = HttpApi::new(config)?;
        tracing::info!(base_url = %api.base_url(), "API client configured");
        Ok(Self::new(Arc::new(api), storage, system_theme))
    }

    /// Restore a persisted session, if still valid.
    pub async fn start(&self) -> Option<Session> {
        self.session.restore(Utc::now()).await
    }

    /// Tear down the signed-in state. The theme preference survives logout.
    pub async fn logout(&self) {
        self.session.logout().await;
    }
}
