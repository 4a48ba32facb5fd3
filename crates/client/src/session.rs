//! Signed-in session state.
//!
//! The session token and user are persisted through [`Storage`] so a reload
//! can restore them. Tokens that are JWTs are checked for expiry on restore;
//! other tokens are treated as opaque and kept until the backend rejects them.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use afilado_core::error::CoreError;
use afilado_core::models::user::{LoginRequest, User};
use afilado_core::roles::{Action, Role};
use afilado_core::types::Timestamp;

use crate::api::SawShopApi;
use crate::error::ApiResult;
use crate::storage::Storage;

pub const TOKEN_STORAGE_KEY: &str = "token";
pub const USER_STORAGE_KEY: &str = "user";

/// The signed-in user and the token that authenticates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: User,
}

impl Session {
    pub fn role(&self) -> Role {
        self.user.role
    }

    pub fn can(&self, action: Action) -> bool {
        self.user.role.can(action)
    }
}

#[derive(Debug, Deserialize)]
struct ExpiryClaims {
    exp: Option<i64>,
}

/// Expiry time of a JWT, read without verifying the signature.
///
/// Returns `None` for tokens that are not JWTs or carry no `exp` claim.
pub fn token_expiry(token: &str) -> Option<Timestamp> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data =
        jsonwebtoken::decode::<ExpiryClaims>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    DateTime::<Utc>::from_timestamp(data.claims.exp?, 0)
}

/// Application-level session context.
pub struct SessionContext {
    api: Arc<dyn SawShopApi>,
    storage: Arc<dyn Storage>,
    current: RwLock<Option<Session>>,
}

impl SessionContext {
    pub fn new(api: Arc<dyn SawShopApi>, storage: Arc<dyn Storage>) -> Self {
        Self {
            api,
            storage,
            current: RwLock::new(None),
        }
    }

    /// Authenticate, persist the session, and attach the token to the API.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<Session> {
        let credentials = LoginRequest {
            email: email.trim().to_lowercase(),
            password: password.to_string(),
        };
        if credentials.email.is_empty() || credentials.password.is_empty() {
            return Err(CoreError::Validation("Email and password are required".into()).into());
        }

        let response = self.api.login(&credentials).await?;
        let session = Session {
            token: response.token,
            user: response.user,
        };
        self.install(&session);
        *self.current.write().await = Some(session.clone());
        tracing::info!(user_id = session.user.id, role = %session.user.role, "Signed in");
        Ok(session)
    }

    /// Rebuild the session from storage, discarding it if the token expired
    /// or the stored user is unreadable.
    pub async fn restore(&self, now: Timestamp) -> Option<Session> {
        let token = self.storage.get(TOKEN_STORAGE_KEY)?;

        if let Some(expiry) = token_expiry(&token) {
            if expiry <= now {
                tracing::info!(%expiry, "Stored session expired");
                self.clear().await;
                return None;
            }
        }

        let user = self
            .storage
            .get(USER_STORAGE_KEY)
            .and_then(|raw| serde_json::from_str::<User>(&raw).ok());
        let Some(user) = user else {
            tracing::warn!("Stored session has no readable user, discarding");
            self.clear().await;
            return None;
        };

        let session = Session { token, user };
        self.api.authorize(Some(session.token.clone()));
        *self.current.write().await = Some(session.clone());
        Some(session)
    }

    /// Forget the session everywhere.
    pub async fn logout(&self) {
        self.clear().await;
        tracing::info!("Signed out");
    }

    pub async fn current(&self) -> Option<Session> {
        self.current.read().await.clone()
    }

    /// Capability check for the signed-in user. Signed-out users may do nothing.
    pub async fn can(&self, action: Action) -> bool {
        self.current
            .read()
            .await
            .as_ref()
            .is_some_and(|s| s.can(action))
    }

    /// Like [`SessionContext::can`], as an error for early returns.
    pub async fn require(&self, action: Action) -> Result<(), CoreError> {
        match self.current.read().await.as_ref() {
            None => Err(CoreError::Unauthorized("Sign in first".into())),
            Some(session) => session.role().require(action),
        }
    }

    fn install(&self, session: &Session) {
        self.storage.set(TOKEN_STORAGE_KEY, &session.token);
        if let Ok(raw) = serde_json::to_string(&session.user) {
            self.storage.set(USER_STORAGE_KEY, &raw);
        }
        self.api.authorize(Some(session.token.clone()));
    }

    async fn clear(&self) {
        self.storage.remove(TOKEN_STORAGE_KEY);
        self.storage.remove(USER_STORAGE_KEY);
        self.api.authorize(None);
        *self.current.write().await = None;
    }
}
