//! Integration tests for the session, theme and application contexts.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header};
use serde_json::json;

use afilado_client::app::App;
use afilado_client::error::ClientError;
use afilado_client::session::{token_expiry, SessionContext, TOKEN_STORAGE_KEY, USER_STORAGE_KEY};
use afilado_client::storage::{MemoryStorage, Storage};
use afilado_client::theme::ThemeContext;
use afilado_core::error::CoreError;
use afilado_core::models::user::LoginResponse;
use afilado_core::roles::Action;
use afilado_core::theme::{ThemePreference, THEME_STORAGE_KEY};
use common::{manager, Call, FakeApi};

fn jwt(expires_in: Duration) -> String {
    let claims = json!({ "sub": "7", "exp": (Utc::now() + expires_in).timestamp() });
    jsonwebtoken::encode(&Header::default(), &claims, &EncodingKey::from_secret(b"test-secret"))
        .unwrap()
}

fn signed_in(token: &str) -> FakeApi {
    let token = token.to_string();
    FakeApi::new(vec![], vec![]).with(|s| {
        s.login = Some(LoginResponse {
            token,
            user: manager(7),
        })
    })
}

fn context(api: &Arc<FakeApi>, storage: &Arc<MemoryStorage>) -> SessionContext {
    SessionContext::new(api.clone(), storage.clone())
}

// ---------------------------------------------------------------------------
// Test: login / logout
// ---------------------------------------------------------------------------

#[tokio::test]
async fn login_persists_and_authorizes() {
    let token = jwt(Duration::hours(8));
    let api = Arc::new(signed_in(&token));
    let storage = Arc::new(MemoryStorage::new());
    let session = context(&api, &storage);

    let signed = session.login(" Marta@Afilado.cl ", "hunter22").await.unwrap();

    assert_eq!(signed.user.id, 7);
    assert_eq!(api.calls(), vec![Call::Login("marta@afilado.cl".into())]);
    assert_eq!(api.token().as_deref(), Some(token.as_str()));
    assert_eq!(storage.get(TOKEN_STORAGE_KEY).as_deref(), Some(token.as_str()));
    assert!(storage.get(USER_STORAGE_KEY).is_some());
    assert!(session.can(Action::ManageUsers).await);
}

#[tokio::test]
async fn blank_credentials_are_not_sent() {
    let api = Arc::new(signed_in("opaque"));
    let storage = Arc::new(MemoryStorage::new());
    let session = context(&api, &storage);

    let err = session.login("", "pw").await.unwrap_err();

    assert_matches!(err, ClientError::Core(CoreError::Validation(_)));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn rejected_login_leaves_no_session() {
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = Arc::new(MemoryStorage::new());
    let session = context(&api, &storage);

    let err = session.login("marta@afilado.cl", "wrong").await.unwrap_err();

    assert_matches!(err, ClientError::Http { status: 401, .. });
    assert!(session.current().await.is_none());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
    assert_matches!(
        session.require(Action::ViewDashboard).await,
        Err(CoreError::Unauthorized(_))
    );
}

#[tokio::test]
async fn logout_clears_everything() {
    let api = Arc::new(signed_in("opaque"));
    let storage = Arc::new(MemoryStorage::new());
    let session = context(&api, &storage);
    session.login("marta@afilado.cl", "hunter22").await.unwrap();

    session.logout().await;

    assert!(session.current().await.is_none());
    assert!(api.token().is_none());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
    assert!(storage.get(USER_STORAGE_KEY).is_none());
}

// ---------------------------------------------------------------------------
// Test: restore
// ---------------------------------------------------------------------------

fn stored(token: &str) -> Arc<MemoryStorage> {
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_STORAGE_KEY, token);
    storage.set(USER_STORAGE_KEY, &serde_json::to_string(&manager(7)).unwrap());
    storage
}

#[tokio::test]
async fn restore_accepts_unexpired_token() {
    let token = jwt(Duration::hours(1));
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = stored(&token);

    let restored = context(&api, &storage).restore(Utc::now()).await.unwrap();

    assert_eq!(restored.user, manager(7));
    assert_eq!(api.token().as_deref(), Some(token.as_str()));
}

#[tokio::test]
async fn restore_discards_expired_token() {
    let token = jwt(-Duration::hours(1));
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = stored(&token);

    assert!(context(&api, &storage).restore(Utc::now()).await.is_none());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
    assert!(storage.get(USER_STORAGE_KEY).is_none());
    assert!(api.token().is_none());
}

#[tokio::test]
async fn restore_keeps_opaque_token() {
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = stored("not-a-jwt");

    let restored = context(&api, &storage).restore(Utc::now()).await;

    assert_eq!(restored.map(|s| s.token).as_deref(), Some("not-a-jwt"));
}

#[tokio::test]
async fn restore_discards_unreadable_user() {
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = Arc::new(MemoryStorage::new());
    storage.set(TOKEN_STORAGE_KEY, "opaque");
    storage.set(USER_STORAGE_KEY, "{broken");

    assert!(context(&api, &storage).restore(Utc::now()).await.is_none());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
}

#[test]
fn expiry_is_read_without_the_secret() {
    let token = jwt(Duration::minutes(30));
    let expiry = token_expiry(&token).unwrap();
    assert!(expiry > Utc::now());
    assert!(token_expiry("opaque").is_none());
}

// ---------------------------------------------------------------------------
// Test: theme and app
// ---------------------------------------------------------------------------

#[tokio::test]
async fn theme_falls_back_to_system_and_persists_toggle() {
    let storage = Arc::new(MemoryStorage::new());
    let theme = ThemeContext::initialize(storage.clone(), ThemePreference::Dark);
    assert_eq!(theme.current().await, ThemePreference::Dark);

    assert_eq!(theme.toggle().await, ThemePreference::Light);
    assert_eq!(storage.get(THEME_STORAGE_KEY).as_deref(), Some("light"));

    let reloaded = ThemeContext::initialize(storage, ThemePreference::Dark);
    assert_eq!(reloaded.current().await, ThemePreference::Light);
}

#[tokio::test]
async fn app_start_restores_and_logout_clears() {
    let token = jwt(Duration::hours(2));
    let api = Arc::new(FakeApi::new(vec![], vec![]));
    let storage = stored(&token);
    let app = App::new(api.clone(), storage.clone(), ThemePreference::Light);

    let session = app.start().await.unwrap();
    assert_eq!(session.user.id, 7);

    app.logout().await;
    assert!(app.session.current().await.is_none());
    assert!(storage.get(TOKEN_STORAGE_KEY).is_none());
}
