//! Shared fixtures for the client integration tests.
//!
//! [`FakeApi`] is an in-memory backend that records every call in order so
//! tests can assert on sequencing. [`spawn_backend`] serves an axum router on
//! an ephemeral port for exercising [`HttpApi`](afilado_client::http::HttpApi).

#![allow(dead_code)]

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{Duration, TimeZone, Utc};

use afilado_client::api::SawShopApi;
use afilado_client::error::{ApiResult, ClientError};
use afilado_core::error::CoreError;
use afilado_core::models::catalog::{SawState, SawType, SharpeningType};
use afilado_core::models::client::{Branch, Client};
use afilado_core::models::saw::{NewSaw, Saw, SawUpdate};
use afilado_core::models::sharpening::{
    BulkExit, BulkExitResult, NewSharpening, Sharpening, SharpeningUpdate, SharpeningView,
};
use afilado_core::models::user::{LoginRequest, LoginResponse, User, UserPayload};
use afilado_core::roles::Role;
use afilado_core::types::DbId;

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

pub fn saw(id: DbId, active: bool) -> Saw {
    Saw {
        id,
        code: format!("S-{id:04}"),
        saw_type_id: 1,
        branch_id: 1,
        active,
        state_id: None,
        width_mm: None,
        length_mm: None,
        height_mm: None,
        material: None,
        notes: None,
        registered_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
    }
}

/// A sharpening for `saw_id` taken in on 2025-05-`day`.
pub fn record(id: DbId, saw_id: DbId, day: u32, completed: bool) -> Sharpening {
    let intake_at = Utc.with_ymd_and_hms(2025, 5, day, 8, 0, 0).unwrap();
    Sharpening {
        id,
        saw_id,
        sharpening_type_id: 1,
        intake_at,
        exit_at: completed.then(|| intake_at + Duration::days(3)),
        notes: None,
        is_last_sharpening: false,
    }
}

pub fn manager(id: DbId) -> User {
    User {
        id,
        name: "Marta Gerente".into(),
        email: "marta@afilado.cl".into(),
        role: Role::Manager,
        client_id: None,
    }
}

/// The error the fake returns when told to fail.
pub fn unavailable() -> ClientError {
    ClientError::Http {
        status: 503,
        message: "Service unavailable".into(),
    }
}

// ---------------------------------------------------------------------------
// FakeApi
// ---------------------------------------------------------------------------

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Login(String),
    Saw(DbId),
    SawByCode(String),
    SawsByBranch(DbId),
    CreateSaw(NewSaw),
    UpdateSaw(DbId, SawUpdate),
    SharpeningsForSaw(DbId),
    CreateSharpening(NewSharpening),
    UpdateSharpening(DbId, SharpeningUpdate),
    RegisterExit(DbId),
    RegisterExitBulk(Vec<DbId>),
    CreateUser(UserPayload),
    UpdateUser(DbId, UserPayload),
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub saws: Vec<Saw>,
    pub sharpenings: Vec<Sharpening>,
    pub calls: Vec<Call>,
    pub token: Option<String>,
    pub login: Option<LoginResponse>,
    pub next_id: DbId,
    /// Make `update_saw` fail.
    pub fail_saw_update: bool,
    /// Make `saw` fail.
    pub fail_saw_read: bool,
    /// Make `sharpenings_for_saw` fail.
    pub fail_history_read: bool,
    /// Make `create_sharpening` fail.
    pub fail_sharpening_create: bool,
}

#[derive(Debug, Default)]
pub struct FakeApi {
    pub state: Mutex<FakeState>,
}

impl FakeApi {
    pub fn new(saws: Vec<Saw>, sharpenings: Vec<Sharpening>) -> Self {
        Self {
            state: Mutex::new(FakeState {
                saws,
                sharpenings,
                next_id: 100,
                ..FakeState::default()
            }),
        }
    }

    pub fn with<F: FnOnce(&mut FakeState)>(self, f: F) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.state.lock().unwrap().token.clone()
    }

    pub fn saw_state(&self, id: DbId) -> Option<Saw> {
        self.state.lock().unwrap().saws.iter().find(|s| s.id == id).cloned()
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn next_id(state: &mut FakeState) -> DbId {
        state.next_id += 1;
        state.next_id
    }
}

#[async_trait]
impl SawShopApi for FakeApi {
    fn authorize(&self, token: Option<String>) {
        self.state.lock().unwrap().token = token;
    }

    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse> {
        self.record(Call::Login(credentials.email.clone()));
        self.state
            .lock()
            .unwrap()
            .login
            .clone()
            .ok_or_else(|| ClientError::Http {
                status: 401,
                message: "Invalid credentials".into(),
            })
    }

    async fn saw(&self, id: DbId) -> ApiResult<Saw> {
        self.record(Call::Saw(id));
        let state = self.state.lock().unwrap();
        if state.fail_saw_read {
            return Err(unavailable());
        }
        state
            .saws
            .iter()
            .find(|s| s.id == id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound { entity: "saw", id }.into())
    }

    async fn saw_by_code(&self, code: &str) -> ApiResult<Option<Saw>> {
        self.record(Call::SawByCode(code.to_string()));
        let state = self.state.lock().unwrap();
        Ok(state.saws.iter().find(|s| s.code == code).cloned())
    }

    async fn saws_by_branch(&self, branch_id: DbId) -> ApiResult<Vec<Saw>> {
        self.record(Call::SawsByBranch(branch_id));
        let state = self.state.lock().unwrap();
        Ok(state.saws.iter().filter(|s| s.branch_id == branch_id).cloned().collect())
    }

    async fn saws_by_client(&self, _client_id: DbId) -> ApiResult<Vec<Saw>> {
        Ok(self.state.lock().unwrap().saws.clone())
    }

    async fn saws(&self) -> ApiResult<Vec<Saw>> {
        Ok(self.state.lock().unwrap().saws.clone())
    }

    async fn create_saw(&self, new: &NewSaw) -> ApiResult<Saw> {
        self.record(Call::CreateSaw(new.clone()));
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        let saw = Saw {
            id,
            code: new.code.clone(),
            saw_type_id: new.saw_type_id,
            branch_id: new.branch_id,
            active: true,
            state_id: new.state_id,
            width_mm: new.width_mm,
            length_mm: new.length_mm,
            height_mm: new.height_mm,
            material: new.material.clone(),
            notes: new.notes.clone(),
            registered_at: Utc::now(),
        };
        state.saws.push(saw.clone());
        Ok(saw)
    }

    async fn update_saw(&self, id: DbId, update: &SawUpdate) -> ApiResult<Saw> {
        self.record(Call::UpdateSaw(id, update.clone()));
        let mut state = self.state.lock().unwrap();
        if state.fail_saw_update {
            return Err(unavailable());
        }
        let saw = state
            .saws
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(CoreError::NotFound { entity: "saw", id })?;
        if let Some(active) = update.active {
            saw.active = active;
        }
        if let Some(state_id) = update.state_id {
            saw.state_id = Some(state_id);
        }
        if let Some(saw_type_id) = update.saw_type_id {
            saw.saw_type_id = saw_type_id;
        }
        Ok(saw.clone())
    }

    async fn sharpenings_for_saw(&self, saw_id: DbId) -> ApiResult<Vec<Sharpening>> {
        self.record(Call::SharpeningsForSaw(saw_id));
        let state = self.state.lock().unwrap();
        if state.fail_history_read {
            return Err(unavailable());
        }
        Ok(state
            .sharpenings
            .iter()
            .filter(|r| r.saw_id == saw_id)
            .cloned()
            .collect())
    }

    async fn sharpenings(&self) -> ApiResult<Vec<SharpeningView>> {
        Ok(Vec::new())
    }

    async fn create_sharpening(&self, new: &NewSharpening) -> ApiResult<Sharpening> {
        self.record(Call::CreateSharpening(new.clone()));
        let mut state = self.state.lock().unwrap();
        if state.fail_sharpening_create {
            return Err(unavailable());
        }
        let id = Self::next_id(&mut state);
        let sharpening = Sharpening {
            id,
            saw_id: new.saw_id,
            sharpening_type_id: new.sharpening_type_id,
            intake_at: Utc::now(),
            exit_at: None,
            notes: new.notes.clone(),
            is_last_sharpening: new.is_last_sharpening,
        };
        state.sharpenings.push(sharpening.clone());
        Ok(sharpening)
    }

    async fn update_sharpening(
        &self,
        id: DbId,
        update: &SharpeningUpdate,
    ) -> ApiResult<Sharpening> {
        self.record(Call::UpdateSharpening(id, update.clone()));
        let mut state = self.state.lock().unwrap();
        let record = state
            .sharpenings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::NotFound { entity: "sharpening", id })?;
        if let Some(type_id) = update.sharpening_type_id {
            record.sharpening_type_id = type_id;
        }
        if let Some(last) = update.is_last_sharpening {
            record.is_last_sharpening = last;
        }
        record.notes = update.notes.clone();
        Ok(record.clone())
    }

    async fn register_exit(&self, id: DbId) -> ApiResult<Sharpening> {
        self.record(Call::RegisterExit(id));
        let mut state = self.state.lock().unwrap();
        let record = state
            .sharpenings
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(CoreError::NotFound { entity: "sharpening", id })?;
        record.register_exit(record.intake_at + Duration::days(1))?;
        Ok(record.clone())
    }

    async fn register_exit_bulk(&self, request: &BulkExit) -> ApiResult<BulkExitResult> {
        self.record(Call::RegisterExitBulk(request.ids.clone()));
        let mut state = self.state.lock().unwrap();
        let mut updated = 0;
        for record in state
            .sharpenings
            .iter_mut()
            .filter(|r| request.ids.contains(&r.id))
        {
            let at = record.intake_at + Duration::days(1);
            if record.register_exit(at).is_ok() {
                updated += 1;
            }
        }
        Ok(BulkExitResult { updated })
    }

    async fn sharpening_types(&self) -> ApiResult<Vec<SharpeningType>> {
        Ok(Vec::new())
    }

    async fn saw_types(&self) -> ApiResult<Vec<SawType>> {
        Ok(Vec::new())
    }

    async fn saw_states(&self) -> ApiResult<Vec<SawState>> {
        Ok(Vec::new())
    }

    async fn branches(&self) -> ApiResult<Vec<Branch>> {
        Ok(Vec::new())
    }

    async fn branches_by_client(&self, _client_id: DbId) -> ApiResult<Vec<Branch>> {
        Ok(Vec::new())
    }

    async fn clients(&self) -> ApiResult<Vec<Client>> {
        Ok(Vec::new())
    }

    async fn create_user(&self, user: &UserPayload) -> ApiResult<User> {
        self.record(Call::CreateUser(user.clone()));
        let mut state = self.state.lock().unwrap();
        let id = Self::next_id(&mut state);
        Ok(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            client_id: user.client_id,
        })
    }

    async fn update_user(&self, id: DbId, user: &UserPayload) -> ApiResult<User> {
        self.record(Call::UpdateUser(id, user.clone()));
        Ok(User {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            client_id: user.client_id,
        })
    }
}

// ---------------------------------------------------------------------------
// HTTP fixture server
// ---------------------------------------------------------------------------

/// Serve `router` on 127.0.0.1 with an ephemeral port and return its base URL.
pub async fn spawn_backend(router: axum::Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fixture listener");
    let addr = listener.local_addr().expect("fixture listener address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fixture server");
    });
    format!("http://{addr}")
}
