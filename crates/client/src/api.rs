//! The backend operations the application consumes.
//!
//! [`SawShopApi`] is the seam between workflows and transport: production
//! code uses [`HttpApi`](crate::http::HttpApi), tests substitute an
//! in-memory implementation.

use async_trait::async_trait;

use afilado_core::models::catalog::{SawState, SawType, SharpeningType};
use afilado_core::models::client::{Branch, Client};
use afilado_core::models::saw::{NewSaw, Saw, SawUpdate};
use afilado_core::models::sharpening::{
    BulkExit, BulkExitResult, NewSharpening, Sharpening, SharpeningUpdate, SharpeningView,
};
use afilado_core::models::user::{LoginRequest, LoginResponse, User, UserPayload};
use afilado_core::types::DbId;

use crate::error::ApiResult;

#[async_trait]
pub trait SawShopApi: Send + Sync {
    /// Attach (or clear) the bearer token sent with subsequent calls.
    fn authorize(&self, token: Option<String>);

    // -- auth ---------------------------------------------------------------

    async fn login(&self, credentials: &LoginRequest) -> ApiResult<LoginResponse>;

    // -- saws ---------------------------------------------------------------

    async fn saw(&self, id: DbId) -> ApiResult<Saw>;

    /// Look a saw up by its code. `Ok(None)` when no saw carries it.
    async fn saw_by_code(&self, code: &str) -> ApiResult<Option<Saw>>;

    async fn saws_by_branch(&self, branch_id: DbId) -> ApiResult<Vec<Saw>>;

    async fn saws_by_client(&self, client_id: DbId) -> ApiResult<Vec<Saw>>;

    async fn saws(&self) -> ApiResult<Vec<Saw>>;

    async fn create_saw(&self, saw: &NewSaw) -> ApiResult<Saw>;

    async fn update_saw(&self, id: DbId, update: &SawUpdate) -> ApiResult<Saw>;

    // -- sharpenings --------------------------------------------------------

    async fn sharpenings_for_saw(&self, saw_id: DbId) -> ApiResult<Vec<Sharpening>>;

    async fn sharpenings(&self) -> ApiResult<Vec<SharpeningView>>;

    async fn create_sharpening(&self, sharpening: &NewSharpening) -> ApiResult<Sharpening>;

    async fn update_sharpening(&self, id: DbId, update: &SharpeningUpdate)
        -> ApiResult<Sharpening>;

    async fn register_exit(&self, id: DbId) -> ApiResult<Sharpening>;

    /// One call for the whole set.
    async fn register_exit_bulk(&self, request: &BulkExit) -> ApiResult<BulkExitResult>;

    // -- catalogs -----------------------------------------------------------

    async fn sharpening_types(&self) -> ApiResult<Vec<SharpeningType>>;

    async fn saw_types(&self) -> ApiResult<Vec<SawType>>;

    async fn saw_states(&self) -> ApiResult<Vec<SawState>>;

    async fn branches(&self) -> ApiResult<Vec<Branch>>;

    async fn branches_by_client(&self, client_id: DbId) -> ApiResult<Vec<Branch>>;

    async fn clients(&self) -> ApiResult<Vec<Client>>;

    // -- users --------------------------------------------------------------

    async fn create_user(&self, user: &UserPayload) -> ApiResult<User>;

    async fn update_user(&self, id: DbId, user: &UserPayload) -> ApiResult<User>;
}
