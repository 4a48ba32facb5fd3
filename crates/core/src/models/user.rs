//! Application users and the session payload returned by login.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::DbId;

/// A user account. Client-role users are bound to exactly one client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(default)]
    pub client_id: Option<DbId>,
}

/// Input for creating or updating a user. `password` is omitted on edits
/// that keep the current password.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPayload {
    pub name: String,
    pub email: String,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_id: Option<DbId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

/// Credentials sent to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response: an opaque bearer token plus the signed-in user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}
