//! Role normalization and the capability table.
//!
//! The backend sends role names as display strings (`"Gerente"`,
//! `"Administrador"`, `"Cliente"`). They are normalized once into [`Role`]
//! and every permission question goes through [`Role::can`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Canonical role names as stored by the backend.
pub const ROLE_MANAGER: &str = "Gerente";
pub const ROLE_ADMINISTRATOR: &str = "Administrador";
pub const ROLE_CLIENT: &str = "Cliente";

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Manager,
    Administrator,
    Client,
}

/// Things a signed-in user may do from the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    ManageClients,
    ManageBranches,
    ManageUsers,
    ManageCatalogs,
    ViewAllClients,
    RegisterSaw,
    EditSaw,
    CreateSharpening,
    EditSharpening,
    RegisterExit,
    ViewReports,
    ViewDashboard,
}

const STAFF_ACTIONS: &[Action] = &[
    Action::ManageClients,
    Action::ManageBranches,
    Action::ManageUsers,
    Action::ManageCatalogs,
    Action::ViewAllClients,
    Action::RegisterSaw,
    Action::EditSaw,
    Action::CreateSharpening,
    Action::EditSharpening,
    Action::RegisterExit,
    Action::ViewReports,
    Action::ViewDashboard,
];

/// Clients see their own saws and may book sharpenings for them.
const CLIENT_ACTIONS: &[Action] = &[
    Action::RegisterSaw,
    Action::CreateSharpening,
    Action::ViewDashboard,
];

impl Role {
    /// Normalize a backend role string.
    ///
    /// Matching ignores case and surrounding whitespace and also accepts the
    /// English names.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        match raw.trim().to_lowercase().as_str() {
            "gerente" | "manager" => Ok(Self::Manager),
            "administrador" | "admin" | "administrator" => Ok(Self::Administrator),
            "cliente" | "client" => Ok(Self::Client),
            _ => Err(CoreError::Validation(format!(
                "Unknown role '{raw}'. Must be one of: {ROLE_MANAGER}, {ROLE_ADMINISTRATOR}, {ROLE_CLIENT}"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => ROLE_MANAGER,
            Self::Administrator => ROLE_ADMINISTRATOR,
            Self::Client => ROLE_CLIENT,
        }
    }

    /// Managers and administrators share the staff view.
    pub fn is_staff(&self) -> bool {
        matches!(self, Self::Manager | Self::Administrator)
    }

    /// Every action this role may perform.
    pub fn capabilities(&self) -> &'static [Action] {
        if self.is_staff() {
            STAFF_ACTIONS
        } else {
            CLIENT_ACTIONS
        }
    }

    pub fn can(&self, action: Action) -> bool {
        self.capabilities().contains(&action)
    }

    /// Like [`Role::can`], as a `Forbidden` error for early returns.
    pub fn require(&self, action: Action) -> Result<(), CoreError> {
        if self.can(action) {
            Ok(())
        } else {
            Err(CoreError::Forbidden(format!(
                "Role {} may not perform {action:?}",
                self.as_str()
            )))
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
