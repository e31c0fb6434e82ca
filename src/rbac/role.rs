//! User roles. Fixed set, immutable once assigned to a session.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    DepartmentAdmin,
    Officer,
    ProjectManager,
    TechnicalExpert,
    PublicViewer,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Admin,
        Role::DepartmentAdmin,
        Role::Officer,
        Role::ProjectManager,
        Role::TechnicalExpert,
        Role::PublicViewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::DepartmentAdmin => "department_admin",
            Role::Officer => "officer",
            Role::ProjectManager => "project_manager",
            Role::TechnicalExpert => "technical_expert",
            Role::PublicViewer => "public_viewer",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Role::Admin => "System Administrator",
            Role::DepartmentAdmin => "Department Admin",
            Role::Officer => "Officer/Engineer",
            Role::ProjectManager => "Project Manager",
            Role::TechnicalExpert => "Technical Expert",
            Role::PublicViewer => "Public Viewer",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "department_admin" => Ok(Role::DepartmentAdmin),
            "officer" => Ok(Role::Officer),
            "project_manager" => Ok(Role::ProjectManager),
            "technical_expert" => Ok(Role::TechnicalExpert),
            "public_viewer" => Ok(Role::PublicViewer),
            other => Err(UnknownRole(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownRole(pub String);

impl std::fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown role: {}", self.0)
    }
}

impl std::error::Error for UnknownRole {}

/// Human-readable name for a session's role, with a fixed fallback for
/// unauthenticated sessions.
pub fn display_name(role: Option<Role>) -> &'static str {
    role.map(|r| r.display_name()).unwrap_or("Unknown Role")
}
