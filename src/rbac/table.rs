//! The static permission table.
//!
//! One mapping from role to resource to allowed actions, consulted by every
//! gated operation and by presentation layers deciding which controls to
//! expose. A resource with no entry for a role grants nothing.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Resource {
    Departments,
    Projects,
    Resources,
    Schedule,
    Forum,
    Users,
    Admin,
    Meetings,
    Tasks,
}

impl Resource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Resource::Departments => "departments",
            Resource::Projects => "projects",
            Resource::Resources => "resources",
            Resource::Schedule => "schedule",
            Resource::Forum => "forum",
            Resource::Users => "users",
            Resource::Admin => "admin",
            Resource::Meetings => "meetings",
            Resource::Tasks => "tasks",
        }
    }
}

impl std::fmt::Display for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Manage,
    Moderate,
    Coordinate,
    Update,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Edit => "edit",
            Action::Delete => "delete",
            Action::Manage => "manage",
            Action::Moderate => "moderate",
            Action::Coordinate => "coordinate",
            Action::Update => "update",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

use Action::{Coordinate, Create, Delete, Edit, Manage, Moderate, Update, View};

type Grants = HashMap<Resource, &'static [Action]>;

static ROLE_PERMISSIONS: Lazy<HashMap<Role, Grants>> = Lazy::new(|| {
    let mut table = HashMap::new();

    table.insert(
        Role::Admin,
        grants(&[
            (Resource::Departments, &[View, Create, Edit, Delete, Manage]),
            (
                Resource::Projects,
                &[View, Create, Edit, Delete, Manage, Coordinate],
            ),
            (Resource::Resources, &[View, Create, Edit, Delete, Manage]),
            (Resource::Schedule, &[View, Create, Edit, Delete, Manage]),
            (
                Resource::Forum,
                &[View, Create, Edit, Delete, Moderate, Manage],
            ),
            (Resource::Users, &[View, Create, Edit, Delete, Manage]),
            (Resource::Admin, &[View, Manage]),
            (Resource::Meetings, &[View, Create, Edit, Delete, Manage]),
            (
                Resource::Tasks,
                &[View, Create, Edit, Delete, Manage, Update],
            ),
        ]),
    );

    table.insert(
        Role::DepartmentAdmin,
        grants(&[
            (Resource::Departments, &[View, Create, Edit, Delete]),
            (
                Resource::Projects,
                &[View, Create, Edit, Delete, Coordinate],
            ),
            (Resource::Resources, &[View, Create, Edit, Delete]),
            (Resource::Schedule, &[View, Create, Edit, Delete]),
            (Resource::Forum, &[View, Create, Edit, Delete, Moderate]),
            (Resource::Users, &[View, Create, Edit, Delete]),
            (Resource::Meetings, &[View, Create, Edit, Delete]),
            (Resource::Tasks, &[View, Create, Edit, Delete, Update]),
        ]),
    );

    table.insert(
        Role::Officer,
        grants(&[
            (Resource::Departments, &[View]),
            (Resource::Projects, &[View, Create, Edit]),
            (Resource::Resources, &[View, Create]),
            (Resource::Schedule, &[View, Create, Edit]),
            (Resource::Forum, &[View, Create, Edit]),
            (Resource::Users, &[View]),
            (Resource::Meetings, &[View, Create, Edit]),
            (Resource::Tasks, &[View, Create, Edit, Update]),
        ]),
    );

    table.insert(
        Role::ProjectManager,
        grants(&[
            (Resource::Departments, &[View]),
            (Resource::Projects, &[View, Create, Edit, Delete]),
            (Resource::Resources, &[View, Create, Edit]),
            (Resource::Schedule, &[View, Create, Edit, Delete]),
            (Resource::Forum, &[View, Create, Edit]),
            (Resource::Users, &[View]),
            (Resource::Meetings, &[View, Create, Edit, Delete]),
            (Resource::Tasks, &[View, Create, Edit, Delete, Update]),
        ]),
    );

    table.insert(
        Role::TechnicalExpert,
        grants(&[
            (Resource::Departments, &[View]),
            (Resource::Projects, &[View, Create, Edit]),
            (Resource::Resources, &[View, Create, Edit]),
            (Resource::Schedule, &[View, Create]),
            (Resource::Forum, &[View, Create, Edit]),
            (Resource::Users, &[View]),
            (Resource::Meetings, &[View, Create]),
            (Resource::Tasks, &[View, Create, Update]),
        ]),
    );

    table.insert(
        Role::PublicViewer,
        grants(&[
            (Resource::Departments, &[View]),
            (Resource::Projects, &[View]),
            (Resource::Resources, &[View]),
            (Resource::Schedule, &[View]),
            (Resource::Forum, &[View]),
            (Resource::Users, &[]),
            (Resource::Meetings, &[View]),
            (Resource::Tasks, &[View]),
        ]),
    );

    table
});

fn grants(entries: &[(Resource, &'static [Action])]) -> Grants {
    entries.iter().copied().collect()
}

/// Checks whether `role` may perform `action` on `resource`.
///
/// Pure lookup with no side effects. An absent role (unauthenticated or
/// unrecognized session) is denied everything, as is any resource/action
/// pair outside the role's table entry.
pub fn can(role: Option<Role>, resource: Resource, action: Action) -> bool {
    let Some(role) = role else {
        return false;
    };

    ROLE_PERMISSIONS
        .get(&role)
        .and_then(|perms| perms.get(&resource))
        .map(|actions| actions.contains(&action))
        .unwrap_or(false)
}

/// The literal action list a role holds on a resource; empty when the table
/// has no entry. Presentation layers use this to decide which controls to
/// render.
pub fn grants_for(role: Role, resource: Resource) -> &'static [Action] {
    ROLE_PERMISSIONS
        .get(&role)
        .and_then(|perms| perms.get(&resource))
        .copied()
        .unwrap_or(&[])
}
