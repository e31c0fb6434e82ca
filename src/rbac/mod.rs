//! Role-based access control: roles, resources, actions, and the static
//! permission table every gated operation consults.

pub mod role;
pub mod table;

pub use role::{display_name, Role, UnknownRole};
pub use table::{can, grants_for, Action, Resource};
