//! Permission table and resolution walk

pub mod models;
pub mod resolver;
pub mod table;

pub use models::{Grant, RightsEntry, WILDCARD};
pub use resolver::Resolver;
pub use table::PermissionTable;
