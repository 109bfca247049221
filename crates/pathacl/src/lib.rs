//! Hierarchical path-based access control
//!
//! Maps `/`-joined path prefixes to per-subject rights, with a wildcard
//! subject (`*`) for "any user" and a wildcard path key (`*`) for "applies
//! everywhere". Resolution walks from the most specific path upward to the
//! root, then falls back to the global wildcard, returning the first
//! applicable grant; an explicit revocation at a more specific level
//! overrides any coarser-grained grant.
//!
//! ```
//! use pathacl::{PermissionTable, Resolver};
//!
//! let mut table: PermissionTable<String, String> = PermissionTable::new();
//! table.grant("projects", "jonny", "rw");
//! table.revoke("projects/private", "terry");
//! table.grant_any("projects/public", "r");
//! table.grant("*", "terry", "r");
//!
//! let auth = Resolver::new(table);
//! assert_eq!(auth.resolve("jonny", "projects").unwrap(), Some(&"rw".to_string()));
//! assert_eq!(auth.resolve("terry", "projects").unwrap(), Some(&"r".to_string()));
//! assert_eq!(auth.resolve("terry", "projects/private").unwrap(), None);
//! assert_eq!(auth.resolve("guest", "projects/public").unwrap(), Some(&"r".to_string()));
//! ```
//!
//! Tables can also be loaded from JSON or YAML documents; see
//! [`PermissionTable::from_json_str`] and friends.

pub mod acl;
pub mod error;

mod loader;

pub use acl::{Grant, PermissionTable, Resolver, RightsEntry, WILDCARD};
pub use error::{Error, Result};
