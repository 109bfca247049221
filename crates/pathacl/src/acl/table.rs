//! Permission table container

use std::collections::HashMap;
use std::hash::Hash;

use crate::acl::models::{RightsEntry, WILDCARD};

/// Mapping from path keys to per-subject rights
///
/// Path keys are `/`-joined segment sequences; the reserved key `*` addresses
/// the global wildcard entry consulted as a last resort. The table is built
/// once and handed to a [`Resolver`](crate::Resolver), which never mutates it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionTable<S: Eq + Hash, R> {
    paths: HashMap<String, RightsEntry<S, R>>,
    global: Option<RightsEntry<S, R>>,
}

impl<S, R> PermissionTable<S, R>
where
    S: Eq + Hash,
{
    /// Create an empty permission table
    pub fn new() -> Self {
        Self {
            paths: HashMap::new(),
            global: None,
        }
    }

    /// Number of path entries, the global wildcard entry included
    pub fn len(&self) -> usize {
        self.paths.len() + usize::from(self.global.is_some())
    }

    /// Check whether the table has no entries at all
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty() && self.global.is_none()
    }

    /// Insert an entry for a path key, replacing any existing one
    ///
    /// The key `*` routes to the global wildcard slot, so programmatic and
    /// deserialized tables agree on wildcard handling.
    pub fn insert(&mut self, path_key: impl Into<String>, entry: RightsEntry<S, R>) {
        let key = path_key.into();
        if key == WILDCARD {
            self.global = Some(entry);
        } else {
            self.paths.insert(key, entry);
        }
    }

    /// Look up the entry for an exact path key
    pub fn entry(&self, path_key: &str) -> Option<&RightsEntry<S, R>> {
        self.paths.get(path_key)
    }

    /// The global wildcard entry, if present
    pub fn global(&self) -> Option<&RightsEntry<S, R>> {
        self.global.as_ref()
    }

    /// Iterate over the concrete path entries (the global entry excluded)
    pub fn entries(&self) -> impl Iterator<Item = (&str, &RightsEntry<S, R>)> {
        self.paths.iter().map(|(key, entry)| (key.as_str(), entry))
    }

    /// Grant a rights value to a subject at a path key
    pub fn grant(&mut self, path_key: impl Into<String>, subject: impl Into<S>, rights: impl Into<R>) {
        self.entry_mut(path_key).grant(subject, rights);
    }

    /// Explicitly revoke a subject at a path key
    pub fn revoke(&mut self, path_key: impl Into<String>, subject: impl Into<S>) {
        self.entry_mut(path_key).revoke(subject);
    }

    /// Grant a rights value to any subject at a path key
    pub fn grant_any(&mut self, path_key: impl Into<String>, rights: impl Into<R>) {
        self.entry_mut(path_key).grant_any(rights);
    }

    /// Explicitly revoke any subject at a path key
    pub fn revoke_any(&mut self, path_key: impl Into<String>) {
        self.entry_mut(path_key).revoke_any();
    }

    fn entry_mut(&mut self, path_key: impl Into<String>) -> &mut RightsEntry<S, R> {
        let key = path_key.into();
        if key == WILDCARD {
            self.global.get_or_insert_with(RightsEntry::new)
        } else {
            self.paths.entry(key).or_default()
        }
    }
}

impl<S, R> Default for PermissionTable<S, R>
where
    S: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}
