//! Resolution walk over a permission table

use std::borrow::Borrow;
use std::hash::Hash;

use tracing::{debug, trace};

use crate::acl::models::Grant;
use crate::acl::table::PermissionTable;
use crate::error::{Error, Result};

/// Resolves access rights for `(subject, path)` pairs
///
/// The resolver owns an immutable [`PermissionTable`] and walks it from the
/// most specific path key upward to the root, then to the global wildcard
/// entry, returning the first applicable grant. An explicit revocation at a
/// more specific level overrides any coarser-grained grant.
///
/// All queries take `&self`; the resolver is safe for unlimited concurrent
/// readers.
pub struct Resolver<S: Eq + Hash, R> {
    table: PermissionTable<S, R>,
}

impl<S, R> Resolver<S, R>
where
    S: Eq + Hash,
{
    /// Create a resolver over a fully constructed permission table
    ///
    /// Table shape validity is guaranteed by the type system here; untyped
    /// configuration input is validated by
    /// [`PermissionTable::from_json_value`].
    pub fn new(table: PermissionTable<S, R>) -> Self {
        Self { table }
    }

    /// The underlying permission table
    pub fn table(&self) -> &PermissionTable<S, R> {
        &self.table
    }

    /// Resolve the rights a subject has for a path
    ///
    /// Returns `Ok(None)` when no applicable grant exists or an explicit
    /// revocation applies. `Err` is reserved for caller-input errors such as
    /// an empty path.
    pub fn resolve<Q>(&self, subject: &Q, path: &str) -> Result<Option<&R>>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.walk(subject, path)
    }

    /// Resolve rights for a path, gated by a caller-supplied predicate
    ///
    /// The predicate receives the resolved rights value and accepts it by
    /// returning `true`; a rejected value is never returned. The predicate is
    /// invoked synchronously on the calling thread and is never evaluated on
    /// denial.
    pub fn resolve_with<Q, F>(&self, subject: &Q, path: &str, accept: F) -> Result<Option<&R>>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(&R) -> bool,
    {
        match self.walk(subject, path)? {
            Some(rights) => {
                if accept(rights) {
                    Ok(Some(rights))
                } else {
                    debug!(path, "resolved rights rejected by caller predicate");
                    Ok(None)
                }
            }
            None => Ok(None),
        }
    }

    /// Resolve the rights a subject has for a path, failing fast on denial
    ///
    /// This is the primary entry point for callers that treat denial as
    /// exceptional control flow; it surfaces denial as
    /// [`Error::AccessDenied`] instead of a sentinel.
    pub fn resolve_or_deny<Q>(&self, subject: &Q, path: &str) -> Result<&R>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.walk(subject, path)?
            .ok_or_else(|| Error::AccessDenied { path: path.to_string() })
    }

    /// Resolve rights gated by a predicate, failing fast on denial
    pub fn resolve_or_deny_with<Q, F>(&self, subject: &Q, path: &str, accept: F) -> Result<&R>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
        F: FnOnce(&R) -> bool,
    {
        self.resolve_with(subject, path, accept)?
            .ok_or_else(|| Error::AccessDenied { path: path.to_string() })
    }

    /// Successive-truncation walk from the full path down to the root, then
    /// the global wildcard entry
    fn walk<Q>(&self, subject: &Q, path: &str) -> Result<Option<&R>>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        if path.is_empty() {
            return Err(Error::InvalidPath("path must be a non-empty string".to_string()));
        }

        let mut key = path;
        loop {
            if let Some(entry) = self.table.entry(key) {
                match entry.grant_for(subject) {
                    Some(Grant::Rights(rights)) => {
                        debug!(key, "grant found");
                        return Ok(Some(rights));
                    }
                    Some(Grant::Revoked) => {
                        debug!(key, "explicit revocation, denying");
                        return Ok(None);
                    }
                    None => trace!(key, "entry has no slot for subject"),
                }
            } else {
                trace!(key, "no entry");
            }
            match key.rfind('/') {
                Some(cut) => key = &key[..cut],
                None => break,
            }
        }

        match self.table.global().and_then(|entry| entry.grant_for(subject)) {
            Some(Grant::Rights(rights)) => {
                debug!(path, "grant found at global wildcard");
                Ok(Some(rights))
            }
            Some(Grant::Revoked) | None => {
                debug!(path, "no applicable grant, denying");
                Ok(None)
            }
        }
    }
}
