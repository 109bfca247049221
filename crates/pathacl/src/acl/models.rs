//! Access control data models

use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;

/// Reserved key matching any subject (within an entry) or any path (as a table key)
pub const WILDCARD: &str = "*";

/// Outcome recorded for a subject at a single path key
///
/// Absence of a subject from a [`RightsEntry`] is a third, structurally
/// distinct state ("not specified here, keep looking") and is represented by
/// map absence, never by a nullable slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant<R> {
    /// Subject holds the contained rights value at this level
    Rights(R),
    /// Subject is explicitly revoked at this level; the walk stops here
    Revoked,
}

impl<R> Grant<R> {
    /// The rights value, or `None` for an explicit revocation
    pub fn rights(&self) -> Option<&R> {
        match self {
            Grant::Rights(rights) => Some(rights),
            Grant::Revoked => None,
        }
    }

    /// Check whether this grant is an explicit revocation
    pub fn is_revoked(&self) -> bool {
        matches!(self, Grant::Revoked)
    }
}

impl<R> From<Option<R>> for Grant<R> {
    /// `None` maps to an explicit revocation, mirroring the `null` subject
    /// slots of the configuration wire format
    fn from(slot: Option<R>) -> Self {
        match slot {
            Some(rights) => Grant::Rights(rights),
            None => Grant::Revoked,
        }
    }
}

/// Per-path-key rights: concrete subjects plus an optional wildcard slot
///
/// The wildcard subject lives in its own slot rather than behind a reserved
/// value inside the subject type, so any `Eq + Hash` subject works.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightsEntry<S: Eq + Hash, R> {
    subjects: HashMap<S, Grant<R>>,
    any_subject: Option<Grant<R>>,
}

impl<S, R> RightsEntry<S, R>
where
    S: Eq + Hash,
{
    /// Create an empty rights entry
    pub fn new() -> Self {
        Self {
            subjects: HashMap::new(),
            any_subject: None,
        }
    }

    /// Check whether the entry mentions no subject at all
    pub fn is_empty(&self) -> bool {
        self.subjects.is_empty() && self.any_subject.is_none()
    }

    /// Set the slot for a concrete subject
    pub fn set(&mut self, subject: S, grant: Grant<R>) {
        self.subjects.insert(subject, grant);
    }

    /// Set the wildcard-subject slot
    pub fn set_any(&mut self, grant: Grant<R>) {
        self.any_subject = Some(grant);
    }

    /// Grant a rights value to a concrete subject
    pub fn grant(&mut self, subject: impl Into<S>, rights: impl Into<R>) {
        self.set(subject.into(), Grant::Rights(rights.into()));
    }

    /// Explicitly revoke a concrete subject at this level
    pub fn revoke(&mut self, subject: impl Into<S>) {
        self.set(subject.into(), Grant::Revoked);
    }

    /// Grant a rights value to any subject
    pub fn grant_any(&mut self, rights: impl Into<R>) {
        self.set_any(Grant::Rights(rights.into()));
    }

    /// Explicitly revoke any subject at this level
    pub fn revoke_any(&mut self) {
        self.set_any(Grant::Revoked);
    }

    /// Look up the applicable slot for a subject
    ///
    /// The concrete-subject slot wins whenever its key is present, granting
    /// or revoking; the wildcard slot is consulted only when the subject key
    /// is absent. Returns `None` when neither slot is present, meaning this
    /// entry has no opinion on the subject.
    pub fn grant_for<Q>(&self, subject: &Q) -> Option<&Grant<R>>
    where
        S: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.subjects
            .get(subject)
            .or(self.any_subject.as_ref())
    }

    /// Iterate over the concrete-subject slots
    pub fn subjects(&self) -> impl Iterator<Item = (&S, &Grant<R>)> {
        self.subjects.iter()
    }

    /// The wildcard-subject slot, if present
    pub fn any_subject(&self) -> Option<&Grant<R>> {
        self.any_subject.as_ref()
    }
}

impl<S, R> Default for RightsEntry<S, R>
where
    S: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grant_rights_accessor() {
        let grant: Grant<&str> = Grant::Rights("rw");
        assert_eq!(grant.rights(), Some(&"rw"));
        assert!(!grant.is_revoked());

        let revoked: Grant<&str> = Grant::Revoked;
        assert_eq!(revoked.rights(), None);
        assert!(revoked.is_revoked());
    }

    #[test]
    fn test_grant_from_option() {
        assert_eq!(Grant::from(Some("r")), Grant::Rights("r"));
        assert_eq!(Grant::<&str>::from(None), Grant::Revoked);
    }

    #[test]
    fn test_entry_concrete_subject_beats_wildcard() {
        let mut entry: RightsEntry<String, String> = RightsEntry::new();
        entry.grant("terry", "rw");
        entry.grant_any("r");

        assert_eq!(entry.grant_for("terry"), Some(&Grant::Rights("rw".to_string())));
        assert_eq!(entry.grant_for("guest"), Some(&Grant::Rights("r".to_string())));
    }

    #[test]
    fn test_entry_revoked_subject_masks_wildcard_grant() {
        let mut entry: RightsEntry<String, String> = RightsEntry::new();
        entry.revoke("terry");
        entry.grant_any("r");

        // A present slot wins over the wildcard even when it revokes
        assert_eq!(entry.grant_for("terry"), Some(&Grant::Revoked));
        assert_eq!(entry.grant_for("guest"), Some(&Grant::Rights("r".to_string())));
    }

    #[test]
    fn test_entry_absent_subject_without_wildcard() {
        let mut entry: RightsEntry<String, String> = RightsEntry::new();
        entry.grant("billy", "rw");

        assert_eq!(entry.grant_for("terry"), None);
    }

    #[test]
    fn test_entry_empty() {
        let entry: RightsEntry<String, String> = RightsEntry::default();
        assert!(entry.is_empty());
        assert_eq!(entry.grant_for("anyone"), None);
    }
}
