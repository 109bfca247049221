//! Loading permission tables from configuration documents
//!
//! The wire shape is a mapping of mappings:
//! `{ path-key: { subject-key: rights-or-null } }`, with `*` as the wildcard
//! for both path and subject keys and `null` as the explicit revocation
//! marker. Tables round-trip through this shape via the `Serialize` and
//! `Deserialize` impls below.

use std::collections::HashMap;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::acl::models::{Grant, RightsEntry, WILDCARD};
use crate::acl::table::PermissionTable;
use crate::error::{Error, Result};

impl<R> PermissionTable<String, R>
where
    R: DeserializeOwned,
{
    /// Build a table from an untyped JSON value
    ///
    /// This is the construction-time shape validation: a value that is not a
    /// mapping of mappings fails with [`Error::InvalidTable`]. `null` subject
    /// slots become explicit revocations; any other slot deserializes into
    /// the rights type.
    pub fn from_json_value(value: Value) -> Result<Self> {
        let Value::Object(paths) = value else {
            return Err(Error::InvalidTable(
                "permission table must be a mapping of path keys".to_string(),
            ));
        };

        let mut table = PermissionTable::new();
        for (path_key, entry_value) in paths {
            let Value::Object(subjects) = entry_value else {
                return Err(Error::InvalidTable(format!(
                    "entry for path key '{path_key}' must be a mapping of subject keys"
                )));
            };

            let mut entry = RightsEntry::new();
            for (subject_key, slot) in subjects {
                let grant = match slot {
                    Value::Null => Grant::Revoked,
                    other => Grant::Rights(serde_json::from_value(other)?),
                };
                if subject_key == WILDCARD {
                    entry.set_any(grant);
                } else {
                    entry.set(subject_key, grant);
                }
            }
            table.insert(path_key, entry);
        }
        Ok(table)
    }

    /// Parse a table from a JSON document
    pub fn from_json_str(document: &str) -> Result<Self> {
        Self::from_json_value(serde_json::from_str(document)?)
    }

    /// Parse a table from a YAML document
    pub fn from_yaml_str(document: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(document)?;
        Self::from_json_value(value)
    }

    /// Load a table from a JSON or YAML file, dispatched on extension
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let document = std::fs::read_to_string(path)?;
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yml") | Some("yaml") => Self::from_yaml_str(&document),
            _ => Self::from_json_str(&document),
        }
    }
}

impl<'de, R> Deserialize<'de> for PermissionTable<String, R>
where
    R: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: HashMap<String, HashMap<String, Option<R>>> = HashMap::deserialize(deserializer)?;

        let mut table = PermissionTable::new();
        for (path_key, subjects) in raw {
            let mut entry = RightsEntry::new();
            for (subject_key, slot) in subjects {
                let grant = Grant::from(slot);
                if subject_key == WILDCARD {
                    entry.set_any(grant);
                } else {
                    entry.set(subject_key, grant);
                }
            }
            table.insert(path_key, entry);
        }
        Ok(table)
    }
}

impl<R> Serialize for PermissionTable<String, R>
where
    R: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (path_key, entry) in self.entries() {
            map.serialize_entry(path_key, &SubjectMap(entry))?;
        }
        if let Some(global) = self.global() {
            map.serialize_entry(WILDCARD, &SubjectMap(global))?;
        }
        map.end()
    }
}

/// Serializes a rights entry back into the subject-to-nullable-rights shape
struct SubjectMap<'a, R>(&'a RightsEntry<String, R>);

impl<R> Serialize for SubjectMap<'_, R>
where
    R: Serialize,
{
    fn serialize<Ser>(&self, serializer: Ser) -> std::result::Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        for (subject, grant) in self.0.subjects() {
            map.serialize_entry(subject, &grant.rights())?;
        }
        if let Some(any) = self.0.any_subject() {
            map.serialize_entry(WILDCARD, &any.rights())?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str_grants_and_revocations() {
        let table: PermissionTable<String, String> = PermissionTable::from_json_str(
            r#"{
                "projects": { "jonny": "rw" },
                "projects/private": { "billy": "rw", "terry": null },
                "*": { "terry": "r" }
            }"#,
        )
        .unwrap();

        let private = table.entry("projects/private").unwrap();
        assert_eq!(private.grant_for("billy"), Some(&Grant::Rights("rw".to_string())));
        assert_eq!(private.grant_for("terry"), Some(&Grant::Revoked));
        assert_eq!(
            table.global().and_then(|e| e.grant_for("terry")),
            Some(&Grant::Rights("r".to_string()))
        );
    }

    #[test]
    fn test_wildcard_subject_key_routes_to_any_slot() {
        let table: PermissionTable<String, String> =
            PermissionTable::from_json_str(r#"{ "projects/public": { "*": "r" } }"#).unwrap();

        let entry = table.entry("projects/public").unwrap();
        assert_eq!(entry.grant_for("nobody-in-particular"), Some(&Grant::Rights("r".to_string())));
        assert_eq!(entry.any_subject(), Some(&Grant::Rights("r".to_string())));
    }

    #[test]
    fn test_non_table_value_is_rejected() {
        let result = PermissionTable::<String, String>::from_json_value(Value::String(
            "not a table".to_string(),
        ));
        assert!(matches!(result, Err(Error::InvalidTable(_))));

        let result = PermissionTable::<String, String>::from_json_value(Value::Null);
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn test_non_table_entry_is_rejected() {
        let result =
            PermissionTable::<String, String>::from_json_str(r#"{ "projects": "rw" }"#);
        assert!(matches!(result, Err(Error::InvalidTable(_))));
    }

    #[test]
    fn test_malformed_rights_value_is_a_serialization_error() {
        let result = PermissionTable::<String, u32>::from_json_str(
            r#"{ "projects": { "jonny": "not-a-number" } }"#,
        );
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[test]
    fn test_from_yaml_str() {
        let table: PermissionTable<String, String> = PermissionTable::from_yaml_str(
            "projects:\n  jonny: rw\nprojects/private:\n  terry: null\n'*':\n  '*': r\n",
        )
        .unwrap();

        assert_eq!(
            table.entry("projects").and_then(|e| e.grant_for("jonny")),
            Some(&Grant::Rights("rw".to_string()))
        );
        assert_eq!(
            table.entry("projects/private").and_then(|e| e.grant_for("terry")),
            Some(&Grant::Revoked)
        );
        assert_eq!(
            table.global().and_then(|e| e.any_subject()),
            Some(&Grant::Rights("r".to_string()))
        );
    }

    #[test]
    fn test_serialize_round_trip() {
        let mut table: PermissionTable<String, String> = PermissionTable::new();
        table.grant("projects", "jonny", "rw");
        table.revoke("projects/private", "terry");
        table.grant_any("projects/public", "r");
        table.grant("*", "terry", "r");

        let json = serde_json::to_string(&table).unwrap();
        let restored: PermissionTable<String, String> = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_typed_deserialize_inside_config_struct() {
        #[derive(Deserialize)]
        struct AppConfig {
            permissions: PermissionTable<String, String>,
        }

        let config: AppConfig = serde_json::from_str(
            r#"{ "permissions": { "projects": { "jonny": "rw", "terry": null } } }"#,
        )
        .unwrap();

        let entry = config.permissions.entry("projects").unwrap();
        assert_eq!(entry.grant_for("jonny"), Some(&Grant::Rights("rw".to_string())));
        assert_eq!(entry.grant_for("terry"), Some(&Grant::Revoked));
    }
}
