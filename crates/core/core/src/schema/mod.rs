//! Table and column-family schema values.
//!
//! A [`TableSchema`] names one table and the column families it carries.
//! Lists of table schemas come from two places: a packaged
//! [`SchemaDefinition`] describing what a service expects, and a live store
//! catalog describing what actually exists. The [`verify`] module decides
//! whether the second satisfies the first.

mod definition;
mod index;
mod verify;

pub use definition::{SchemaDefinition, TableDefinition};
pub use index::SchemaIndex;
pub use verify::{
    verify_report, verify_schemas, FamilySubsetVerifier, SchemaVerifier, VerificationReport,
};

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Name of the namespace that unqualified table names belong to.
pub const DEFAULT_NAMESPACE: &str = "default";

/// Separator between namespace and qualifier in a table name.
pub const NAMESPACE_DELIMITER: char = ':';

/// A namespace-qualified table name.
///
/// The name is kept as an opaque string and compared byte for byte. Tables
/// in the default namespace render as their bare qualifier, every other
/// table renders as `namespace:qualifier`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableName(String);

impl TableName {
    /// Creates a table name from a namespace and a qualifier.
    pub fn new(namespace: &str, qualifier: &str) -> Self {
        if namespace.is_empty() || namespace == DEFAULT_NAMESPACE {
            Self(qualifier.to_string())
        } else {
            Self(format!("{namespace}{NAMESPACE_DELIMITER}{qualifier}"))
        }
    }

    /// Creates a table name in the default namespace.
    pub fn in_default(qualifier: &str) -> Self {
        Self::new(DEFAULT_NAMESPACE, qualifier)
    }

    /// Returns the full name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the namespace part of the name.
    pub fn namespace(&self) -> &str {
        match self.0.split_once(NAMESPACE_DELIMITER) {
            Some((namespace, _)) => namespace,
            None => DEFAULT_NAMESPACE,
        }
    }

    /// Returns the qualifier part of the name.
    pub fn qualifier(&self) -> &str {
        match self.0.split_once(NAMESPACE_DELIMITER) {
            Some((_, qualifier)) => qualifier,
            None => &self.0,
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TableName {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for TableName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for TableName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Describes one table: its name and the column families it carries.
///
/// Values are immutable once shared. The builder methods take `self` by
/// value, so extending a schema always produces a new value owned by the
/// caller and never touches one that is already part of a list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// The table identity.
    name: TableName,
    /// Column family names, without duplicates.
    #[serde(rename = "columnFamilies", default)]
    families: BTreeSet<String>,
}

impl TableSchema {
    /// Creates a table schema with no column families.
    pub fn new(name: impl Into<TableName>) -> Self {
        Self {
            name: name.into(),
            families: BTreeSet::new(),
        }
    }

    /// Adds a column family. Adding a family twice keeps a single entry.
    pub fn with_family(mut self, family: impl Into<String>) -> Self {
        self.families.insert(family.into());
        self
    }

    /// Adds several column families.
    pub fn with_families(mut self, families: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.families.extend(families.into_iter().map(Into::into));
        self
    }

    /// Returns the table identity.
    pub fn name(&self) -> &TableName {
        &self.name
    }

    /// Returns the column family names in sorted order.
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.families.iter().map(String::as_str)
    }

    /// Returns the number of column families.
    pub fn family_count(&self) -> usize {
        self.families.len()
    }

    /// Checks whether the table carries the given column family.
    pub fn has_family(&self, family: &str) -> bool {
        self.families.contains(family)
    }

    /// Checks whether both schemas describe the same table, regardless of
    /// their column families.
    pub fn same_table(&self, other: &TableSchema) -> bool {
        self.name == other.name
    }

    /// Returns the families of this schema that `actual` does not carry.
    pub fn missing_families_in<'a>(&'a self, actual: &TableSchema) -> Vec<&'a str> {
        self.families
            .iter()
            .filter(|family| !actual.families.contains(family.as_str()))
            .map(String::as_str)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_default_namespace() {
        let name = TableName::new(DEFAULT_NAMESPACE, "traces");
        assert_eq!(name.as_str(), "traces");
        assert_eq!(name.namespace(), DEFAULT_NAMESPACE);
        assert_eq!(name.qualifier(), "traces");
        assert_eq!(name, TableName::in_default("traces"));
    }

    #[test]
    fn test_table_name_custom_namespace() {
        let name = TableName::new("apm", "traces");
        assert_eq!(name.to_string(), "apm:traces");
        assert_eq!(name.namespace(), "apm");
        assert_eq!(name.qualifier(), "traces");
    }

    #[test]
    fn test_table_name_is_case_sensitive() {
        assert_ne!(TableName::from("Traces"), TableName::from("traces"));
    }

    #[test]
    fn test_duplicate_families_collapse() {
        let schema = TableSchema::new("table1")
            .with_family("cf")
            .with_family("cf")
            .with_families(["cf", "other"]);
        assert_eq!(schema.family_count(), 2);
        assert_eq!(schema.families().collect::<Vec<_>>(), vec!["cf", "other"]);
    }

    #[test]
    fn test_same_table_ignores_families() {
        let a = TableSchema::new("table1").with_family("a");
        let b = TableSchema::new("table1").with_family("b");
        assert!(a.same_table(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn test_missing_families_in() {
        let expected = TableSchema::new("t").with_families(["a", "b", "c"]);
        let actual = TableSchema::new("t").with_families(["b", "d"]);
        assert_eq!(expected.missing_families_in(&actual), vec!["a", "c"]);
        assert!(actual.missing_families_in(&actual).is_empty());
    }

    #[test]
    fn test_serde_shape() {
        let schema = TableSchema::new("apm:traces").with_families(["S", "A"]);
        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"name": "apm:traces", "columnFamilies": ["A", "S"]})
        );

        let parsed: TableSchema =
            serde_json::from_value(serde_json::json!({"name": "t"})).unwrap();
        assert_eq!(parsed.family_count(), 0);
    }
}
