//! Lookup of table schemas by table name.

use std::collections::HashMap;

use super::{TableName, TableSchema};

/// An index over one schema list, keyed by table name.
///
/// The index borrows the schemas it was built from and lives for a single
/// verification. When the same name appears more than once, the later entry
/// replaces the earlier one and the name is recorded in
/// [`duplicates`](Self::duplicates).
#[derive(Debug, Default)]
pub struct SchemaIndex<'a> {
    tables: HashMap<&'a TableName, &'a TableSchema>,
    duplicates: Vec<&'a TableName>,
}

impl<'a> SchemaIndex<'a> {
    /// Builds an index over a schema list.
    pub fn build(schemas: &'a [TableSchema]) -> Self {
        let mut tables = HashMap::with_capacity(schemas.len());
        let mut duplicates = Vec::new();

        for schema in schemas {
            if tables.insert(schema.name(), schema).is_some() && !duplicates.contains(&schema.name())
            {
                duplicates.push(schema.name());
            }
        }

        Self { tables, duplicates }
    }

    /// Builds an index over a schema list that may be absent.
    pub fn from_optional(schemas: Option<&'a [TableSchema]>) -> Self {
        schemas.map(Self::build).unwrap_or_default()
    }

    /// Gets a schema by table name.
    pub fn get(&self, name: &TableName) -> Option<&'a TableSchema> {
        self.tables.get(name).copied()
    }

    /// Checks whether a table name is indexed.
    pub fn contains(&self, name: &TableName) -> bool {
        self.tables.contains_key(name)
    }

    /// Returns the number of distinct table names.
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if no tables are indexed.
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Returns the names that appeared more than once, in order of their
    /// first repetition.
    pub fn duplicates(&self) -> &[&'a TableName] {
        &self.duplicates
    }
}
