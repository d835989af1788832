//! Packaged schema definitions.
//!
//! A service ships the tables it needs as a JSON document:
//!
//! ```json
//! {
//!   "namespace": "apm",
//!   "tables": [
//!     { "name": "traces", "columnFamilies": ["S", "A"] },
//!     { "name": "default:agents", "columnFamilies": ["I"] }
//!   ]
//! }
//! ```
//!
//! Unqualified table names are placed in the document namespace.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::{TableName, TableSchema, DEFAULT_NAMESPACE, NAMESPACE_DELIMITER};
use crate::error::{SchemaError, SchemaResult};

/// A table entry in a schema definition document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TableDefinition {
    /// Table name, optionally prefixed with `namespace:`.
    pub name: String,
    /// Column families the table must carry.
    #[serde(rename = "columnFamilies", default)]
    pub column_families: Vec<String>,
}

impl TableDefinition {
    /// Creates a new table entry.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_families: Vec::new(),
        }
    }

    /// Adds a column family.
    pub fn family(mut self, family: impl Into<String>) -> Self {
        self.column_families.push(family.into());
        self
    }
}

/// The expected schema of a service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SchemaDefinition {
    /// Namespace for unqualified table names.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Table entries.
    #[serde(default)]
    pub tables: Vec<TableDefinition>,
}

fn default_namespace() -> String {
    DEFAULT_NAMESPACE.to_string()
}

impl Default for SchemaDefinition {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaDefinition {
    /// Creates an empty definition in the default namespace.
    pub fn new() -> Self {
        Self {
            namespace: default_namespace(),
            tables: Vec::new(),
        }
    }

    /// Sets the namespace for unqualified table names.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Adds a table entry.
    pub fn table(mut self, table: TableDefinition) -> Self {
        self.tables.push(table);
        self
    }

    /// Parses a definition from JSON text.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let definition: Self = serde_json::from_str(json)
            .map_err(|e| SchemaError::invalid_definition(e.to_string()))?;
        definition.validate()?;
        Ok(definition)
    }

    /// Reads and parses a definition file.
    pub fn from_path(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            SchemaError::invalid_definition(format!("cannot read {}: {}", path.display(), e))
        })?;
        let definition = Self::from_json(&json)?;
        tracing::debug!(
            path = %path.display(),
            namespace = %definition.namespace,
            tables = definition.tables.len(),
            "Loaded schema definition"
        );
        Ok(definition)
    }

    /// Checks names and rejects tables declared twice.
    pub fn validate(&self) -> SchemaResult<()> {
        let mut seen = HashSet::with_capacity(self.tables.len());

        for table in &self.tables {
            if table.name.trim().is_empty() {
                return Err(SchemaError::invalid_definition("table name must not be empty"));
            }
            if let Some(family) = table.column_families.iter().find(|f| f.trim().is_empty()) {
                return Err(SchemaError::invalid_definition(format!(
                    "table '{}' declares an empty column family name '{}'",
                    table.name, family
                )));
            }

            let name = self.qualify(&table.name);
            if !seen.insert(name.clone()) {
                return Err(SchemaError::DuplicateTable {
                    table: name.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Returns the table schemas this definition describes, in document
    /// order.
    pub fn to_schemas(&self) -> Vec<TableSchema> {
        self.tables
            .iter()
            .map(|table| {
                TableSchema::new(self.qualify(&table.name))
                    .with_families(table.column_families.iter().cloned())
            })
            .collect()
    }

    fn qualify(&self, name: &str) -> TableName {
        match name.split_once(NAMESPACE_DELIMITER) {
            Some((namespace, qualifier)) => TableName::new(namespace, qualifier),
            None => TableName::new(&self.namespace, name),
        }
    }
}
