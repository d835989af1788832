//! A schema source backed by a fixed list.

use async_trait::async_trait;
use std::path::Path;

use crate::error::SchemaResult;
use crate::schema::{SchemaDefinition, TableSchema};
use crate::traits::SchemaSource;

/// A [`SchemaSource`] that always returns the same list.
///
/// Typically built from the packaged [`SchemaDefinition`] of a service to
/// supply the expected side of a verification.
#[derive(Debug, Clone)]
pub struct StaticSchemaSource {
    name: String,
    schemas: Option<Vec<TableSchema>>,
}

impl StaticSchemaSource {
    /// Creates a source over an in-memory list.
    pub fn new(name: impl Into<String>, schemas: Vec<TableSchema>) -> Self {
        Self {
            name: name.into(),
            schemas: Some(schemas),
        }
    }

    /// Creates a source with no list at all.
    pub fn absent(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schemas: None,
        }
    }

    /// Creates a source from a schema definition.
    pub fn from_definition(name: impl Into<String>, definition: &SchemaDefinition) -> Self {
        Self::new(name, definition.to_schemas())
    }

    /// Creates a source from a schema definition file.
    pub fn from_path(name: impl Into<String>, path: impl AsRef<Path>) -> SchemaResult<Self> {
        let definition = SchemaDefinition::from_path(path)?;
        Ok(Self::from_definition(name, &definition))
    }

    /// Returns the list this source serves.
    pub fn schemas(&self) -> Option<&[TableSchema]> {
        self.schemas.as_deref()
    }
}

#[async_trait]
impl SchemaSource for StaticSchemaSource {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_schemas(&self) -> SchemaResult<Option<Vec<TableSchema>>> {
        Ok(self.schemas.clone())
    }
}
