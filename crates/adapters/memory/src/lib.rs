//! # Schemagate Memory Adapter
//!
//! An in-memory table catalog for Schemagate, primarily intended for
//! testing and for embedding a store whose metadata already lives in
//! process memory.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use schemagate_adapter_memory::MemoryCatalog;
//!
//! let catalog = MemoryCatalog::new();
//! catalog.create_table("apm:traces", ["S", "A"]).await?;
//! let actual = catalog.load_schemas().await?;
//! ```

use async_trait::async_trait;
use schemagate_core::error::{SchemaError, SchemaResult};
use schemagate_core::schema::{TableName, TableSchema};
use schemagate_core::traits::SchemaSource;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::RwLock;

/// Column families of each table, keyed by table name.
type Catalog = Arc<RwLock<BTreeMap<TableName, BTreeSet<String>>>>;

/// In-memory table catalog.
///
/// Cloning the catalog shares its state. Data is lost when the process
/// exits.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    name: String,
    tables: Catalog,
}

impl MemoryCatalog {
    /// Creates a new empty catalog.
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// Creates a new empty catalog with a source name used in logs.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tables: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Creates a table with the given column families.
    pub async fn create_table(
        &self,
        name: impl Into<TableName>,
        families: impl IntoIterator<Item = impl Into<String>>,
    ) -> SchemaResult<()> {
        let name = name.into();
        let mut tables = self.tables.write().await;

        if tables.contains_key(&name) {
            return Err(SchemaError::TableExists {
                table: name.to_string(),
            });
        }

        let families: BTreeSet<String> = families.into_iter().map(Into::into).collect();
        tracing::debug!(table = %name, families = families.len(), "Created table");
        tables.insert(name, families);
        Ok(())
    }

    /// Adds a column family to an existing table. Adding a family that
    /// already exists is a no-op.
    pub async fn add_family(&self, name: &TableName, family: impl Into<String>) -> SchemaResult<()> {
        let mut tables = self.tables.write().await;
        let families = tables.get_mut(name).ok_or_else(|| SchemaError::TableNotFound {
            table: name.to_string(),
        })?;
        families.insert(family.into());
        Ok(())
    }

    /// Removes a column family from an existing table. Returns whether the
    /// family was present.
    pub async fn remove_family(&self, name: &TableName, family: &str) -> SchemaResult<bool> {
        let mut tables = self.tables.write().await;
        let families = tables.get_mut(name).ok_or_else(|| SchemaError::TableNotFound {
            table: name.to_string(),
        })?;
        Ok(families.remove(family))
    }

    /// Drops a table. Returns whether the table existed.
    pub async fn drop_table(&self, name: &TableName) -> bool {
        self.tables.write().await.remove(name).is_some()
    }

    /// Returns the number of tables.
    pub async fn table_count(&self) -> usize {
        self.tables.read().await.len()
    }

    /// Clears all tables.
    pub async fn clear(&self) {
        self.tables.write().await.clear();
    }

    /// Returns a snapshot of the catalog, sorted by table name.
    pub async fn snapshot(&self) -> Vec<TableSchema> {
        let tables = self.tables.read().await;
        tables
            .iter()
            .map(|(name, families)| {
                TableSchema::new(name.clone()).with_families(families.iter().cloned())
            })
            .collect()
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaSource for MemoryCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    async fn load_schemas(&self) -> SchemaResult<Option<Vec<TableSchema>>> {
        Ok(Some(self.snapshot().await))
    }
}
