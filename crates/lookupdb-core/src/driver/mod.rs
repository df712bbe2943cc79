//! Module: driver
//! Responsibility: the registry a query engine asks for the indexes of one
//! table.
//! Does not own: index storage, index creation, or key maintenance.


use crate::{
    error::InternalError,
    index::{Index, IndexColumn, IndexHandle, IndexSchema},
    store::{KeyScanner, KeyStream},
    tuple::TupleFormat,
};
use lookupdb_config::{CatalogConfig, ColumnConfig};
use std::{collections::BTreeMap, sync::Arc};

///
/// IndexDriver
///
/// Read-only index registry keyed by database and table.
/// Names match case-insensitively. Indexes are created and maintained by
/// the storage engine, so the write operations are unsupported here.
///

#[derive(Debug, Default)]
pub struct IndexDriver {
    databases: BTreeMap<String, BTreeMap<String, Vec<IndexHandle>>>,
}

impl IndexDriver {
    pub const ID: &'static str = "LookupIndexDriver";

    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a driver from a validated catalog, opening one key scanner per
    /// index through `scanner_for`.
    pub fn from_config<F>(catalog: &CatalogConfig, mut scanner_for: F) -> Result<Self, InternalError>
    where
        F: FnMut(&IndexSchema) -> Result<Arc<dyn KeyScanner>, InternalError>,
    {
        catalog
            .validate()
            .map_err(|err| InternalError::config_invariant(err.to_string()))?;

        let format = TupleFormat::from(catalog.format);
        let mut driver = Self::new();

        for database in &catalog.databases {
            for table in &database.tables {
                for index in &table.indexes {
                    let schema = IndexSchema {
                        database: database.name.clone(),
                        table: table.name.clone(),
                        name: index.name.clone(),
                        columns: columns(&index.columns),
                        primary_key: columns(&index.primary_key),
                        unique: index.unique,
                    };
                    let scanner = scanner_for(&schema)?;

                    driver.register(Index::new(schema, format, scanner)?.into_handle())?;
                }
            }
        }

        Ok(driver)
    }

    #[must_use]
    pub const fn id(&self) -> &'static str {
        Self::ID
    }

    /// Add an index under its schema's database and table.
    pub fn register(&mut self, index: IndexHandle) -> Result<(), InternalError> {
        let schema = index.schema();
        let indexes = self
            .databases
            .entry(schema.database.to_lowercase())
            .or_default()
            .entry(schema.table.to_lowercase())
            .or_default();

        if indexes
            .iter()
            .any(|existing| existing.id().as_str().eq_ignore_ascii_case(index.id().as_str()))
        {
            return Err(InternalError::config_invariant(format!(
                "index '{}' is already registered on {}.{}",
                index.id(),
                schema.database,
                schema.table
            )));
        }

        indexes.push(index);

        Ok(())
    }

    /// Indexes of `table` in `database`, in registration order. Unknown
    /// databases and tables have none.
    #[must_use]
    pub fn load_all(&self, database: &str, table: &str) -> Vec<IndexHandle> {
        self.databases
            .get(&database.to_lowercase())
            .and_then(|tables| tables.get(&table.to_lowercase()))
            .cloned()
            .unwrap_or_default()
    }

    #[allow(clippy::unused_self)]
    pub fn create(
        &self,
        _database: &str,
        _table: &str,
        _id: &str,
    ) -> Result<IndexHandle, InternalError> {
        Err(InternalError::driver_unsupported("create"))
    }

    #[allow(clippy::unused_self, clippy::needless_pass_by_value)]
    pub fn save(&self, _index: &IndexHandle, _keys: KeyStream) -> Result<(), InternalError> {
        Err(InternalError::driver_unsupported("save"))
    }

    #[allow(clippy::unused_self)]
    pub fn delete(&self, _index: &IndexHandle) -> Result<(), InternalError> {
        Err(InternalError::driver_unsupported("delete"))
    }
}

fn columns(config: &[ColumnConfig]) -> Vec<IndexColumn> {
    config
        .iter()
        .map(|column| IndexColumn::new(column.name.clone(), column.tag))
        .collect()
}
