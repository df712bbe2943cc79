//! Index catalog configuration for LookupDB.
//!
//! The catalog names the databases, tables and secondary indexes the core's
//! `IndexDriver` exposes, together with the
//! column tags each index key carries. It is parsed from TOML and validated
//! structurally here; key-space wiring happens in `lookupdb-core`.


use serde::Deserialize;
use std::{collections::BTreeSet, fs, path::Path};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(#[from] CatalogValidationError),
}

///
/// CatalogValidationError
///
/// Structural problems found after a catalog parsed successfully.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum CatalogValidationError {
    #[error("database name must not be empty")]
    EmptyDatabaseName,

    #[error("duplicate database '{name}' (names are case-insensitive)")]
    DuplicateDatabase { name: String },

    #[error("duplicate table '{table}' in database '{database}'")]
    DuplicateTable { database: String, table: String },

    #[error("duplicate index '{index}' on table '{table}'")]
    DuplicateIndex { table: String, index: String },

    #[error("index '{index}' on table '{table}' declares no columns")]
    EmptyIndex { table: String, index: String },

    #[error("index '{index}' on table '{table}' repeats column tag {tag}")]
    DuplicateColumnTag {
        table: String,
        index: String,
        tag: u64,
    },
}

///
/// FormatConfig
///
/// Binary tuple format selector. Mirrors `TupleFormat` in the core.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum FormatConfig {
    V1,
    #[default]
    V2,
}

///
/// CatalogConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    #[serde(default)]
    pub format: FormatConfig,

    #[serde(default)]
    pub databases: Vec<DatabaseConfig>,
}

///
/// DatabaseConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DatabaseConfig {
    pub name: String,

    #[serde(default)]
    pub tables: Vec<TableConfig>,
}

///
/// TableConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct TableConfig {
    pub name: String,

    #[serde(default)]
    pub indexes: Vec<IndexConfig>,
}

///
/// IndexConfig
///
/// `columns` are the declared (queryable) index columns; `primary_key`
/// columns trail them in every stored key so that keys stay unique.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct IndexConfig {
    pub name: String,
    pub columns: Vec<ColumnConfig>,

    #[serde(default)]
    pub primary_key: Vec<ColumnConfig>,

    #[serde(default)]
    pub unique: bool,
}

///
/// ColumnConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ColumnConfig {
    pub name: String,
    pub tag: u64,
}

impl CatalogConfig {
    /// Parse and validate a catalog from TOML text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;

        Ok(config)
    }

    /// Read, parse and validate a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_toml_str(&text)
    }

    /// Check naming and column-tag invariants across the whole catalog.
    pub fn validate(&self) -> Result<(), CatalogValidationError> {
        let mut databases = BTreeSet::new();

        for database in &self.databases {
            if database.name.trim().is_empty() {
                return Err(CatalogValidationError::EmptyDatabaseName);
            }
            if !databases.insert(database.name.to_lowercase()) {
                return Err(CatalogValidationError::DuplicateDatabase {
                    name: database.name.clone(),
                });
            }

            database.validate()?;
        }

        Ok(())
    }
}

impl DatabaseConfig {
    fn validate(&self) -> Result<(), CatalogValidationError> {
        let mut tables = BTreeSet::new();

        for table in &self.tables {
            if !tables.insert(table.name.to_lowercase()) {
                return Err(CatalogValidationError::DuplicateTable {
                    database: self.name.clone(),
                    table: table.name.clone(),
                });
            }

            table.validate()?;
        }

        Ok(())
    }
}

impl TableConfig {
    fn validate(&self) -> Result<(), CatalogValidationError> {
        let mut indexes = BTreeSet::new();

        for index in &self.indexes {
            if !indexes.insert(index.name.to_lowercase()) {
                return Err(CatalogValidationError::DuplicateIndex {
                    table: self.name.clone(),
                    index: index.name.clone(),
                });
            }
            if index.columns.is_empty() {
                return Err(CatalogValidationError::EmptyIndex {
                    table: self.name.clone(),
                    index: index.name.clone(),
                });
            }

            // declared and primary-key columns share one tag space per key
            let mut tags = BTreeSet::new();
            for column in index.columns.iter().chain(&index.primary_key) {
                if !tags.insert(column.tag) {
                    return Err(CatalogValidationError::DuplicateColumnTag {
                        table: self.name.clone(),
                        index: index.name.clone(),
                        tag: column.tag,
                    });
                }
            }
        }

        Ok(())
    }
}
