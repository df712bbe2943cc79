use crate::{
    MAX_INDEX_COLUMNS, error::InternalError, store::KeyScanner, tuple::TupleFormat,
};
use derive_more::Display;
use std::{collections::BTreeSet, fmt, sync::Arc};

///
/// IndexId
///

#[derive(Clone, Debug, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct IndexId(String);

impl IndexId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for IndexId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

///
/// IndexColumn
///
/// One key column and the tag its value is reported under.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexColumn {
    pub name: String,
    pub tag: u64,
}

impl IndexColumn {
    pub fn new(name: impl Into<String>, tag: u64) -> Self {
        Self {
            name: name.into(),
            tag,
        }
    }
}

///
/// IndexSchema
///
/// Declared shape of one secondary index. Stored keys are the declared
/// columns followed by the primary-key columns.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IndexSchema {
    pub database: String,
    pub table: String,
    pub name: String,
    pub columns: Vec<IndexColumn>,
    pub primary_key: Vec<IndexColumn>,
    pub unique: bool,
}

///
/// Index
///
/// A validated index bound to the scanner that reads its keys.
///

pub struct Index {
    id: IndexId,
    schema: IndexSchema,
    format: TupleFormat,
    scanner: Arc<dyn KeyScanner>,
}

/// Shared index handle. Lookups are mergeable only over the same handle.
pub type IndexHandle = Arc<Index>;

impl Index {
    pub fn new(
        schema: IndexSchema,
        format: TupleFormat,
        scanner: Arc<dyn KeyScanner>,
    ) -> Result<Self, InternalError> {
        if schema.columns.is_empty() {
            return Err(InternalError::index_invariant(format!(
                "index '{}' declares no columns",
                schema.name
            )));
        }
        if schema.columns.len() > MAX_INDEX_COLUMNS {
            return Err(InternalError::index_invariant(format!(
                "index '{}' declares {} columns (limit {MAX_INDEX_COLUMNS})",
                schema.name,
                schema.columns.len()
            )));
        }

        let mut tags = BTreeSet::new();
        for column in schema.columns.iter().chain(&schema.primary_key) {
            if !tags.insert(column.tag) {
                return Err(InternalError::index_invariant(format!(
                    "index '{}' reuses column tag {}",
                    schema.name, column.tag
                )));
            }
        }

        Ok(Self {
            id: IndexId(schema.name.clone()),
            schema,
            format,
            scanner,
        })
    }

    #[must_use]
    pub fn into_handle(self) -> IndexHandle {
        Arc::new(self)
    }

    #[must_use]
    pub const fn id(&self) -> &IndexId {
        &self.id
    }

    #[must_use]
    pub const fn schema(&self) -> &IndexSchema {
        &self.schema
    }

    #[must_use]
    pub const fn format(&self) -> TupleFormat {
        self.format
    }

    /// Number of declared (non primary-key) columns; the longest lookup key.
    #[must_use]
    pub fn column_count(&self) -> usize {
        self.schema.columns.len()
    }

    /// Column tags in stored-key order.
    pub fn key_tags(&self) -> impl Iterator<Item = u64> + '_ {
        self.schema
            .columns
            .iter()
            .chain(&self.schema.primary_key)
            .map(|column| column.tag)
    }

    pub(crate) fn scanner(&self) -> &dyn KeyScanner {
        self.scanner.as_ref()
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("id", &self.id)
            .field("schema", &self.schema)
            .field("format", &self.format)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let columns: Vec<&str> = self
            .schema
            .columns
            .iter()
            .map(|column| column.name.as_str())
            .collect();
        let columns = columns.join(", ");

        if self.schema.unique {
            write!(f, "UNIQUE {}({})", self.id, columns)
        } else {
            write!(f, "{}({})", self.id, columns)
        }
    }
}
