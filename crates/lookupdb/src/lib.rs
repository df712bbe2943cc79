//! ## Crate layout
//! - `config`: the TOML index catalog and its validation.
//! - `core`: tuples, the lookup algebra, index lookups, stores, the index
//!   driver, and observability.
//!
//! The `prelude` module carries the vocabulary a query planner needs to
//! build and combine index lookups.

pub use lookupdb_config as config;
pub use lookupdb_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use core::{ErrorClass, ErrorOrigin, InternalError as Error, LookupError, StoreError};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        config::CatalogConfig,
        core::{
            driver::IndexDriver,
            index::{IndexHandle, IndexLookup, IndexLookupKeyIterator as _, TaggedValues},
            lookup::{LookupOp, LookupOpKind},
            store::{KeyScanner, MemoryKeyStore},
            tuple::{Tuple, TupleFormat},
            value::Value,
        },
    };
}
