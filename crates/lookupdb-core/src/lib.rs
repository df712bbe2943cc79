//! Core runtime for LookupDB: ordered tuples, the lookup range algebra,
//! index lookups with their key and row iterators, and the index driver.
#![warn(unreachable_pub)]

// public exports are one module level down
pub mod driver;
pub mod error;
pub mod index;
pub mod lookup;
pub mod obs;
pub mod store;
pub mod tuple;
pub mod value;

///
/// CONSTANTS
///

/// Maximum number of key columns an index may declare.
///
/// Keeps ordered keys bounded and lets tests walk every prefix length.
pub const MAX_INDEX_COLUMNS: usize = 16;

pub use error::{ErrorClass, ErrorOrigin, InternalError, LookupError, StoreError};

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, stores, drivers, or metrics are re-exported here.
///

pub mod prelude {
    pub use crate::{
        index::{IndexHandle, IndexLookup},
        lookup::{LookupOp, LookupOpKind},
        tuple::{Tuple, TupleFormat},
        value::Value,
    };
}
