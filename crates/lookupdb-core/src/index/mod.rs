//! Module: index
//! Responsibility: binding lookups to a concrete index, merging them for the
//! optimizer, and turning their read ranges into key and row streams.
//! Does not own: the predicate algebra (`lookup`) or key storage (`store`).

mod handle;
mod iter;
mod lookup;
mod row;


// re-exports
pub use handle::{Index, IndexColumn, IndexHandle, IndexId, IndexSchema};
pub use iter::{IndexKeyIter, IndexLookupKeyIterator, TaggedValues};
pub use lookup::IndexLookup;
pub use row::{IndexLookupRowIter, RowMaterializer};
