//! Module: store
//! Responsibility: the key-scanning boundary an index reads through, plus an
//! in-memory implementation of it.
//! Does not own: persistence or row storage.

mod memory;


use crate::{error::StoreError, tuple::Tuple};

// re-exports
pub use memory::MemoryKeyStore;

/// Stream of stored index keys produced by one scan.
pub type KeyStream = Box<dyn Iterator<Item = Result<Tuple, StoreError>> + Send>;

///
/// KeyScanner
///
/// Ordered scan over the full keys of one index.
///
/// The start bound covers the start key's whole prefix group:
///
/// | reverse | inclusive | visited keys |
/// |---|---|---|
/// | false | true  | `x >= start`, ascending |
/// | false | false | `x >= start + sentinel`, ascending |
/// | true  | true  | `x < start + sentinel`, descending |
/// | true  | false | `x < start`, descending |
///
/// Errors are yielded in-stream; the caller stops at the first one.
///

pub trait KeyScanner: Send + Sync {
    fn scan(&self, start: &Tuple, inclusive: bool, reverse: bool) -> Result<KeyStream, StoreError>;
}
