use crate::{
    error::StoreError,
    store::{KeyScanner, KeyStream},
    tuple::Tuple,
    value::Value,
};
use std::{collections::BTreeMap, ops::Bound, sync::Arc};

///
/// MemoryKeyStore
///
/// Immutable in-memory key set ordered by canonical tuple bytes.
/// Clones share one snapshot; scans never observe later builds.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryKeyStore {
    keys: Arc<BTreeMap<Vec<u8>, Tuple>>,
}

impl MemoryKeyStore {
    /// Build a store holding `keys`. Stored keys must not contain the sentinel.
    pub fn new(keys: impl IntoIterator<Item = Tuple>) -> Result<Self, StoreError> {
        let mut map = BTreeMap::new();
        for key in keys {
            if key.values().iter().any(Value::is_sentinel) {
                return Err(StoreError::Corrupt {
                    message: format!("stored key {key} contains the sentinel value"),
                });
            }
            map.insert(key.to_ordered_bytes(), key);
        }

        Ok(Self { keys: Arc::new(map) })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl KeyScanner for MemoryKeyStore {
    fn scan(&self, start: &Tuple, inclusive: bool, reverse: bool) -> Result<KeyStream, StoreError> {
        let at = start.to_ordered_bytes();
        let past = start.with_sentinel().to_ordered_bytes();

        let cursor = match (reverse, inclusive) {
            (false, true) => Cursor::forward(self, Bound::Included(at)),
            (false, false) => Cursor::forward(self, Bound::Included(past)),
            (true, true) => Cursor::backward(self, Bound::Excluded(past)),
            (true, false) => Cursor::backward(self, Bound::Excluded(at)),
        };

        Ok(Box::new(cursor))
    }
}

///
/// Cursor
///
/// Lazy scan position over a shared snapshot. Each step re-enters the map
/// from the last key returned, so the cursor owns no borrow of it.
///

struct Cursor {
    keys: Arc<BTreeMap<Vec<u8>, Tuple>>,
    lower: Bound<Vec<u8>>,
    upper: Bound<Vec<u8>>,
    reverse: bool,
}

impl Cursor {
    fn forward(store: &MemoryKeyStore, lower: Bound<Vec<u8>>) -> Self {
        Self {
            keys: Arc::clone(&store.keys),
            lower,
            upper: Bound::Unbounded,
            reverse: false,
        }
    }

    fn backward(store: &MemoryKeyStore, upper: Bound<Vec<u8>>) -> Self {
        Self {
            keys: Arc::clone(&store.keys),
            lower: Bound::Unbounded,
            upper,
            reverse: true,
        }
    }
}

impl Iterator for Cursor {
    type Item = Result<Tuple, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        let bounds = (self.lower.as_ref(), self.upper.as_ref());
        let mut range = self.keys.range::<Vec<u8>, _>(bounds);
        let (bytes, key) = if self.reverse {
            range.next_back()?
        } else {
            range.next()?
        };

        let key = key.clone();
        if self.reverse {
            self.upper = Bound::Excluded(bytes.clone());
        } else {
            self.lower = Bound::Excluded(bytes.clone());
        }

        Some(Ok(key))
    }
}
