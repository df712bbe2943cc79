use crate::{
    error::InternalError,
    index::{IndexKeyIter, IndexLookupKeyIterator, TaggedValues},
};

///
/// RowMaterializer
///
/// Fetches the primary-table row an index key points at.
/// `Ok(None)` means the row is gone and the key is skipped.
///

pub trait RowMaterializer {
    type Row;

    fn materialize(&mut self, key: &TaggedValues) -> Result<Option<Self::Row>, InternalError>;
}

impl<R, F> RowMaterializer for F
where
    F: FnMut(&TaggedValues) -> Result<Option<R>, InternalError>,
{
    type Row = R;

    fn materialize(&mut self, key: &TaggedValues) -> Result<Option<R>, InternalError> {
        self(key)
    }
}

///
/// IndexLookupRowIter
///
/// Rows for every key of an index lookup, in key order.
///

pub struct IndexLookupRowIter<M> {
    keys: IndexKeyIter,
    materializer: M,
    done: bool,
}

impl<M: RowMaterializer> IndexLookupRowIter<M> {
    pub(crate) fn new(keys: IndexKeyIter, materializer: M) -> Self {
        Self {
            keys,
            materializer,
            done: false,
        }
    }

    /// Next row, skipping keys whose row is missing.
    pub fn next_row(&mut self) -> Result<Option<M::Row>, InternalError> {
        while !self.done {
            let key = match self.keys.next_key() {
                Ok(Some(key)) => key,
                Ok(None) => break,
                Err(err) => {
                    self.done = true;
                    return Err(err);
                }
            };

            match self.materializer.materialize(&key) {
                Ok(Some(row)) => return Ok(Some(row)),
                Ok(None) => {}
                Err(err) => {
                    self.done = true;
                    return Err(err);
                }
            }
        }

        self.done = true;
        Ok(None)
    }
}

impl<M: RowMaterializer> Iterator for IndexLookupRowIter<M> {
    type Item = Result<M::Row, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}
