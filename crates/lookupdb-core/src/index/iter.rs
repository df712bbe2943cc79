use crate::{
    error::InternalError,
    index::IndexHandle,
    lookup::{RangeCheck, ReadRange},
    obs::sink::{self, MetricsEvent},
    store::KeyStream,
    tuple::Tuple,
    value::Value,
};
use derive_more::{Deref, IntoIterator};
use std::collections::{BTreeMap, VecDeque};

///
/// TaggedValues
///
/// Column values of one stored index key, keyed by column tag.
///

#[derive(Clone, Debug, Default, Deref, Eq, IntoIterator, PartialEq)]
pub struct TaggedValues(BTreeMap<u64, Value>);

impl TaggedValues {
    /// Zip an index's column tags with a stored key.
    pub(crate) fn from_key(index: &IndexHandle, key: &Tuple) -> Result<Self, InternalError> {
        let expected = index.key_tags().count();
        if key.len() != expected {
            return Err(InternalError::index_corruption(format!(
                "index '{}' key {key} has {} values, expected {expected}",
                index.id(),
                key.len()
            )));
        }

        Ok(Self(index.key_tags().zip(key.values().iter().cloned()).collect()))
    }
}

///
/// IndexLookupKeyIterator
///
/// Lazy, forward-only producer of index keys.
/// Not restartable; `Ok(None)` is final.
///

pub trait IndexLookupKeyIterator {
    fn next_key(&mut self) -> Result<Option<TaggedValues>, InternalError>;
}

///
/// RangeKeyIter
///
/// Keys of one read range: the scanner's stream cut at the first key that
/// fails the range check.
///

struct RangeKeyIter {
    stream: KeyStream,
    check: RangeCheck,
    emitted: u64,
}

impl RangeKeyIter {
    fn open(index: &IndexHandle, range: ReadRange) -> Result<Option<Self>, InternalError> {
        if range.check == RangeCheck::Never {
            return Ok(None);
        }

        let index_id = index.id().as_str();
        tracing::debug!(
            index = index_id,
            start = %range.start,
            inclusive = range.inclusive,
            reverse = range.reverse,
            "opening index range scan"
        );

        let stream = index
            .scanner()
            .scan(&range.start, range.inclusive, range.reverse)
            .inspect_err(|_| sink::record(MetricsEvent::ScanFailed { index: index_id }))?;
        sink::record(MetricsEvent::RangeOpened {
            index: index_id,
            reverse: range.reverse,
        });

        Ok(Some(Self {
            stream,
            check: range.check,
            emitted: 0,
        }))
    }

    fn next_key(&mut self) -> Result<Option<Tuple>, InternalError> {
        match self.stream.next() {
            Some(Ok(key)) if self.check.accepts(&key) => {
                self.emitted += 1;
                Ok(Some(key))
            }
            Some(Ok(_)) | None => Ok(None),
            Some(Err(err)) => Err(err.into()),
        }
    }
}

///
/// IndexKeyIter
///
/// Concatenation of one `RangeKeyIter` per read range, in list order.
/// Ranges are opened lazily and keys are not de-duplicated across ranges.
/// After an error the iterator is fused.
///

pub struct IndexKeyIter {
    index: IndexHandle,
    pending: VecDeque<ReadRange>,
    current: Option<RangeKeyIter>,
    done: bool,
}

impl IndexKeyIter {
    pub(crate) fn new(index: IndexHandle, ranges: Vec<ReadRange>) -> Self {
        Self {
            index,
            pending: ranges.into(),
            current: None,
            done: false,
        }
    }

    fn finish_current(&mut self) {
        if let Some(range) = self.current.take()
            && range.emitted > 0
        {
            sink::record(MetricsEvent::KeysEmitted {
                index: self.index.id().as_str(),
                keys: range.emitted,
            });
        }
    }

    fn fail(&mut self, err: InternalError) -> InternalError {
        self.finish_current();
        self.pending.clear();
        self.done = true;

        let index = self.index.id().as_str();
        tracing::debug!(index, error = %err.display_with_class(), "index key scan failed");
        if err.store_error().is_some() {
            sink::record(MetricsEvent::ScanFailed { index });
        }

        err
    }
}

impl IndexLookupKeyIterator for IndexKeyIter {
    fn next_key(&mut self) -> Result<Option<TaggedValues>, InternalError> {
        while !self.done {
            if let Some(range) = self.current.as_mut() {
                match range.next_key() {
                    Ok(Some(key)) => {
                        return TaggedValues::from_key(&self.index, &key)
                            .map(Some)
                            .map_err(|err| self.fail(err));
                    }
                    Ok(None) => self.finish_current(),
                    Err(err) => return Err(self.fail(err)),
                }
                continue;
            }

            let Some(next) = self.pending.pop_front() else {
                self.done = true;
                break;
            };
            match RangeKeyIter::open(&self.index, next) {
                Ok(range) => self.current = range,
                Err(err) => {
                    tracing::debug!(
                        index = self.index.id().as_str(),
                        error = %err.display_with_class(),
                        "index range scan failed to open"
                    );
                    self.pending.clear();
                    self.done = true;
                    return Err(err);
                }
            }
        }

        Ok(None)
    }
}

impl Iterator for IndexKeyIter {
    type Item = Result<TaggedValues, InternalError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_key().transpose()
    }
}

impl std::iter::FusedIterator for IndexKeyIter {}
