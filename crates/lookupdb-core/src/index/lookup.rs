use crate::{
    error::{InternalError, LookupError},
    index::{IndexHandle, IndexKeyIter, IndexLookupRowIter, RowMaterializer},
    lookup::{LookupOp, ReadRange},
    obs::sink::{self, MergeKind, MetricsEvent},
};
use std::{fmt, sync::Arc};

///
/// IndexLookup
///
/// Disjunction of lookups bound to one index: a key matches when any op
/// matches it. An empty op list matches nothing.
///
/// Values are immutable; `union` and `intersection` build new lookups whose
/// ops are pairwise non-mergeable.
///

#[derive(Clone, Debug)]
pub struct IndexLookup {
    index: IndexHandle,
    ops: Vec<LookupOp>,
}

impl IndexLookup {
    /// Bind `ops` to `index`.
    ///
    /// Every op must use the index's tuple format and no key may be longer
    /// than the index's declared column count.
    pub fn new(index: IndexHandle, ops: Vec<LookupOp>) -> Result<Self, InternalError> {
        for op in &ops {
            if op.format() != index.format() {
                return Err(LookupError::FormatMismatch {
                    expected: index.format().to_string(),
                    found: op.format().to_string(),
                }
                .into());
            }

            let found = op.max_key_len();
            if found > index.column_count() {
                return Err(LookupError::KeyArity {
                    index: index.id().to_string(),
                    max: index.column_count(),
                    found,
                }
                .into());
            }
        }

        Ok(Self { index, ops })
    }

    #[must_use]
    pub const fn index(&self) -> &IndexHandle {
        &self.index
    }

    #[must_use]
    pub fn ops(&self) -> &[LookupOp] {
        &self.ops
    }

    /// True when both lookups are bound to the same index handle.
    #[must_use]
    pub fn is_mergeable(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.index, &other.index)
    }

    /// Keys matched by `self` or any of `others`.
    pub fn union(&self, others: &[&Self]) -> Result<Self, InternalError> {
        self.check_mergeable(others)?;

        let seed = if self.ops.is_empty() {
            vec![LookupOp::none(self.index.format())]
        } else {
            self.ops.clone()
        };
        let candidates: Vec<LookupOp> = seed
            .into_iter()
            .chain(others.iter().flat_map(|other| other.ops.iter().cloned()))
            .collect();

        let disjuncts_in = candidates.len();
        let ops = reconcile(candidates);
        self.record_merge(MergeKind::Union, disjuncts_in, ops.len());

        Ok(self.with_ops(ops))
    }

    /// Keys matched by `self` and by every one of `others`.
    ///
    /// Each operand's ops are a disjunction, so the result distributes
    /// `(a ∨ b) ∧ c` into `(a ∧ c) ∨ (b ∧ c)` before reconciling.
    pub fn intersection(&self, others: &[&Self]) -> Result<Self, InternalError> {
        self.check_mergeable(others)?;

        let format = self.index.format();
        let mut acc = vec![LookupOp::all(format)];
        let mut disjuncts_in = 0;

        for operand in std::iter::once(self).chain(others.iter().copied()) {
            disjuncts_in += operand.ops.len();
            if operand.ops.is_empty() {
                acc = vec![LookupOp::none(format)];
                break;
            }

            let products = acc
                .iter()
                .flat_map(|a| operand.ops.iter().map(move |b| a.intersection(b)))
                .collect();
            acc = reconcile(products);
        }

        self.record_merge(MergeKind::Intersection, disjuncts_in, acc.len());

        Ok(self.with_ops(acc))
    }

    /// Set difference is not supported for index lookups.
    #[allow(clippy::unused_self)]
    pub fn difference(&self, _others: &[&Self]) -> Result<Self, InternalError> {
        Err(LookupError::UnsupportedOperation { op: "difference" }.into())
    }

    /// One read range per op, in op order.
    #[must_use]
    pub fn read_ranges(&self) -> Vec<ReadRange> {
        self.ops.iter().map(LookupOp::to_read_range).collect()
    }

    /// Keys of every op's range, concatenated in op order.
    #[must_use]
    pub fn key_iter(&self) -> IndexKeyIter {
        IndexKeyIter::new(Arc::clone(&self.index), self.read_ranges())
    }

    /// Rows for every key, fetched through `materializer`.
    #[must_use]
    pub fn row_iter<M: RowMaterializer>(&self, materializer: M) -> IndexLookupRowIter<M> {
        IndexLookupRowIter::new(self.key_iter(), materializer)
    }

    fn check_mergeable(&self, others: &[&Self]) -> Result<(), InternalError> {
        match others.iter().find(|other| !self.is_mergeable(other)) {
            Some(other) => Err(LookupError::WrongIndex {
                expected: self.index.id().to_string(),
                found: other.index.id().to_string(),
            }
            .into()),
            None => Ok(()),
        }
    }

    fn with_ops(&self, ops: Vec<LookupOp>) -> Self {
        Self {
            index: Arc::clone(&self.index),
            ops,
        }
    }

    fn record_merge(&self, kind: MergeKind, disjuncts_in: usize, disjuncts_out: usize) {
        let index = self.index.id().as_str();
        tracing::debug!(
            index,
            ?kind,
            disjuncts_in,
            disjuncts_out,
            "reconciled index lookup"
        );

        sink::record(MetricsEvent::Merge {
            kind,
            index,
            disjuncts_in: disjuncts_in as u64,
            disjuncts_out: disjuncts_out as u64,
        });
    }
}

impl fmt::Display for IndexLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IndexLookup:{}", self.index.id())
    }
}

/// Fold candidates into a list whose entries are pairwise non-mergeable.
fn reconcile(candidates: Vec<LookupOp>) -> Vec<LookupOp> {
    candidates.into_iter().fold(Vec::new(), absorb)
}

// Merge `op` into `acc`. Each merge re-scans the accumulator, and the merged
// entry lands at the earliest position it absorbed.
fn absorb(mut acc: Vec<LookupOp>, op: LookupOp) -> Vec<LookupOp> {
    let mut merged = op;
    let mut slot = acc.len();

    while let Some((pos, joined)) = acc
        .iter()
        .enumerate()
        .find_map(|(pos, entry)| entry.union(&merged).map(|joined| (pos, joined)))
    {
        acc.remove(pos);
        merged = joined;
        slot = slot.min(pos);
    }

    acc.insert(slot, merged);
    acc
}
