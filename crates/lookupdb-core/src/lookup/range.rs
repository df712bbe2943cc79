use crate::{lookup::LookupOp, tuple::Tuple};

///
/// RangeCheck
///
/// Continuation test applied to every key a scan visits. The scan stops at
/// the first key that fails it.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum RangeCheck {
    Always,
    Never,
    StartsWith(Tuple),
    LessThan(Tuple),
}

impl RangeCheck {
    #[must_use]
    pub fn accepts(&self, key: &Tuple) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::StartsWith(prefix) => key.starts_with(prefix),
            Self::LessThan(bound) => key.less(bound),
        }
    }
}

///
/// ReadRange
///
/// Scan descriptor lowered from one [`LookupOp`].
///
/// The start bound covers the start key's whole prefix group: a forward
/// exclusive scan skips every key starting with `start`, and a reverse
/// inclusive scan begins after the last of them.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReadRange {
    pub start: Tuple,
    pub inclusive: bool,
    pub reverse: bool,
    pub check: RangeCheck,
}

impl ReadRange {
    const fn forward(start: Tuple, inclusive: bool, check: RangeCheck) -> Self {
        Self {
            start,
            inclusive,
            reverse: false,
            check,
        }
    }

    const fn backward(start: Tuple, inclusive: bool) -> Self {
        Self {
            start,
            inclusive,
            reverse: true,
            check: RangeCheck::Always,
        }
    }
}

impl LookupOp {
    /// Lower this lookup to the scan that visits exactly its match set.
    #[must_use]
    pub fn to_read_range(&self) -> ReadRange {
        match self {
            Self::All { format } => {
                ReadRange::forward(Tuple::empty(*format), true, RangeCheck::Always)
            }
            Self::None { format } => {
                ReadRange::forward(Tuple::empty(*format), true, RangeCheck::Never)
            }
            Self::Equals { key } => {
                ReadRange::forward(key.clone(), true, RangeCheck::StartsWith(key.clone()))
            }
            Self::GreaterThan { key } => ReadRange::forward(key.clone(), false, RangeCheck::Always),
            Self::GreaterThanOrEqual { key } => {
                ReadRange::forward(key.clone(), true, RangeCheck::Always)
            }
            Self::LessThan { key } => ReadRange::backward(key.clone(), false),
            Self::LessThanOrEqual { key } => ReadRange::backward(key.clone(), true),
            Self::GreaterThanLessThan { gt, lt } => {
                ReadRange::forward(gt.with_sentinel(), true, RangeCheck::LessThan(lt.clone()))
            }
            Self::GreaterThanLessThanOrEqual { gt, lte } => ReadRange::forward(
                gt.with_sentinel(),
                true,
                RangeCheck::LessThan(lte.with_sentinel()),
            ),
            Self::GreaterThanOrEqualLessThan { gte, lt } => {
                ReadRange::forward(gte.clone(), true, RangeCheck::LessThan(lt.clone()))
            }
            Self::GreaterThanOrEqualLessThanOrEqual { gte, lte } => ReadRange::forward(
                gte.clone(),
                true,
                RangeCheck::LessThan(lte.with_sentinel()),
            ),
        }
    }
}
