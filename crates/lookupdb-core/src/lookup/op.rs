use crate::{
    error::LookupError,
    lookup::LookupOpKind,
    tuple::{Tuple, TupleFormat},
};
use std::{
    fmt,
    hash::{Hash, Hasher},
};

///
/// LookupOp
///
/// One predicate over the ordered key space of an index.
///
/// Each bound compares the stored key's prefix of the bound's own length, so
/// a partial key constrains only the leading columns. `All` and `None` carry
/// the format directly; keyed variants carry it through their tuples.
///
/// Equality and hashing ignore the format for every variant, as `Tuple`
/// equality does.
///

#[derive(Clone, Debug)]
pub enum LookupOp {
    All { format: TupleFormat },
    None { format: TupleFormat },
    Equals { key: Tuple },
    GreaterThan { key: Tuple },
    GreaterThanOrEqual { key: Tuple },
    LessThan { key: Tuple },
    LessThanOrEqual { key: Tuple },
    GreaterThanLessThan { gt: Tuple, lt: Tuple },
    GreaterThanLessThanOrEqual { gt: Tuple, lte: Tuple },
    GreaterThanOrEqualLessThan { gte: Tuple, lt: Tuple },
    GreaterThanOrEqualLessThanOrEqual { gte: Tuple, lte: Tuple },
}

impl LookupOp {
    #[must_use]
    pub const fn all(format: TupleFormat) -> Self {
        Self::All { format }
    }

    #[must_use]
    pub const fn none(format: TupleFormat) -> Self {
        Self::None { format }
    }

    #[must_use]
    pub const fn equals(key: Tuple) -> Self {
        Self::Equals { key }
    }

    #[must_use]
    pub const fn greater_than(key: Tuple) -> Self {
        Self::GreaterThan { key }
    }

    #[must_use]
    pub const fn greater_than_or_equal(key: Tuple) -> Self {
        Self::GreaterThanOrEqual { key }
    }

    #[must_use]
    pub const fn less_than(key: Tuple) -> Self {
        Self::LessThan { key }
    }

    #[must_use]
    pub const fn less_than_or_equal(key: Tuple) -> Self {
        Self::LessThanOrEqual { key }
    }

    #[must_use]
    pub const fn greater_than_less_than(gt: Tuple, lt: Tuple) -> Self {
        Self::GreaterThanLessThan { gt, lt }
    }

    #[must_use]
    pub const fn greater_than_less_than_or_equal(gt: Tuple, lte: Tuple) -> Self {
        Self::GreaterThanLessThanOrEqual { gt, lte }
    }

    #[must_use]
    pub const fn greater_than_or_equal_less_than(gte: Tuple, lt: Tuple) -> Self {
        Self::GreaterThanOrEqualLessThan { gte, lt }
    }

    #[must_use]
    pub const fn greater_than_or_equal_less_than_or_equal(gte: Tuple, lte: Tuple) -> Self {
        Self::GreaterThanOrEqualLessThanOrEqual { gte, lte }
    }

    /// Build a lookup from its kind and key tuples, as a plan decoder would.
    ///
    /// Keyed kinds take their keys in bound order (lower, then upper). Every
    /// key must be in `format`.
    pub fn from_kind(
        kind: LookupOpKind,
        format: TupleFormat,
        keys: Vec<Tuple>,
    ) -> Result<Self, LookupError> {
        let expected = kind.key_count();
        if keys.len() != expected {
            return Err(LookupError::KeyCount {
                kind: kind.as_str(),
                expected,
                found: keys.len(),
            });
        }

        if let Some(key) = keys.iter().find(|key| key.format() != format) {
            return Err(LookupError::FormatMismatch {
                expected: format.to_string(),
                found: key.format().to_string(),
            });
        }

        let mut keys = keys.into_iter();
        let mut next = || keys.next().unwrap_or_else(|| Tuple::empty(format));

        let op = match kind {
            LookupOpKind::All => Self::all(format),
            LookupOpKind::None => Self::none(format),
            LookupOpKind::Equals => Self::equals(next()),
            LookupOpKind::GreaterThan => Self::greater_than(next()),
            LookupOpKind::GreaterThanOrEqual => Self::greater_than_or_equal(next()),
            LookupOpKind::LessThan => Self::less_than(next()),
            LookupOpKind::LessThanOrEqual => Self::less_than_or_equal(next()),
            LookupOpKind::GreaterThanLessThan => Self::greater_than_less_than(next(), next()),
            LookupOpKind::GreaterThanLessThanOrEqual => {
                Self::greater_than_less_than_or_equal(next(), next())
            }
            LookupOpKind::GreaterThanOrEqualLessThan => {
                Self::greater_than_or_equal_less_than(next(), next())
            }
            LookupOpKind::GreaterThanOrEqualLessThanOrEqual => {
                Self::greater_than_or_equal_less_than_or_equal(next(), next())
            }
        };

        Ok(op)
    }

    #[must_use]
    pub const fn kind(&self) -> LookupOpKind {
        match self {
            Self::All { .. } => LookupOpKind::All,
            Self::None { .. } => LookupOpKind::None,
            Self::Equals { .. } => LookupOpKind::Equals,
            Self::GreaterThan { .. } => LookupOpKind::GreaterThan,
            Self::GreaterThanOrEqual { .. } => LookupOpKind::GreaterThanOrEqual,
            Self::LessThan { .. } => LookupOpKind::LessThan,
            Self::LessThanOrEqual { .. } => LookupOpKind::LessThanOrEqual,
            Self::GreaterThanLessThan { .. } => LookupOpKind::GreaterThanLessThan,
            Self::GreaterThanLessThanOrEqual { .. } => LookupOpKind::GreaterThanLessThanOrEqual,
            Self::GreaterThanOrEqualLessThan { .. } => LookupOpKind::GreaterThanOrEqualLessThan,
            Self::GreaterThanOrEqualLessThanOrEqual { .. } => {
                LookupOpKind::GreaterThanOrEqualLessThanOrEqual
            }
        }
    }

    /// Tuple format of this lookup.
    #[must_use]
    pub const fn format(&self) -> TupleFormat {
        match self {
            Self::All { format } | Self::None { format } => *format,
            Self::Equals { key }
            | Self::GreaterThan { key }
            | Self::GreaterThanOrEqual { key }
            | Self::LessThan { key }
            | Self::LessThanOrEqual { key } => key.format(),
            Self::GreaterThanLessThan { gt: lower, .. }
            | Self::GreaterThanLessThanOrEqual { gt: lower, .. }
            | Self::GreaterThanOrEqualLessThan { gte: lower, .. }
            | Self::GreaterThanOrEqualLessThanOrEqual { gte: lower, .. } => lower.format(),
        }
    }

    /// Key tuples carried by this lookup, lower bound first.
    #[must_use]
    pub fn keys(&self) -> Vec<&Tuple> {
        let (first, second) = self.key_pair();

        first.into_iter().chain(second).collect()
    }

    const fn key_pair(&self) -> (Option<&Tuple>, Option<&Tuple>) {
        match self {
            Self::All { .. } | Self::None { .. } => (None, None),
            Self::Equals { key }
            | Self::GreaterThan { key }
            | Self::GreaterThanOrEqual { key }
            | Self::LessThan { key }
            | Self::LessThanOrEqual { key } => (Some(key), None),
            Self::GreaterThanLessThan { gt: lower, lt: upper }
            | Self::GreaterThanLessThanOrEqual {
                gt: lower,
                lte: upper,
            }
            | Self::GreaterThanOrEqualLessThan {
                gte: lower,
                lt: upper,
            }
            | Self::GreaterThanOrEqualLessThanOrEqual {
                gte: lower,
                lte: upper,
            } => (Some(lower), Some(upper)),
        }
    }

    /// Length of the longest key this lookup carries.
    #[must_use]
    pub fn max_key_len(&self) -> usize {
        self.keys().into_iter().map(Tuple::len).max().unwrap_or(0)
    }

    /// True when no key can match.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.extent().is_empty()
    }
}

impl PartialEq for LookupOp {
    fn eq(&self, other: &Self) -> bool {
        self.kind() == other.kind() && self.key_pair() == other.key_pair()
    }
}

impl Eq for LookupOp {}

impl Hash for LookupOp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.key_pair().hash(state);
    }
}

impl fmt::Display for LookupOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind())?;

        let keys = self.keys();
        if keys.is_empty() {
            return Ok(());
        }

        write!(f, "(")?;
        for (i, key) in keys.into_iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{key}")?;
        }
        write!(f, ")")
    }
}
