//! Interval form of a lookup.
//!
//! Every lookup is a half-open interval `[lower, upper)` over the key order
//! extended with the sentinel. A bound point is either a key `k` or `k⁺`
//! (`k` followed by the sentinel); points compare without building `k⁺`.

use crate::{
    lookup::LookupOp,
    tuple::{Tuple, TupleFormat},
    value::Value,
};
use std::cmp::Ordering;

static SENTINEL: Value = Value::Max;

///
/// Point
///

#[derive(Clone, Copy, Debug)]
pub(crate) struct Point<'a> {
    pub(crate) key: &'a Tuple,
    pub(crate) past_prefix: bool,
}

impl<'a> Point<'a> {
    pub(crate) const fn at(key: &'a Tuple) -> Self {
        Self {
            key,
            past_prefix: false,
        }
    }

    pub(crate) const fn past(key: &'a Tuple) -> Self {
        Self {
            key,
            past_prefix: true,
        }
    }

    fn compare(self, other: Self) -> Ordering {
        let left = self
            .key
            .values()
            .iter()
            .chain(self.past_prefix.then_some(&SENTINEL));
        let right = other
            .key
            .values()
            .iter()
            .chain(other.past_prefix.then_some(&SENTINEL));

        left.cmp(right)
    }
}

// `None` is the open end on both sides.
fn cmp_lower(a: Option<Point<'_>>, b: Option<Point<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => a.compare(b),
    }
}

fn cmp_upper(a: Option<Point<'_>>, b: Option<Point<'_>>) -> Ordering {
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Greater,
        (Some(_), None) => Ordering::Less,
        (Some(a), Some(b)) => a.compare(b),
    }
}

// True when nothing lies between a lower and an upper bound.
fn closes(lower: Option<Point<'_>>, upper: Option<Point<'_>>) -> bool {
    match (lower, upper) {
        (Some(lower), Some(upper)) => lower.compare(upper) != Ordering::Less,
        _ => false,
    }
}

///
/// Extent
///

#[derive(Clone, Copy, Debug)]
pub(crate) enum Extent<'a> {
    Empty,
    Span {
        lower: Option<Point<'a>>,
        upper: Option<Point<'a>>,
    },
}

impl<'a> Extent<'a> {
    pub(crate) fn of(op: &'a LookupOp) -> Self {
        let (lower, upper) = match op {
            LookupOp::None { .. } => return Self::Empty,
            LookupOp::All { .. } => (None, None),
            LookupOp::Equals { key } => (Some(Point::at(key)), Some(Point::past(key))),
            LookupOp::GreaterThan { key } => (Some(Point::past(key)), None),
            LookupOp::GreaterThanOrEqual { key } => (Some(Point::at(key)), None),
            LookupOp::LessThan { key } => (None, Some(Point::at(key))),
            LookupOp::LessThanOrEqual { key } => (None, Some(Point::past(key))),
            LookupOp::GreaterThanLessThan { gt, lt } => {
                (Some(Point::past(gt)), Some(Point::at(lt)))
            }
            LookupOp::GreaterThanLessThanOrEqual { gt, lte } => {
                (Some(Point::past(gt)), Some(Point::past(lte)))
            }
            LookupOp::GreaterThanOrEqualLessThan { gte, lt } => {
                (Some(Point::at(gte)), Some(Point::at(lt)))
            }
            LookupOp::GreaterThanOrEqualLessThanOrEqual { gte, lte } => {
                (Some(Point::at(gte)), Some(Point::past(lte)))
            }
        };

        // The empty key is the least key, and its sentinel point lies above
        // every stored key, so both reduce to an open end or to nothing.
        let lower = match lower {
            Some(point) if point.key.is_empty() && point.past_prefix => return Self::Empty,
            Some(point) if point.key.is_empty() => None,
            other => other,
        };
        let upper = match upper {
            Some(point) if point.key.is_empty() && !point.past_prefix => return Self::Empty,
            Some(point) if point.key.is_empty() => None,
            other => other,
        };

        Self::span(lower, upper)
    }

    fn span(lower: Option<Point<'a>>, upper: Option<Point<'a>>) -> Self {
        if closes(lower, upper) {
            Self::Empty
        } else {
            Self::Span { lower, upper }
        }
    }

    pub(crate) const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    pub(crate) fn is_subset_of(self, other: Self) -> bool {
        match (self, other) {
            (Self::Empty, _) => true,
            (Self::Span { .. }, Self::Empty) => false,
            (
                Self::Span { lower, upper },
                Self::Span {
                    lower: other_lower,
                    upper: other_upper,
                },
            ) => {
                cmp_lower(other_lower, lower) != Ordering::Greater
                    && cmp_upper(upper, other_upper) != Ordering::Greater
            }
        }
    }

    /// Smallest extent covering both, when the two overlap or touch.
    pub(crate) fn merge(self, other: Self) -> Option<Self> {
        let (
            Self::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Self::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return Some(if self.is_empty() { other } else { self });
        };

        // order so that `first` starts no later than `second`
        let (first_upper, second_lower) = if cmp_lower(a_lower, b_lower) == Ordering::Greater {
            (b_upper, a_lower)
        } else {
            (a_upper, b_lower)
        };
        if let (Some(first_upper), Some(second_lower)) = (first_upper, second_lower)
            && second_lower.compare(first_upper) == Ordering::Greater
        {
            return None;
        }

        let lower = if cmp_lower(a_lower, b_lower) == Ordering::Greater {
            b_lower
        } else {
            a_lower
        };
        let upper = if cmp_upper(a_upper, b_upper) == Ordering::Less {
            b_upper
        } else {
            a_upper
        };

        Some(Self::Span { lower, upper })
    }

    pub(crate) fn intersect(self, other: Self) -> Self {
        let (
            Self::Span {
                lower: a_lower,
                upper: a_upper,
            },
            Self::Span {
                lower: b_lower,
                upper: b_upper,
            },
        ) = (self, other)
        else {
            return Self::Empty;
        };

        let lower = if cmp_lower(a_lower, b_lower) == Ordering::Less {
            b_lower
        } else {
            a_lower
        };
        let upper = if cmp_upper(a_upper, b_upper) == Ordering::Greater {
            b_upper
        } else {
            a_upper
        };

        Self::span(lower, upper)
    }

    /// Rebuild the narrowest lookup variant for this extent.
    pub(crate) fn to_op(self, format: TupleFormat) -> LookupOp {
        let (lower, upper) = match self {
            Self::Empty => return LookupOp::none(format),
            Self::Span { lower, upper } => (lower, upper),
        };

        match (lower, upper) {
            (None, None) => LookupOp::all(format),
            (Some(lower), None) => {
                let key = lower.key.clone();
                if lower.past_prefix {
                    LookupOp::greater_than(key)
                } else {
                    LookupOp::greater_than_or_equal(key)
                }
            }
            (None, Some(upper)) => {
                let key = upper.key.clone();
                if upper.past_prefix {
                    LookupOp::less_than_or_equal(key)
                } else {
                    LookupOp::less_than(key)
                }
            }
            (Some(lower), Some(upper)) => {
                if !lower.past_prefix && upper.past_prefix && lower.key == upper.key {
                    return LookupOp::equals(lower.key.clone());
                }

                let low = lower.key.clone();
                let high = upper.key.clone();
                match (lower.past_prefix, upper.past_prefix) {
                    (true, false) => LookupOp::greater_than_less_than(low, high),
                    (true, true) => LookupOp::greater_than_less_than_or_equal(low, high),
                    (false, false) => LookupOp::greater_than_or_equal_less_than(low, high),
                    (false, true) => LookupOp::greater_than_or_equal_less_than_or_equal(low, high),
                }
            }
        }
    }
}
