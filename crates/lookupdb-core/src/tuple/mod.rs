//! Module: tuple
//! Responsibility: the ordered, immutable key value every index key and
//! lookup bound is built from.
//! Does not own: key storage or scanning.

mod codec;


use crate::value::Value;
use derive_more::Display;
use lookupdb_config::FormatConfig;
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    sync::Arc,
};

// re-exports
pub use codec::encode_ordered_value;

///
/// TupleFormat
///
/// Binary tuple encoding a key was produced under.
/// Operands of every binary lookup operation must share one format.
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum TupleFormat {
    #[display("v1")]
    V1,
    #[default]
    #[display("v2")]
    V2,
}

impl From<FormatConfig> for TupleFormat {
    fn from(config: FormatConfig) -> Self {
        match config {
            FormatConfig::V1 => Self::V1,
            FormatConfig::V2 => Self::V2,
        }
    }
}

///
/// Tuple
///
/// Immutable, shared, variable-length key value.
///
/// Ordering is lexicographic by element; a strict prefix orders before every
/// extension of it. Equality, ordering and hashing ignore the format tag.
///

#[derive(Clone)]
pub struct Tuple {
    format: TupleFormat,
    values: Arc<[Value]>,
}

impl Tuple {
    #[must_use]
    pub fn new(format: TupleFormat, values: impl IntoIterator<Item = Value>) -> Self {
        Self {
            format,
            values: values.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn empty(format: TupleFormat) -> Self {
        Self::new(format, [])
    }

    #[must_use]
    pub const fn format(&self) -> TupleFormat {
        self.format
    }

    #[must_use]
    pub fn values(&self) -> &[Value] {
        &self.values
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// True when `self` orders strictly before `other`.
    #[must_use]
    pub fn less(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Less
    }

    /// True when `prefix` is a (not necessarily strict) prefix of `self`.
    #[must_use]
    pub fn starts_with(&self, prefix: &Self) -> bool {
        self.values.starts_with(&prefix.values)
    }

    /// Return a new tuple with `value` appended.
    #[must_use]
    pub fn append(&self, value: Value) -> Self {
        let mut values = Vec::with_capacity(self.len() + 1);
        values.extend_from_slice(&self.values);
        values.push(value);

        Self {
            format: self.format,
            values: values.into(),
        }
    }

    /// Append the `Max` sentinel, producing a key that orders above every
    /// key starting with `self` and below every key that does not and
    /// orders above `self`.
    #[must_use]
    pub fn with_sentinel(&self) -> Self {
        self.append(Value::Max)
    }

    /// Canonical ordered byte encoding: byte order equals tuple order.
    #[must_use]
    pub fn to_ordered_bytes(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for value in self.values.iter() {
            encode_ordered_value(value, &mut out);
        }

        out
    }
}

impl PartialEq for Tuple {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl Eq for Tuple {}

impl PartialOrd for Tuple {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Tuple {
    fn cmp(&self, other: &Self) -> Ordering {
        // slice ordering is element-wise, then shorter-first
        self.values.cmp(&other.values)
    }
}

impl Hash for Tuple {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.values.hash(state);
    }
}

impl fmt::Debug for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Tuple({self})")
    }
}

impl fmt::Display for Tuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}
