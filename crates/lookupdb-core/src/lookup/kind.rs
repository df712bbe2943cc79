use crate::error::LookupError;
use std::{fmt, str::FromStr};

///
/// LookupOpKind
///
/// Discriminant-only view of a [`LookupOp`](super::LookupOp).
/// Names match the wire spelling used by query plans (`GreaterThan_LessThan`).
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LookupOpKind {
    All,
    None,
    Equals,
    GreaterThan,
    GreaterThanOrEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThanLessThan,
    GreaterThanLessThanOrEqual,
    GreaterThanOrEqualLessThan,
    GreaterThanOrEqualLessThanOrEqual,
}

impl LookupOpKind {
    /// Every kind, in declaration order.
    pub const VARIANTS: [Self; 11] = [
        Self::All,
        Self::None,
        Self::Equals,
        Self::GreaterThan,
        Self::GreaterThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::GreaterThanLessThan,
        Self::GreaterThanLessThanOrEqual,
        Self::GreaterThanOrEqualLessThan,
        Self::GreaterThanOrEqualLessThanOrEqual,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "All",
            Self::None => "None",
            Self::Equals => "Equals",
            Self::GreaterThan => "GreaterThan",
            Self::GreaterThanOrEqual => "GreaterThanOrEqual",
            Self::LessThan => "LessThan",
            Self::LessThanOrEqual => "LessThanOrEqual",
            Self::GreaterThanLessThan => "GreaterThan_LessThan",
            Self::GreaterThanLessThanOrEqual => "GreaterThan_LessThanOrEqual",
            Self::GreaterThanOrEqualLessThan => "GreaterThanOrEqual_LessThan",
            Self::GreaterThanOrEqualLessThanOrEqual => "GreaterThanOrEqual_LessThanOrEqual",
        }
    }

    /// Number of key tuples a lookup of this kind carries.
    #[must_use]
    pub const fn key_count(self) -> usize {
        match self {
            Self::All | Self::None => 0,
            Self::Equals
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual => 1,
            Self::GreaterThanLessThan
            | Self::GreaterThanLessThanOrEqual
            | Self::GreaterThanOrEqualLessThan
            | Self::GreaterThanOrEqualLessThanOrEqual => 2,
        }
    }
}

impl fmt::Display for LookupOpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupOpKind {
    type Err = LookupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::VARIANTS
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| LookupError::UnhandledVariant {
                name: s.to_string(),
            })
    }
}
