use crate::value::Value;

///
/// ValueTag
///
/// Stable canonical value-variant tag used by ordering and key encoding.
///
/// IMPORTANT:
/// Tag values are the first byte of every encoded tuple element and must
/// remain fixed. `Max` is reserved for the sentinel and sits above every
/// other tag.
///
#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub enum ValueTag {
    Null = 1,
    Bool = 2,
    Int = 3,
    Uint = 4,
    Float64 = 5,
    Text = 6,
    Blob = 7,
    Max = 0xFF,
}

impl ValueTag {
    /// Stable byte tag for this variant.
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }
}

/// Stable canonical variant tag for one value.
#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Null => ValueTag::Null,
        Value::Bool(_) => ValueTag::Bool,
        Value::Int(_) => ValueTag::Int,
        Value::Uint(_) => ValueTag::Uint,
        Value::Float64(_) => ValueTag::Float64,
        Value::Text(_) => ValueTag::Text,
        Value::Blob(_) => ValueTag::Blob,
        Value::Max => ValueTag::Max,
    }
}
