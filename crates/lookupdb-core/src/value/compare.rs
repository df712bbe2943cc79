use crate::value::Value;
use std::cmp::Ordering;

/// Total canonical comparator used by tuple ordering and the lookup algebra.
///
/// Ordering rules:
/// 1. Canonical variant tag
/// 2. Variant-specific comparison for same-tagged values
///
/// Mixed-variant comparisons are tag-only, so `Int(5)` and `Uint(5)` are
/// distinct and ordered by tag. The `Max` sentinel ranks above everything.
#[must_use]
pub fn canonical_cmp(left: &Value, right: &Value) -> Ordering {
    let tag = left.canonical_tag().cmp(&right.canonical_tag());
    if tag != Ordering::Equal {
        return tag;
    }

    canonical_cmp_same_tag(left, right)
}

fn canonical_cmp_same_tag(left: &Value, right: &Value) -> Ordering {
    #[allow(clippy::match_same_arms)]
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Int(a), Value::Int(b)) => a.cmp(b),
        (Value::Uint(a), Value::Uint(b)) => a.cmp(b),
        (Value::Float64(a), Value::Float64(b)) => a.cmp(b),
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        (Value::Blob(a), Value::Blob(b)) => a.cmp(b),
        (Value::Null, Value::Null) | (Value::Max, Value::Max) => Ordering::Equal,
        _ => Ordering::Equal,
    }
}
