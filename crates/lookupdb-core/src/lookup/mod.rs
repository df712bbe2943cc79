//! Module: lookup
//! Responsibility: the closed algebra of index predicates and their lowering
//! to scan ranges.
//! Does not own: index binding, scanning, or row materialization.
//!
//! Containment, union and intersection are computed on the interval form of
//! each operand (see `extent`) and rebuilt into the narrowest variant, so the
//! operations are total over every pair of variants.

mod algebra;
mod extent;
mod kind;
mod op;
mod range;

#[cfg(test)]
mod tests;

// re-exports
pub use kind::LookupOpKind;
pub use op::LookupOp;
pub use range::{RangeCheck, ReadRange};
