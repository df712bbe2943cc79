use crate::lookup::{LookupOp, extent::Extent};

impl LookupOp {
    pub(crate) fn extent(&self) -> Extent<'_> {
        Extent::of(self)
    }

    /// True when every key matched by `self` is also matched by `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Self) -> bool {
        debug_assert_same_format(self, other);

        self.extent().is_subset_of(other.extent())
    }

    #[must_use]
    pub fn is_superset_of(&self, other: &Self) -> bool {
        other.is_subset_of(self)
    }

    /// Merge two lookups into one when their union is expressible as a
    /// single variant.
    ///
    /// Returns `None` (no merge) when the operands are disjoint and not
    /// adjacent. When one operand contains the other, the containing operand
    /// is returned unchanged.
    #[must_use]
    pub fn union(&self, other: &Self) -> Option<Self> {
        if self.is_subset_of(other) {
            return Some(other.clone());
        }
        if other.is_subset_of(self) {
            return Some(self.clone());
        }

        self.extent()
            .merge(other.extent())
            .map(|extent| extent.to_op(self.format()))
    }

    /// Keys matched by both operands; `LookupOp::None` when disjoint.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Self {
        if self.is_subset_of(other) {
            return self.clone();
        }
        if other.is_subset_of(self) {
            return other.clone();
        }

        self.extent()
            .intersect(other.extent())
            .to_op(self.format())
    }
}

fn debug_assert_same_format(left: &LookupOp, right: &LookupOp) {
    debug_assert_eq!(
        left.format(),
        right.format(),
        "lookup operands must share one tuple format: {left} vs {right}"
    );
}
