//! Canonical slot lenses

use super::LensId;

/// One leaf lens per fabric ordinal.
///
/// Every composite lens that covers an ordinal references the same leaf, so
/// a slot view can be identified by its lens handle alone.
#[derive(Debug, Clone, Default)]
pub struct SlotCollection {
    leaves: Box<[LensId]>,
}

impl SlotCollection {
    pub(crate) fn new(leaves: Vec<LensId>) -> Self {
        Self {
            leaves: leaves.into_boxed_slice(),
        }
    }

    /// Leaf lens for an ordinal
    pub fn get(&self, ordinal: usize) -> Option<LensId> {
        self.leaves.get(ordinal).copied()
    }

    /// Ordinal covered by a leaf lens
    pub fn ordinal_of(&self, leaf: LensId) -> Option<usize> {
        self.leaves.iter().position(|&l| l == leaf)
    }

    /// Number of slots
    pub fn len(&self) -> usize {
        self.leaves.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Iterate over leaf lenses in ordinal order
    pub fn iter(&self) -> impl Iterator<Item = LensId> + '_ {
        self.leaves.iter().copied()
    }
}
