//! Lens tree construction

use super::{Lens, LensId, LensKind, LensTree, SlotCollection};
use crate::error::{InventoryError, Result};
use crate::property::InventoryProperty;

/// Supplies a custom root lens for a fabric
pub trait LensProvider {
    /// Build the root lens; the builder already holds the slot leaves
    fn root_lens(&self, builder: &mut LensBuilder) -> Result<LensId>;
}

impl<F> LensProvider for F
where
    F: Fn(&mut LensBuilder) -> Result<LensId>,
{
    fn root_lens(&self, builder: &mut LensBuilder) -> Result<LensId> {
        self(builder)
    }
}

/// Assembles a [`LensTree`]
///
/// The builder starts with the empty lens and one slot leaf per fabric
/// ordinal. Composite lenses can only reference lenses created earlier, so
/// the arena is acyclic by construction.
#[derive(Debug)]
pub struct LensBuilder {
    fabric_size: usize,
    lenses: Vec<Lens>,
    slots: SlotCollection,
}

impl LensBuilder {
    /// Create a builder for a fabric of the given size
    pub fn new(fabric_size: usize) -> Self {
        let mut lenses = Vec::with_capacity(fabric_size + 2);
        lenses.push(Lens::empty());

        let mut leaves = Vec::with_capacity(fabric_size);
        for ordinal in 0..fabric_size {
            leaves.push(LensId::new(lenses.len() as u32));
            lenses.push(Lens::new(LensKind::Slot { ordinal }, vec![ordinal], Vec::new(), Vec::new()));
        }

        Self {
            fabric_size,
            lenses,
            slots: SlotCollection::new(leaves),
        }
    }

    /// Fabric size
    pub fn fabric_size(&self) -> usize {
        self.fabric_size
    }

    /// Canonical slot leaves
    pub fn slots(&self) -> &SlotCollection {
        &self.slots
    }

    /// The empty lens
    pub fn empty(&self) -> LensId {
        LensId::EMPTY
    }

    /// Leaf lens for a single ordinal
    pub fn slot(&self, ordinal: usize) -> Result<LensId> {
        self.slots.get(ordinal).ok_or_else(|| InventoryError::LensOutOfRange {
            base: ordinal,
            end: ordinal.saturating_add(1),
            size: self.fabric_size,
        })
    }

    /// Flat lens over `base..base + size`; its children are the slot leaves
    pub fn indexed(&mut self, base: usize, size: usize) -> Result<LensId> {
        self.check_range(base, size)?;
        let ordinals: Vec<usize> = (base..base + size).collect();
        let children = ordinals.iter().filter_map(|&o| self.slots.get(o)).collect();
        let properties = (0..size).map(|i| (i, InventoryProperty::SlotIndex(i))).collect();
        Ok(self.push(Lens::new(LensKind::Indexed { base, size }, ordinals, children, properties)))
    }

    /// Grid of `height` rows, each `width` slots wide, starting at `base`
    pub fn grid(&mut self, base: usize, width: usize, height: usize) -> Result<LensId> {
        let area = width.checked_mul(height).filter(|&area| area > 0);
        let Some(area) = area else {
            return Err(InventoryError::InvalidGrid { width, height });
        };
        self.check_range(base, area)?;

        let mut rows = Vec::with_capacity(height);
        for row in 0..height {
            rows.push(self.indexed(base + row * width, width)?);
        }
        let properties = (0..height)
            .map(|row| (row, InventoryProperty::Dimension { columns: width, rows: 1 }))
            .collect();
        let ordinals = (base..base + area).collect();
        Ok(self.push(Lens::new(LensKind::Grid { width, height }, ordinals, rows, properties)))
    }

    /// Composite of disjoint children, flattened in child order
    pub fn composite(&mut self, children: &[LensId]) -> Result<LensId> {
        self.composite_with_properties(children, Vec::new())
    }

    /// Composite with properties keyed by child index
    pub fn composite_with_properties(
        &mut self,
        children: &[LensId],
        properties: Vec<(usize, InventoryProperty)>,
    ) -> Result<LensId> {
        let mut seen = vec![false; self.fabric_size];
        let mut ordinals = Vec::new();
        for &child in children {
            let lens = self
                .lenses
                .get(child.index() as usize)
                .ok_or(InventoryError::UnknownLens(child.index()))?;
            for &ordinal in lens.ordinals() {
                if std::mem::replace(&mut seen[ordinal], true) {
                    return Err(InventoryError::OverlappingChildren(ordinal));
                }
                ordinals.push(ordinal);
            }
        }
        Ok(self.push(Lens::new(LensKind::Composite, ordinals, children.to_vec(), properties)))
    }

    /// Flat lens over the whole fabric, or the empty lens if it has no slots
    pub fn default_root(&mut self) -> LensId {
        if self.fabric_size == 0 {
            return LensId::EMPTY;
        }
        // The full range always fits
        self.indexed(0, self.fabric_size).unwrap_or(LensId::EMPTY)
    }

    /// Freeze the arena with the given root
    pub fn build(self, root: LensId) -> Result<LensTree> {
        if root.index() as usize >= self.lenses.len() {
            return Err(InventoryError::UnknownLens(root.index()));
        }
        Ok(self.finish(root))
    }

    pub(crate) fn finish(self, root: LensId) -> LensTree {
        log::debug!(
            "Built lens tree: {} lenses over {} slots (root {:?})",
            self.lenses.len(),
            self.fabric_size,
            root
        );
        LensTree::from_parts(self.lenses, self.slots, root, self.fabric_size)
    }

    fn push(&mut self, lens: Lens) -> LensId {
        let id = LensId::new(self.lenses.len() as u32);
        self.lenses.push(lens);
        id
    }

    fn check_range(&self, base: usize, size: usize) -> Result<()> {
        match base.checked_add(size) {
            Some(end) if end <= self.fabric_size => Ok(()),
            end => Err(InventoryError::LensOutOfRange {
                base,
                end: end.unwrap_or(usize::MAX),
                size: self.fabric_size,
            }),
        }
    }
}
