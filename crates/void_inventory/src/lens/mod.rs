//! Lenses - immutable slot topologies over a fabric
//!
//! A lens maps its own 0-based slot numbering onto fabric ordinals and
//! groups those slots into child lenses (slots, rows, sub-inventories).
//! Lenses never hold item data. They live in a [`LensTree`] arena and are
//! addressed by [`LensId`] handles; a tree is assembled once with a
//! [`LensBuilder`] and never mutated afterwards.
//!
//! Every lens resolves its slots through a precomputed ordinal table, so the
//! flattened iteration order (the tie-break order of every algorithm in
//! [`crate::logic`]) is fixed at construction time.

mod builder;
mod slots;

pub use builder::{LensBuilder, LensProvider};
pub use slots::SlotCollection;

use crate::error::FabricError;
use crate::fabric::Fabric;
use crate::item::ItemStack;
use crate::property::InventoryProperty;

/// Handle to a lens inside a [`LensTree`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LensId(u32);

impl LensId {
    /// The empty lens present in every tree
    pub const EMPTY: LensId = LensId(0);

    #[inline]
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Get the raw index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for LensId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LensId({})", self.0)
    }
}

/// Lens variants
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LensKind {
    /// Zero slots; every access fails
    Empty,
    /// A single fabric slot (leaf)
    Slot { ordinal: usize },
    /// Flat 1:1 view over `base..base + size`
    Indexed { base: usize, size: usize },
    /// `height` rows of `width` slots each
    Grid { width: usize, height: usize },
    /// Arbitrary disjoint children, flattened in child order
    Composite,
}

/// An immutable view description
#[derive(Debug, Clone)]
pub struct Lens {
    kind: LensKind,
    /// Logical slot -> fabric ordinal
    ordinals: Box<[usize]>,
    children: Box<[LensId]>,
    /// Properties keyed by child index
    properties: Vec<(usize, InventoryProperty)>,
}

impl Lens {
    pub(crate) fn new(
        kind: LensKind,
        ordinals: Vec<usize>,
        children: Vec<LensId>,
        properties: Vec<(usize, InventoryProperty)>,
    ) -> Self {
        Self {
            kind,
            ordinals: ordinals.into_boxed_slice(),
            children: children.into_boxed_slice(),
            properties,
        }
    }

    pub(crate) fn empty() -> Self {
        Self::new(LensKind::Empty, Vec::new(), Vec::new(), Vec::new())
    }

    /// Variant of this lens
    pub fn kind(&self) -> &LensKind {
        &self.kind
    }

    /// Check if this is a single-slot lens
    pub fn is_slot(&self) -> bool {
        matches!(self.kind, LensKind::Slot { .. })
    }

    /// Number of slots in this view
    pub fn slot_count(&self) -> usize {
        self.ordinals.len()
    }

    /// Fabric ordinal of a logical slot
    pub fn ordinal(&self, index: usize) -> Option<usize> {
        self.ordinals.get(index).copied()
    }

    /// Fabric ordinals in logical order
    pub fn ordinals(&self) -> &[usize] {
        &self.ordinals
    }

    /// Child lenses in order
    pub fn children(&self) -> &[LensId] {
        &self.children
    }

    /// Copy of the stack in a logical slot (empty when out of range)
    pub fn get_stack(&self, fabric: &dyn Fabric, index: usize) -> ItemStack {
        match self.ordinal(index) {
            Some(ordinal) => fabric.get_stack(ordinal),
            None => ItemStack::empty(),
        }
    }

    /// Write a logical slot.
    ///
    /// Returns `Ok(false)` without touching the fabric when the slot is out
    /// of range, and `Ok(false)` when the fabric refuses the stack.
    pub fn set_stack(
        &self,
        fabric: &mut dyn Fabric,
        index: usize,
        stack: ItemStack,
    ) -> Result<bool, FabricError> {
        match self.ordinal(index) {
            Some(ordinal) => fabric.set_stack(ordinal, stack),
            None => Ok(false),
        }
    }

    /// Smallest stack limit among the covered slots (0 for an empty lens)
    pub fn max_stack_size(&self, fabric: &dyn Fabric) -> u32 {
        self.ordinals
            .iter()
            .map(|&ordinal| fabric.max_stack_size(ordinal))
            .min()
            .unwrap_or(0)
    }

    /// Properties attached to a child
    pub fn properties(&self, child_index: usize) -> impl Iterator<Item = &InventoryProperty> {
        self.properties
            .iter()
            .filter(move |(index, _)| *index == child_index)
            .map(|(_, property)| property)
    }

    /// Position of a child lens
    pub fn child_index(&self, child: LensId) -> Option<usize> {
        self.children.iter().position(|&c| c == child)
    }
}

/// Arena of lenses sharing one slot collection
#[derive(Debug, Clone)]
pub struct LensTree {
    lenses: Vec<Lens>,
    slots: SlotCollection,
    root: LensId,
    fabric_size: usize,
}

impl LensTree {
    /// Default topology: one flat indexed lens (or the empty lens for a
    /// zero-sized fabric)
    pub fn indexed(fabric_size: usize) -> Self {
        let mut builder = LensBuilder::new(fabric_size);
        let root = builder.default_root();
        builder.finish(root)
    }

    /// Topology supplied by a provider
    pub fn from_provider(fabric_size: usize, provider: &dyn LensProvider) -> crate::Result<Self> {
        let mut builder = LensBuilder::new(fabric_size);
        let root = provider.root_lens(&mut builder)?;
        builder.build(root)
    }

    pub(crate) fn from_parts(lenses: Vec<Lens>, slots: SlotCollection, root: LensId, fabric_size: usize) -> Self {
        Self {
            lenses,
            slots,
            root,
            fabric_size,
        }
    }

    /// Root lens handle
    pub fn root(&self) -> LensId {
        self.root
    }

    /// Look up a lens
    pub fn get(&self, id: LensId) -> Option<&Lens> {
        self.lenses.get(id.0 as usize)
    }

    /// Canonical slot lenses
    pub fn slots(&self) -> &SlotCollection {
        &self.slots
    }

    /// Fabric size the tree was built for
    pub fn fabric_size(&self) -> usize {
        self.fabric_size
    }

    /// Number of lenses in the arena
    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    /// Always false: every tree holds at least the empty lens
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    /// Leaf slot lenses of a lens, in logical order
    pub fn slot_lenses(&self, id: LensId) -> Vec<LensId> {
        self.get(id)
            .map(|lens| {
                lens.ordinals()
                    .iter()
                    .filter_map(|&ordinal| self.slots.get(ordinal))
                    .collect()
            })
            .unwrap_or_default()
    }
}
