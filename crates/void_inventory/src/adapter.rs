//! Adapters - live views over a fabric
//!
//! An [`Inventory`] owns a fabric, the lens tree describing it and an arena
//! of [`Adapter`] views addressed by [`AdapterId`]. The root view is created
//! with the inventory; child views are materialized on first access and
//! cached per parent, so asking twice for the same child yields the same
//! handle.
//!
//! View caches are plain data behind `&mut self`: an inventory is meant to be
//! driven from the thread owning its storage.

use crate::config::InventoryConfig;
use crate::error::{InventoryError, Result};
use crate::fabric::Fabric;
use crate::item::{ItemStack, ItemType};
use crate::lens::{LensId, LensKind, LensProvider, LensTree};
use crate::logic;
use crate::property::{InventoryProperty, PropertyKind, PropertyTable};
use crate::transaction::InventoryTransactionResult;
use std::sync::Arc;

/// Handle to a view inside an [`Inventory`]
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AdapterId(u32);

impl AdapterId {
    /// Get the raw index
    #[inline]
    pub const fn index(&self) -> u32 {
        self.0
    }
}

impl std::fmt::Debug for AdapterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdapterId({})", self.0)
    }
}

/// What a view represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    /// Root of a container window viewing other storages
    Container,
    /// Generic (sub-)inventory
    Inventory,
    /// Grid of rows
    Grid,
    /// Single slot
    Slot,
    /// Result of a failed query
    Empty,
}

impl ViewKind {
    fn of(kind: &LensKind) -> Self {
        match kind {
            LensKind::Empty => Self::Empty,
            LensKind::Slot { .. } => Self::Slot,
            LensKind::Grid { .. } => Self::Grid,
            LensKind::Indexed { .. } | LensKind::Composite => Self::Inventory,
        }
    }
}

/// A materialized view
#[derive(Debug, Clone)]
pub struct Adapter {
    lens: LensId,
    /// Logical parent (itself at the root)
    parent: AdapterId,
    kind: ViewKind,
    /// Index-aligned with the lens children
    children: Vec<Option<AdapterId>>,
    slots: Option<Arc<[AdapterId]>>,
    empty: Option<AdapterId>,
}

impl Adapter {
    /// Root lens of this view
    pub fn lens(&self) -> LensId {
        self.lens
    }

    /// Logical parent
    pub fn parent(&self) -> AdapterId {
        self.parent
    }

    /// View kind
    pub fn kind(&self) -> ViewKind {
        self.kind
    }
}

/// A fabric together with its lens tree and materialized views
pub struct Inventory {
    fabric: Box<dyn Fabric>,
    lenses: Arc<LensTree>,
    adapters: Vec<Adapter>,
    config: InventoryConfig,
}

impl Inventory {
    const ROOT: AdapterId = AdapterId(0);

    /// Inventory with the default flat topology
    pub fn new(fabric: impl Fabric + 'static) -> Self {
        let lenses = Arc::new(LensTree::indexed(fabric.size()));
        Self::from_parts(Box::new(fabric), lenses, None)
    }

    /// Container window over the fabric's storages
    ///
    /// Root properties of a container resolve against the first viewed
    /// storage when that storage is a custom inventory.
    pub fn container(fabric: impl Fabric + 'static) -> Self {
        let lenses = Arc::new(LensTree::indexed(fabric.size()));
        Self::from_parts(Box::new(fabric), lenses, Some(ViewKind::Container))
    }

    /// Inventory whose topology comes from a provider
    pub fn with_provider(fabric: impl Fabric + 'static, provider: &dyn LensProvider) -> Result<Self> {
        let lenses = Arc::new(LensTree::from_provider(fabric.size(), provider)?);
        Ok(Self::from_parts(Box::new(fabric), lenses, None))
    }

    /// Inventory sharing an existing lens tree
    pub fn with_lenses(fabric: impl Fabric + 'static, lenses: Arc<LensTree>) -> Result<Self> {
        if lenses.fabric_size() != fabric.size() {
            return Err(InventoryError::LensOutOfRange {
                base: 0,
                end: lenses.fabric_size(),
                size: fabric.size(),
            });
        }
        Ok(Self::from_parts(Box::new(fabric), lenses, None))
    }

    /// Set configuration
    pub fn with_config(mut self, config: InventoryConfig) -> Self {
        self.config = config;
        self
    }

    fn from_parts(fabric: Box<dyn Fabric>, lenses: Arc<LensTree>, kind: Option<ViewKind>) -> Self {
        let root_lens = lenses.root();
        let kind = kind.unwrap_or_else(|| {
            lenses
                .get(root_lens)
                .map(|lens| ViewKind::of(lens.kind()))
                .unwrap_or(ViewKind::Empty)
        });
        Self {
            fabric,
            lenses,
            adapters: vec![Adapter {
                lens: root_lens,
                parent: Self::ROOT,
                kind,
                children: Vec::new(),
                slots: None,
                empty: None,
            }],
            config: InventoryConfig::default(),
        }
    }

    /// Root view
    pub fn root(&self) -> AdapterId {
        Self::ROOT
    }

    /// Look up a view
    pub fn adapter(&self, id: AdapterId) -> Option<&Adapter> {
        self.adapters.get(id.0 as usize)
    }

    /// Number of materialized views
    pub fn view_count(&self) -> usize {
        self.adapters.len()
    }

    /// Shared lens tree
    pub fn lenses(&self) -> &Arc<LensTree> {
        &self.lenses
    }

    /// Underlying fabric
    pub fn fabric(&self) -> &dyn Fabric {
        self.fabric.as_ref()
    }

    /// Underlying fabric, mutably
    pub fn fabric_mut(&mut self) -> &mut dyn Fabric {
        self.fabric.as_mut()
    }

    /// Configuration
    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    fn node(&self, id: AdapterId) -> Result<&Adapter> {
        self.adapter(id).ok_or(InventoryError::UnknownView(id.0))
    }

    /// Lens of a view (the empty lens for unknown views)
    fn lens_of(&self, id: AdapterId) -> LensId {
        self.adapter(id).map(Adapter::lens).unwrap_or(LensId::EMPTY)
    }

    fn spawn(&mut self, lens: LensId, parent: AdapterId) -> AdapterId {
        let kind = self
            .lenses
            .get(lens)
            .map(|l| ViewKind::of(l.kind()))
            .unwrap_or(ViewKind::Empty);
        let id = AdapterId(self.adapters.len() as u32);
        self.adapters.push(Adapter {
            lens,
            parent,
            kind,
            children: Vec::new(),
            slots: None,
            empty: None,
        });
        id
    }

    // ----- navigation -----

    /// Logical parent of a view (itself at the root)
    pub fn parent(&self, id: AdapterId) -> AdapterId {
        self.adapter(id).map(Adapter::parent).unwrap_or(id)
    }

    /// Number of children of a view
    pub fn child_count(&self, id: AdapterId) -> usize {
        self.lenses
            .get(self.lens_of(id))
            .map(|lens| lens.children().len())
            .unwrap_or(0)
    }

    /// Child view at `index`, materializing it on first access
    ///
    /// # Panics
    ///
    /// Panics if `index` is not a child of the view.
    pub fn child(&mut self, id: AdapterId, index: usize) -> AdapterId {
        match self.try_child(id, index) {
            Ok(child) => child,
            Err(e) => panic!("{}", e),
        }
    }

    /// Child view at `index`, or an error if there is none
    pub fn try_child(&mut self, id: AdapterId, index: usize) -> Result<AdapterId> {
        let lens_id = self.node(id)?.lens;
        let lens = self.lenses.get(lens_id).ok_or(InventoryError::UnknownLens(lens_id.index()))?;
        let count = lens.children().len();
        let child_lens = *lens
            .children()
            .get(index)
            .ok_or(InventoryError::ChildOutOfBounds { index, count })?;

        let cache = &mut self.adapters[id.0 as usize].children;
        if cache.len() < count {
            cache.resize(count, None);
        }
        if let Some(child) = cache[index] {
            return Ok(child);
        }

        let child = self.spawn(child_lens, id);
        self.adapters[id.0 as usize].children[index] = Some(child);
        log::debug!("Materialized child {} of {:?} as {:?} ({:?})", index, id, child, child_lens);
        Ok(child)
    }

    /// Child view whose lens is `lens`, if it is a direct child
    pub fn child_for_lens(&mut self, id: AdapterId, lens: LensId) -> Option<AdapterId> {
        let index = self.lenses.get(self.lens_of(id))?.child_index(lens)?;
        self.try_child(id, index).ok()
    }

    /// First child view, or the empty view if there is none
    pub fn first(&mut self, id: AdapterId) -> AdapterId {
        if self.child_count(id) > 0 {
            self.child(id, 0)
        } else {
            self.empty(id)
        }
    }

    /// Following sibling view, or the empty view at the end
    pub fn next(&mut self, id: AdapterId) -> AdapterId {
        let parent = self.parent(id);
        if parent == id {
            return self.empty(id);
        }
        let position = self.adapters[parent.0 as usize]
            .children
            .iter()
            .position(|&c| c == Some(id));
        match position {
            Some(index) if index + 1 < self.child_count(parent) => self.child(parent, index + 1),
            _ => self.empty(id),
        }
    }

    /// The empty view owned by `id`, returned for failed queries on it
    pub fn empty(&mut self, id: AdapterId) -> AdapterId {
        if let Some(empty) = self.adapter(id).and_then(|a| a.empty) {
            return empty;
        }
        let empty = self.spawn(LensId::EMPTY, id);
        if let Some(node) = self.adapters.get_mut(id.0 as usize) {
            node.empty = Some(empty);
        }
        empty
    }

    /// Slot views of a view, in logical order
    ///
    /// Built once per view; the returned handle list can be iterated any
    /// number of times.
    pub fn slots(&mut self, id: AdapterId) -> Arc<[AdapterId]> {
        if let Some(slots) = self.adapter(id).and_then(|a| a.slots.clone()) {
            return slots;
        }
        let lens_id = self.lens_of(id);
        let Some(lens) = self.lenses.get(lens_id) else {
            return Arc::from(Vec::new());
        };

        let slots: Arc<[AdapterId]> = if lens.is_slot() {
            Arc::from(vec![id])
        } else {
            let ordinals = lens.ordinals().to_vec();
            let mut views = Vec::with_capacity(ordinals.len());
            for ordinal in ordinals {
                views.push(self.descend_to_slot(id, ordinal));
            }
            Arc::from(views)
        };

        if let Some(node) = self.adapters.get_mut(id.0 as usize) {
            node.slots = Some(slots.clone());
        }
        slots
    }

    /// Slot view covering `ordinal`, materialized through the child chain of
    /// `id` so every slot has a single view reachable from its parent
    fn descend_to_slot(&mut self, id: AdapterId, ordinal: usize) -> AdapterId {
        let mut current = id;
        loop {
            let Some(lens) = self.lenses.get(self.lens_of(current)) else {
                break;
            };
            if lens.is_slot() {
                return current;
            }
            let lenses = &self.lenses;
            let index = lens
                .children()
                .iter()
                .position(|&child| lenses.get(child).is_some_and(|c| c.ordinals().contains(&ordinal)));
            match index {
                Some(index) => current = self.child(current, index),
                None => break,
            }
        }
        let leaf = self.lenses.slots().get(ordinal).unwrap_or(LensId::EMPTY);
        self.spawn(leaf, current)
    }

    /// Slot view for a logical slot of a view
    pub fn slot_for(&mut self, id: AdapterId, index: usize) -> Option<AdapterId> {
        self.slots(id).get(index).copied()
    }

    /// Fabric ordinal of a slot view
    pub fn ordinal(&self, id: AdapterId) -> Option<usize> {
        match self.lenses.get(self.lens_of(id))?.kind() {
            LensKind::Slot { ordinal } => Some(*ordinal),
            _ => None,
        }
    }

    /// Empty every slot of a view
    pub fn clear(&mut self, id: AdapterId) {
        let slots = self.slots(id);
        for &slot in slots.iter() {
            let Some(lens) = self.lenses.get(self.lens_of(slot)) else {
                continue;
            };
            if let Err(e) = lens.set_stack(self.fabric.as_mut(), 0, ItemStack::empty()) {
                log::warn!("Failed to clear slot view {:?}: {}", slot, e);
            }
        }
    }

    // ----- queries and transactions -----

    /// Remove the first stack of a view
    pub fn poll(&mut self, id: AdapterId) -> Option<ItemStack> {
        let lens = self.lens_of(id);
        logic::poll_sequential(self.fabric.as_mut(), &self.lenses, lens)
    }

    /// Remove up to `limit` items of the first item of a view
    pub fn poll_limit(&mut self, id: AdapterId, limit: u32) -> Option<ItemStack> {
        let lens = self.lens_of(id);
        logic::poll_sequential_limit(self.fabric.as_mut(), &self.lenses, lens, limit)
    }

    /// Copy of the first stack of a view
    pub fn peek(&self, id: AdapterId) -> Option<ItemStack> {
        logic::peek_sequential(self.fabric.as_ref(), &self.lenses, self.lens_of(id))
    }

    /// Up to `limit` items of the first item of a view, without removing them
    pub fn peek_limit(&self, id: AdapterId, limit: u32) -> Option<ItemStack> {
        logic::peek_sequential_limit(self.fabric.as_ref(), &self.lenses, self.lens_of(id), limit)
    }

    /// Overwrite consecutive slots with the stack
    pub fn insert(&mut self, id: AdapterId, stack: &ItemStack) -> InventoryTransactionResult {
        let lens = self.lens_of(id);
        let result = logic::insert_sequential(self.fabric.as_mut(), &self.lenses, lens, stack);
        self.log_transaction("insert", id, &result);
        result
    }

    /// Merge the stack into the view; leftovers stay on `stack`
    pub fn append(&mut self, id: AdapterId, stack: &mut ItemStack) -> InventoryTransactionResult {
        let lens = self.lens_of(id);
        let result = logic::append_sequential(self.fabric.as_mut(), &self.lenses, lens, stack);
        self.log_transaction("append", id, &result);
        result
    }

    fn log_transaction(&self, op: &str, id: AdapterId, result: &InventoryTransactionResult) {
        if self.config.log_transactions {
            log::debug!(
                "{} on {:?}: {:?} (replaced {}, rejected {})",
                op,
                id,
                result.kind(),
                result.replaced().len(),
                result.rejected().len()
            );
        }
    }

    /// Number of non-empty slots
    pub fn count_stacks(&self, id: AdapterId) -> usize {
        logic::count_stacks(self.fabric.as_ref(), &self.lenses, self.lens_of(id))
    }

    /// Total item quantity
    pub fn count_items(&self, id: AdapterId) -> u32 {
        logic::count_items(self.fabric.as_ref(), &self.lenses, self.lens_of(id))
    }

    /// Number of slots
    pub fn capacity(&self, id: AdapterId) -> usize {
        logic::capacity(&self.lenses, self.lens_of(id))
    }

    /// Check for at least `stack.quantity` similar items
    pub fn contains(&self, id: AdapterId, stack: &ItemStack) -> bool {
        self.contains_quantity(id, stack, stack.quantity)
    }

    /// Check for at least `quantity` items similar to `stack`
    pub fn contains_quantity(&self, id: AdapterId, stack: &ItemStack, quantity: u32) -> bool {
        logic::contains(self.fabric.as_ref(), &self.lenses, self.lens_of(id), stack, quantity)
    }

    /// Check for any stack of the given type
    pub fn contains_type(&self, id: AdapterId, item_type: &ItemType) -> bool {
        logic::contains_type(self.fabric.as_ref(), &self.lenses, self.lens_of(id), item_type)
    }

    /// Properties of the given kind that `id` attaches to its child `child`
    pub fn properties(&self, id: AdapterId, child: AdapterId, kind: PropertyKind) -> Vec<InventoryProperty> {
        logic::get_properties(&self.lenses, self.lens_of(id), self.lens_of(child), kind)
    }

    // ----- root properties -----

    /// Topmost view reached by following parents
    pub fn syntactic_root(&self, id: AdapterId) -> AdapterId {
        let mut current = id;
        loop {
            let parent = self.parent(current);
            if parent == current {
                return current;
            }
            current = parent;
        }
    }

    /// Property table backing the root of a view.
    ///
    /// A container root redirects to the first storage it views; any other
    /// root uses its storage's table when it wraps exactly one storage.
    fn root_table(&self, root: AdapterId) -> Option<&PropertyTable> {
        let storages = self.fabric.storages();
        let kind = self.adapter(root).map(Adapter::kind)?;
        if kind != ViewKind::Container && storages.len() != 1 {
            return None;
        }
        storages.into_iter().next().and_then(|storage| storage.properties())
    }

    /// Property of the root inventory, looked up by key in a custom
    /// inventory first
    pub fn root_property(&self, id: AdapterId, kind: PropertyKind, key: &str) -> Option<InventoryProperty> {
        let root = self.syntactic_root(id);
        if let Some(property) = self.root_table(root).and_then(|table| table.get(key)) {
            if property.kind() == kind {
                return Some(property.clone());
            }
        }
        self.find_root_property(kind)
    }

    /// Every property of the given kind on the root inventory
    pub fn root_properties(&self, id: AdapterId, kind: PropertyKind) -> Vec<InventoryProperty> {
        let root = self.syntactic_root(id);
        match self.root_table(root) {
            Some(table) => table.of_kind(kind).cloned().collect(),
            None => self.find_root_property(kind).into_iter().collect(),
        }
    }

    /// Properties derived from the physical storage
    fn find_root_property(&self, kind: PropertyKind) -> Option<InventoryProperty> {
        match kind {
            PropertyKind::Title => {
                let name = self
                    .fabric
                    .storages()
                    .into_iter()
                    .next()
                    .and_then(|storage| storage.display_name().map(str::to_string))
                    .unwrap_or_else(|| self.config.default_title.clone());
                Some(InventoryProperty::Title(name))
            }
            _ => None,
        }
    }
}

impl std::fmt::Debug for Inventory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Inventory")
            .field("size", &self.fabric.size())
            .field("lenses", &self.lenses.len())
            .field("views", &self.adapters.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fabric::StorageFabric;
    use crate::lens::LensBuilder;
    use crate::storage::{BasicStorage, CustomInventory};

    fn player_inventory() -> Inventory {
        // 3 hotbar slots followed by a 3x2 main grid
        let fabric = StorageFabric::single(BasicStorage::named("Player", 9));
        let provider = |builder: &mut LensBuilder| {
            let hotbar = builder.indexed(0, 3)?;
            let main = builder.grid(3, 3, 2)?;
            builder.composite_with_properties(
                &[hotbar, main],
                vec![(0, InventoryProperty::title("Hotbar")), (1, InventoryProperty::title("Main"))],
            )
        };
        Inventory::with_provider(fabric, &provider).unwrap()
    }

    #[test]
    fn test_child_views_are_cached() {
        let mut inv = player_inventory();
        let root = inv.root();

        let main = inv.child(root, 1);
        assert_eq!(inv.child(root, 1), main);
        assert_eq!(inv.parent(main), root);
        assert_eq!(inv.parent(root), root);
        assert_eq!(inv.adapter(main).unwrap().kind(), ViewKind::Grid);

        let row = inv.child(main, 1);
        assert_eq!(inv.capacity(row), 3);
        assert_eq!(inv.syntactic_root(row), root);
    }

    #[test]
    fn test_child_out_of_bounds() {
        let mut inv = player_inventory();
        let root = inv.root();
        assert_eq!(
            inv.try_child(root, 2),
            Err(InventoryError::ChildOutOfBounds { index: 2, count: 2 })
        );
    }

    #[test]
    #[should_panic(expected = "no child at index 5")]
    fn test_child_panics_on_bad_index() {
        let mut inv = player_inventory();
        let root = inv.root();
        inv.child(root, 5);
    }

    #[test]
    fn test_slots_follow_lens_order_and_reuse_children() {
        let mut inv = player_inventory();
        let root = inv.root();
        let hotbar = inv.child(root, 0);
        let first = inv.child(hotbar, 0);

        let slots = inv.slots(hotbar);
        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0], first);
        assert_eq!(inv.ordinal(slots[2]), Some(2));

        let again = inv.slots(hotbar);
        assert!(Arc::ptr_eq(&slots, &again));

        let all = inv.slots(root);
        assert_eq!(all.len(), 9);
        assert_eq!(inv.ordinal(all[8]), Some(8));
        assert_eq!(inv.slots(first).as_ref(), &[first]);
    }

    #[test]
    fn test_grid_slots_resolve_through_rows() {
        let mut inv = player_inventory();
        let root = inv.root();
        let main = inv.child(root, 1);

        let slots = inv.slots(main);
        assert_eq!(slots.len(), 6);
        let second_row = inv.child(main, 1);
        assert_eq!(slots[3], inv.child(second_row, 0));
        assert_eq!(inv.parent(slots[3]), second_row);
        assert_eq!(inv.ordinal(slots[3]), Some(6));

        assert_eq!(inv.next(slots[0]), slots[1]);
        let end_of_row = inv.next(slots[2]);
        assert_eq!(inv.adapter(end_of_row).unwrap().kind(), ViewKind::Empty);

        // One view per slot, whichever ancestor lists it
        let all = inv.slots(root);
        assert_eq!(&all[3..], &slots[..]);
    }

    #[test]
    fn test_clear_empties_only_the_view() {
        let mut inv = player_inventory();
        let root = inv.root();
        let dirt = ItemStack::new(ItemType::new("dirt"), 10);
        inv.fabric_mut().set_stack(1, dirt.clone()).unwrap();
        inv.fabric_mut().set_stack(5, dirt).unwrap();

        let hotbar = inv.child(root, 0);
        inv.clear(hotbar);

        assert_eq!(inv.count_items(hotbar), 0);
        assert_eq!(inv.count_items(root), 10);
    }

    #[test]
    fn test_empty_view_is_shared() {
        let mut inv = player_inventory();
        let root = inv.root();
        let hotbar = inv.child(root, 0);
        let slot = inv.child(hotbar, 0);

        let empty = inv.first(slot);
        assert_eq!(inv.first(slot), empty);
        assert_eq!(inv.adapter(empty).unwrap().kind(), ViewKind::Empty);
        assert_eq!(inv.parent(empty), slot);
        assert_eq!(inv.capacity(empty), 0);
        assert_eq!(inv.peek(empty), None);
    }

    #[test]
    fn test_first_and_next() {
        let mut inv = player_inventory();
        let root = inv.root();

        let hotbar = inv.first(root);
        assert_eq!(hotbar, inv.child(root, 0));
        let main = inv.next(hotbar);
        assert_eq!(main, inv.child(root, 1));

        let end = inv.next(main);
        assert_eq!(inv.adapter(end).unwrap().kind(), ViewKind::Empty);
        let root_next = inv.next(root);
        assert_eq!(inv.adapter(root_next).unwrap().kind(), ViewKind::Empty);
    }

    #[test]
    fn test_child_for_lens() {
        let mut inv = player_inventory();
        let root = inv.root();
        let main = inv.child(root, 1);
        let main_lens = inv.adapter(main).unwrap().lens();

        assert_eq!(inv.child_for_lens(root, main_lens), Some(main));
        assert_eq!(inv.child_for_lens(main, main_lens), None);
    }

    #[test]
    fn test_child_properties() {
        let mut inv = player_inventory();
        let root = inv.root();
        let hotbar = inv.child(root, 0);
        let main = inv.child(root, 1);

        assert_eq!(
            inv.properties(root, main, PropertyKind::Title),
            vec![InventoryProperty::title("Main")]
        );
        assert!(inv.properties(root, hotbar, PropertyKind::Dimension).is_empty());
        assert!(inv.properties(hotbar, main, PropertyKind::Title).is_empty());
    }

    #[test]
    fn test_title_falls_back_to_storage_name() {
        let mut inv = player_inventory();
        let root = inv.root();
        let hotbar = inv.child(root, 0);

        assert_eq!(
            inv.root_property(hotbar, PropertyKind::Title, "title"),
            Some(InventoryProperty::title("Player"))
        );
        assert_eq!(inv.root_property(hotbar, PropertyKind::Dimension, "size"), None);
        assert!(inv.root_properties(root, PropertyKind::SlotIndex).is_empty());
    }

    #[test]
    fn test_container_redirects_to_custom_inventory() {
        let custom = CustomInventory::new(3)
            .with_title("Backpack")
            .with_property("note", InventoryProperty::Custom { key: "owner".into(), value: "steve".into() });
        let fabric = StorageFabric::new()
            .with_storage(custom)
            .with_storage(BasicStorage::named("Player", 4));
        let mut inv = Inventory::container(fabric);
        let root = inv.root();
        assert_eq!(inv.adapter(root).unwrap().kind(), ViewKind::Container);

        let slot = inv.child(root, 5);
        assert_eq!(
            inv.root_property(slot, PropertyKind::Title, "title"),
            Some(InventoryProperty::title("Backpack"))
        );
        assert_eq!(inv.root_properties(slot, PropertyKind::Custom).len(), 1);

        // Key present but of another kind, or missing: the custom inventory's own title
        assert_eq!(
            inv.root_property(slot, PropertyKind::Title, "note"),
            Some(InventoryProperty::title("Backpack"))
        );
        assert_eq!(
            inv.root_property(root, PropertyKind::Title, "caption"),
            Some(InventoryProperty::title("Backpack"))
        );
    }

    #[test]
    fn test_plain_multi_storage_root_ignores_custom_tables() {
        let fabric = StorageFabric::new()
            .with_storage(BasicStorage::new(1))
            .with_storage(CustomInventory::new(1).with_title("Backpack"));
        let inv = Inventory::new(fabric).with_config(InventoryConfig::default().with_default_title("Untitled"));

        assert_eq!(
            inv.root_properties(inv.root(), PropertyKind::Title),
            vec![InventoryProperty::title("Untitled")]
        );
    }

    #[test]
    fn test_transactions_through_views() {
        let mut inv = player_inventory().with_config(InventoryConfig::verbose());
        let root = inv.root();
        let main = inv.child(root, 1);
        let dirt = ItemType::new("dirt");

        let result = inv.insert(main, &ItemStack::new(dirt.clone(), 100));
        assert!(result.is_success());
        assert_eq!(inv.count_items(main), 100);
        assert_eq!(inv.count_stacks(main), 2);
        let hotbar = inv.child(root, 0);
        assert!(!inv.contains_type(hotbar, &dirt));
        assert!(inv.contains(root, &ItemStack::new(dirt.clone(), 100)));

        let mut more = ItemStack::new(dirt.clone(), 30);
        let result = inv.append(root, &mut more);
        assert!(result.is_success());
        assert_eq!(more.quantity, 0);
        // Hotbar comes first in the composite
        assert_eq!(inv.fabric().get_stack(0).quantity, 30);

        let polled = inv.poll_limit(main, 70).unwrap();
        assert_eq!(polled.quantity, 70);
        assert_eq!(inv.peek_limit(root, 1000).unwrap().quantity, 60);
        assert_eq!(inv.poll(root).unwrap().quantity, 30);
    }

    #[test]
    fn test_with_lenses_checks_size() {
        let lenses = Arc::new(LensTree::indexed(4));
        assert!(Inventory::with_lenses(StorageFabric::single(BasicStorage::new(3)), lenses.clone()).is_err());

        let a = Inventory::with_lenses(StorageFabric::single(BasicStorage::new(4)), lenses.clone()).unwrap();
        let b = Inventory::with_lenses(StorageFabric::single(BasicStorage::new(4)), lenses.clone()).unwrap();
        assert!(Arc::ptr_eq(a.lenses(), b.lenses()));
    }

    #[test]
    fn test_zero_sized_inventory() {
        let mut inv = Inventory::new(StorageFabric::new());
        let root = inv.root();
        assert_eq!(inv.adapter(root).unwrap().kind(), ViewKind::Empty);
        assert_eq!(inv.capacity(root), 0);
        assert!(inv.slots(root).is_empty());

        let result = inv.insert(root, &ItemStack::new(ItemType::new("dirt"), 1));
        assert_eq!(result.rejected().len(), 1);
    }
}
