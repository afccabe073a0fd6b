//! Native storages: plain slot arrays and custom inventories

use crate::config::InventoryConfig;
use crate::error::FabricError;
use crate::fabric::Storage;
use crate::item::ItemStack;
use crate::property::{InventoryProperty, PropertyTable};
use std::collections::HashMap;

/// Plain slot array (chest, player inventory, crafting grid)
#[derive(Debug, Clone)]
pub struct BasicStorage {
    /// Display name
    name: Option<String>,
    /// Slot contents (empty stack = empty slot)
    slots: Vec<ItemStack>,
    /// Stack limit applied to every slot
    max_stack_size: u32,
    /// Slots that only accept one item type
    restrictions: HashMap<usize, String>,
}

impl BasicStorage {
    /// Create an unnamed storage with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            name: None,
            slots: vec![ItemStack::empty(); capacity],
            max_stack_size: 64,
            restrictions: HashMap::new(),
        }
    }

    /// Create a named storage
    pub fn named(name: impl Into<String>, capacity: usize) -> Self {
        Self::new(capacity).with_name(name)
    }

    /// Create a storage using the configured stack limit
    pub fn from_config(config: &InventoryConfig, capacity: usize) -> Self {
        Self::new(capacity).with_max_stack_size(config.default_max_stack_size)
    }

    /// Set display name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set stack limit
    pub fn with_max_stack_size(mut self, max: u32) -> Self {
        self.max_stack_size = max;
        self
    }

    /// Only accept `item_id` (or emptiness) in the given slot
    pub fn restrict_slot(mut self, slot: usize, item_id: impl Into<String>) -> Self {
        self.restrictions.insert(slot, item_id.into());
        self
    }

    /// Put a stack into a slot directly, bypassing restrictions
    pub fn with_stack(mut self, slot: usize, stack: ItemStack) -> Self {
        if let Some(existing) = self.slots.get_mut(slot) {
            *existing = stack;
        }
        self
    }

    /// Get inventory capacity
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Check whether a slot accepts the stack
    fn accepts(&self, slot: usize, stack: &ItemStack) -> bool {
        match self.restrictions.get(&slot) {
            Some(allowed) => stack.is_empty() || stack.item_type.id == *allowed,
            None => true,
        }
    }
}

impl Storage for BasicStorage {
    fn size(&self) -> usize {
        self.slots.len()
    }

    fn get_stack(&self, index: usize) -> ItemStack {
        self.slots.get(index).cloned().unwrap_or_default()
    }

    fn set_stack(&mut self, index: usize, stack: ItemStack) -> Result<bool, FabricError> {
        if index >= self.slots.len() {
            return Err(FabricError::SlotOutOfRange {
                ordinal: index,
                size: self.slots.len(),
            });
        }
        if !self.accepts(index, &stack) {
            return Ok(false);
        }
        self.slots[index] = if stack.is_empty() { ItemStack::empty() } else { stack };
        Ok(true)
    }

    fn max_stack_size(&self, index: usize) -> u32 {
        if index < self.slots.len() {
            self.max_stack_size
        } else {
            0
        }
    }

    fn display_name(&self) -> Option<&str> {
        self.name.as_deref()
    }
}

/// Property table key holding a custom inventory's title
pub const TITLE_KEY: &str = "title";

/// Storage created by a plugin, carrying its own property table
#[derive(Debug, Clone)]
pub struct CustomInventory {
    storage: BasicStorage,
    properties: PropertyTable,
}

impl CustomInventory {
    /// Create a custom inventory with given capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            storage: BasicStorage::new(capacity),
            properties: PropertyTable::new(),
        }
    }

    /// Wrap an existing storage
    pub fn from_storage(storage: BasicStorage) -> Self {
        Self {
            storage,
            properties: PropertyTable::new(),
        }
    }

    /// Add a property under a key
    pub fn with_property(mut self, key: impl Into<String>, property: InventoryProperty) -> Self {
        self.properties.insert(key, property);
        self
    }

    /// Set the title property (stored under [`TITLE_KEY`])
    pub fn with_title(self, title: impl Into<String>) -> Self {
        self.with_property(TITLE_KEY, InventoryProperty::title(title))
    }

    /// Property table
    pub fn property_table(&self) -> &PropertyTable {
        &self.properties
    }
}

impl Storage for CustomInventory {
    fn size(&self) -> usize {
        self.storage.size()
    }

    fn get_stack(&self, index: usize) -> ItemStack {
        self.storage.get_stack(index)
    }

    fn set_stack(&mut self, index: usize, stack: ItemStack) -> Result<bool, FabricError> {
        self.storage.set_stack(index, stack)
    }

    fn max_stack_size(&self, index: usize) -> u32 {
        self.storage.max_stack_size(index)
    }

    /// The title property, else the wrapped storage's name
    fn display_name(&self) -> Option<&str> {
        self.properties
            .get(TITLE_KEY)
            .and_then(InventoryProperty::as_title)
            .or_else(|| self.storage.display_name())
    }

    fn properties(&self) -> Option<&PropertyTable> {
        Some(&self.properties)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    #[test]
    fn test_storage_creation() {
        let storage = BasicStorage::named("Chest", 27);

        assert_eq!(storage.capacity(), 27);
        assert_eq!(storage.display_name(), Some("Chest"));
        assert_eq!(storage.max_stack_size(0), 64);
        assert_eq!(storage.max_stack_size(27), 0);
    }

    #[test]
    fn test_set_and_get() {
        let gold = ItemStack::new(ItemType::new("gold"), 50);
        let mut storage = BasicStorage::new(3);

        assert_eq!(storage.set_stack(2, gold.clone()), Ok(true));
        assert_eq!(storage.get_stack(2), gold);
        assert!(storage.get_stack(0).is_empty());
        assert!(storage.get_stack(3).is_empty());
    }

    #[test]
    fn test_restricted_slot_refuses_other_items() {
        let mut storage = BasicStorage::new(2).restrict_slot(1, "coal");

        assert_eq!(storage.set_stack(1, ItemStack::new(ItemType::new("iron"), 1)), Ok(false));
        assert!(storage.get_stack(1).is_empty());
        assert_eq!(storage.set_stack(1, ItemStack::new(ItemType::new("coal"), 8)), Ok(true));
        assert_eq!(storage.set_stack(1, ItemStack::empty()), Ok(true));
    }

    #[test]
    fn test_out_of_range_write() {
        let mut storage = BasicStorage::new(1);
        assert!(storage.set_stack(1, ItemStack::empty()).is_err());
    }

    #[test]
    fn test_custom_inventory_properties() {
        let custom = CustomInventory::new(9).with_title("Backpack");
        let table = custom.properties().unwrap();
        assert_eq!(table.get("title"), Some(&InventoryProperty::title("Backpack")));
        assert_eq!(custom.size(), 9);
        assert_eq!(custom.display_name(), Some("Backpack"));
    }

    #[test]
    fn test_custom_inventory_name_without_title() {
        let named = CustomInventory::from_storage(BasicStorage::named("Satchel", 2));
        assert_eq!(named.display_name(), Some("Satchel"));
        assert_eq!(CustomInventory::new(2).display_name(), None);

        let titled = CustomInventory::from_storage(BasicStorage::named("Satchel", 2)).with_title("Quiver");
        assert_eq!(titled.display_name(), Some("Quiver"));
    }

    #[test]
    fn test_from_config() {
        let config = InventoryConfig::default().with_max_stack_size(16);
        let storage = BasicStorage::from_config(&config, 4);
        assert_eq!(storage.max_stack_size(3), 16);
    }
}
