//! Fabric - physical storages behind a single ordinal space
//!
//! A [`Storage`] is one native slot array (a chest, a player's main
//! inventory, a crafting grid). A [`Fabric`] concatenates one or more
//! storages so that views can address every slot by a flat ordinal. The
//! ordinal to (storage, local index) mapping never changes once a fabric is
//! built; only slot contents do.

use crate::error::FabricError;
use crate::item::ItemStack;
use crate::property::PropertyTable;

/// A native, fixed-size slot array
pub trait Storage {
    /// Number of slots
    fn size(&self) -> usize;

    /// Copy of the stack in a slot (empty when out of range)
    fn get_stack(&self, index: usize) -> ItemStack;

    /// Write a slot.
    ///
    /// `Ok(false)` means the storage refused the stack (slot restriction);
    /// `Err` means the storage failed while writing.
    fn set_stack(&mut self, index: usize, stack: ItemStack) -> Result<bool, FabricError>;

    /// Stack limit of a slot
    fn max_stack_size(&self, index: usize) -> u32;

    /// Display name of the storage, if it has one
    fn display_name(&self) -> Option<&str> {
        None
    }

    /// Property table, for custom inventories
    fn properties(&self) -> Option<&PropertyTable> {
        None
    }
}

/// Ordinal-addressed access to one or more storages
pub trait Fabric {
    /// Total number of slots
    fn size(&self) -> usize;

    /// Copy of the stack at an ordinal (empty when out of range)
    fn get_stack(&self, ordinal: usize) -> ItemStack;

    /// Write the stack at an ordinal
    fn set_stack(&mut self, ordinal: usize, stack: ItemStack) -> Result<bool, FabricError>;

    /// Stack limit at an ordinal (0 when out of range)
    fn max_stack_size(&self, ordinal: usize) -> u32;

    /// Underlying storages, in ordinal order
    fn storages(&self) -> Vec<&dyn Storage>;
}

/// Fabric concatenating storages in the order they were added
#[derive(Default)]
pub struct StorageFabric {
    storages: Vec<Box<dyn Storage>>,
    /// First ordinal of each storage
    offsets: Vec<usize>,
    size: usize,
}

impl StorageFabric {
    /// Create an empty fabric
    pub fn new() -> Self {
        Self::default()
    }

    /// Fabric over a single storage
    pub fn single(storage: impl Storage + 'static) -> Self {
        Self::new().with_storage(storage)
    }

    /// Append a storage; its slots follow every slot already present
    pub fn with_storage(mut self, storage: impl Storage + 'static) -> Self {
        self.push(Box::new(storage));
        self
    }

    /// Append a boxed storage
    pub fn push(&mut self, storage: Box<dyn Storage>) {
        self.offsets.push(self.size);
        self.size += storage.size();
        self.storages.push(storage);
    }

    /// Number of storages
    pub fn storage_count(&self) -> usize {
        self.storages.len()
    }

    /// Resolve an ordinal to (storage, local index)
    pub fn locate(&self, ordinal: usize) -> Option<(usize, usize)> {
        if ordinal >= self.size {
            return None;
        }
        // Zero-sized storages share an offset with their successor; the last
        // storage starting at or before the ordinal is the one holding it.
        let storage = self.offsets.partition_point(|&start| start <= ordinal) - 1;
        Some((storage, ordinal - self.offsets[storage]))
    }
}

impl Fabric for StorageFabric {
    fn size(&self) -> usize {
        self.size
    }

    fn get_stack(&self, ordinal: usize) -> ItemStack {
        match self.locate(ordinal) {
            Some((storage, index)) => self.storages[storage].get_stack(index),
            None => ItemStack::empty(),
        }
    }

    fn set_stack(&mut self, ordinal: usize, stack: ItemStack) -> Result<bool, FabricError> {
        let (storage, index) = self.locate(ordinal).ok_or(FabricError::SlotOutOfRange {
            ordinal,
            size: self.size,
        })?;
        self.storages[storage].set_stack(index, stack)
    }

    fn max_stack_size(&self, ordinal: usize) -> u32 {
        self.locate(ordinal)
            .map(|(storage, index)| self.storages[storage].max_stack_size(index))
            .unwrap_or(0)
    }

    fn storages(&self) -> Vec<&dyn Storage> {
        self.storages.iter().map(|s| s.as_ref()).collect()
    }
}

impl std::fmt::Debug for StorageFabric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageFabric")
            .field("storages", &self.storages.len())
            .field("offsets", &self.offsets)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;
    use crate::storage::BasicStorage;

    #[test]
    fn test_locate_across_storages() {
        let fabric = StorageFabric::new()
            .with_storage(BasicStorage::new(3))
            .with_storage(BasicStorage::new(0))
            .with_storage(BasicStorage::new(2));

        assert_eq!(fabric.size(), 5);
        assert_eq!(fabric.locate(0), Some((0, 0)));
        assert_eq!(fabric.locate(2), Some((0, 2)));
        assert_eq!(fabric.locate(3), Some((2, 0)));
        assert_eq!(fabric.locate(4), Some((2, 1)));
        assert_eq!(fabric.locate(5), None);
    }

    #[test]
    fn test_writes_reach_the_right_storage() {
        let mut fabric = StorageFabric::new()
            .with_storage(BasicStorage::named("Chest", 2))
            .with_storage(BasicStorage::named("Hotbar", 2));

        let stone = ItemStack::new(ItemType::new("stone"), 12);
        assert_eq!(fabric.set_stack(3, stone.clone()), Ok(true));
        assert_eq!(fabric.get_stack(3), stone);

        let storages = fabric.storages();
        assert_eq!(storages[1].get_stack(1), stone);
        assert!(storages[0].get_stack(1).is_empty());
        assert_eq!(storages[0].display_name(), Some("Chest"));
    }

    #[test]
    fn test_out_of_range() {
        let mut fabric = StorageFabric::single(BasicStorage::new(1));
        assert!(fabric.get_stack(7).is_empty());
        assert_eq!(fabric.max_stack_size(7), 0);
        assert_eq!(
            fabric.set_stack(7, ItemStack::empty()),
            Err(FabricError::SlotOutOfRange { ordinal: 7, size: 1 })
        );
    }
}
