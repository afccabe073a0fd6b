//! Void Inventory - Slot-indexed views over item storages
//!
//! This crate presents any item storage (chests, player inventories,
//! crafting grids, custom composites) through a uniform view tree and moves
//! items through those views without callers knowing the storage layout.
//!
//! # Features
//!
//! - Fabrics concatenating native storages into one ordinal space
//! - Immutable lens trees describing slots, rows, grids and composites
//! - Lazily materialized, cached views with parent navigation
//! - Sequential poll/peek/insert/append with exact stack-limit arithmetic
//! - Root property resolution (titles) with custom inventory tables
//!
//! # Example
//!
//! ```ignore
//! use void_inventory::prelude::*;
//!
//! let chest = BasicStorage::named("Chest", 27);
//! let mut inventory = Inventory::new(StorageFabric::single(chest));
//! let root = inventory.root();
//!
//! let dirt = ItemType::new("dirt");
//! let result = inventory.insert(root, &ItemStack::new(dirt.clone(), 70));
//! assert!(result.is_success());
//! assert_eq!(inventory.count_items(root), 70);
//! ```

pub mod adapter;
pub mod config;
pub mod error;
pub mod fabric;
pub mod item;
pub mod lens;
pub mod logic;
pub mod property;
pub mod storage;
pub mod transaction;

pub use error::{FabricError, InventoryError, Result};

pub mod prelude {
    pub use crate::adapter::{Adapter, AdapterId, Inventory, ViewKind};
    pub use crate::config::InventoryConfig;
    pub use crate::error::{FabricError, InventoryError};
    pub use crate::fabric::{Fabric, Storage, StorageFabric};
    pub use crate::item::{ItemProperty, ItemStack, ItemType};
    pub use crate::lens::{Lens, LensBuilder, LensId, LensKind, LensProvider, LensTree, SlotCollection};
    pub use crate::property::{InventoryProperty, PropertyKind, PropertyTable};
    pub use crate::storage::{BasicStorage, CustomInventory};
    pub use crate::transaction::{InventoryTransactionResult, TransactionType};
}

pub use prelude::*;
