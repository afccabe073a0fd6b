//! Item types and stacks

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier used by the "no item" sentinel type
pub const NONE_ID: &str = "none";

/// Stack limit used when an item type does not declare one
pub const DEFAULT_MAX_STACK: u32 = 64;

/// Item type (identity shared by every stack of the same item)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemType {
    /// Unique identifier
    pub id: String,
    /// Maximum stack size (1 = not stackable)
    pub max_stack_size: u32,
}

impl ItemType {
    /// Create a new item type with the default stack limit
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            max_stack_size: DEFAULT_MAX_STACK,
        }
    }

    /// The "no item" sentinel
    pub fn none() -> Self {
        Self {
            id: NONE_ID.to_string(),
            max_stack_size: 0,
        }
    }

    /// Set max stack size
    pub fn with_max_stack(mut self, max: u32) -> Self {
        self.max_stack_size = max.max(1);
        self
    }

    /// Check if this is the "no item" sentinel
    pub fn is_none(&self) -> bool {
        self.id == NONE_ID
    }
}

impl Default for ItemType {
    fn default() -> Self {
        Self::none()
    }
}

/// Item property value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ItemProperty {
    /// Integer value
    Int(i64),
    /// Float value
    Float(f64),
    /// Boolean value
    Bool(bool),
    /// String value
    String(String),
    /// Array of values
    Array(Vec<ItemProperty>),
}

/// A stack of items held by a slot
///
/// A stack whose quantity is zero, or whose type is the "no item" sentinel,
/// is logically empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemStack {
    /// Item type
    pub item_type: ItemType,
    /// Quantity
    pub quantity: u32,
    /// Instance-specific properties (durability, enchantments, etc.)
    pub instance_data: BTreeMap<String, ItemProperty>,
}

impl ItemStack {
    /// Create a new item stack
    pub fn new(item_type: ItemType, quantity: u32) -> Self {
        Self {
            item_type,
            quantity,
            instance_data: BTreeMap::new(),
        }
    }

    /// The empty stack
    pub fn empty() -> Self {
        Self::new(ItemType::none(), 0)
    }

    /// Set instance data
    pub fn with_data(mut self, key: impl Into<String>, value: ItemProperty) -> Self {
        self.instance_data.insert(key.into(), value);
        self
    }

    /// Check if this stack is empty
    pub fn is_empty(&self) -> bool {
        self.quantity == 0 || self.item_type.is_none()
    }

    /// Maximum stack size of this stack's item type
    pub fn max_stack_size(&self) -> u32 {
        self.item_type.max_stack_size
    }

    /// Copy of this stack carrying a different quantity
    pub fn with_quantity(&self, quantity: u32) -> Self {
        Self {
            item_type: self.item_type.clone(),
            quantity,
            instance_data: self.instance_data.clone(),
        }
    }

    /// Compare item identity and instance data, ignoring quantity
    pub fn is_similar(&self, other: &ItemStack) -> bool {
        self.item_type.id == other.item_type.id && self.instance_data == other.instance_data
    }

    /// Check if this stack holds the given item type
    pub fn is_of(&self, item_type: &ItemType) -> bool {
        !self.is_empty() && self.item_type.id == item_type.id
    }
}

impl Default for ItemStack {
    fn default() -> Self {
        Self::empty()
    }
}
