//! Inventory properties (titles, slot positions, dimensions)
//!
//! Properties are advisory metadata attached to views. Lenses store them per
//! child index; custom inventories keep a keyed table that takes precedence
//! when resolving properties of a root view.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property discriminant used for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyKind {
    Title,
    SlotIndex,
    Dimension,
    Custom,
}

/// Property value attached to a view
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum InventoryProperty {
    /// Display title
    Title(String),
    /// Position of a slot within its parent
    SlotIndex(usize),
    /// Columns x rows of a grid view
    Dimension { columns: usize, rows: usize },
    /// Free-form key/value pair
    Custom { key: String, value: String },
}

impl InventoryProperty {
    /// Get the kind of this property
    pub fn kind(&self) -> PropertyKind {
        match self {
            Self::Title(_) => PropertyKind::Title,
            Self::SlotIndex(_) => PropertyKind::SlotIndex,
            Self::Dimension { .. } => PropertyKind::Dimension,
            Self::Custom { .. } => PropertyKind::Custom,
        }
    }

    /// Create a title property
    pub fn title(text: impl Into<String>) -> Self {
        Self::Title(text.into())
    }

    /// Get as title text
    pub fn as_title(&self) -> Option<&str> {
        match self {
            Self::Title(text) => Some(text),
            _ => None,
        }
    }
}

/// Keyed property table owned by a custom inventory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyTable {
    entries: BTreeMap<String, InventoryProperty>,
}

impl PropertyTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a property under a key
    pub fn with(mut self, key: impl Into<String>, property: InventoryProperty) -> Self {
        self.insert(key, property);
        self
    }

    /// Insert a property, returning the previous one under that key
    pub fn insert(&mut self, key: impl Into<String>, property: InventoryProperty) -> Option<InventoryProperty> {
        self.entries.insert(key.into(), property)
    }

    /// Get a property by key
    pub fn get(&self, key: &str) -> Option<&InventoryProperty> {
        self.entries.get(key)
    }

    /// All properties of the given kind, in key order
    pub fn of_kind(&self, kind: PropertyKind) -> impl Iterator<Item = &InventoryProperty> {
        self.entries.values().filter(move |p| p.kind() == kind)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_filter() {
        let table = PropertyTable::new()
            .with("title", InventoryProperty::title("Loot"))
            .with("size", InventoryProperty::Dimension { columns: 9, rows: 3 })
            .with("subtitle", InventoryProperty::title("Chest"));

        let titles: Vec<_> = table.of_kind(PropertyKind::Title).collect();
        assert_eq!(titles.len(), 2);
        assert_eq!(table.of_kind(PropertyKind::SlotIndex).count(), 0);
        assert_eq!(table.get("title").and_then(|p| p.as_title()), Some("Loot"));
    }
}
