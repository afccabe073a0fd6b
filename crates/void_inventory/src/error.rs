//! Error types

use thiserror::Error;

/// Failure raised by a storage while reading or writing a slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FabricError {
    /// Ordinal outside the fabric
    #[error("slot {ordinal} out of range (size {size})")]
    SlotOutOfRange { ordinal: usize, size: usize },
    /// Storage-specific failure
    #[error("storage error: {0}")]
    Storage(String),
}

/// Errors raised while building lenses or navigating views
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InventoryError {
    /// A lens references ordinals beyond the fabric
    #[error("lens range {base}..{end} exceeds fabric size {size}")]
    LensOutOfRange { base: usize, end: usize, size: usize },
    /// Two children of a composite lens cover the same ordinal
    #[error("composite lens children overlap at ordinal {0}")]
    OverlappingChildren(usize),
    /// Grid shape does not match its rows
    #[error("invalid grid shape {width}x{height}")]
    InvalidGrid { width: usize, height: usize },
    /// Lens handle not part of this tree
    #[error("unknown lens handle {0}")]
    UnknownLens(u32),
    /// View handle not part of this inventory
    #[error("unknown view handle {0}")]
    UnknownView(u32),
    /// Child index outside the view's children
    #[error("no child at index {index} (view has {count})")]
    ChildOutOfBounds { index: usize, count: usize },
    /// Fabric failure surfaced outside a transaction
    #[error(transparent)]
    Fabric(#[from] FabricError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, InventoryError>;
