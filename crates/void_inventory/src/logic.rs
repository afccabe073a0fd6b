//! Stateless inventory algorithms
//!
//! Every function walks the flattened slots of one lens in logical order and
//! dereferences them through the fabric. Slot order is the only tie-break:
//! the first matching slot wins, fills happen front to back.
//!
//! Multi-slot operations are best effort. Writes already applied stay in
//! the fabric when a later write fails; only the returned result reflects
//! the failure.

use crate::error::FabricError;
use crate::fabric::Fabric;
use crate::item::{ItemStack, ItemType};
use crate::lens::{Lens, LensId, LensTree};
use crate::property::{InventoryProperty, PropertyKind};
use crate::transaction::InventoryTransactionResult;

/// Remove and return the first non-empty stack
///
/// A slot whose clear is refused is skipped.
pub fn poll_sequential(fabric: &mut dyn Fabric, lenses: &LensTree, lens: LensId) -> Option<ItemStack> {
    let lens = lenses.get(lens)?;
    for index in 0..lens.slot_count() {
        let stack = lens.get_stack(fabric, index);
        if stack.is_empty() {
            continue;
        }
        match lens.set_stack(fabric, index, ItemStack::empty()) {
            Ok(true) => return Some(stack),
            Ok(false) => log::trace!("Slot {} refused to clear, skipping", index),
            Err(e) => log::warn!("Failed to clear slot {} while polling: {}", index, e),
        }
    }
    None
}

/// Return a copy of the first non-empty stack
pub fn peek_sequential(fabric: &dyn Fabric, lenses: &LensTree, lens: LensId) -> Option<ItemStack> {
    let lens = lenses.get(lens)?;
    (0..lens.slot_count())
        .map(|index| lens.get_stack(fabric, index))
        .find(|stack| !stack.is_empty())
}

/// Remove up to `limit` items of the first item found
///
/// The first non-empty slot fixes the item; later slots holding anything
/// else are skipped. Fully drained slots are cleared, others reduced.
pub fn poll_sequential_limit(
    fabric: &mut dyn Fabric,
    lenses: &LensTree,
    lens: LensId,
    limit: u32,
) -> Option<ItemStack> {
    let lens = lenses.get(lens)?;
    let mut result: Option<ItemStack> = None;
    let mut remaining = limit;

    for index in 0..lens.slot_count() {
        if remaining == 0 {
            break;
        }
        let stack = lens.get_stack(fabric, index);
        if !matches_accumulator(&result, &stack) {
            continue;
        }

        let pull = stack.quantity.min(remaining);
        let left = if pull >= stack.quantity {
            ItemStack::empty()
        } else {
            stack.with_quantity(stack.quantity - pull)
        };
        match lens.set_stack(fabric, index, left) {
            Ok(true) => {}
            Ok(false) => {
                log::trace!("Slot {} refused to shrink, skipping", index);
                continue;
            }
            Err(e) => {
                log::warn!("Failed to shrink slot {} while polling: {}", index, e);
                continue;
            }
        }

        result.get_or_insert_with(|| stack.with_quantity(0)).quantity += pull;
        remaining -= pull;
    }

    result
}

/// Count up to `limit` items of the first item found, without removing them
pub fn peek_sequential_limit(
    fabric: &dyn Fabric,
    lenses: &LensTree,
    lens: LensId,
    limit: u32,
) -> Option<ItemStack> {
    let lens = lenses.get(lens)?;
    let mut result: Option<ItemStack> = None;
    let mut remaining = limit;

    for index in 0..lens.slot_count() {
        if remaining == 0 {
            break;
        }
        let stack = lens.get_stack(fabric, index);
        if !matches_accumulator(&result, &stack) {
            continue;
        }
        let pull = stack.quantity.min(remaining);
        result.get_or_insert_with(|| stack.with_quantity(0)).quantity += pull;
        remaining -= pull;
    }

    result
}

fn matches_accumulator(result: &Option<ItemStack>, stack: &ItemStack) -> bool {
    if stack.is_empty() {
        return false;
    }
    match result {
        Some(acc) => acc.is_similar(stack),
        None => true,
    }
}

/// Write the stack into consecutive slots, overwriting whatever they hold
///
/// Each slot receives up to the effective stack limit. Prior contents of
/// written slots are reported as replaced, leftovers as rejected. A storage
/// error turns the result into [`TransactionType::Error`] rejecting the whole
/// input; slots written before the error keep their new contents.
///
/// [`TransactionType::Error`]: crate::transaction::TransactionType::Error
pub fn insert_sequential(
    fabric: &mut dyn Fabric,
    lenses: &LensTree,
    lens: LensId,
    stack: &ItemStack,
) -> InventoryTransactionResult {
    let Some(lens) = lenses.get(lens) else {
        return InventoryTransactionResult::failure(stack);
    };
    match insert_stack(fabric, lens, stack) {
        Ok(result) => result,
        Err(e) => {
            log::warn!("Storage error during insert of {:?}: {}", stack.item_type.id, e);
            InventoryTransactionResult::error(stack)
        }
    }
}

fn insert_stack(
    fabric: &mut dyn Fabric,
    lens: &Lens,
    stack: &ItemStack,
) -> Result<InventoryTransactionResult, FabricError> {
    let mut result = InventoryTransactionResult::builder();
    let max_stack_size = lens.max_stack_size(fabric).min(stack.max_stack_size());
    let mut remaining = stack.quantity;

    for index in 0..lens.slot_count() {
        if remaining == 0 || max_stack_size == 0 {
            break;
        }
        let old = lens.get_stack(fabric, index);
        let push = remaining.min(max_stack_size);
        if lens.set_stack(fabric, index, stack.with_quantity(push))? {
            log::trace!("Inserted {} into slot {}", push, index);
            result = result.replace(old);
            remaining -= push;
        }
    }

    if remaining > 0 {
        result = result.reject(stack.with_quantity(remaining));
    }

    Ok(result.build())
}

/// Merge the stack into matching stacks and empty slots
///
/// On success the caller's stack is left holding whatever did not fit. If
/// nothing fits the result is a failure and the stack is untouched.
pub fn append_sequential(
    fabric: &mut dyn Fabric,
    lenses: &LensTree,
    lens: LensId,
    stack: &mut ItemStack,
) -> InventoryTransactionResult {
    let Some(lens) = lenses.get(lens) else {
        return InventoryTransactionResult::failure(stack);
    };
    match append_stack(fabric, lens, stack) {
        Ok(remaining) if remaining == stack.quantity => InventoryTransactionResult::failure(stack),
        Ok(remaining) => {
            stack.quantity = remaining;
            InventoryTransactionResult::builder().build()
        }
        Err(e) => {
            log::warn!("Storage error during append of {:?}: {}", stack.item_type.id, e);
            InventoryTransactionResult::error(stack)
        }
    }
}

fn append_stack(fabric: &mut dyn Fabric, lens: &Lens, stack: &ItemStack) -> Result<u32, FabricError> {
    let max_stack_size = lens.max_stack_size(fabric).min(stack.max_stack_size());
    let mut remaining = stack.quantity;

    for index in 0..lens.slot_count() {
        if remaining == 0 {
            break;
        }
        let old = lens.get_stack(fabric, index);
        if old.is_empty() {
            let push = remaining.min(max_stack_size);
            if push > 0 && lens.set_stack(fabric, index, stack.with_quantity(push))? {
                remaining -= push;
            }
        } else if old.is_similar(stack) {
            // Oversized stacks have no room left
            let push = max_stack_size.saturating_sub(old.quantity).min(remaining);
            if push > 0 && lens.set_stack(fabric, index, old.with_quantity(old.quantity + push))? {
                remaining -= push;
            }
        }
    }

    Ok(remaining)
}

/// Number of non-empty slots
pub fn count_stacks(fabric: &dyn Fabric, lenses: &LensTree, lens: LensId) -> usize {
    let Some(lens) = lenses.get(lens) else {
        return 0;
    };
    (0..lens.slot_count())
        .filter(|&index| !lens.get_stack(fabric, index).is_empty())
        .count()
}

/// Total quantity over non-empty slots, saturating at `u32::MAX`
pub fn count_items(fabric: &dyn Fabric, lenses: &LensTree, lens: LensId) -> u32 {
    let Some(lens) = lenses.get(lens) else {
        return 0;
    };
    (0..lens.slot_count())
        .map(|index| lens.get_stack(fabric, index))
        .filter(|stack| !stack.is_empty())
        .fold(0u32, |total, stack| total.saturating_add(stack.quantity))
}

/// Number of slots in the view
pub fn capacity(lenses: &LensTree, lens: LensId) -> usize {
    lenses.get(lens).map(Lens::slot_count).unwrap_or(0)
}

/// Check for at least `quantity` items similar to `stack`
///
/// An empty probe counts empty slots instead, so `contains(empty, n)` asks
/// whether `n` slots are free. A `quantity` of 0 is always satisfied, even
/// when no slot matches or is free.
pub fn contains(fabric: &dyn Fabric, lenses: &LensTree, lens: LensId, stack: &ItemStack, quantity: u32) -> bool {
    if quantity == 0 {
        return true;
    }
    let Some(lens) = lenses.get(lens) else {
        return false;
    };

    let mut found: u32 = 0;
    for index in 0..lens.slot_count() {
        let slot = lens.get_stack(fabric, index);
        if slot.is_empty() {
            if stack.is_empty() {
                found += 1;
            }
        } else if slot.is_similar(stack) {
            found = found.saturating_add(slot.quantity);
        }
        if found >= quantity {
            return true;
        }
    }
    false
}

/// Check for any stack of the given type (any empty slot for the "no item" type)
pub fn contains_type(fabric: &dyn Fabric, lenses: &LensTree, lens: LensId, item_type: &ItemType) -> bool {
    let Some(lens) = lenses.get(lens) else {
        return false;
    };
    (0..lens.slot_count()).any(|index| {
        let slot = lens.get_stack(fabric, index);
        if slot.is_empty() {
            item_type.is_none()
        } else {
            slot.item_type.id == item_type.id
        }
    })
}

/// Properties of the given kind that `parent` attaches to `child`
///
/// Returns nothing when `child` is not a direct child of `parent`.
pub fn get_properties(lenses: &LensTree, parent: LensId, child: LensId, kind: PropertyKind) -> Vec<InventoryProperty> {
    let Some(parent) = lenses.get(parent) else {
        return Vec::new();
    };
    match parent.child_index(child) {
        Some(index) => parent
            .properties(index)
            .filter(|p| p.kind() == kind)
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}
