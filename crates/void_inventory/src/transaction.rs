//! Transaction results of mutating inventory operations

use crate::item::ItemStack;

/// Outcome of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionType {
    /// The operation ran; rejected stacks may still be reported
    Success,
    /// Nothing was accepted
    Failure,
    /// The storage failed mid-operation
    Error,
}

/// Result of an insert/append operation
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryTransactionResult {
    kind: TransactionType,
    /// Prior contents of the slots that were written
    replaced: Vec<ItemStack>,
    /// Stacks that could not be placed
    rejected: Vec<ItemStack>,
}

impl InventoryTransactionResult {
    /// Start building a result
    pub fn builder() -> TransactionResultBuilder {
        TransactionResultBuilder::default()
    }

    /// Failure rejecting the whole stack
    pub fn failure(stack: &ItemStack) -> Self {
        Self::builder().kind(TransactionType::Failure).reject(stack.clone()).build()
    }

    /// Error rejecting the whole stack
    pub fn error(stack: &ItemStack) -> Self {
        Self::builder().kind(TransactionType::Error).reject(stack.clone()).build()
    }

    /// Outcome
    pub fn kind(&self) -> TransactionType {
        self.kind
    }

    /// Check for a success outcome
    pub fn is_success(&self) -> bool {
        self.kind == TransactionType::Success
    }

    /// Prior slot contents
    pub fn replaced(&self) -> &[ItemStack] {
        &self.replaced
    }

    /// Stacks that could not be placed
    pub fn rejected(&self) -> &[ItemStack] {
        &self.rejected
    }
}

/// Builder for [`InventoryTransactionResult`]
#[derive(Debug, Clone)]
pub struct TransactionResultBuilder {
    kind: TransactionType,
    replaced: Vec<ItemStack>,
    rejected: Vec<ItemStack>,
}

impl Default for TransactionResultBuilder {
    fn default() -> Self {
        Self {
            kind: TransactionType::Success,
            replaced: Vec::new(),
            rejected: Vec::new(),
        }
    }
}

impl TransactionResultBuilder {
    /// Set the outcome
    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = kind;
        self
    }

    /// Record a replaced stack
    pub fn replace(mut self, stack: ItemStack) -> Self {
        self.replaced.push(stack);
        self
    }

    /// Record a rejected stack
    pub fn reject(mut self, stack: ItemStack) -> Self {
        self.rejected.push(stack);
        self
    }

    /// Finish; a failed transaction never reports replaced stacks
    pub fn build(mut self) -> InventoryTransactionResult {
        if self.kind == TransactionType::Failure {
            self.replaced.clear();
        }
        InventoryTransactionResult {
            kind: self.kind,
            replaced: self.replaced,
            rejected: self.rejected,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::ItemType;

    #[test]
    fn test_failure_drops_replaced() {
        let stone = ItemStack::new(ItemType::new("stone"), 3);
        let result = InventoryTransactionResult::builder()
            .replace(ItemStack::empty())
            .reject(stone.clone())
            .kind(TransactionType::Failure)
            .build();

        assert_eq!(result.kind(), TransactionType::Failure);
        assert!(result.replaced().is_empty());
        assert_eq!(result.rejected(), &[stone]);
    }

    #[test]
    fn test_default_is_success() {
        let result = InventoryTransactionResult::builder().replace(ItemStack::empty()).build();
        assert!(result.is_success());
        assert_eq!(result.replaced().len(), 1);
        assert!(result.rejected().is_empty());
    }
}
