//! Inventory configuration

use serde::{Deserialize, Serialize};

/// Title translation key used when no other title is available
pub const DEFAULT_TITLE: &str = "inventory.default.title";

/// Inventory view configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    /// Title reported when neither a custom table nor a storage name provides one
    pub default_title: String,

    /// Stack limit for storages created from this configuration
    pub default_max_stack_size: u32,

    /// Log every transaction result at debug level
    pub log_transactions: bool,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_title: DEFAULT_TITLE.to_string(),
            default_max_stack_size: 64,
            log_transactions: false,
        }
    }
}

impl InventoryConfig {
    /// Configuration that logs every transaction
    pub fn verbose() -> Self {
        Self {
            log_transactions: true,
            ..Default::default()
        }
    }

    /// Set the default title
    pub fn with_default_title(mut self, title: impl Into<String>) -> Self {
        self.default_title = title.into();
        self
    }

    /// Set the default stack limit
    pub fn with_max_stack_size(mut self, max: u32) -> Self {
        self.default_max_stack_size = max.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InventoryConfig::default();
        assert_eq!(config.default_title, "inventory.default.title");
        assert_eq!(config.default_max_stack_size, 64);
        assert!(!config.log_transactions);
        assert!(InventoryConfig::verbose().log_transactions);
    }

    #[test]
    fn test_partial_deserialize() {
        let config: InventoryConfig = serde_json::from_str(r#"{ "default_max_stack_size": 16 }"#).unwrap();
        assert_eq!(config.default_max_stack_size, 16);
        assert_eq!(config.default_title, DEFAULT_TITLE);
    }
}
