//! In-memory slot storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::SlotStorage;
use crate::error::Result;

/// Slot storage held in process memory. Useful for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemorySlots {
    slots: RwLock<HashMap<String, String>>,
}

impl MemorySlots {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with one slot.
    pub fn with_slot(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut slots = HashMap::new();
        slots.insert(key.into(), value.into());
        Self {
            slots: RwLock::new(slots),
        }
    }
}

#[async_trait]
impl SlotStorage for MemorySlots {
    async fn read(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.read().await.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        self.slots
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn clear(&self, key: &str) -> Result<()> {
        self.slots.write().await.remove(key);
        Ok(())
    }
}
