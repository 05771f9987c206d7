//! Key-value slot storage.
//!
//! Each slot holds one JSON document. The booking collection, its export
//! mirror and the blog vote ledger each live in their own slot.

mod memory;
mod sqlite;

pub use memory::MemorySlots;
pub use sqlite::SqliteSlots;

use async_trait::async_trait;

use crate::error::Result;

/// Slot holding the JSON booking array.
pub const BOOKINGS_KEY: &str = "repair_bookings";

/// Slot holding the `{lastUpdated, bookings}` mirror envelope.
pub const EXPORT_MIRROR_KEY: &str = "repair_bookings_export";

/// Slot holding per-post blog votes.
pub const BLOG_VOTES_KEY: &str = "blog_votes";

/// A store of named text slots.
///
/// Implementations only need single-operation atomicity; callers that
/// read-modify-write a slot coordinate among themselves.
#[async_trait]
pub trait SlotStorage: Send + Sync {
    /// Read a slot, returning `None` if it has never been written.
    async fn read(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite a slot.
    async fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove a slot. Clearing a missing slot is not an error.
    async fn clear(&self, key: &str) -> Result<()>;
}
