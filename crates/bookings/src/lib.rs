//! Booking persistence for the repair desk.
//!
//! Bookings are stored as a single JSON array inside a named slot. The slot
//! backend is pluggable ([`SlotStorage`]): SQLite for the server, in-memory
//! for tests. [`BookingStore`] is the only component that reads and writes
//! the collection.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use bookings::{BookingStore, NewBooking, SqliteSlots};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let slots = SqliteSlots::connect("sqlite:repairdesk.db?mode=rwc").await?;
//!     slots.migrate().await?;
//!
//!     let store = BookingStore::new(Arc::new(slots));
//!     let booking = store
//!         .save(NewBooking {
//!             customer_name: "Dana".to_string(),
//!             email: "dana@example.com".to_string(),
//!             ..Default::default()
//!         })
//!         .await?;
//!
//!     println!("tracking id: {}", booking.tracking_id);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod models;
pub mod slots;
pub mod status;
pub mod store;
pub mod tracking;
pub mod validation;

pub use error::{Result, StoreError};
pub use models::{
    Booking, BookingEnvelope, BookingStatus, DiagnosticImage, NewBooking, StatusUpdate,
    UnknownStatus, UploadedAt,
};
pub use slots::{MemorySlots, SlotStorage, SqliteSlots};
pub use store::{BookingStore, IMAGE_RETENTION_DAYS};
pub use validation::ValidationError;
