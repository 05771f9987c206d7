//! Booking repository over a slot.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::error::{Result, StoreError};
use crate::models::{
    Booking, BookingEnvelope, BookingStatus, DiagnosticImage, NewBooking, StatusUpdate,
    UploadedAt,
};
use crate::slots::{SlotStorage, BOOKINGS_KEY, EXPORT_MIRROR_KEY};
use crate::status::check_transition;
use crate::tracking::generate_unique;

/// Diagnostic images older than this are pruned by [`BookingStore::cleanup_old_images`].
pub const IMAGE_RETENTION_DAYS: i64 = 5;

/// Import payload: either an export envelope or a bare booking array.
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Envelope(BookingEnvelope),
    Bookings(Vec<Booking>),
}

impl ImportPayload {
    fn into_bookings(self) -> Vec<Booking> {
        match self {
            ImportPayload::Envelope(envelope) => envelope.bookings,
            ImportPayload::Bookings(bookings) => bookings,
        }
    }
}

/// Repository for booking records.
///
/// The whole collection is stored as one JSON array in a single slot.
/// Every read-modify-write holds `write_lock`, so concurrent callers in this
/// process never lose each other's updates.
#[derive(Clone)]
pub struct BookingStore {
    slots: Arc<dyn SlotStorage>,
    write_lock: Arc<Mutex<()>>,
}

impl BookingStore {
    /// Create a store over the given slot storage.
    pub fn new(slots: Arc<dyn SlotStorage>) -> Self {
        Self {
            slots,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// The underlying slot storage.
    pub fn slots(&self) -> Arc<dyn SlotStorage> {
        Arc::clone(&self.slots)
    }

    /// Save a new booking submitted by the booking form.
    ///
    /// The status is forced to `received` and both timestamps are set to now.
    pub async fn save(&self, new: NewBooking) -> Result<Booking> {
        let _guard = self.write_lock.lock().await;
        let mut bookings = self.load().await?;
        let now = Utc::now();

        let tracking_id = match new.tracking_id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => {
                if position_of(&bookings, id).is_some() {
                    return Err(StoreError::AlreadyExists {
                        entity: "Booking",
                        id: id.to_string(),
                    });
                }
                id.to_string()
            }
            _ => generate_unique(now, |candidate| position_of(&bookings, candidate).is_some()),
        };

        let notes = new.default_notes();
        let booking = Booking {
            tracking_id,
            customer_name: new.customer_name,
            email: new.email,
            phone: new.phone,
            address: new.address.filter(|a| !a.trim().is_empty()),
            device_type: new.device_type,
            device_model: new.device_model,
            service_type: new.service_type,
            issue_description: new.issue_description,
            preferred_date: new.preferred_date,
            preferred_time: new.preferred_time,
            status: BookingStatus::Received,
            created_at: now,
            updated_at: now,
            cost: None,
            estimated_completion: None,
            notes: Some(notes),
            diagnostic_images: None,
            diagnostic_notes: None,
        };

        bookings.push(booking.clone());
        self.persist(&bookings).await?;

        info!(tracking_id = %booking.tracking_id, "Booking saved");
        Ok(booking)
    }

    /// Read every booking.
    ///
    /// A slot that cannot be parsed is logged and cleared, and an empty
    /// collection is returned.
    pub async fn get_all(&self) -> Result<Vec<Booking>> {
        self.load().await
    }

    /// Number of stored bookings.
    pub async fn count(&self) -> Result<usize> {
        Ok(self.load().await?.len())
    }

    /// Look up a booking by tracking id: exact match first, then
    /// case-insensitive.
    pub async fn get_by_tracking_id(&self, id: &str) -> Result<Option<Booking>> {
        let mut bookings = self.load().await?;
        Ok(position_of(&bookings, id.trim()).map(|idx| bookings.swap_remove(idx)))
    }

    /// Apply a status update. Returns `Ok(false)` if no booking matches.
    pub async fn update_status(&self, id: &str, update: StatusUpdate) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut bookings = self.load().await?;

        let Some(idx) = position_of(&bookings, id.trim()) else {
            debug!(tracking_id = %id, "Status update for unknown booking");
            return Ok(false);
        };

        let booking = &mut bookings[idx];
        if let Some(status) = update.status {
            check_transition(booking.status, status)?;
            booking.status = status;
        }
        if let Some(notes) = update.notes {
            booking.notes = Some(notes);
        }
        if let Some(estimated) = update.estimated_completion {
            booking.estimated_completion = Some(estimated);
        }
        if let Some(cost) = update.cost {
            booking.cost = Some(cost);
        }
        touch(booking, Utc::now());

        info!(tracking_id = %booking.tracking_id, status = %booking.status, "Booking status updated");
        self.persist(&bookings).await?;
        Ok(true)
    }

    /// Replace diagnostic notes and/or images. Images are stamped with the
    /// current time. Returns `Ok(false)` if no booking matches.
    pub async fn update_diagnostics(
        &self,
        id: &str,
        notes: Option<String>,
        images: Option<Vec<String>>,
    ) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let mut bookings = self.load().await?;

        let Some(idx) = position_of(&bookings, id.trim()) else {
            return Ok(false);
        };

        let now = Utc::now();
        let booking = &mut bookings[idx];
        if let Some(notes) = notes {
            booking.diagnostic_notes = Some(notes);
        }
        if let Some(images) = images {
            booking.diagnostic_images = Some(
                images
                    .into_iter()
                    .map(|data| DiagnosticImage {
                        data,
                        uploaded_at: UploadedAt::at(now),
                    })
                    .collect(),
            );
        }
        touch(booking, now);

        info!(tracking_id = %booking.tracking_id, "Booking diagnostics updated");
        self.persist(&bookings).await?;
        Ok(true)
    }

    /// Drop diagnostic images older than [`IMAGE_RETENTION_DAYS`].
    ///
    /// Returns the number of images removed.
    pub async fn cleanup_old_images(&self) -> Result<usize> {
        self.cleanup_old_images_at(Utc::now()).await
    }

    /// [`cleanup_old_images`](Self::cleanup_old_images) relative to `now`.
    pub async fn cleanup_old_images_at(&self, now: DateTime<Utc>) -> Result<usize> {
        let _guard = self.write_lock.lock().await;
        let mut bookings = self.load().await?;
        let cutoff = (now - Duration::days(IMAGE_RETENTION_DAYS)).timestamp_millis();

        let mut removed = 0;
        for booking in &mut bookings {
            if let Some(images) = booking.diagnostic_images.as_mut() {
                let before = images.len();
                images.retain(|image| match image.uploaded_at {
                    UploadedAt::Millis(millis) => millis >= cutoff,
                    UploadedAt::Legacy(_) => true,
                });
                removed += before - images.len();
            }
        }

        if removed > 0 {
            self.persist(&bookings).await?;
            info!(removed, "Pruned expired diagnostic images");
        }

        Ok(removed)
    }

    /// Serialize the whole collection as a `{lastUpdated, bookings}` envelope.
    pub async fn export_data(&self) -> Result<String> {
        let envelope = BookingEnvelope {
            last_updated: Utc::now(),
            bookings: self.load().await?,
        };
        Ok(serde_json::to_string_pretty(&envelope)?)
    }

    /// Merge bookings from an export (envelope or bare array).
    ///
    /// Bookings whose tracking id is already present are skipped, so the
    /// first copy of a record wins. Returns the number of bookings added.
    pub async fn import_data(&self, json: &str) -> Result<usize> {
        let incoming = serde_json::from_str::<ImportPayload>(json)?.into_bookings();

        let _guard = self.write_lock.lock().await;
        let mut bookings = self.load().await?;

        let mut added = 0;
        for booking in incoming {
            if position_of(&bookings, &booking.tracking_id).is_some() {
                debug!(tracking_id = %booking.tracking_id, "Skipping duplicate on import");
                continue;
            }
            bookings.push(booking);
            added += 1;
        }

        if added > 0 {
            self.persist(&bookings).await?;
        }
        info!(added, "Imported bookings");
        Ok(added)
    }

    /// Overwrite the whole collection.
    pub async fn replace_all(&self, bookings: Vec<Booking>) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.persist(&bookings).await?;
        info!(count = bookings.len(), "Booking collection replaced");
        Ok(())
    }

    async fn load(&self) -> Result<Vec<Booking>> {
        let Some(raw) = self.slots.read(BOOKINGS_KEY).await? else {
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Booking>>(&raw) {
            Ok(bookings) => Ok(bookings),
            Err(e) => {
                warn!("Corrupted booking slot, clearing it: {}", e);
                self.slots.clear(BOOKINGS_KEY).await?;
                Ok(Vec::new())
            }
        }
    }

    async fn persist(&self, bookings: &[Booking]) -> Result<()> {
        let json = serde_json::to_string(bookings)?;
        self.slots.write(BOOKINGS_KEY, &json).await?;

        let mirror = serde_json::json!({
            "lastUpdated": Utc::now(),
            "bookings": bookings,
        });
        self.slots
            .write(EXPORT_MIRROR_KEY, &mirror.to_string())
            .await?;
        Ok(())
    }
}

/// Index of the booking with `id`: exact match first, then case-insensitive.
fn position_of(bookings: &[Booking], id: &str) -> Option<usize> {
    bookings
        .iter()
        .position(|b| b.tracking_id == id)
        .or_else(|| {
            bookings
                .iter()
                .position(|b| b.tracking_id.eq_ignore_ascii_case(id))
        })
}

fn touch(booking: &mut Booking, now: DateTime<Utc>) {
    booking.updated_at = now.max(booking.created_at);
}
