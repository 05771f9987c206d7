//! Application state shared across handlers.

use std::sync::Arc;

use assistant_core::Troubleshooter;
use bookings::BookingStore;
use issue_cms::{ContentProvider, VoteLedger};

use crate::error::{AdminError, Result};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Booking repository.
    pub store: BookingStore,
    /// Assistant with scripted fallback.
    pub troubleshooter: Troubleshooter,
    /// Blog content, when configured.
    pub blog: Option<Arc<dyn ContentProvider>>,
    /// Reader votes, kept in the same slot storage as bookings.
    pub votes: VoteLedger,
}

impl AppState {
    /// Create new application state without a blog.
    pub fn new(store: BookingStore, troubleshooter: Troubleshooter) -> Self {
        let votes = VoteLedger::new(store.slots());
        Self {
            store,
            troubleshooter,
            blog: None,
            votes,
        }
    }

    /// Serve blog posts from `provider`.
    pub fn with_blog(mut self, provider: Arc<dyn ContentProvider>) -> Self {
        self.blog = Some(provider);
        self
    }

    /// The blog provider, or [`AdminError::BlogDisabled`].
    pub fn blog(&self) -> Result<&Arc<dyn ContentProvider>> {
        self.blog.as_ref().ok_or(AdminError::BlogDisabled)
    }
}
