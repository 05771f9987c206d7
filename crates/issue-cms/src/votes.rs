//! Per-post reader vote state.

use std::collections::BTreeMap;
use std::sync::Arc;

use bookings::slots::{SlotStorage, BLOG_VOTES_KEY};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::Result;
use crate::models::Reaction;
use crate::provider::ContentProvider;

/// Vote state for every post, keyed by post id.
pub type Votes = BTreeMap<String, Reaction>;

/// Remembers which way the reader voted on each post.
///
/// The state is one JSON object `{"<postId>": "like" | "dislike"}` kept in
/// the `blog_votes` slot.
#[derive(Clone)]
pub struct VoteLedger {
    slots: Arc<dyn SlotStorage>,
    lock: Arc<Mutex<()>>,
}

impl VoteLedger {
    pub fn new(slots: Arc<dyn SlotStorage>) -> Self {
        Self {
            slots,
            lock: Arc::new(Mutex::new(())),
        }
    }

    async fn load(&self) -> Result<Votes> {
        let Some(raw) = self.slots.read(BLOG_VOTES_KEY).await? else {
            return Ok(Votes::new());
        };
        match serde_json::from_str(&raw) {
            Ok(votes) => Ok(votes),
            Err(e) => {
                warn!("Vote ledger is corrupted, clearing it: {}", e);
                self.slots.clear(BLOG_VOTES_KEY).await?;
                Ok(Votes::new())
            }
        }
    }

    /// All recorded votes.
    pub async fn all(&self) -> Result<Votes> {
        self.load().await
    }

    /// The vote recorded for a post.
    pub async fn get(&self, post_id: u64) -> Result<Option<Reaction>> {
        Ok(self.load().await?.get(&post_id.to_string()).copied())
    }

    /// Apply a vote and return the post's new state.
    ///
    /// Voting the same way twice clears the vote; voting the other way
    /// replaces it.
    pub async fn toggle(&self, post_id: u64, reaction: Reaction) -> Result<Option<Reaction>> {
        let _guard = self.lock.lock().await;
        let mut votes = self.load().await?;
        let state = next_state(&votes, post_id, reaction);
        self.commit(&mut votes, post_id, state).await
    }

    /// Toggle a vote and forward a newly set vote to `provider`.
    ///
    /// The provider call happens under the ledger lock and before the
    /// ledger is written, so a rejected reaction leaves no local vote and
    /// concurrent identical votes reach the provider once.
    pub async fn cast(
        &self,
        post_id: u64,
        reaction: Reaction,
        provider: &dyn ContentProvider,
    ) -> Result<Option<Reaction>> {
        let _guard = self.lock.lock().await;
        let mut votes = self.load().await?;
        let state = next_state(&votes, post_id, reaction);
        if state.is_some() {
            provider.add_reaction(post_id, reaction).await?;
        }
        self.commit(&mut votes, post_id, state).await
    }

    async fn commit(
        &self,
        votes: &mut Votes,
        post_id: u64,
        state: Option<Reaction>,
    ) -> Result<Option<Reaction>> {
        let key = post_id.to_string();
        match state {
            Some(reaction) => votes.insert(key, reaction),
            None => votes.remove(&key),
        };

        self.slots
            .write(BLOG_VOTES_KEY, &serde_json::to_string(votes)?)
            .await?;
        info!("Vote on post {} is now {:?}", post_id, state);
        Ok(state)
    }
}

fn next_state(votes: &Votes, post_id: u64, reaction: Reaction) -> Option<Reaction> {
    if votes.get(&post_id.to_string()) == Some(&reaction) {
        None
    } else {
        Some(reaction)
    }
}
