use std::collections::{HashMap, HashSet};
use tracing::{debug, error, warn};
use crate::error::StoreError;
use crate::storage::{KeyValueStorage, VOTES_STORAGE_KEY};
use crate::vote_logic::{RankedPage, Vote, VoteStore, HALL_OF_FAME_THRESHOLD};

/// Reads the persisted vote store, failing if it is unreadable or malformed.
pub fn try_load_votes<S: KeyValueStorage>(storage: &S) -> Result<VoteStore, StoreError> {
    match storage.get(VOTES_STORAGE_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(VoteStore::new()),
    }
}

/// Reads the persisted vote store. Missing or malformed data yields an empty store.
pub fn load_votes<S: KeyValueStorage>(storage: &S) -> VoteStore {
    try_load_votes(storage).unwrap_or_else(|e| {
        warn!("Discarding persisted votes: {}", e);
        VoteStore::new()
    })
}

pub fn try_save_votes<S: KeyValueStorage>(storage: &mut S, store: &VoteStore) -> Result<(), StoreError> {
    let raw = serde_json::to_string(store)?;
    storage.set(VOTES_STORAGE_KEY, &raw)?;
    Ok(())
}

/// Persists the whole vote store. Failures are logged and otherwise ignored.
pub fn save_votes<S: KeyValueStorage>(storage: &mut S, store: &VoteStore) {
    if let Err(e) = try_save_votes(storage, store) {
        error!("Failed to save votes: {}", e);
    }
}

/// Entry point for casting and querying votes.
///
/// Holds the in-memory store loaded from `storage` at construction. Every cast
/// rewrites the whole persisted blob; queries never touch storage. When a save
/// fails the in-memory store still carries the vote until [`VoteService::reload`].
///
/// Voter identity is not checked here: callers decide who may vote and pass the
/// voter id they trust.
#[derive(Debug)]
pub struct VoteService<S: KeyValueStorage> {
    storage: S,
    store: VoteStore,
}

impl<S: KeyValueStorage> VoteService<S> {
    pub fn open(storage: S) -> Self {
        let store = load_votes(&storage);
        Self { storage, store }
    }

    pub fn cast_vote(&mut self, page_id: &str, voter_id: &str, vote: Vote) {
        if let Some(previous) = self.store.record(page_id, voter_id, vote) {
            debug!(page_id, voter_id, ?previous, ?vote, "Replacing earlier vote");
        }
        save_votes(&mut self.storage, &self.store);
    }

    pub fn current_vote(&self, page_id: &str, voter_id: Option<&str>) -> Option<Vote> {
        self.store.vote_of(page_id, voter_id?)
    }

    pub fn score_of(&self, page_id: &str) -> i64 {
        self.store.score(page_id)
    }

    pub fn is_hall_of_fame(&self, page_id: &str) -> bool {
        self.store.is_hall_of_fame(page_id)
    }

    pub fn hall_of_fame_ids(&self) -> HashSet<String> {
        self.store.hall_of_fame_ids(HALL_OF_FAME_THRESHOLD)
    }

    pub fn hall_of_fame(&self, limit: usize) -> Vec<RankedPage> {
        self.store.hall_of_fame_ranking(HALL_OF_FAME_THRESHOLD, limit)
    }

    pub fn page_votes(&self, page_id: &str) -> HashMap<String, Vote> {
        self.store.page_votes(page_id).cloned().unwrap_or_default()
    }

    /// Replaces the in-memory store with what storage currently holds.
    pub fn reload(&mut self) {
        self.store = load_votes(&self.storage);
    }

    pub fn store(&self) -> &VoteStore { &self.store }

    pub fn storage(&self) -> &S { &self.storage }

    pub fn into_storage(self) -> S { self.storage }
}
