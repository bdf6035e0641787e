#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Daily-attempt quota bookkeeping over an abstract key-value store.
//!
//! The ledger tracks, per puzzle and player, how many scoring attempts were
//! used and the best score achieved, with records expiring after thirty
//! days. Store failures must never block gameplay: reads retry once and
//! then assume a fresh record, and writes are best-effort. Gameplay itself
//! never waits on this system.

use std::collections::HashMap;
use std::time::{Duration, Instant};
use std::{error::Error, fmt};

use serde::{Deserialize, Serialize};

/// Maximum number of scoring attempts a player may record per puzzle.
pub const MAX_DAILY_ATTEMPTS: u32 = 3;

/// Lifetime of a stored attempt record.
pub const RECORD_EXPIRY: Duration = Duration::from_secs(30 * 24 * 60 * 60);

const STORAGE_PREFIX: &str = "daily";

/// Identifies one player's attempt record for one puzzle.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttemptKey {
    puzzle_id: String,
    user_id: String,
}

impl AttemptKey {
    /// Creates a key from a puzzle identifier and a user identifier.
    #[must_use]
    pub fn new(puzzle_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            puzzle_id: puzzle_id.into(),
            user_id: user_id.into(),
        }
    }

    /// Puzzle identifier component of the key.
    #[must_use]
    pub fn puzzle_id(&self) -> &str {
        &self.puzzle_id
    }

    /// User identifier component of the key.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Flat storage key understood by [`QuotaStore`] implementations.
    #[must_use]
    pub fn storage_key(&self) -> String {
        format!("{STORAGE_PREFIX}:{}:{}", self.puzzle_id, self.user_id)
    }
}

/// Per-player, per-puzzle quota state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptRecord {
    /// Attempts recorded so far, never above [`MAX_DAILY_ATTEMPTS`].
    pub attempts_used: u32,
    /// Best score recorded across all attempts.
    pub max_score: u32,
}

impl AttemptRecord {
    /// Reports whether the player has spent every allowed attempt.
    #[must_use]
    pub const fn exhausted(&self) -> bool {
        self.attempts_used >= MAX_DAILY_ATTEMPTS
    }

    /// Folds one finished game into the record.
    ///
    /// The attempt count increments up to the cap; the best score updates
    /// regardless, so a capped player keeps credit for later high scores.
    #[must_use]
    pub fn absorb(self, score: u32) -> Self {
        Self {
            attempts_used: (self.attempts_used + 1).min(MAX_DAILY_ATTEMPTS),
            max_score: self.max_score.max(score),
        }
    }
}

/// Failure reported by a quota store operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StoreError {
    /// The backing store could not be reached or answered with an error.
    Unavailable(String),
    /// The stored payload could not be decoded as an attempt record.
    Corrupt(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unavailable(detail) => write!(formatter, "quota store unavailable: {detail}"),
            Self::Corrupt(detail) => write!(formatter, "quota record corrupt: {detail}"),
        }
    }
}

impl Error for StoreError {}

/// Key-value store abstraction the ledger runs against.
///
/// Implementations hold opaque string payloads under flat keys and drop
/// entries once their expiry elapses. A network-backed store slots in here
/// without touching the ledger logic.
pub trait QuotaStore {
    /// Fetches the payload stored under the key, if present and unexpired.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Stores the payload under the key. A fresh write carries no expiry
    /// until [`QuotaStore::expire`] arms one.
    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError>;

    /// Arms or refreshes the expiry on an existing key.
    fn expire(&mut self, key: &str, expiry: Duration) -> Result<(), StoreError>;
}

/// In-process store used by local adapters and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: HashMap<String, (String, Option<Instant>)>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl QuotaStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self.entries.get(key) {
            Some((_, Some(deadline))) if Instant::now() >= *deadline => Ok(None),
            Some((value, _)) => Ok(Some(value.clone())),
            None => Ok(None),
        }
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), StoreError> {
        let _ = self.entries.insert(key.to_owned(), (value, None));
        Ok(())
    }

    fn expire(&mut self, key: &str, expiry: Duration) -> Result<(), StoreError> {
        if let Some((_, deadline)) = self.entries.get_mut(key) {
            *deadline = Some(Instant::now() + expiry);
        }
        Ok(())
    }
}

/// Fetches the player's current quota state, never failing.
///
/// A failed or corrupt read is retried once; a second failure falls back to
/// the zero record so the player is never unfairly blocked.
pub fn fetch_status<S: QuotaStore>(store: &S, key: &AttemptKey) -> AttemptRecord {
    match read_record(store, key) {
        Ok(record) => record,
        Err(_) => read_record(store, key).unwrap_or_default(),
    }
}

/// Folds a finished game's score into the stored record, best-effort.
///
/// On success the updated record is returned. A store failure leaves the
/// quota state unchanged; callers fire and forget.
pub fn record_attempt<S: QuotaStore>(
    store: &mut S,
    key: &AttemptKey,
    score: u32,
) -> Result<AttemptRecord, StoreError> {
    let current = read_record(store, key).unwrap_or_default();
    let updated = current.absorb(score);
    let payload =
        serde_json::to_string(&updated).expect("attempt record serialization never fails");
    let storage_key = key.storage_key();
    store.set(&storage_key, payload)?;
    store.expire(&storage_key, RECORD_EXPIRY)?;
    Ok(updated)
}

fn read_record<S: QuotaStore>(store: &S, key: &AttemptKey) -> Result<AttemptRecord, StoreError> {
    match store.get(&key.storage_key())? {
        Some(payload) => serde_json::from_str(&payload)
            .map_err(|error| StoreError::Corrupt(error.to_string())),
        None => Ok(AttemptRecord::default()),
    }
}
