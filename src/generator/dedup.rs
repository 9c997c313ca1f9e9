//! Dedup digests and the shared seen-set.

use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// SHA-256 of `"<game>:<lowercased nickname>"`.
///
/// Two nicknames that differ only by letter case collide for the same game.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DedupKey([u8; 32]);

impl DedupKey {
    pub const LEN: usize = 32;

    pub fn new(game_id: &str, nickname: &str) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(game_id.as_bytes());
        hasher.update(b":");
        hasher.update(nickname.to_lowercase().as_bytes());
        Self(hasher.finalize().into())
    }

    pub fn as_bytes(&self) -> &[u8; Self::LEN] {
        &self.0
    }

    /// Rebuild a key from stored bytes; `None` unless exactly 32 bytes.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let arr: [u8; Self::LEN] = bytes.try_into().ok()?;
        Some(Self(arr))
    }
}

impl fmt::Display for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for b in self.0 {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl fmt::Debug for DedupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DedupKey({})", self)
    }
}

/// Keys of every nickname accepted so far.
///
/// Shared by handle between generators; [`SeenSet::insert`] is the single
/// check-and-record step, so two concurrent callers can never both accept
/// the same key.
#[derive(Debug, Default)]
pub struct SeenSet {
    keys: Mutex<HashSet<DedupKey>>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Start from previously persisted keys.
    pub fn with_keys<I: IntoIterator<Item = DedupKey>>(keys: I) -> Self {
        Self {
            keys: Mutex::new(keys.into_iter().collect()),
        }
    }

    // The set is never left half-updated, so a poisoned lock is still usable.
    fn guard(&self) -> MutexGuard<'_, HashSet<DedupKey>> {
        self.keys.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record `key`; returns `false` if it was already present.
    pub fn insert(&self, key: DedupKey) -> bool {
        self.guard().insert(key)
    }

    /// Forget `key` so it can be handed out again; returns `false` if it was absent.
    pub fn release(&self, key: &DedupKey) -> bool {
        self.guard().remove(key)
    }

    pub fn contains(&self, key: &DedupKey) -> bool {
        self.guard().contains(key)
    }

    pub fn len(&self) -> usize {
        self.guard().len()
    }

    pub fn is_empty(&self) -> bool {
        self.guard().is_empty()
    }
}
