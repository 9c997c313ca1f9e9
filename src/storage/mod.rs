//! # Storage Module - Nickname History
//!
//! Sled-backed persistence for everything the bot remembers between restarts:
//! registered users, every nickname handed out, the dedup digests of those
//! nicknames, and which records a user marked as favorite.
//!
//! ## Layout
//!
//! ```text
//! <data_dir>/history/
//! ├── users        ← user_id (i64 BE)            → UserRecord
//! ├── nicks        ← user_id (i64 BE) ++ id (BE)  → NickRecord
//! └── nick_hashes  ← DedupKey (32 bytes)          → HashRecord
//! ```
//!
//! Keying nick records by owner first keeps per-user scans (stats, favorites,
//! history) to a single prefix range and makes "mark favorite" an ownership
//! check by construction: a user can only address their own records.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use nickforge::generator::DedupKey;
//! use nickforge::storage::NickStore;
//!
//! # fn main() -> Result<(), nickforge::storage::StorageError> {
//! let store = NickStore::open("./data/history")?;
//! store.add_user(42, Some("neo"), Some("Thomas"))?;
//! let key = DedupKey::new("Roblox", "NeonWraith");
//! let id = store.add_generated_nick(42, "Roblox", "NeonWraith", &key)?;
//! store.add_to_favorites(id, 42)?;
//! assert_eq!(store.favorites(42)?.len(), 1);
//! # Ok(())
//! # }
//! ```

pub mod errors;

pub use errors::StorageError;

use crate::generator::{DedupKey, RequesterId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sled::IVec;
use std::collections::HashSet;
use std::path::Path;

const TREE_USERS: &str = "users";
const TREE_NICKS: &str = "nicks";
const TREE_HASHES: &str = "nick_hashes";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    pub user_id: RequesterId,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub registered_at: DateTime<Utc>,
    pub total_generated: u64,
}

impl UserRecord {
    fn new(user_id: RequesterId, username: Option<&str>, first_name: Option<&str>) -> Self {
        Self {
            user_id,
            username: username.map(str::to_string),
            first_name: first_name.map(str::to_string),
            registered_at: Utc::now(),
            total_generated: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NickRecord {
    pub id: u64,
    pub user_id: RequesterId,
    pub game: String,
    pub nickname: String,
    pub generated_at: DateTime<Utc>,
    pub favorite: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HashRecord {
    pub game: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserStats {
    /// Nicknames ever generated for this user.
    pub total: u64,
    /// Distinct games those nicknames were generated for.
    pub games: u64,
}

/// Persistent history of users, generated nicknames and favorites.
pub struct NickStore {
    db: sled::Db,
    users: sled::Tree,
    nicks: sled::Tree,
    hashes: sled::Tree,
}

impl NickStore {
    /// Open (or create) the store rooted at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let path_ref = path.as_ref();
        std::fs::create_dir_all(path_ref)?;
        let db = sled::open(path_ref)?;
        let users = db.open_tree(TREE_USERS)?;
        let nicks = db.open_tree(TREE_NICKS)?;
        let hashes = db.open_tree(TREE_HASHES)?;
        Ok(Self {
            db,
            users,
            nicks,
            hashes,
        })
    }

    fn user_key(user_id: RequesterId) -> [u8; 8] {
        user_id.to_be_bytes()
    }

    fn nick_key(user_id: RequesterId, id: u64) -> [u8; 16] {
        let mut key = [0u8; 16];
        key[..8].copy_from_slice(&user_id.to_be_bytes());
        key[8..].copy_from_slice(&id.to_be_bytes());
        key
    }

    fn serialize<T: Serialize>(value: &T) -> Result<Vec<u8>, StorageError> {
        Ok(bincode::serialize(value)?)
    }

    fn deserialize<T: serde::de::DeserializeOwned>(bytes: IVec) -> Result<T, StorageError> {
        Ok(bincode::deserialize::<T>(&bytes)?)
    }

    /// Register a user; an existing record is left untouched.
    pub fn add_user(
        &self,
        user_id: RequesterId,
        username: Option<&str>,
        first_name: Option<&str>,
    ) -> Result<(), StorageError> {
        let key = Self::user_key(user_id);
        if self.users.contains_key(key)? {
            return Ok(());
        }
        let record = UserRecord::new(user_id, username, first_name);
        self.users.insert(key, Self::serialize(&record)?)?;
        self.users.flush()?;
        Ok(())
    }

    pub fn get_user(&self, user_id: RequesterId) -> Result<Option<UserRecord>, StorageError> {
        match self.users.get(Self::user_key(user_id))? {
            Some(bytes) => Ok(Some(Self::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Persist one accepted nickname and return its record id.
    ///
    /// The digest is recorded once per key; the user's running total is bumped
    /// (creating a bare user record if the user was never registered).
    pub fn add_generated_nick(
        &self,
        user_id: RequesterId,
        game: &str,
        nickname: &str,
        key: &DedupKey,
    ) -> Result<u64, StorageError> {
        if !self.hashes.contains_key(key.as_bytes())? {
            let hash = HashRecord {
                game: game.to_string(),
                created_at: Utc::now(),
            };
            self.hashes.insert(key.as_bytes(), Self::serialize(&hash)?)?;
        }

        let id = self.db.generate_id()?;
        let record = NickRecord {
            id,
            user_id,
            game: game.to_string(),
            nickname: nickname.to_string(),
            generated_at: Utc::now(),
            favorite: false,
        };
        self.nicks
            .insert(Self::nick_key(user_id, id), Self::serialize(&record)?)?;

        let mut user = self
            .get_user(user_id)?
            .unwrap_or_else(|| UserRecord::new(user_id, None, None));
        user.total_generated = user.total_generated.saturating_add(1);
        self.users
            .insert(Self::user_key(user_id), Self::serialize(&user)?)?;

        self.db.flush()?;
        Ok(id)
    }

    pub fn check_nick_exists(&self, key: &DedupKey) -> Result<bool, StorageError> {
        Ok(self.hashes.contains_key(key.as_bytes())?)
    }

    /// Every digest ever persisted, for warming a fresh seen-set.
    pub fn seen_keys(&self) -> Result<Vec<DedupKey>, StorageError> {
        let mut keys = Vec::new();
        for entry in self.hashes.iter() {
            let (key, _) = entry?;
            let parsed = DedupKey::from_slice(&key).ok_or(StorageError::CorruptKey {
                tree: TREE_HASHES,
                len: key.len(),
            })?;
            keys.push(parsed);
        }
        Ok(keys)
    }

    /// All of a user's records, newest first.
    pub fn user_nicks(&self, user_id: RequesterId) -> Result<Vec<NickRecord>, StorageError> {
        let mut records = Vec::new();
        for entry in self.nicks.scan_prefix(Self::user_key(user_id)) {
            let (_, value) = entry?;
            records.push(Self::deserialize::<NickRecord>(value)?);
        }
        records.sort_by(|a, b| {
            b.generated_at
                .cmp(&a.generated_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(records)
    }

    pub fn get_nick(&self, user_id: RequesterId, id: u64) -> Result<Option<NickRecord>, StorageError> {
        match self.nicks.get(Self::nick_key(user_id, id))? {
            Some(bytes) => Ok(Some(Self::deserialize(bytes)?)),
            None => Ok(None),
        }
    }

    /// Totals for a user, or `None` if they never generated anything.
    pub fn user_stats(&self, user_id: RequesterId) -> Result<Option<UserStats>, StorageError> {
        let mut total = 0u64;
        let mut games = HashSet::new();
        for entry in self.nicks.scan_prefix(Self::user_key(user_id)) {
            let (_, value) = entry?;
            let record: NickRecord = Self::deserialize(value)?;
            total += 1;
            games.insert(record.game);
        }
        if total == 0 {
            return Ok(None);
        }
        Ok(Some(UserStats {
            total,
            games: games.len() as u64,
        }))
    }

    /// Mark record `nick_id` as a favorite of `user_id`.
    ///
    /// Returns `false` when the user owns no such record.
    pub fn add_to_favorites(&self, nick_id: u64, user_id: RequesterId) -> Result<bool, StorageError> {
        let key = Self::nick_key(user_id, nick_id);
        let Some(bytes) = self.nicks.get(key)? else {
            return Ok(false);
        };
        let mut record: NickRecord = Self::deserialize(bytes)?;
        if !record.favorite {
            record.favorite = true;
            self.nicks.insert(key, Self::serialize(&record)?)?;
            self.nicks.flush()?;
        }
        Ok(true)
    }

    /// A user's favorites, newest first.
    pub fn favorites(&self, user_id: RequesterId) -> Result<Vec<NickRecord>, StorageError> {
        Ok(self
            .user_nicks(user_id)?
            .into_iter()
            .filter(|r| r.favorite)
            .collect())
    }

    pub fn user_count(&self) -> usize {
        self.users.len()
    }

    pub fn nick_count(&self) -> usize {
        self.nicks.len()
    }
}
