//! # Nickname Generator
//!
//! Produces small batches of distinct, rule-compliant nicknames for one game.
//!
//! Each attempt picks one of the three [`Strategy`] variants uniformly at random,
//! composes a candidate from the [`WordLists`], validates it with
//! [`GameRules::check`] and finally tries to record its [`DedupKey`] in the
//! shared [`SeenSet`]. The loop ends after `batch_size` accepted nicknames or
//! `max_attempts` attempts, whichever comes first.
//!
//! Running out of attempts is not an error: the caller gets whatever was
//! collected, possibly nothing, and decides how to tell the user.
//!
//! ```rust
//! use nickforge::generator::{NicknameGenerator, SeenSet};
//! use nickforge::rules::RuleCatalog;
//! use rand::SeedableRng;
//!
//! let catalog = RuleCatalog::builtin();
//! let rules = catalog.lookup("Call of Duty").unwrap();
//! let generator = NicknameGenerator::new(SeenSet::shared());
//! let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//! let nicks = generator.generate("Call of Duty", rules, 1, 5, 100, &mut rng);
//! assert!(nicks.iter().all(|n| rules.is_valid(n)));
//! ```

pub mod dedup;
pub mod strategy;
pub mod words;

pub use dedup::{DedupKey, SeenSet};
pub use strategy::Strategy;
pub use words::WordLists;

use crate::logutil::{escape_log, nick_list};
use crate::metrics;
use crate::rules::GameRules;
use log::{debug, trace};
use rand::Rng;
use std::sync::Arc;

pub const DEFAULT_BATCH_SIZE: usize = 5;
pub const DEFAULT_MAX_ATTEMPTS: usize = 100;

/// Opaque requester identity (chat user id). Only logged today.
pub type RequesterId = i64;

/// Cheap to clone; clones share the word lists and the seen-set.
#[derive(Debug, Clone)]
pub struct NicknameGenerator {
    words: Arc<WordLists>,
    seen: Arc<SeenSet>,
}

impl NicknameGenerator {
    pub fn new(seen: Arc<SeenSet>) -> Self {
        Self::with_words(WordLists::default(), seen)
    }

    pub fn with_words(words: WordLists, seen: Arc<SeenSet>) -> Self {
        Self {
            words: Arc::new(words),
            seen,
        }
    }

    pub fn words(&self) -> &WordLists {
        &self.words
    }

    pub fn seen(&self) -> &Arc<SeenSet> {
        &self.seen
    }

    /// Generate up to `batch_size` nicknames for `game_id`.
    ///
    /// Every returned nickname passes `rules`, is unique within the batch and
    /// was never accepted before for this game by any generator sharing the
    /// same seen-set.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        game_id: &str,
        rules: &GameRules,
        requester: RequesterId,
        batch_size: usize,
        max_attempts: usize,
        rng: &mut R,
    ) -> Vec<String> {
        let mut accepted = Vec::with_capacity(batch_size);
        let mut attempts = 0;

        while accepted.len() < batch_size && attempts < max_attempts {
            attempts += 1;
            let strategy = Strategy::pick(rng);
            let candidate = strategy.compose(&self.words, rules, rng);

            if let Err(why) = rules.check(&candidate) {
                trace!("{:?} candidate '{}' rejected: {}", strategy, escape_log(&candidate), why);
                continue;
            }
            if !self.seen.insert(DedupKey::new(game_id, &candidate)) {
                trace!("{:?} candidate '{}' already seen", strategy, escape_log(&candidate));
                continue;
            }
            accepted.push(candidate);
        }

        debug!(
            "generated {}/{} nicknames for '{}' (requester {}, {} attempts): {}",
            accepted.len(),
            batch_size,
            game_id,
            requester,
            attempts,
            nick_list(&accepted)
        );
        metrics::record_generation(game_id, batch_size, accepted.len(), attempts);
        accepted
    }

    /// Return nicknames to the pool, e.g. when they could not be persisted.
    /// Returns how many were actually reserved for `game_id`.
    pub fn release<S: AsRef<str>>(&self, game_id: &str, nicks: &[S]) -> usize {
        nicks
            .iter()
            .filter(|n| self.seen.release(&DedupKey::new(game_id, n.as_ref())))
            .count()
    }

    /// [`NicknameGenerator::generate`] with the default batch size, attempt
    /// budget and the thread-local RNG.
    pub fn generate_default(&self, game_id: &str, rules: &GameRules, requester: RequesterId) -> Vec<String> {
        self.generate(
            game_id,
            rules,
            requester,
            DEFAULT_BATCH_SIZE,
            DEFAULT_MAX_ATTEMPTS,
            &mut rand::thread_rng(),
        )
    }
}
