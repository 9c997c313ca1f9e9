//! # Bot Core Module
//!
//! Transport-agnostic command handling. A transport (the console loop in
//! [`console`], or any chat network adapter) hands each incoming text to
//! [`NickBot::handle_message`] together with the sender and delivers the
//! returned reply, if any.
//!
//! ## Components
//!
//! - [`commands`] - prefixed command parser
//! - [`state`] - per-user cooldown and last chosen game
//! - [`render`] - reply formatting
//! - [`console`] - stdin/stdout transport used by `nickforge start`
//!
//! ## Flow
//!
//! ```text
//! text ─► CommandParser ─► BotCommand
//!                              │
//!             ┌────────────────┼────────────────┐
//!             ▼                ▼                ▼
//!        RuleCatalog   NicknameGenerator    NickStore
//!             └────────────────┼────────────────┘
//!                              ▼
//!                        render ─► reply
//! ```
//!
//! Generation results are persisted one record per nickname; the record ids
//! are shown next to each nickname so users can `/fav <id>` them.

pub mod commands;
pub mod console;
pub mod render;
pub mod state;

pub use commands::{BotCommand, CommandParser};
pub use state::BotState;

use crate::config::{BotConfig, Config};
use crate::generator::{DedupKey, NicknameGenerator, RequesterId, SeenSet};
use crate::logutil::{escape_log, nick_list};
use crate::metrics;
use crate::rules::RuleCatalog;
use crate::storage::NickStore;
use anyhow::{Context, Result};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::Duration;

const HISTORY_LIMIT: usize = 10;

/// Who sent a message. Only `id` is required; names are stored on first contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Requester {
    pub id: RequesterId,
    pub username: Option<String>,
    pub first_name: Option<String>,
}

impl Requester {
    pub fn new(id: RequesterId) -> Self {
        Self {
            id,
            username: None,
            first_name: None,
        }
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

pub struct NickBot {
    config: BotConfig,
    catalog: RuleCatalog,
    generator: NicknameGenerator,
    store: NickStore,
    parser: CommandParser,
    state: BotState,
    rng: StdRng,
}

impl NickBot {
    /// Build the bot from configuration: catalog, history store and a
    /// process-wide seen-set (optionally warmed from persisted digests).
    pub fn new(config: &Config) -> Result<Self> {
        let catalog = config.rule_catalog()?;
        let path = config.storage.history_path();
        let store = NickStore::open(&path)
            .with_context(|| format!("Failed to open history store at {}", path.display()))?;

        let seen = if config.bot.restore_seen_on_start {
            let keys = store.seen_keys()?;
            info!("Restored {} dedup keys from history", keys.len());
            Arc::new(SeenSet::with_keys(keys))
        } else {
            SeenSet::shared()
        };

        Ok(Self::with_parts(
            config.bot.clone(),
            catalog,
            NicknameGenerator::new(seen),
            store,
        ))
    }

    pub fn with_parts(
        config: BotConfig,
        catalog: RuleCatalog,
        generator: NicknameGenerator,
        store: NickStore,
    ) -> Self {
        let parser = CommandParser::with_prefix(config.prefix_char());
        let state = BotState::new(Duration::from_millis(config.generate_cooldown_ms));
        Self {
            config,
            catalog,
            generator,
            store,
            parser,
            state,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the RNG, e.g. with a seeded one for reproducible output.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn catalog(&self) -> &RuleCatalog {
        &self.catalog
    }

    pub fn generator(&self) -> &NicknameGenerator {
        &self.generator
    }

    pub fn store(&self) -> &NickStore {
        &self.store
    }

    /// Handle one incoming text. `Ok(None)` means stay silent (not a command,
    /// or rate limited).
    pub fn handle_message(&mut self, from: &Requester, text: &str) -> Result<Option<String>> {
        let cmd = self.parser.parse(text);
        if cmd == BotCommand::Unknown {
            return Ok(None);
        }
        debug!("user {} sent '{}' -> {:?}", from.id, escape_log(text), cmd);
        metrics::inc_commands_handled();
        self.state.prune_expired();
        let p = self.parser.prefix();

        let reply = match cmd {
            BotCommand::Start => {
                self.store
                    .add_user(from.id, from.username.as_deref(), from.first_name.as_deref())?;
                render::welcome(&self.config.name, &self.catalog, p)
            }
            BotCommand::Help => render::help(p),
            BotCommand::Rules => render::all_rules(&self.catalog),
            BotCommand::Games => format!("Supported games:\n{}", render::game_list(&self.catalog)),
            BotCommand::Generate(query) => {
                let Some(game) = self.catalog.find(&query).map(|e| e.id.clone()) else {
                    return Ok(Some(format!(
                        "Game not found! Send {p}games to see what is supported."
                    )));
                };
                return self.generate_reply(from, &game);
            }
            BotCommand::More => {
                let Some(game) = self.state.last_game(from.id).map(str::to_string) else {
                    return Ok(Some(format!("Pick a game first with {p}gen <game>.")));
                };
                return self.generate_reply(from, &game);
            }
            BotCommand::Stats => render::stats(self.store.user_stats(from.id)?),
            BotCommand::History => {
                render::history(&self.store.user_nicks(from.id)?, HISTORY_LIMIT)
            }
            BotCommand::Favorites => render::favorites(&self.store.favorites(from.id)?),
            BotCommand::Favorite(id) => {
                if self.store.add_to_favorites(id, from.id)? {
                    metrics::inc_favorites_marked();
                    let name = self
                        .store
                        .get_nick(from.id, id)?
                        .map(|r| r.nickname)
                        .unwrap_or_default();
                    format!("⭐ Saved {} to favorites.", name)
                } else {
                    format!("No nickname #{} in your history.", id)
                }
            }
            BotCommand::Invalid(reason) => format!("Invalid: {}", reason),
            BotCommand::Unknown => return Ok(None),
        };
        Ok(Some(reply))
    }

    fn generate_reply(&mut self, from: &Requester, game: &str) -> Result<Option<String>> {
        if !self.state.allow_generate(from.id) {
            debug!("user {} rate limited on generate", from.id);
            metrics::inc_rate_limited();
            return Ok(None);
        }
        self.state.set_last_game(from.id, game);

        let nicks = self.generate_and_store(from.id, game)?;
        if nicks.is_empty() {
            warn!("no nicknames left for '{}' (user {})", game, from.id);
            return Ok(Some("Could not generate nicknames. Try again.".to_string()));
        }
        // `game` came from the catalog, so the lookup only fails if it was rebuilt.
        let Some(rules) = self.catalog.lookup(game) else {
            return Ok(Some("Game not found!".to_string()));
        };
        Ok(Some(render::batch(game, rules, &nicks, self.parser.prefix())))
    }

    /// Generate a batch for `game` and persist every nickname.
    /// Returns `(record id, nickname)` pairs; empty for unknown games or an exhausted space.
    pub fn generate_and_store(&mut self, user: RequesterId, game: &str) -> Result<Vec<(u64, String)>> {
        let Some(rules) = self.catalog.lookup(game) else {
            return Ok(Vec::new());
        };
        let nicks = self.generator.generate(
            game,
            rules,
            user,
            self.config.batch_size,
            self.config.max_attempts,
            &mut self.rng,
        );
        let mut stored = Vec::with_capacity(nicks.len());
        for (i, nick) in nicks.iter().enumerate() {
            let key = DedupKey::new(game, nick);
            match self.store.add_generated_nick(user, game, nick, &key) {
                Ok(id) => stored.push((id, nick.clone())),
                Err(e) => {
                    // Names never shown to the user go back to the pool.
                    let unsaved = &nicks[i..];
                    let released = self.generator.release(game, unsaved);
                    warn!(
                        "persisting batch for '{}' (user {}) failed after {} of {}; released {}: {}",
                        game,
                        user,
                        stored.len(),
                        nicks.len(),
                        released,
                        nick_list(unsaved)
                    );
                    return Err(e.into());
                }
            }
        }
        Ok(stored)
    }
}
