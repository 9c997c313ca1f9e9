//! # NickForge - Game Nickname Generator Bot
//!
//! NickForge hands out random player nicknames that are guaranteed to satisfy a
//! game's naming rules, never repeats a nickname it already gave out for the
//! same game, and remembers each user's history and favorites.
//!
//! ## Features
//!
//! - **Rule Catalog**: per-game length limits and forbidden character classes for
//!   six popular titles, extensible from `config.toml`.
//! - **Three Styles**: plain `AdjectiveNoun`, decorated `Adjective_Noun` with
//!   prefix/suffix tokens, and leet-speak substitutions.
//! - **Dedup**: case-insensitive SHA-256 digests in a shared seen-set, persisted
//!   alongside the history.
//! - **History & Favorites**: sled-backed per-user records with stats.
//! - **Transport-Agnostic Bot**: prefixed text commands; a console transport is built in.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use nickforge::bot::{NickBot, Requester};
//! use nickforge::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("config.toml").await?;
//!     let mut bot = NickBot::new(&config)?;
//!     if let Some(reply) = bot.handle_message(&Requester::new(1), "/gen Roblox")? {
//!         println!("{reply}");
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`rules`] - game rule sets and the catalog
//! - [`generator`] - composition strategies, validation loop and dedup
//! - [`storage`] - user, nickname and digest persistence
//! - [`bot`] - command parsing, per-user state and replies
//! - [`config`] - configuration loading
//! - [`metrics`] - process-local counters
//! - [`logutil`] - log sanitizing helpers
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   Bot           │ ← Commands, replies, cooldowns
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Generator     │ ← Strategies + Rule Catalog + seen-set
//! └─────────────────┘
//!          │
//! ┌─────────────────┐
//! │   Storage       │ ← History persistence
//! └─────────────────┘
//! ```

pub mod bot;
pub mod config;
pub mod generator;
pub mod logutil;
pub mod metrics;
pub mod rules;
pub mod storage;
