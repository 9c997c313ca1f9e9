//! # Game Rule Catalog
//!
//! Every supported game carries a [`GameRules`] value describing what a legal
//! in-game nickname looks like: an inclusive character limit, a character class
//! that must never appear, and a set of [`PatternTag`]s naming the decoration
//! classes the game's style may use.
//!
//! The catalog itself lives in [`catalog`]. It is built once at start-up from
//! the built-in table plus any `[[games]]` entries in `config.toml` and is
//! read-only afterwards.
//!
//! ## Validation
//!
//! [`GameRules::check`] is the single gate every generated nickname passes
//! through. It enforces length, the forbidden class and non-blankness.
//! `allowed_patterns` is deliberately *not* part of this gate; it only steers
//! the separator choice of the decorated generation strategy.
//!
//! ```rust
//! use nickforge::rules::RuleCatalog;
//!
//! let catalog = RuleCatalog::builtin();
//! let pubg = catalog.lookup("PUBG MOBILE").unwrap();
//! assert!(pubg.is_valid("ShadowHunter"));
//! assert!(!pubg.is_valid("Shadow#Hunter"));
//! assert!(catalog.lookup("Tetris").is_none());
//! ```

pub mod catalog;

pub use catalog::{GameEntry, GameRulesConfig, RuleCatalog};

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Character-class tags a game's naming style may draw on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternTag {
    Letters,
    Numbers,
    Underscore,
    Dash,
    Dot,
    Spaces,
}

impl PatternTag {
    /// Separator priority used by the decorated strategy.
    pub const SEPARATOR_PRIORITY: [PatternTag; 3] =
        [PatternTag::Underscore, PatternTag::Dash, PatternTag::Dot];

    /// The joining character this tag stands for, if it is a separator class.
    pub fn separator(self) -> Option<&'static str> {
        match self {
            PatternTag::Underscore => Some("_"),
            PatternTag::Dash => Some("-"),
            PatternTag::Dot => Some("."),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PatternTag::Letters => "letters",
            PatternTag::Numbers => "numbers",
            PatternTag::Underscore => "underscore",
            PatternTag::Dash => "dash",
            PatternTag::Dot => "dot",
            PatternTag::Spaces => "spaces",
        }
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a nickname failed [`GameRules::check`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuleViolation {
    #[error("nickname is {len} characters long (maximum {max})")]
    TooLong { max: usize, len: usize },

    #[error("nickname contains forbidden character {0:?}")]
    ForbiddenChar(char),

    #[error("nickname is blank")]
    Blank,
}

/// Errors raised while building the catalog from configuration.
#[derive(Debug, Error)]
pub enum RulesError {
    #[error("invalid forbidden pattern for {game}: {source}")]
    InvalidPattern {
        game: String,
        #[source]
        source: regex::Error,
    },

    #[error("max_length for {0} must be at least 1")]
    ZeroMaxLength(String),

    #[error("game {0} is declared more than once")]
    DuplicateGame(String),
}

/// Validation and generation constraints for one game.
#[derive(Debug, Clone)]
pub struct GameRules {
    pub max_length: usize,
    pub forbidden_pattern: Regex,
    pub allowed_patterns: Vec<PatternTag>,
    pub description: String,
}

impl GameRules {
    /// Compile a rule set. `forbidden` is a regular expression, normally a
    /// single character class such as `[<>/\\|{}]`.
    pub fn new(
        game: &str,
        max_length: usize,
        forbidden: &str,
        allowed_patterns: Vec<PatternTag>,
        description: impl Into<String>,
    ) -> Result<Self, RulesError> {
        if max_length == 0 {
            return Err(RulesError::ZeroMaxLength(game.to_string()));
        }
        let forbidden_pattern = Regex::new(forbidden).map_err(|source| RulesError::InvalidPattern {
            game: game.to_string(),
            source,
        })?;
        Ok(Self {
            max_length,
            forbidden_pattern,
            allowed_patterns,
            description: description.into(),
        })
    }

    pub fn allows(&self, tag: PatternTag) -> bool {
        self.allowed_patterns.contains(&tag)
    }

    /// First separator in `_`, `-`, `.` order that this game allows; empty when none.
    pub fn preferred_separator(&self) -> &'static str {
        PatternTag::SEPARATOR_PRIORITY
            .iter()
            .find(|tag| self.allows(**tag))
            .and_then(|tag| tag.separator())
            .unwrap_or("")
    }

    /// Check a candidate nickname. Length is counted in characters, not bytes.
    pub fn check(&self, nickname: &str) -> Result<(), RuleViolation> {
        let len = nickname.chars().count();
        if len > self.max_length {
            return Err(RuleViolation::TooLong {
                max: self.max_length,
                len,
            });
        }
        if let Some(m) = self.forbidden_pattern.find(nickname) {
            // A match always covers at least one char for a character class;
            // an empty match (odd patterns) is reported as the first char.
            let ch = m
                .as_str()
                .chars()
                .next()
                .or_else(|| nickname[m.start()..].chars().next());
            if let Some(ch) = ch {
                return Err(RuleViolation::ForbiddenChar(ch));
            }
        }
        if nickname.trim().is_empty() {
            return Err(RuleViolation::Blank);
        }
        Ok(())
    }

    pub fn is_valid(&self, nickname: &str) -> bool {
        self.check(nickname).is_ok()
    }
}
