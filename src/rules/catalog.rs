//! Built-in game table and config-declared additions.

use super::{GameRules, PatternTag, RulesError};
use serde::{Deserialize, Serialize};

/// Forbidden class shared by most mobile titles: ASCII punctuation except `_ - .`
const PUNCTUATION: &str = r"[!@#$%^&*()+=<>?/\|{}~`]";
const PUNCTUATION_AND_SPACE: &str = r"[!@#$%^&*()+=<>?/\|{}~`\s]";
const MARKUP: &str = r"[<>/\\|{}]";

/// Rule set as written in `config.toml` under `[[games]]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRulesConfig {
    pub id: String,
    pub max_length: usize,
    pub forbidden_chars: String,
    #[serde(default)]
    pub allowed_patterns: Vec<PatternTag>,
    #[serde(default)]
    pub description: String,
}

impl GameRulesConfig {
    pub fn compile(&self) -> Result<GameEntry, RulesError> {
        let rules = GameRules::new(
            &self.id,
            self.max_length,
            &self.forbidden_chars,
            self.allowed_patterns.clone(),
            self.description.clone(),
        )?;
        Ok(GameEntry {
            id: self.id.clone(),
            rules,
        })
    }
}

#[derive(Debug, Clone)]
pub struct GameEntry {
    pub id: String,
    pub rules: GameRules,
}

/// Read-only mapping from game identifier to [`GameRules`], in display order.
#[derive(Debug, Clone)]
pub struct RuleCatalog {
    entries: Vec<GameEntry>,
}

impl RuleCatalog {
    /// The six games shipped with the bot.
    pub fn builtin() -> Self {
        use PatternTag::*;
        let table: [(&str, usize, &str, Vec<PatternTag>, &str); 6] = [
            (
                "PUBG MOBILE",
                15,
                PUNCTUATION,
                vec![Letters, Numbers, Underscore],
                "Spaces are not allowed",
            ),
            (
                "Standoff 2",
                20,
                PUNCTUATION_AND_SPACE,
                vec![Letters, Numbers, Underscore, Dot],
                "Dots and underscores are allowed",
            ),
            (
                "Roblox",
                20,
                MARKUP,
                vec![Letters, Numbers, Underscore, Spaces],
                "Spaces are allowed",
            ),
            (
                "Call of Duty",
                16,
                MARKUP,
                vec![Letters, Numbers, Underscore, Dash],
                "Dashes are allowed",
            ),
            (
                "Arena Breakout",
                12,
                PUNCTUATION_AND_SPACE,
                vec![Letters, Numbers],
                "Letters and digits only",
            ),
            (
                "Black Russia",
                15,
                PUNCTUATION,
                vec![Letters, Numbers, Underscore],
                "No special characters",
            ),
        ];

        let entries = table
            .into_iter()
            .filter_map(|(id, max, forbidden, allowed, desc)| {
                match GameRules::new(id, max, forbidden, allowed, desc) {
                    Ok(rules) => Some(GameEntry {
                        id: id.to_string(),
                        rules,
                    }),
                    Err(e) => {
                        log::error!("built-in rules for {} failed to compile: {}", id, e);
                        None
                    }
                }
            })
            .collect();
        Self { entries }
    }

    /// Built-in games followed by the config-declared ones.
    pub fn with_extra(extra: &[GameRulesConfig]) -> Result<Self, RulesError> {
        let mut catalog = Self::builtin();
        for cfg in extra {
            if catalog.entries.iter().any(|e| e.id == cfg.id) {
                return Err(RulesError::DuplicateGame(cfg.id.clone()));
            }
            catalog.entries.push(cfg.compile()?);
        }
        Ok(catalog)
    }

    /// Exact, case-sensitive lookup. Unknown games are a normal `None`.
    pub fn lookup(&self, game_id: &str) -> Option<&GameRules> {
        self.entries
            .iter()
            .find(|e| e.id == game_id)
            .map(|e| &e.rules)
    }

    /// Resolve user input: case-insensitive name, or a 1-based position in [`RuleCatalog::games`].
    pub fn find(&self, query: &str) -> Option<&GameEntry> {
        let query = query.trim();
        if let Ok(n) = query.parse::<usize>() {
            return n.checked_sub(1).and_then(|i| self.entries.get(i));
        }
        self.entries
            .iter()
            .find(|e| e.id.eq_ignore_ascii_case(query))
    }

    pub fn games(&self) -> impl Iterator<Item = &GameEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for RuleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_six_games_in_order() {
        let catalog = RuleCatalog::builtin();
        let ids: Vec<&str> = catalog.games().map(|e| e.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "PUBG MOBILE",
                "Standoff 2",
                "Roblox",
                "Call of Duty",
                "Arena Breakout",
                "Black Russia"
            ]
        );
    }

    #[test]
    fn builtin_limits() {
        let catalog = RuleCatalog::builtin();
        assert_eq!(catalog.lookup("PUBG MOBILE").unwrap().max_length, 15);
        assert_eq!(catalog.lookup("Arena Breakout").unwrap().max_length, 12);
        // Underscore wins over dash when both are allowed.
        assert_eq!(catalog.lookup("Call of Duty").unwrap().preferred_separator(), "_");
        assert_eq!(catalog.lookup("Standoff 2").unwrap().preferred_separator(), "_");
        assert_eq!(catalog.lookup("Arena Breakout").unwrap().preferred_separator(), "");
    }

    #[test]
    fn roblox_allows_spaces_standoff_does_not() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.lookup("Roblox").unwrap().is_valid("Dark Wolf"));
        assert!(!catalog.lookup("Standoff 2").unwrap().is_valid("Dark Wolf"));
        assert!(!catalog.lookup("Roblox").unwrap().is_valid("Dark\\Wolf"));
    }

    #[test]
    fn lookup_is_exact_find_is_lenient() {
        let catalog = RuleCatalog::builtin();
        assert!(catalog.lookup("roblox").is_none());
        assert_eq!(catalog.find("roblox").unwrap().id, "Roblox");
        assert_eq!(catalog.find(" 1 ").unwrap().id, "PUBG MOBILE");
        assert!(catalog.find("0").is_none());
        assert!(catalog.find("7").is_none());
        assert!(catalog.find("Minecraft").is_none());
    }

    #[test]
    fn extra_games_are_appended() {
        let extra = vec![GameRulesConfig {
            id: "Valorant".into(),
            max_length: 16,
            forbidden_chars: r"[^A-Za-z0-9 ]".into(),
            allowed_patterns: vec![PatternTag::Letters, PatternTag::Spaces],
            description: "Riot ID name".into(),
        }];
        let catalog = RuleCatalog::with_extra(&extra).unwrap();
        assert_eq!(catalog.len(), 7);
        let rules = catalog.lookup("Valorant").unwrap();
        assert!(rules.is_valid("Neon Ghost"));
        assert!(!rules.is_valid("Neon_Ghost"));
    }

    #[test]
    fn dash_only_game_joins_with_dash() {
        let extra = vec![GameRulesConfig {
            id: "Apex".into(),
            max_length: 16,
            forbidden_chars: r"[^A-Za-z0-9\-]".into(),
            allowed_patterns: vec![PatternTag::Letters, PatternTag::Dash],
            description: "Dashes only".into(),
        }];
        let catalog = RuleCatalog::with_extra(&extra).unwrap();
        let rules = catalog.lookup("Apex").unwrap();
        assert_eq!(rules.preferred_separator(), "-");
        assert!(rules.is_valid("Dark-Eagle"));
        assert!(!rules.is_valid("Dark_Eagle"));
    }

    #[test]
    fn duplicate_extra_game_is_rejected() {
        let extra = vec![GameRulesConfig {
            id: "Roblox".into(),
            max_length: 20,
            forbidden_chars: "[<>]".into(),
            allowed_patterns: vec![],
            description: String::new(),
        }];
        assert!(matches!(
            RuleCatalog::with_extra(&extra),
            Err(RulesError::DuplicateGame(_))
        ));
    }
}
