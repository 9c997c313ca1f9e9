//! Prefixed text command parser.
//!
//! Commands are recognized only when they start with the configured prefix
//! (default `/`) so ordinary chatter is ignored. Keywords are case-insensitive;
//! arguments are passed through trimmed.
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand {
    Start,
    Help,
    Rules,
    Games,
    /// Generate a batch for a game name or list number.
    Generate(String),
    /// Another batch for the last game this user generated for.
    More,
    Stats,
    History,
    Favorites,
    /// Mark a record id as favorite.
    Favorite(u64),
    Unknown,
    Invalid(String),
}

pub struct CommandParser {
    prefix: char,
}

impl CommandParser {
    pub fn new() -> Self {
        Self::with_prefix('/')
    }

    pub fn with_prefix(prefix: char) -> Self {
        Self { prefix }
    }

    pub fn prefix(&self) -> char {
        self.prefix
    }

    pub fn parse(&self, raw: &str) -> BotCommand {
        let trimmed = raw.trim();
        let Some(body) = trimmed.strip_prefix(self.prefix) else {
            return BotCommand::Unknown;
        };
        let (word, args) = match body.split_once(char::is_whitespace) {
            Some((w, rest)) => (w, rest.trim()),
            None => (body, ""),
        };
        let cmd = match word.to_ascii_lowercase().as_str() {
            "start" => BotCommand::Start,
            "help" | "?" => BotCommand::Help,
            "rules" => BotCommand::Rules,
            "games" | "list" => BotCommand::Games,
            "gen" | "generate" | "g" => {
                if args.is_empty() {
                    BotCommand::Invalid("Game name required".into())
                } else {
                    BotCommand::Generate(args.to_string())
                }
            }
            "more" | "again" => BotCommand::More,
            "stats" => BotCommand::Stats,
            "history" => BotCommand::History,
            "favorites" | "favs" => BotCommand::Favorites,
            "fav" | "favorite" => parse_record_id(args),
            _ => BotCommand::Unknown,
        };
        trace!("Parsed {:?} from '{}'", cmd, trimmed);
        cmd
    }
}

impl Default for CommandParser {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_record_id(args: &str) -> BotCommand {
    if args.is_empty() {
        return BotCommand::Invalid("Record id required".into());
    }
    match args.trim_start_matches('#').parse::<u64>() {
        Ok(id) => BotCommand::Favorite(id),
        Err(_) => BotCommand::Invalid(format!("'{}' is not a record id", args)),
    }
}
