//! Plain-text reply formatting.
use crate::rules::{GameRules, RuleCatalog};
use crate::storage::{NickRecord, UserStats};
use std::fmt::Write;

pub fn game_list(catalog: &RuleCatalog) -> String {
    let mut out = String::new();
    for (i, entry) in catalog.games().enumerate() {
        let _ = writeln!(out, "{}. {}", i + 1, entry.id);
    }
    out
}

pub fn welcome(bot_name: &str, catalog: &RuleCatalog, p: char) -> String {
    format!(
        "🎮 Welcome to {bot_name}, the game nickname generator!\n\nPick a game:\n{}\nSend {p}gen <game or number>. {p}help lists all commands.",
        game_list(catalog)
    )
}

pub fn help(p: char) -> String {
    format!(
        "📖 Commands:\n\
         {p}start - start over and list games\n\
         {p}games - list supported games\n\
         {p}gen <game> - get fresh nicknames (name or list number)\n\
         {p}more - more nicknames for the last game\n\
         {p}rules - naming rules for every game\n\
         {p}stats - your generation stats\n\
         {p}history - your recent nicknames\n\
         {p}fav <id> - save a nickname to favorites\n\
         {p}favorites - show your favorites\n\n\
         Every nickname is checked against the game's rules and is never handed out twice."
    )
}

fn rules_lines(out: &mut String, rules: &GameRules) {
    let _ = writeln!(out, "• Max length: {} characters", rules.max_length);
    let _ = writeln!(out, "• {}", rules.description);
}

pub fn all_rules(catalog: &RuleCatalog) -> String {
    let mut out = String::from("📋 Rules for all games:\n");
    for entry in catalog.games() {
        let _ = writeln!(out, "\n{}:", entry.id);
        rules_lines(&mut out, &entry.rules);
    }
    out
}

/// Numbered batch with record ids, followed by the game's rules.
pub fn batch(game: &str, rules: &GameRules, nicks: &[(u64, String)], p: char) -> String {
    let mut out = format!("🎯 Nicknames for {game}:\n\n");
    for (i, (id, nick)) in nicks.iter().enumerate() {
        let _ = writeln!(out, "{}. {}  (#{})", i + 1, nick, id);
    }
    out.push_str("\nRules:\n");
    rules_lines(&mut out, rules);
    let _ = write!(out, "\n{p}more for new ones, {p}fav <id> to save one.");
    out
}

pub fn stats(stats: Option<UserStats>) -> String {
    match stats {
        Some(s) => format!(
            "📊 Your stats:\n\n• Generated: {} nicknames\n• Games: {}",
            s.total, s.games
        ),
        None => "You haven't generated any nicknames yet!".to_string(),
    }
}

pub fn favorites(records: &[NickRecord]) -> String {
    if records.is_empty() {
        return "⭐ You have no favorite nicknames yet!".to_string();
    }
    let mut out = String::from("⭐ Your favorite nicknames:\n");
    for r in records {
        let _ = write!(out, "\n• {}\n  for {}\n", r.nickname, r.game);
    }
    out
}

pub fn history(records: &[NickRecord], limit: usize) -> String {
    if records.is_empty() {
        return "You haven't generated any nicknames yet!".to_string();
    }
    let mut out = String::from("🕘 Your recent nicknames:\n\n");
    for r in records.iter().take(limit) {
        let star = if r.favorite { " ⭐" } else { "" };
        let _ = writeln!(
            out,
            "#{} {} ({}, {}){}",
            r.id,
            r.nickname,
            r.game,
            r.generated_at.format("%Y-%m-%d"),
            star
        );
    }
    out
}
