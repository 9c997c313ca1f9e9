//! Per-user conversational state: last chosen game and generation cooldown.
//!
//! Entries are pruned after an idle TTL so the maps stay bounded.
use crate::generator::RequesterId;
use std::collections::HashMap;
use std::time::{Duration, Instant};

const IDLE_TTL: Duration = Duration::from_secs(30 * 60);

#[derive(Debug)]
pub struct BotState {
    last_game: HashMap<RequesterId, (String, Instant)>,
    last_generate: HashMap<RequesterId, Instant>,
    generate_cooldown: Duration,
}

impl BotState {
    pub fn new(generate_cooldown: Duration) -> Self {
        Self {
            last_game: HashMap::new(),
            last_generate: HashMap::new(),
            generate_cooldown,
        }
    }

    pub fn prune_expired(&mut self) {
        let now = Instant::now();
        self.last_game.retain(|_, (_, t)| now.duration_since(*t) < IDLE_TTL);
        self.last_generate
            .retain(|_, t| now.duration_since(*t) < IDLE_TTL);
    }

    /// Per-user rate limit for generation commands. Records the attempt when allowed.
    pub fn allow_generate(&mut self, user: RequesterId) -> bool {
        let now = Instant::now();
        match self.last_generate.get(&user) {
            Some(last) if now.duration_since(*last) < self.generate_cooldown => false,
            _ => {
                self.last_generate.insert(user, now);
                true
            }
        }
    }

    pub fn set_last_game(&mut self, user: RequesterId, game: &str) {
        self.last_game
            .insert(user, (game.to_string(), Instant::now()));
    }

    pub fn last_game(&self, user: RequesterId) -> Option<&str> {
        self.last_game.get(&user).map(|(g, _)| g.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cooldown_blocks_second_request() {
        let mut state = BotState::new(Duration::from_secs(60));
        assert!(state.allow_generate(1));
        assert!(!state.allow_generate(1));
        assert!(state.allow_generate(2));
    }

    #[test]
    fn zero_cooldown_never_blocks() {
        let mut state = BotState::new(Duration::ZERO);
        assert!(state.allow_generate(1));
        assert!(state.allow_generate(1));
    }

    #[test]
    fn last_game_per_user() {
        let mut state = BotState::new(Duration::ZERO);
        assert_eq!(state.last_game(1), None);
        state.set_last_game(1, "Roblox");
        state.set_last_game(2, "Standoff 2");
        assert_eq!(state.last_game(1), Some("Roblox"));
        state.prune_expired();
        assert_eq!(state.last_game(2), Some("Standoff 2"));
    }
}
