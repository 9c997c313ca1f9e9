//! Word lists the composition strategies draw from.

const ADJECTIVES: [&str; 22] = [
    "Shadow", "Dark", "Ghost", "Phantom", "Steel", "Iron", "Golden", "Silent", "Swift", "Deadly",
    "Epic", "Mystic", "Furious", "Royal", "Lunar", "Solar", "Cyber", "Neon", "Void", "Blood",
    "Night", "Wolf",
];

const NOUNS: [&str; 25] = [
    "Hunter", "Killer", "Slayer", "Warrior", "Assassin", "Reaper", "Soldier", "Guardian", "Wraith",
    "Spectre", "Ninja", "Samurai", "Viking", "Knight", "Dragon", "Wolf", "Eagle", "Tiger",
    "Phoenix", "Storm", "Blade", "Arrow", "Bullet", "Sniper", "Predator",
];

const PREFIXES: [&str; 7] = ["xX", "Pro", "Mr", "Lord", "King", "Sir", "Dr"];

const SUFFIXES: [&str; 7] = ["Xx", "YT", "TV", "GG", "OP", "God", "Master"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordLists {
    pub adjectives: Vec<String>,
    pub nouns: Vec<String>,
    pub prefixes: Vec<String>,
    pub suffixes: Vec<String>,
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

impl WordLists {
    pub fn new(
        adjectives: &[&str],
        nouns: &[&str],
        prefixes: &[&str],
        suffixes: &[&str],
    ) -> Self {
        Self {
            adjectives: owned(adjectives),
            nouns: owned(nouns),
            prefixes: owned(prefixes),
            suffixes: owned(suffixes),
        }
    }

    /// Number of distinct adjective+noun pairs, ignoring decorations.
    pub fn base_combinations(&self) -> usize {
        self.adjectives.len() * self.nouns.len()
    }
}

impl Default for WordLists {
    fn default() -> Self {
        Self::new(&ADJECTIVES, &NOUNS, &PREFIXES, &SUFFIXES)
    }
}
