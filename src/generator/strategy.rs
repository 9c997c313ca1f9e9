//! The three nickname composition styles.
//!
//! Each strategy is a pure function of the word lists, the game's rules and the
//! supplied RNG; seeding the RNG makes the output reproducible.

use super::words::WordLists;
use crate::rules::GameRules;
use rand::seq::SliceRandom;
use rand::Rng;

const NUMBER_SUFFIX_CHANCE: f64 = 0.3;
const DECORATE_CHANCE: f64 = 0.5;
const PREFIX_CHANCE: f64 = 0.5;
const LEET_CHANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// `AdjectiveNoun`, sometimes followed by a number in 1..=999.
    Simple,
    /// `Adjective<sep>Noun`, sometimes with a prefix or suffix token.
    Decorated,
    /// `AdjectiveNoun` with random leet-speak digit substitutions.
    Leet,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Simple, Strategy::Decorated, Strategy::Leet];

    /// Uniform choice among [`Strategy::ALL`].
    pub fn pick<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }

    pub fn compose<R: Rng + ?Sized>(self, words: &WordLists, rules: &GameRules, rng: &mut R) -> String {
        match self {
            Strategy::Simple => simple(words, rng),
            Strategy::Decorated => decorated(words, rules, rng),
            Strategy::Leet => leet(words, rng),
        }
    }
}

fn pick<'a, R: Rng + ?Sized>(list: &'a [String], rng: &mut R) -> &'a str {
    list.choose(rng).map(String::as_str).unwrap_or("")
}

fn simple<R: Rng + ?Sized>(words: &WordLists, rng: &mut R) -> String {
    let mut nick = format!("{}{}", pick(&words.adjectives, rng), pick(&words.nouns, rng));
    if rng.gen_bool(NUMBER_SUFFIX_CHANCE) {
        nick.push_str(&rng.gen_range(1..=999u32).to_string());
    }
    nick
}

fn decorated<R: Rng + ?Sized>(words: &WordLists, rules: &GameRules, rng: &mut R) -> String {
    let adj = pick(&words.adjectives, rng);
    let noun = pick(&words.nouns, rng);
    let nick = format!("{}{}{}", adj, rules.preferred_separator(), noun);
    if !rng.gen_bool(DECORATE_CHANCE) {
        return nick;
    }
    if rng.gen_bool(PREFIX_CHANCE) {
        format!("{}{}", pick(&words.prefixes, rng), nick)
    } else {
        format!("{}{}", nick, pick(&words.suffixes, rng))
    }
}

/// Digit look-alike for the letters eligible for substitution.
pub fn leet_digit(ch: char) -> Option<char> {
    match ch {
        'a' => Some('4'),
        'e' => Some('3'),
        'i' => Some('1'),
        'o' => Some('0'),
        's' => Some('5'),
        't' => Some('7'),
        'l' => Some('1'),
        'z' => Some('2'),
        _ => None,
    }
}

fn leet<R: Rng + ?Sized>(words: &WordLists, rng: &mut R) -> String {
    let base = format!("{}{}", pick(&words.adjectives, rng), pick(&words.nouns, rng)).to_lowercase();
    let swapped: String = base
        .chars()
        .map(|ch| match leet_digit(ch) {
            Some(digit) if rng.gen_bool(LEET_CHANCE) => digit,
            _ => ch,
        })
        .collect();
    capitalize_words(&swapped)
}

/// Uppercase the first character of every whitespace-delimited word.
pub fn capitalize_words(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut word_start = true;
    for ch in s.chars() {
        if ch.is_whitespace() {
            word_start = true;
            out.push(ch);
        } else if word_start {
            out.extend(ch.to_uppercase());
            word_start = false;
        } else {
            out.push(ch);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::PatternTag;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn rules(allowed: Vec<PatternTag>) -> GameRules {
        GameRules::new("t", 64, r"[<>]", allowed, "").unwrap()
    }

    fn one_pair() -> WordLists {
        WordLists::new(&["Steel"], &["Tiger"], &["Pro"], &["GG"])
    }

    #[test]
    fn simple_is_pair_with_optional_number() {
        let words = one_pair();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let nick = simple(&words, &mut rng);
            let rest = nick.strip_prefix("SteelTiger").expect(&nick);
            if !rest.is_empty() {
                let n: u32 = rest.parse().expect(rest);
                assert!((1..=999).contains(&n));
            }
        }
    }

    #[test]
    fn decorated_uses_preferred_separator_and_tokens() {
        let words = one_pair();
        let r = rules(vec![PatternTag::Dot, PatternTag::Dash]);
        let mut rng = StdRng::seed_from_u64(11);
        let allowed = ["Steel-Tiger", "ProSteel-Tiger", "Steel-TigerGG"];
        let mut saw = std::collections::HashSet::new();
        for _ in 0..200 {
            let nick = decorated(&words, &r, &mut rng);
            assert!(allowed.contains(&nick.as_str()), "{nick}");
            saw.insert(nick);
        }
        assert_eq!(saw.len(), 3);
    }

    #[test]
    fn decorated_without_separator_tags_joins_directly() {
        let words = one_pair();
        let r = rules(vec![PatternTag::Letters, PatternTag::Spaces]);
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let nick = decorated(&words, &r, &mut rng);
            assert!(nick.contains("SteelTiger"), "{nick}");
        }
    }

    #[test]
    fn leet_keeps_shape_and_capitalizes_first() {
        let words = one_pair();
        let mut rng = StdRng::seed_from_u64(5);
        let mut substituted = false;
        for _ in 0..100 {
            let nick = leet(&words, &mut rng);
            assert_eq!(nick.chars().count(), "steeltiger".len());
            assert!(nick.starts_with('S') || nick.starts_with('5'), "{nick}");
            for (got, orig) in nick.chars().skip(1).zip("teeltiger".chars()) {
                assert!(got == orig || Some(got) == leet_digit(orig), "{nick}");
            }
            substituted |= nick.chars().any(|c| c.is_ascii_digit());
        }
        assert!(substituted);
    }

    #[test]
    fn capitalize_words_only_touches_word_starts() {
        assert_eq!(capitalize_words("d4rkwolf"), "D4rkwolf");
        assert_eq!(capitalize_words("dark wolf"), "Dark Wolf");
        assert_eq!(capitalize_words("7iger"), "7iger");
        assert_eq!(capitalize_words(""), "");
    }

    #[test]
    fn pick_is_roughly_uniform() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut counts = [0usize; 3];
        for _ in 0..3000 {
            let picked = Strategy::pick(&mut rng);
            let idx = Strategy::ALL.iter().position(|s| *s == picked).unwrap();
            counts[idx] += 1;
        }
        for c in counts {
            assert!(c > 800, "{counts:?}");
        }
    }

    #[test]
    fn empty_lists_yield_empty_candidates() {
        let words = WordLists::new(&[], &[], &[], &[]);
        let r = rules(vec![]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(leet(&words, &mut rng), "");
        assert!(decorated(&words, &r, &mut rng).is_empty());
    }
}
