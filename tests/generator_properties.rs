use nickforge::generator::{DedupKey, NicknameGenerator, SeenSet, WordLists};
use nickforge::rules::{GameRules, PatternTag, RuleCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

#[test]
fn every_builtin_game_gets_compliant_unique_nicknames() {
    let catalog = RuleCatalog::builtin();
    let gen = NicknameGenerator::new(SeenSet::shared());
    let mut rng = StdRng::seed_from_u64(7);

    for entry in catalog.games() {
        let nicks = gen.generate(&entry.id, &entry.rules, 1, 5, 100, &mut rng);
        assert!(!nicks.is_empty(), "no nicknames for {}", entry.id);
        assert!(nicks.len() <= 5);
        let lowered: HashSet<String> = nicks.iter().map(|n| n.to_lowercase()).collect();
        assert_eq!(lowered.len(), nicks.len(), "{}: {nicks:?}", entry.id);
        for n in &nicks {
            assert!(n.chars().count() <= entry.rules.max_length, "{}: {n}", entry.id);
            assert!(!entry.rules.forbidden_pattern.is_match(n), "{}: {n}", entry.id);
            assert!(!n.trim().is_empty());
        }
    }
}

#[test]
fn sequential_batches_never_overlap() {
    let catalog = RuleCatalog::builtin();
    let rules = catalog.lookup("PUBG MOBILE").unwrap();
    let gen = NicknameGenerator::new(SeenSet::shared());
    let mut rng = StdRng::seed_from_u64(11);

    let first = gen.generate("PUBG MOBILE", rules, 1, 5, 100, &mut rng);
    let second = gen.generate("PUBG MOBILE", rules, 2, 5, 100, &mut rng);
    assert_eq!(first.len(), 5);
    assert_eq!(second.len(), 5);

    let first_keys: HashSet<DedupKey> = first
        .iter()
        .map(|n| DedupKey::new("PUBG MOBILE", n))
        .collect();
    for n in &second {
        assert!(!first_keys.contains(&DedupKey::new("PUBG MOBILE", n)), "{n} repeated");
    }
    assert_eq!(gen.seen().len(), 10);
}

#[test]
fn clones_share_the_seen_set() {
    let words = WordLists::new(&["Grr"], &["Bunk"], &[], &[]);
    let rules = GameRules::new("t", 7, r"[0-9]", vec![PatternTag::Letters], "").unwrap();
    let a = NicknameGenerator::with_words(words, SeenSet::shared());
    let b = a.clone();
    let mut rng = StdRng::seed_from_u64(3);
    assert_eq!(a.generate("t", &rules, 1, 5, 100, &mut rng).len(), 1);
    assert!(b.generate("t", &rules, 2, 5, 100, &mut rng).is_empty());
}

#[test]
fn restored_keys_block_earlier_names() {
    let words = WordLists::new(&["Grr"], &["Bunk"], &[], &[]);
    let rules = GameRules::new("t", 7, r"[0-9]", vec![], "").unwrap();
    let seen = SeenSet::with_keys([DedupKey::new("t", "GRRBUNK")]);
    let gen = NicknameGenerator::with_words(words, std::sync::Arc::new(seen));
    let mut rng = StdRng::seed_from_u64(5);
    assert!(gen.generate("t", &rules, 1, 5, 100, &mut rng).is_empty());
}

#[test]
fn allowed_patterns_are_not_enforced_by_validation() {
    // Arena Breakout lists only letters and numbers, but underscores are not in
    // its forbidden class, so a hand-written underscore name still passes.
    let catalog = RuleCatalog::builtin();
    let rules = catalog.lookup("Arena Breakout").unwrap();
    assert!(!rules.allows(PatternTag::Underscore));
    assert!(rules.is_valid("Dark_Eagle"));

    // Generation itself never puts a separator into such names.
    let gen = NicknameGenerator::new(SeenSet::shared());
    let mut rng = StdRng::seed_from_u64(21);
    for _ in 0..10 {
        for n in gen.generate("Arena Breakout", rules, 1, 5, 100, &mut rng) {
            assert!(!n.contains('_'), "{n}");
            assert!(!n.contains(' '), "{n}");
        }
    }
}
