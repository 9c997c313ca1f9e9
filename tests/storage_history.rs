use nickforge::generator::DedupKey;
use nickforge::storage::{NickStore, UserStats};

fn add(store: &NickStore, user: i64, game: &str, nick: &str) -> u64 {
    store
        .add_generated_nick(user, game, nick, &DedupKey::new(game, nick))
        .expect("add nick")
}

#[test]
fn stats_count_records_and_distinct_games() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = NickStore::open(tmpdir.path().join("history")).expect("open");

    assert_eq!(store.user_stats(7).unwrap(), None);
    add(&store, 7, "Roblox", "NeonWraith");
    add(&store, 7, "Roblox", "Dark Eagle");
    add(&store, 7, "PUBG MOBILE", "IronWolf42");
    add(&store, 8, "Roblox", "SirStorm");

    assert_eq!(
        store.user_stats(7).unwrap(),
        Some(UserStats { total: 3, games: 2 })
    );
    // Unregistered users get a bare record on first generation.
    let user = store.get_user(7).unwrap().expect("user record");
    assert_eq!(user.total_generated, 3);
    assert!(user.username.is_none());
    assert_eq!(store.user_count(), 2);
    assert_eq!(store.nick_count(), 4);
}

#[test]
fn add_user_keeps_first_registration() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = NickStore::open(tmpdir.path().join("history")).expect("open");
    store.add_user(1, Some("neo"), Some("Thomas")).unwrap();
    add(&store, 1, "Roblox", "NeonWraith");
    store.add_user(1, Some("other"), None).unwrap();

    let user = store.get_user(1).unwrap().unwrap();
    assert_eq!(user.username.as_deref(), Some("neo"));
    assert_eq!(user.total_generated, 1);
}

#[test]
fn favorites_belong_to_their_owner() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let store = NickStore::open(tmpdir.path().join("history")).expect("open");
    let first = add(&store, 1, "Roblox", "NeonWraith");
    let second = add(&store, 1, "Call of Duty", "Steel-Viking");
    let foreign = add(&store, 2, "Roblox", "GhostTiger");

    assert!(store.add_to_favorites(first, 1).unwrap());
    assert!(store.add_to_favorites(second, 1).unwrap());
    // Marking twice is fine.
    assert!(store.add_to_favorites(second, 1).unwrap());
    // Another user's record and unknown ids are refused.
    assert!(!store.add_to_favorites(foreign, 1).unwrap());
    assert!(!store.add_to_favorites(9_999, 1).unwrap());

    let favs: Vec<String> = store
        .favorites(1)
        .unwrap()
        .into_iter()
        .map(|r| r.nickname)
        .collect();
    assert_eq!(favs, vec!["Steel-Viking".to_string(), "NeonWraith".to_string()]);
    assert!(store.favorites(2).unwrap().is_empty());
}

#[test]
fn digests_survive_reopen() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let path = tmpdir.path().join("history");
    let key = DedupKey::new("Roblox", "NeonWraith");
    {
        let store = NickStore::open(&path).expect("open");
        add(&store, 1, "Roblox", "NeonWraith");
        // Same digest recorded once even when handed out again.
        add(&store, 2, "Roblox", "neonwraith");
        assert!(store.check_nick_exists(&key).unwrap());
    }

    let store = NickStore::open(&path).expect("reopen");
    let keys = store.seen_keys().unwrap();
    assert_eq!(keys, vec![key]);
    assert!(!store
        .check_nick_exists(&DedupKey::new("PUBG MOBILE", "NeonWraith"))
        .unwrap());
    assert_eq!(store.user_nicks(1).unwrap()[0].nickname, "NeonWraith");
}
