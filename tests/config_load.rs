mod common;

use nickforge::config::Config;

#[tokio::test]
async fn default_file_loads_back() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let path = tmpdir.path().join("config.toml");
    let path = path.to_string_lossy().to_string();

    Config::create_default(&path).await.expect("create default");
    let config = Config::load(&path).await.expect("load");
    assert_eq!(config.bot.name, "NickForge");
    assert_eq!(config.bot.batch_size, 5);
    assert_eq!(config.rule_catalog().unwrap().len(), 6);
}

#[tokio::test]
async fn extra_games_extend_the_catalog() {
    let tmpdir = tempfile::tempdir().expect("tempdir");
    let path = tmpdir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[bot]
name = "Test"
command_prefix = "."
batch_size = 3

[storage]
data_dir = "./data"

[logging]
level = "warn"

[[games]]
id = "Valorant"
max_length = 16
forbidden_chars = "[^A-Za-z0-9 ]"
allowed_patterns = ["letters", "numbers", "spaces"]
description = "Letters, digits and spaces"
"#,
    )
    .unwrap();

    let config = Config::load(&path.to_string_lossy()).await.expect("load");
    assert_eq!(config.bot.prefix_char(), '.');
    let catalog = config.rule_catalog().unwrap();
    assert_eq!(catalog.len(), 7);
    assert_eq!(catalog.find("7").unwrap().id, "Valorant");
    let rules = catalog.find("valorant").unwrap().rules.clone();
    assert!(rules.is_valid("Neon Wraith"));
    assert!(!rules.is_valid("Neon_Wraith"));
}

#[test]
fn invalid_files_are_rejected() {
    let tmpdir = tempfile::tempdir().expect("tempdir");

    let bad_batch = tmpdir.path().join("batch.toml");
    let mut config = common::temp_config(&tmpdir);
    config.bot.batch_size = 50;
    std::fs::write(&bad_batch, toml::to_string_pretty(&config).unwrap()).unwrap();
    let err = tokio_test::block_on(Config::load(&bad_batch.to_string_lossy())).unwrap_err();
    assert!(err.to_string().contains("batch_size"), "{err}");

    let bad_regex = tmpdir.path().join("regex.toml");
    let mut config = common::temp_config(&tmpdir);
    config.games.push(nickforge::rules::GameRulesConfig {
        id: "Broken".into(),
        max_length: 10,
        forbidden_chars: "[a-".into(),
        allowed_patterns: vec![],
        description: String::new(),
    });
    std::fs::write(&bad_regex, toml::to_string_pretty(&config).unwrap()).unwrap();
    let loaded = tokio_test::block_on(Config::load(&bad_regex.to_string_lossy())).unwrap();
    assert!(loaded.rule_catalog().is_err());

    let missing = tmpdir.path().join("missing.toml");
    assert!(tokio_test::block_on(Config::load(&missing.to_string_lossy())).is_err());
}
